use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct AuthConfig {
    pub client_secret_path: Option<String>, // default credentials.json
    pub token_path: Option<String>,         // default .token
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct FetchConfig {
    pub api_base_url: Option<String>, // default https://docs.googleapis.com
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct OutputConfig {
    pub dir: Option<String>, // must pre-exist; default tmp
}

pub fn load_config<P: AsRef<Path>>(
    path: P,
) -> Result<AppConfig, Box<dyn std::error::Error + Send + Sync>> {
    let content = fs::read_to_string(path)?;
    let cfg: AppConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_full_config() {
        let yaml = r#"
auth:
  client_secret_path: secrets/credentials.json
  token_path: secrets/.token
fetch:
  api_base_url: http://localhost:8080
  request_timeout_secs: 5
output:
  dir: out
"#;
        let cfg: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            cfg.auth.client_secret_path.as_deref(),
            Some("secrets/credentials.json")
        );
        assert_eq!(cfg.auth.token_path.as_deref(), Some("secrets/.token"));
        assert_eq!(
            cfg.fetch.api_base_url.as_deref(),
            Some("http://localhost:8080")
        );
        assert_eq!(cfg.fetch.request_timeout_secs, Some(5));
        assert_eq!(cfg.output.dir.as_deref(), Some("out"));
    }

    #[test]
    fn empty_sections_fall_back_to_none() {
        let cfg: AppConfig = serde_yaml::from_str("output:\n  dir: tmp\n").unwrap();
        assert_eq!(cfg.auth.client_secret_path, None);
        assert_eq!(cfg.fetch.api_base_url, None);
        assert_eq!(cfg.output.dir.as_deref(), Some("tmp"));
    }
}
