use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::{error, info};

/// Read-only scope for the documents API. Changing scopes invalidates any
/// previously cached token file.
pub const DOCS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/documents.readonly";

const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Client secret file as issued for an installed application.
#[derive(Debug, Deserialize, Clone)]
pub struct ClientSecret {
    pub installed: InstalledApp,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InstalledApp {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

impl ClientSecret {
    /// Reads and parses the client secret file; missing or malformed is fatal.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let data = fs::read_to_string(path).map_err(|e| {
            format!(
                "unable to read client secret file {}: {}",
                path.display(),
                e
            )
        })?;
        let secret: ClientSecret = serde_json::from_str(&data)
            .map_err(|e| format!("unable to parse client secret file: {}", e))?;
        Ok(secret)
    }

    fn redirect_uri(&self) -> &str {
        self.installed
            .redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or(OOB_REDIRECT_URI)
    }

    /// Authorization URL the user opens in a browser to obtain a one-time code.
    pub fn auth_code_url(&self) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&state=state-token",
            self.installed.auth_uri,
            urlencoding::encode(&self.installed.client_id),
            urlencoding::encode(self.redirect_uri()),
            urlencoding::encode(DOCS_READONLY_SCOPE),
        )
    }
}

/// Cached token, stored on disk as one JSON object.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoredToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredToken {
    pub fn load(path: &Path) -> Result<StoredToken, Box<dyn std::error::Error + Send + Sync>> {
        let data = fs::read_to_string(path)?;
        let token: StoredToken = serde_json::from_str(&data)?;
        Ok(token)
    }

    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(path = %path.display(), "auth: saving credential file");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// A token without an expiry timestamp is treated as still valid.
    pub fn is_expired(&self) -> bool {
        match self.expiry {
            Some(t) => t <= Utc::now(),
            None => false,
        }
    }
}

/// Wire shape of a token-endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    // Refresh responses usually omit the refresh token; carry the previous one forward.
    fn into_stored(self, previous_refresh: Option<String>) -> StoredToken {
        StoredToken {
            access_token: self.access_token,
            token_type: self.token_type,
            refresh_token: self.refresh_token.or(previous_refresh),
            expiry: self.expires_in.map(|secs| Utc::now() + Duration::seconds(secs)),
        }
    }
}

/// Returns a usable access token: the cached one if still valid, a refreshed
/// one if the cache holds an expired token with a refresh token, otherwise the
/// interactive authorization-code flow. The exchange and refresh paths persist
/// the result back to `token_path`.
pub async fn ensure_access_token(
    secret: &ClientSecret,
    token_path: &Path,
    client: &Client,
) -> Result<StoredToken, Box<dyn std::error::Error + Send + Sync>> {
    match StoredToken::load(token_path) {
        Ok(token) if !token.is_expired() => {
            info!("auth: using cached token");
            Ok(token)
        }
        Ok(token) => match token.refresh_token.clone() {
            Some(refresh) => {
                info!("auth: cached token expired, refreshing");
                let refreshed = refresh_access_token(secret, client, &refresh).await?;
                refreshed.save(token_path)?;
                Ok(refreshed)
            }
            None => {
                info!("auth: cached token expired and not refreshable");
                token_from_prompt(secret, token_path, client).await
            }
        },
        Err(_) => token_from_prompt(secret, token_path, client).await,
    }
}

/// Interactive flow: print the authorization URL, block on stdin for the code,
/// exchange it and persist the token.
async fn token_from_prompt(
    secret: &ClientSecret,
    token_path: &Path,
    client: &Client,
) -> Result<StoredToken, Box<dyn std::error::Error + Send + Sync>> {
    let auth_url = secret.auth_code_url();
    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "Go to the following link in your browser then type the authorization code:\n{}",
        auth_url
    )?;
    stdout.flush()?;

    let mut code = String::new();
    io::stdin().lock().read_line(&mut code)?;
    let code = code.trim();
    if code.is_empty() {
        return Err("no authorization code provided".into());
    }

    let token = exchange_code(secret, client, code).await?;
    token.save(token_path)?;
    Ok(token)
}

/// Exchanges a one-time authorization code for a token.
pub async fn exchange_code(
    secret: &ClientSecret,
    client: &Client,
    code: &str,
) -> Result<StoredToken, Box<dyn std::error::Error + Send + Sync>> {
    let form = [
        ("code", code),
        ("client_id", secret.installed.client_id.as_str()),
        ("client_secret", secret.installed.client_secret.as_str()),
        ("redirect_uri", secret.redirect_uri()),
        ("grant_type", "authorization_code"),
    ];
    let res = client
        .post(&secret.installed.token_uri)
        .form(&form)
        .send()
        .await?;
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "auth: code exchange failed");
        return Err(format!("token exchange failed: {}", status).into());
    }
    let response = res.json::<TokenResponse>().await?;
    info!("auth: code exchange ok");
    Ok(response.into_stored(None))
}

/// Obtains a fresh access token via the refresh-token grant.
pub async fn refresh_access_token(
    secret: &ClientSecret,
    client: &Client,
    refresh_token: &str,
) -> Result<StoredToken, Box<dyn std::error::Error + Send + Sync>> {
    let form = [
        ("refresh_token", refresh_token),
        ("client_id", secret.installed.client_id.as_str()),
        ("client_secret", secret.installed.client_secret.as_str()),
        ("grant_type", "refresh_token"),
    ];
    let res = client
        .post(&secret.installed.token_uri)
        .form(&form)
        .send()
        .await?;
    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        error!(status = %status, body = %body, "auth: refresh failed");
        return Err(format!("token refresh failed: {}", status).into());
    }
    let response = res.json::<TokenResponse>().await?;
    info!("auth: refresh ok");
    Ok(response.into_stored(Some(refresh_token.to_string())))
}
