pub mod models;
pub mod services;
pub mod traits;

use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::types::DocumentId;
use crate::services::auth::{ClientSecret, ensure_access_token};
use crate::services::convert::Document;
use crate::services::docs::{DEFAULT_API_BASE_URL, DocsClient};
use crate::services::settings::{AppConfig, load_config};
use crate::services::writer::write_files;
use crate::traits::document_source::DocumentSource;

/// The one document this binary exports; single-document by design.
pub const DOCUMENT_ID: &str = "1KqZd2pXXTppIx6GaIAmdS80ax-eZX1Sp3bptmg3HMYg";

/// High-level entrypoint: load config, init logging, export the fixed document
pub async fn run_with_config_path(path: &str) -> std::io::Result<()> {
    // Load YAML config; a missing file falls back to built-in defaults
    let cfg: AppConfig = if Path::new(path).exists() {
        load_config(path).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to load {}: {}", path, e),
            )
        })?
    } else {
        AppConfig::default()
    };

    // Initialize structured logging (default to info if RUST_LOG not set)
    let log_spec = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(log_spec))
        .with_target(false)
        .compact()
        .try_init();

    run_export(cfg, DocumentId::from(DOCUMENT_ID)).await
}

/// Export runner: authenticates, fetches the document, converts it and writes outputs
pub async fn run_export(cfg: AppConfig, document_id: DocumentId) -> std::io::Result<()> {
    info!(document_id = %document_id, "export starting");

    let secret_path = cfg
        .auth
        .client_secret_path
        .as_deref()
        .unwrap_or("credentials.json");
    let secret = ClientSecret::load(Path::new(secret_path))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let timeout = Duration::from_secs(cfg.fetch.request_timeout_secs.unwrap_or(30));
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let token_path = cfg.auth.token_path.as_deref().unwrap_or(".token");
    let token = ensure_access_token(&secret, Path::new(token_path), &http)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let docs = DocsClient::builder()
        .client(http.clone())
        .api_base_url(
            cfg.fetch
                .api_base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
        )
        .access_token(token.access_token)
        .build();

    let out_dir = cfg.output.dir.clone().unwrap_or_else(|| "tmp".to_string());
    export_document(&docs, &document_id, Path::new(&out_dir), &http)
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
}

/// Fetch, convert and write, over any document source.
pub async fn export_document(
    source: &dyn DocumentSource,
    document_id: &DocumentId,
    out_dir: &Path,
    http: &reqwest::Client,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let wire = source.fetch_document(document_id).await?;
    info!(title = %wire.title, "export: fetched document");

    let doc = Document::from_wire(&wire);
    info!(
        elements = doc.elements.len(),
        images = doc.images.len(),
        "export: converted"
    );

    write_files(&doc, out_dir, http).await?;
    info!("export finished");
    Ok(())
}
