use async_trait::async_trait;
use bon::Builder;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error, info};

use crate::models::types::DocumentId;
use crate::traits::document_source::DocumentSource;

pub const DEFAULT_API_BASE_URL: &str = "https://docs.googleapis.com";

/// Wire representation of a fetched document. Every sub-structure is optional
/// or defaulted: absence here is data for the converter's lossy walk, not an
/// error.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocsDocument {
    pub title: String,
    pub body: Body,
    pub inline_objects: HashMap<String, InlineObject>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Body {
    pub content: Vec<StructuralElement>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StructuralElement {
    pub paragraph: Option<Paragraph>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Paragraph {
    pub elements: Vec<ParagraphElement>,
    pub paragraph_style: ParagraphStyle,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphStyle {
    pub named_style_type: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParagraphElement {
    pub text_run: Option<TextRun>,
    pub inline_object_element: Option<InlineObjectElement>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct TextRun {
    pub content: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineObjectElement {
    pub inline_object_id: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineObject {
    pub object_id: String,
    pub inline_object_properties: Option<InlineObjectProperties>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineObjectProperties {
    pub embedded_object: Option<EmbeddedObject>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbeddedObject {
    pub description: String,
    pub image_properties: Option<ImageProperties>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageProperties {
    pub content_uri: String,
}

/// Read-only client for the documents API.
#[derive(Builder)]
pub struct DocsClient {
    client: Client,
    api_base_url: String,
    access_token: String,
}

impl DocsClient {
    async fn get_document(
        &self,
        id: &DocumentId,
    ) -> Result<DocsDocument, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!(
            "{}/v1/documents/{}",
            self.api_base_url.trim_end_matches('/'),
            id.as_str()
        );
        info!(url = %url, "docs: GET document");
        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "docs: fetch error");
            return Err(format!("document fetch failed: {}", status).into());
        }
        let doc = res.json::<DocsDocument>().await?;
        debug!(
            title = %doc.title,
            blocks = doc.body.content.len(),
            inline_objects = doc.inline_objects.len(),
            "docs: fetched"
        );
        Ok(doc)
    }
}

#[async_trait]
impl DocumentSource for DocsClient {
    async fn fetch_document(
        &self,
        id: &DocumentId,
    ) -> Result<DocsDocument, Box<dyn std::error::Error + Send + Sync>> {
        self.get_document(id).await
    }
}
