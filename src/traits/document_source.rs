use async_trait::async_trait;

use crate::models::types::DocumentId;
use crate::services::docs::DocsDocument;

/// Seam over the remote document fetch so the export pipeline can be driven
/// against any backend the tests stand up.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Returns the structured representation of the document with the given id.
    async fn fetch_document(
        &self,
        id: &DocumentId,
    ) -> Result<DocsDocument, Box<dyn std::error::Error + Send + Sync>>;
}
