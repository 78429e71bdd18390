use reqwest::Client;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::services::convert::{Document, DocumentImage, Element};

/// Writes `<dir>/<title>.md` and then downloads every embedded image to
/// `<dir>/<object_id>.jpg`, in element order. `dir` must already exist and be
/// a directory; the first failed write or download aborts the remainder, and
/// already-written files are left in place.
pub async fn write_files(
    doc: &Document,
    dir: &Path,
    client: &Client,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let meta = fs::metadata(dir)
        .map_err(|e| format!("output dir {}: {}", dir.display(), e))?;
    if !meta.is_dir() {
        return Err(format!("{} is not a directory", dir.display()).into());
    }

    let markdown = doc.markdown();
    // the title is used as-is; a filesystem-unsafe title surfaces as a write error
    let md_path = dir.join(format!("{}.md", doc.title));
    info!(path = %md_path.display(), bytes = markdown.len(), "writer: writing markdown");
    fs::write(&md_path, markdown)?;

    for element in &doc.elements {
        if let Element::Image(image) = element {
            download_image(image, dir, client).await?;
        }
    }

    Ok(())
}

/// One GET per image; the response body is written verbatim under the object
/// id with a fixed `.jpg` extension, whatever the actual encoding is.
async fn download_image(
    image: &DocumentImage,
    dir: &Path,
    client: &Client,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    info!(id = %image.object_id, uri = %image.content_uri, "writer: downloading image");
    let res = client.get(&image.content_uri).send().await?;
    let status = res.status();
    if status.is_success() {
        debug!(status = %status, "writer: image response");
    } else {
        warn!(id = %image.object_id, status = %status, "writer: image response not successful, writing body anyway");
    }
    let bytes = res.bytes().await?;

    let path = dir.join(format!("{}.jpg", image.object_id));
    fs::write(&path, &bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "writer: image written");
    Ok(())
}
