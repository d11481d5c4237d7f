//! Photo ingestion: turns a selected file into an embeddable data URI.

use std::path::Path;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use fitlog_core::errors::{JournalError, JournalResult};

/// Reads a photo file into a `data:` URI.
///
/// Reads run to completion or failure; there is no cancellation.
#[async_trait]
pub trait PhotoReader: Send + Sync {
    async fn read_data_uri(&self, path: &Path) -> JournalResult<String>;
}

/// Reads photos from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPhotoReader;

#[async_trait]
impl PhotoReader for FsPhotoReader {
    async fn read_data_uri(&self, path: &Path) -> JournalResult<String> {
        let mime = mime_guess::from_path(path).first_or_octet_stream();
        if mime.type_() != mime_guess::mime::IMAGE {
            return Err(JournalError::PhotoIngestion(format!(
                "{} is not an image ({})",
                path.display(),
                mime.essence_str()
            )));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| JournalError::PhotoIngestion(format!("{}: {}", path.display(), e)))?;
        if bytes.is_empty() {
            return Err(JournalError::PhotoIngestion(format!(
                "{} is empty",
                path.display()
            )));
        }

        tracing::debug!("Read {} bytes of {} from {}", bytes.len(), mime, path.display());
        Ok(encode_data_uri(mime.essence_str(), &bytes))
    }
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
