use base64::{engine::general_purpose::STANDARD, Engine};
use std::fs;
use std::io;
use std::path::Path;

const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// A base64-encoded image ready to inline into a model request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String,
}

impl EncodedImage {
    /// Parses a data URL such as `data:image/png;base64,iVBOR...`.
    ///
    /// Only the payload after the first comma is kept. A string without a
    /// comma is taken to be the bare base64 payload.
    pub fn from_data_url(data_url: &str) -> Self {
        match data_url.split_once(',') {
            Some((header, payload)) => {
                let mime_type = header
                    .strip_prefix("data:")
                    .and_then(|rest| rest.split(';').next())
                    .filter(|mime| !mime.is_empty())
                    .unwrap_or(DEFAULT_MIME_TYPE);
                Self {
                    mime_type: mime_type.to_string(),
                    data: payload.to_string(),
                }
            }
            None => Self {
                mime_type: DEFAULT_MIME_TYPE.to_string(),
                data: data_url.to_string(),
            },
        }
    }

    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Reads and encodes an image file, guessing the mime type from the
    /// extension.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        Ok(Self::from_bytes(&bytes, mime_type_for_path(path)))
    }
}

fn mime_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => DEFAULT_MIME_TYPE,
    }
}
