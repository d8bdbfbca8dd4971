//! Cross-platform pasteboard adapter using arboard
//!
//! Works on Windows, macOS, and Linux (X11/Wayland). The OS offers no
//! change counter through arboard, so the change token is a digest of
//! the readable contents.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::application::ports::{ChangeToken, Pasteboard, PasteboardError};
use crate::domain::clipboard::{ClipboardContent, PasteboardSnapshot};

/// Cross-platform pasteboard adapter using arboard
pub struct ArboardPasteboard;

impl ArboardPasteboard {
    /// Create a new arboard pasteboard adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for ArboardPasteboard {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Pasteboard for ArboardPasteboard {
    async fn change_token(&self) -> Result<ChangeToken, PasteboardError> {
        // arboard operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| PasteboardError::Unavailable(e.to_string()))?;

            let mut hasher = Sha256::new();
            if let Ok(image) = clipboard.get_image() {
                hasher.update(b"image");
                hasher.update((image.width as u64).to_le_bytes());
                hasher.update((image.height as u64).to_le_bytes());
                hasher.update(&image.bytes);
            } else if let Ok(text) = clipboard.get_text() {
                hasher.update(b"text");
                hasher.update(text.as_bytes());
            } else {
                hasher.update(b"empty");
            }
            Ok(ChangeToken::new(hasher.finalize().into()))
        })
        .await
        .map_err(|e| PasteboardError::ReadFailed(format!("Task join error: {}", e)))?
    }

    async fn read(&self) -> Result<Option<PasteboardSnapshot>, PasteboardError> {
        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| PasteboardError::Unavailable(e.to_string()))?;

            if let Ok(image) = clipboard.get_image() {
                let data = encode_png(&image)?;
                return Ok(Some(PasteboardSnapshot::Image { data }));
            }

            match clipboard.get_text() {
                Ok(text) => Ok(Some(PasteboardSnapshot::Text(text))),
                Err(arboard::Error::ContentNotAvailable) => Ok(None),
                Err(e) => Err(PasteboardError::ReadFailed(e.to_string())),
            }
        })
        .await
        .map_err(|e| PasteboardError::ReadFailed(format!("Task join error: {}", e)))?
    }

    async fn write(&self, content: &ClipboardContent) -> Result<(), PasteboardError> {
        let content = content.clone();

        tokio::task::spawn_blocking(move || {
            let mut clipboard = arboard::Clipboard::new()
                .map_err(|e| PasteboardError::Unavailable(e.to_string()))?;

            match &content {
                ClipboardContent::Text(text) => clipboard.set_text(text),
                // arboard has no rich-text type; the plain form pastes
                ClipboardContent::RichText { plain, .. } => clipboard.set_text(plain),
                ClipboardContent::Url { url, .. } => clipboard.set_text(url),
                ClipboardContent::FileUrls(paths) => clipboard.set_text(paths.join("\n")),
                ClipboardContent::Image { data, .. } => {
                    let image = decode_png(data)?;
                    clipboard.set_image(image)
                }
            }
            .map_err(|e| PasteboardError::WriteFailed(e.to_string()))
        })
        .await
        .map_err(|e| PasteboardError::WriteFailed(format!("Task join error: {}", e)))?
    }
}

/// Encode arboard's raw RGBA frame as a PNG blob
fn encode_png(image: &arboard::ImageData<'_>) -> Result<Vec<u8>, PasteboardError> {
    let rgba = image::RgbaImage::from_raw(
        image.width as u32,
        image.height as u32,
        image.bytes.clone().into_owned(),
    )
    .ok_or_else(|| PasteboardError::ReadFailed("image dimensions mismatch".to_string()))?;

    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(rgba)
        .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| PasteboardError::ReadFailed(e.to_string()))?;
    Ok(out)
}

/// Decode a PNG blob back into arboard's raw RGBA frame
fn decode_png(data: &[u8]) -> Result<arboard::ImageData<'static>, PasteboardError> {
    let decoded = image::load_from_memory(data)
        .map_err(|e| PasteboardError::WriteFailed(e.to_string()))?
        .to_rgba8();
    Ok(arboard::ImageData {
        width: decoded.width() as usize,
        height: decoded.height() as usize,
        bytes: decoded.into_raw().into(),
    })
}
