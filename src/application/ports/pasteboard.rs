//! Pasteboard port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::clipboard::{ClipboardContent, PasteboardSnapshot};

/// Pasteboard errors
#[derive(Debug, Clone, Error)]
pub enum PasteboardError {
    #[error("Pasteboard unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to read pasteboard: {0}")]
    ReadFailed(String),

    #[error("Failed to write pasteboard: {0}")]
    WriteFailed(String),
}

/// Opaque token identifying the pasteboard's current contents.
///
/// Two equal tokens mean "unchanged since last check"; the token
/// carries no other meaning. The OS offers no lock over the shared
/// clipboard, so change detection is comparison, not synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeToken([u8; 32]);

impl ChangeToken {
    pub fn new(digest: [u8; 32]) -> Self {
        Self(digest)
    }
}

impl From<[u8; 32]> for ChangeToken {
    fn from(digest: [u8; 32]) -> Self {
        Self(digest)
    }
}

/// Port for clipboard read/write access
#[async_trait]
pub trait Pasteboard: Send + Sync {
    /// Token for the current pasteboard contents
    async fn change_token(&self) -> Result<ChangeToken, PasteboardError>;

    /// Read the current snapshot; `None` when the pasteboard holds no
    /// type this port understands.
    async fn read(&self) -> Result<Option<PasteboardSnapshot>, PasteboardError>;

    /// Write content, replacing the pasteboard's contents
    async fn write(&self, content: &ClipboardContent) -> Result<(), PasteboardError>;
}

/// Blanket implementation for boxed pasteboard types
#[async_trait]
impl Pasteboard for Box<dyn Pasteboard> {
    async fn change_token(&self) -> Result<ChangeToken, PasteboardError> {
        self.as_ref().change_token().await
    }

    async fn read(&self) -> Result<Option<PasteboardSnapshot>, PasteboardError> {
        self.as_ref().read().await
    }

    async fn write(&self, content: &ClipboardContent) -> Result<(), PasteboardError> {
        self.as_ref().write(content).await
    }
}
