//! Paste-keystroke port interface

use async_trait::async_trait;
use thiserror::Error;

/// Keystroke errors
#[derive(Debug, Clone, Error)]
pub enum KeystrokeError {
    #[error("Keystroke backend unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to send paste keystroke: {0}")]
    SendFailed(String),
}

/// Port for simulating a single paste keystroke in the focused app
#[async_trait]
pub trait PasteKeystroke: Send + Sync {
    /// Send one paste chord (cmd+V / ctrl+V) to the focused window
    async fn send_paste(&self) -> Result<(), KeystrokeError>;
}

/// Blanket implementation for boxed keystroke types
#[async_trait]
impl PasteKeystroke for Box<dyn PasteKeystroke> {
    async fn send_paste(&self) -> Result<(), KeystrokeError> {
        self.as_ref().send_paste().await
    }
}
