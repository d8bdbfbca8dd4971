//! Cross-platform paste-keystroke adapter using enigo
//!
//! Sends the platform paste chord: cmd+V on macOS, ctrl+V elsewhere.

use async_trait::async_trait;

use crate::application::ports::{KeystrokeError, PasteKeystroke};

/// Cross-platform paste-keystroke adapter using enigo
pub struct EnigoPasteKey;

impl EnigoPasteKey {
    /// Create a new enigo paste-keystroke adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnigoPasteKey {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasteKeystroke for EnigoPasteKey {
    async fn send_paste(&self) -> Result<(), KeystrokeError> {
        // enigo operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            use enigo::{Direction, Enigo, Key, Keyboard, Settings};

            let mut enigo = Enigo::new(&Settings::default())
                .map_err(|e| KeystrokeError::Unavailable(format!("Failed to create enigo: {}", e)))?;

            #[cfg(target_os = "macos")]
            let chord = Key::Meta;
            #[cfg(not(target_os = "macos"))]
            let chord = Key::Control;

            enigo
                .key(chord, Direction::Press)
                .map_err(|e| KeystrokeError::SendFailed(format!("Failed to press modifier: {}", e)))?;
            let tapped = enigo.key(Key::Unicode('v'), Direction::Click);
            let released = enigo.key(chord, Direction::Release);

            tapped.map_err(|e| KeystrokeError::SendFailed(format!("Failed to tap V: {}", e)))?;
            released.map_err(|e| {
                KeystrokeError::SendFailed(format!("Failed to release modifier: {}", e))
            })?;
            Ok(())
        })
        .await
        .map_err(|e| KeystrokeError::SendFailed(format!("Task join error: {}", e)))?
    }
}
