//! Paste-keystroke infrastructure module

mod enigo;

pub use enigo::EnigoPasteKey;

use crate::application::ports::PasteKeystroke;

/// Create the default paste-keystroke adapter for the current platform
pub fn create_paste_keystroke() -> Box<dyn PasteKeystroke> {
    Box::new(EnigoPasteKey::new())
}
