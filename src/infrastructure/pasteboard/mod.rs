//! Pasteboard infrastructure module

mod arboard;

pub use arboard::ArboardPasteboard;

use crate::application::ports::Pasteboard;

/// Create the default pasteboard adapter for the current platform
pub fn create_pasteboard() -> Box<dyn Pasteboard> {
    Box::new(ArboardPasteboard::new())
}
