//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod accessibility;
pub mod config;
pub mod hotkey;
pub mod keystroke;
pub mod pasteboard;
pub mod workspace;

// Re-export common types
pub use accessibility::AccessibilityProbe;
pub use config::ConfigStore;
pub use hotkey::HotkeyRegistry;
pub use keystroke::{KeystrokeError, PasteKeystroke};
pub use pasteboard::{ChangeToken, Pasteboard, PasteboardError};
pub use workspace::Workspace;
