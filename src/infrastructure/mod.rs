//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the OS clipboard, input synthesis, hotkey
//! registration, and config storage.

pub mod accessibility;
pub mod config;
pub mod hotkey;
pub mod keystroke;
pub mod pasteboard;
pub mod workspace;

// Re-export adapters
pub use accessibility::SystemAccessibilityProbe;
pub use config::XdgConfigStore;
pub use hotkey::GlobalHotkeyService;
pub use keystroke::{create_paste_keystroke, EnigoPasteKey};
pub use pasteboard::{create_pasteboard, ArboardPasteboard};
pub use workspace::{create_workspace, NoopWorkspace};
