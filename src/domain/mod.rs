//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod focus;
pub mod hotkey;
pub mod popup;

// Re-export common types
pub use clipboard::{classify, ClipboardContent, ClipboardItem, ContentFilter, HistoryStore};
pub use config::AppConfig;
pub use error::*;
pub use focus::{AppHandle, ExclusionSet, FocusTracker};
pub use hotkey::{CaptureOutcome, CaptureState, HotkeyBinding, HotkeyCaptureMachine};
pub use popup::{PopupSession, PopupState};
