//! Application layer - Use cases and port interfaces
//!
//! Contains the core engine operations and trait definitions
//! for external system interactions.

pub mod coordinator;
pub mod events;
pub mod monitor;
pub mod ports;

// Re-export use cases
pub use coordinator::{EngineSettings, EngineStatus, ItemView, PopupCoordinator};
pub use events::EngineEvent;
pub use monitor::ClipboardMonitor;
