//! Workspace infrastructure module
//!
//! Frontmost-app tracking and activation: NSWorkspace on macOS, a
//! no-op adapter elsewhere.

#[cfg(target_os = "macos")]
mod macos;
mod noop;

#[cfg(target_os = "macos")]
pub use macos::MacWorkspace;
pub use noop::NoopWorkspace;

use crate::application::ports::Workspace;

/// Create the workspace adapter for the current platform
pub fn create_workspace() -> Box<dyn Workspace> {
    #[cfg(target_os = "macos")]
    {
        Box::new(MacWorkspace::new())
    }
    #[cfg(not(target_os = "macos"))]
    {
        Box::new(NoopWorkspace::new())
    }
}
