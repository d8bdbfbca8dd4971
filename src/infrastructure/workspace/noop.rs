//! No-op workspace adapter
//!
//! Used on platforms without frontmost-app tracking. The engine
//! degrades gracefully: no previous app means the restoration chain
//! and auto-paste are skipped.

use async_trait::async_trait;

use crate::application::ports::Workspace;
use crate::domain::focus::AppHandle;

/// Workspace adapter that observes and activates nothing
pub struct NoopWorkspace;

impl NoopWorkspace {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Workspace for NoopWorkspace {
    async fn frontmost(&self) -> Option<AppHandle> {
        None
    }

    async fn activate(&self, _app: &AppHandle) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_reports_nothing() {
        let workspace = NoopWorkspace::new();
        assert!(workspace.frontmost().await.is_none());
        assert!(!workspace.activate(&AppHandle::with_pid(1)).await);
    }
}
