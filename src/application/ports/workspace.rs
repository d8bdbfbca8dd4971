//! Workspace port interface

use async_trait::async_trait;

use crate::domain::focus::AppHandle;

/// Port for foreground-app observation and activation
#[async_trait]
pub trait Workspace: Send + Sync {
    /// The app that currently has keyboard focus, if known
    async fn frontmost(&self) -> Option<AppHandle>;

    /// Bring `app` to the foreground; false when activation could not
    /// be requested (unknown app, platform refusal).
    async fn activate(&self, app: &AppHandle) -> bool;
}

/// Blanket implementation for boxed workspace types
#[async_trait]
impl Workspace for Box<dyn Workspace> {
    async fn frontmost(&self) -> Option<AppHandle> {
        self.as_ref().frontmost().await
    }

    async fn activate(&self, app: &AppHandle) -> bool {
        self.as_ref().activate(app).await
    }
}
