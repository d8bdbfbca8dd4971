//! Hotkey-registration port interface

use async_trait::async_trait;

use crate::domain::hotkey::HotkeyBinding;

/// Port for global-hotkey registration.
///
/// Registration failure is a boolean, not an error: the OS may deny
/// the binding and the owner decides whether to retry or surface it.
#[async_trait]
pub trait HotkeyRegistry: Send + Sync {
    /// Register `binding` as the live global hotkey
    async fn register(&self, binding: &HotkeyBinding) -> bool;

    /// Remove any live registration; idempotent
    async fn unregister(&self);
}

/// Blanket implementation for boxed registry types
#[async_trait]
impl HotkeyRegistry for Box<dyn HotkeyRegistry> {
    async fn register(&self, binding: &HotkeyBinding) -> bool {
        self.as_ref().register(binding).await
    }

    async fn unregister(&self) {
        self.as_ref().unregister().await
    }
}
