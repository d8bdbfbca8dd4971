//! Accessibility-permission port interface

use async_trait::async_trait;

/// Port for querying the OS accessibility permission.
///
/// Not granted is a recognized mode, not an error: the owner polls on
/// a coarse interval until granted, then arms the hotkey path.
#[async_trait]
pub trait AccessibilityProbe: Send + Sync {
    async fn is_granted(&self) -> bool;
}

/// Blanket implementation for boxed probe types
#[async_trait]
impl AccessibilityProbe for Box<dyn AccessibilityProbe> {
    async fn is_granted(&self) -> bool {
        self.as_ref().is_granted().await
    }
}
