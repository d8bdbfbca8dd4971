//! Accessibility-permission probe
//!
//! macOS gates synthetic key events behind the accessibility
//! permission; other platforms have no equivalent gate, so the probe
//! reports granted there.

use async_trait::async_trait;

use crate::application::ports::AccessibilityProbe;

#[cfg(target_os = "macos")]
#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn AXIsProcessTrusted() -> bool;
}

/// Accessibility probe for the current platform
pub struct SystemAccessibilityProbe;

impl SystemAccessibilityProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemAccessibilityProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccessibilityProbe for SystemAccessibilityProbe {
    async fn is_granted(&self) -> bool {
        #[cfg(target_os = "macos")]
        {
            unsafe { AXIsProcessTrusted() }
        }
        #[cfg(not(target_os = "macos"))]
        {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_creates_successfully() {
        let _probe = SystemAccessibilityProbe::new();
    }

    #[cfg(not(target_os = "macos"))]
    #[tokio::test]
    async fn non_macos_is_always_granted() {
        assert!(SystemAccessibilityProbe::new().is_granted().await);
    }
}
