//! Clipboard change monitor

use crate::domain::clipboard::{classify, ClipboardContent};
use crate::domain::focus::{AppHandle, ExclusionSet};

use super::ports::{ChangeToken, Pasteboard};

/// Polls the pasteboard for changes and classifies new content.
///
/// A pure producer: holds no history, only the last observed change
/// token and the exclusion set. Read failures are treated as "no
/// content" and never surface.
#[derive(Debug)]
pub struct ClipboardMonitor {
    last_token: Option<ChangeToken>,
    exclusions: ExclusionSet,
}

impl ClipboardMonitor {
    pub fn new(exclusions: ExclusionSet) -> Self {
        Self {
            last_token: None,
            exclusions,
        }
    }

    /// One poll cycle.
    ///
    /// `source` is the app that owned the clipboard change (the
    /// foreground app at poll time, looked up by the caller). Content
    /// from excluded apps advances the change token but is never
    /// forwarded, so it can never become a history item.
    pub async fn poll<P: Pasteboard>(
        &mut self,
        pasteboard: &P,
        source: Option<&AppHandle>,
    ) -> Option<ClipboardContent> {
        let token = pasteboard.change_token().await.ok()?;
        if self.last_token.as_ref() == Some(&token) {
            return None;
        }

        let snapshot = pasteboard.read().await.ok()??;
        let content = classify(snapshot)?;

        if let Some(app) = source {
            if self.exclusions.contains(app) {
                self.last_token = Some(token);
                return None;
            }
        }

        self.last_token = Some(token);
        Some(content)
    }

    /// Adopt the pasteboard's current token without capturing.
    ///
    /// Called after the coordinator writes a selection back to the
    /// pasteboard, so our own write is not re-captured next cycle.
    pub async fn resync<P: Pasteboard>(&mut self, pasteboard: &P) {
        if let Ok(token) = pasteboard.change_token().await {
            self.last_token = Some(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clipboard::PasteboardSnapshot;
    use crate::application::ports::PasteboardError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockPasteboard {
        token: Mutex<u64>,
        snapshot: Mutex<Option<PasteboardSnapshot>>,
        fail_reads: bool,
    }

    impl MockPasteboard {
        fn with_text(text: &str) -> Self {
            Self {
                token: Mutex::new(1),
                snapshot: Mutex::new(Some(PasteboardSnapshot::Text(text.to_string()))),
                fail_reads: false,
            }
        }

        fn set_text(&self, text: &str) {
            *self.snapshot.lock().unwrap() = Some(PasteboardSnapshot::Text(text.to_string()));
            *self.token.lock().unwrap() += 1;
        }
    }

    #[async_trait]
    impl Pasteboard for MockPasteboard {
        async fn change_token(&self) -> Result<ChangeToken, PasteboardError> {
            if self.fail_reads {
                return Err(PasteboardError::Unavailable("mock".to_string()));
            }
            let mut digest = [0u8; 32];
            digest[..8].copy_from_slice(&self.token.lock().unwrap().to_le_bytes());
            Ok(ChangeToken::new(digest))
        }

        async fn read(&self) -> Result<Option<PasteboardSnapshot>, PasteboardError> {
            if self.fail_reads {
                return Err(PasteboardError::ReadFailed("mock".to_string()));
            }
            Ok(self.snapshot.lock().unwrap().clone())
        }

        async fn write(&self, _content: &ClipboardContent) -> Result<(), PasteboardError> {
            Ok(())
        }
    }

    fn foreign_app(identifier: &str) -> AppHandle {
        AppHandle {
            pid: Some(42),
            identifier: Some(identifier.to_string()),
            name: None,
        }
    }

    #[tokio::test]
    async fn first_poll_captures_current_content() {
        let pasteboard = MockPasteboard::with_text("hello");
        let mut monitor = ClipboardMonitor::new(ExclusionSet::default());
        let content = monitor.poll(&pasteboard, None).await;
        assert_eq!(content, Some(ClipboardContent::Text("hello".to_string())));
    }

    #[tokio::test]
    async fn unchanged_token_yields_nothing() {
        let pasteboard = MockPasteboard::with_text("hello");
        let mut monitor = ClipboardMonitor::new(ExclusionSet::default());
        monitor.poll(&pasteboard, None).await;
        assert!(monitor.poll(&pasteboard, None).await.is_none());
    }

    #[tokio::test]
    async fn new_content_is_captured_after_change() {
        let pasteboard = MockPasteboard::with_text("first");
        let mut monitor = ClipboardMonitor::new(ExclusionSet::default());
        monitor.poll(&pasteboard, None).await;
        pasteboard.set_text("second");
        let content = monitor.poll(&pasteboard, None).await;
        assert_eq!(content, Some(ClipboardContent::Text("second".to_string())));
    }

    #[tokio::test]
    async fn read_failure_is_silent() {
        let pasteboard = MockPasteboard {
            token: Mutex::new(1),
            snapshot: Mutex::new(None),
            fail_reads: true,
        };
        let mut monitor = ClipboardMonitor::new(ExclusionSet::default());
        assert!(monitor.poll(&pasteboard, None).await.is_none());
    }

    #[tokio::test]
    async fn excluded_source_advances_token_without_capture() {
        let pasteboard = MockPasteboard::with_text("secret");
        let mut monitor =
            ClipboardMonitor::new(ExclusionSet::new(vec!["com.example.vault".to_string()]));
        let source = foreign_app("com.example.vault");

        assert!(monitor.poll(&pasteboard, Some(&source)).await.is_none());
        // Token consumed: the same change does not resurface for a
        // non-excluded source either.
        assert!(monitor.poll(&pasteboard, None).await.is_none());
    }

    #[tokio::test]
    async fn non_excluded_source_is_captured() {
        let pasteboard = MockPasteboard::with_text("public");
        let mut monitor =
            ClipboardMonitor::new(ExclusionSet::new(vec!["com.example.vault".to_string()]));
        let source = foreign_app("com.example.editor");
        assert!(monitor.poll(&pasteboard, Some(&source)).await.is_some());
    }

    #[tokio::test]
    async fn resync_swallows_own_write() {
        let pasteboard = MockPasteboard::with_text("a");
        let mut monitor = ClipboardMonitor::new(ExclusionSet::default());
        monitor.poll(&pasteboard, None).await;

        // Simulate our own write-back
        pasteboard.set_text("a-again");
        monitor.resync(&pasteboard).await;
        assert!(monitor.poll(&pasteboard, None).await.is_none());
    }

    #[tokio::test]
    async fn empty_text_is_no_content() {
        let pasteboard = MockPasteboard::with_text("   ");
        let mut monitor = ClipboardMonitor::new(ExclusionSet::default());
        assert!(monitor.poll(&pasteboard, None).await.is_none());
    }
}
