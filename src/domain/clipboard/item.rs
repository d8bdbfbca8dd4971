//! Clipboard history entry

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::content::ClipboardContent;

/// A single captured clipboard entry.
///
/// Immutable once created; its position in history is a store concern.
#[derive(Debug, Clone)]
pub struct ClipboardItem {
    pub id: Uuid,
    pub content: ClipboardContent,
    pub captured_at: DateTime<Utc>,
}

impl ClipboardItem {
    /// Create a new item capturing `content` now
    pub fn new(content: ClipboardContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            captured_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_items_get_distinct_ids() {
        let a = ClipboardItem::new(ClipboardContent::Text("x".to_string()));
        let b = ClipboardItem::new(ClipboardContent::Text("x".to_string()));
        assert_ne!(a.id, b.id);
    }
}
