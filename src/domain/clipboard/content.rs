//! Clipboard content model and snapshot classification

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a bare absolute URL (the whole string, no surrounding prose)
static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)([-a-zA-Z0-9]+\.)+[a-zA-Z0-9]+([-a-zA-Z0-9@:%_+.~#?&/=]*)$")
        .expect("URL regex is valid")
});

/// Raw pasteboard payload as read from the OS, before classification.
///
/// Adapters produce whichever variants the platform clipboard exposes;
/// the classifier decides what (if anything) becomes history content.
#[derive(Debug, Clone)]
pub enum PasteboardSnapshot {
    Text(String),
    RichText { plain: String, rtf: Vec<u8> },
    Image { data: Vec<u8> },
    FileList(Vec<String>),
}

/// Typed clipboard content held in history.
#[derive(Debug, Clone)]
pub enum ClipboardContent {
    Text(String),
    /// Formatted payload is opaque; only `plain` participates in
    /// search and equality.
    RichText { plain: String, rtf: Vec<u8> },
    Image { data: Vec<u8>, previewable: bool },
    Url { url: String, fetched_title: Option<String> },
    FileUrls(Vec<String>),
}

impl PartialEq for ClipboardContent {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::RichText { plain: a, .. }, Self::RichText { plain: b, .. }) => a == b,
            (Self::Image { data: a, .. }, Self::Image { data: b, .. }) => a == b,
            (Self::Url { url: a, .. }, Self::Url { url: b, .. }) => a == b,
            (Self::FileUrls(a), Self::FileUrls(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for ClipboardContent {}

impl ClipboardContent {
    /// Short machine label for the variant
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::RichText { .. } => "rich-text",
            Self::Image { .. } => "image",
            Self::Url { .. } => "url",
            Self::FileUrls(_) => "file-list",
        }
    }

    /// Human-readable preview used for list rendering and search.
    pub fn preview_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::RichText { plain, .. } => plain.clone(),
            Self::Url { url, fetched_title } => match fetched_title {
                Some(title) => format!("{} ({})", title, url),
                None => url.clone(),
            },
            Self::Image { data, .. } => format!("Image ({})", human_readable_size(data.len())),
            Self::FileUrls(paths) => paths.join(", "),
        }
    }

    /// The payload actually written on paste when plain-text paste is forced.
    pub fn plain_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::RichText { plain, .. } => Some(plain),
            Self::Url { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Filter over content variants shown in the popup list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentFilter {
    #[default]
    All,
    Text,
    Images,
    Urls,
    Files,
}

impl ContentFilter {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Text => "text",
            Self::Images => "images",
            Self::Urls => "urls",
            Self::Files => "files",
        }
    }

    /// Pure predicate over the content variant.
    ///
    /// Plain and rich text are both "text"; URLs are their own bucket.
    pub fn matches(&self, content: &ClipboardContent) -> bool {
        match self {
            Self::All => true,
            Self::Text => matches!(
                content,
                ClipboardContent::Text(_) | ClipboardContent::RichText { .. }
            ),
            Self::Images => matches!(content, ClipboardContent::Image { .. }),
            Self::Urls => matches!(content, ClipboardContent::Url { .. }),
            Self::Files => matches!(content, ClipboardContent::FileUrls(_)),
        }
    }
}

impl std::str::FromStr for ContentFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "text" => Ok(Self::Text),
            "images" => Ok(Self::Images),
            "urls" => Ok(Self::Urls),
            "files" => Ok(Self::Files),
            other => Err(format!(
                "invalid filter '{}'. Valid filters: all, text, images, urls, files",
                other
            )),
        }
    }
}

impl std::fmt::Display for ContentFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a raw pasteboard snapshot into typed content.
///
/// Returns `None` for empty or degenerate payloads; such polls are
/// treated as "no content" by the monitor.
pub fn classify(snapshot: PasteboardSnapshot) -> Option<ClipboardContent> {
    match snapshot {
        PasteboardSnapshot::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }
            if URL_REGEX.is_match(trimmed) {
                return Some(ClipboardContent::Url {
                    url: trimmed.to_string(),
                    fetched_title: None,
                });
            }
            Some(ClipboardContent::Text(text))
        }
        PasteboardSnapshot::RichText { plain, rtf } => {
            if plain.trim().is_empty() {
                return None;
            }
            Some(ClipboardContent::RichText { plain, rtf })
        }
        PasteboardSnapshot::Image { data } => {
            if data.is_empty() {
                return None;
            }
            let previewable = is_previewable_image(&data);
            Some(ClipboardContent::Image { data, previewable })
        }
        PasteboardSnapshot::FileList(paths) => {
            let paths: Vec<String> = paths.into_iter().filter(|p| !p.is_empty()).collect();
            if paths.is_empty() {
                return None;
            }
            Some(ClipboardContent::FileUrls(paths))
        }
    }
}

/// Whether the blob starts with a recognized raster-image signature
fn is_previewable_image(data: &[u8]) -> bool {
    data.starts_with(&[0x89, b'P', b'N', b'G'])
        || data.starts_with(&[0xFF, 0xD8, 0xFF])
        || data.starts_with(b"GIF8")
        || data.starts_with(b"II*\0")
        || data.starts_with(b"MM\0*")
}

/// Format a byte count for previews (e.g., "12.3 KB")
fn human_readable_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let bytes = bytes as f64;
    if bytes >= MB {
        format!("{:.1} MB", bytes / MB)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{} B", bytes as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_text() {
        let content = classify(PasteboardSnapshot::Text("hello".to_string())).unwrap();
        assert_eq!(content, ClipboardContent::Text("hello".to_string()));
    }

    #[test]
    fn classify_empty_text_is_none() {
        assert!(classify(PasteboardSnapshot::Text(String::new())).is_none());
        assert!(classify(PasteboardSnapshot::Text("   \n".to_string())).is_none());
    }

    #[test]
    fn classify_url() {
        let content =
            classify(PasteboardSnapshot::Text("https://example.com/page".to_string())).unwrap();
        match content {
            ClipboardContent::Url { url, fetched_title } => {
                assert_eq!(url, "https://example.com/page");
                assert!(fetched_title.is_none());
            }
            other => panic!("expected url, got {:?}", other),
        }
    }

    #[test]
    fn classify_prose_with_url_inside_is_text() {
        let content =
            classify(PasteboardSnapshot::Text("see https://example.com now".to_string())).unwrap();
        assert!(matches!(content, ClipboardContent::Text(_)));
    }

    #[test]
    fn classify_rich_text_keeps_plain_for_equality() {
        let a = classify(PasteboardSnapshot::RichText {
            plain: "hello".to_string(),
            rtf: vec![1, 2, 3],
        })
        .unwrap();
        let b = classify(PasteboardSnapshot::RichText {
            plain: "hello".to_string(),
            rtf: vec![9, 9, 9],
        })
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn classify_empty_image_is_none() {
        assert!(classify(PasteboardSnapshot::Image { data: vec![] }).is_none());
    }

    #[test]
    fn classify_png_is_previewable() {
        let data = vec![0x89, b'P', b'N', b'G', 0, 0];
        match classify(PasteboardSnapshot::Image { data }).unwrap() {
            ClipboardContent::Image { previewable, .. } => assert!(previewable),
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn classify_unknown_blob_is_not_previewable() {
        let data = vec![0x00, 0x01, 0x02];
        match classify(PasteboardSnapshot::Image { data }).unwrap() {
            ClipboardContent::Image { previewable, .. } => assert!(!previewable),
            other => panic!("expected image, got {:?}", other),
        }
    }

    #[test]
    fn classify_file_list_drops_empty_entries() {
        let content = classify(PasteboardSnapshot::FileList(vec![
            "/tmp/a.txt".to_string(),
            String::new(),
        ]))
        .unwrap();
        assert_eq!(content, ClipboardContent::FileUrls(vec!["/tmp/a.txt".to_string()]));
    }

    #[test]
    fn classify_empty_file_list_is_none() {
        assert!(classify(PasteboardSnapshot::FileList(vec![])).is_none());
    }

    #[test]
    fn filter_matches_variants() {
        let text = ClipboardContent::Text("x".to_string());
        let rich = ClipboardContent::RichText {
            plain: "x".to_string(),
            rtf: vec![],
        };
        let image = ClipboardContent::Image {
            data: vec![1],
            previewable: false,
        };
        let url = ClipboardContent::Url {
            url: "https://example.com".to_string(),
            fetched_title: None,
        };
        let files = ClipboardContent::FileUrls(vec!["/tmp/a".to_string()]);

        assert!(ContentFilter::All.matches(&text));
        assert!(ContentFilter::Text.matches(&text));
        assert!(ContentFilter::Text.matches(&rich));
        assert!(!ContentFilter::Text.matches(&url));
        assert!(ContentFilter::Images.matches(&image));
        assert!(ContentFilter::Urls.matches(&url));
        assert!(ContentFilter::Files.matches(&files));
        assert!(!ContentFilter::Files.matches(&text));
    }

    #[test]
    fn filter_parses_from_str() {
        assert_eq!("all".parse::<ContentFilter>().unwrap(), ContentFilter::All);
        assert_eq!("Images".parse::<ContentFilter>().unwrap(), ContentFilter::Images);
        assert!("bogus".parse::<ContentFilter>().is_err());
    }

    #[test]
    fn preview_text_for_url_includes_title_when_fetched() {
        let url = ClipboardContent::Url {
            url: "https://example.com".to_string(),
            fetched_title: Some("Example".to_string()),
        };
        assert_eq!(url.preview_text(), "Example (https://example.com)");
    }

    #[test]
    fn image_preview_shows_size() {
        let image = ClipboardContent::Image {
            data: vec![0u8; 2048],
            previewable: true,
        };
        assert_eq!(image.preview_text(), "Image (2.0 KB)");
    }

    #[test]
    fn image_equality_ignores_previewable_flag() {
        let a = ClipboardContent::Image {
            data: vec![1, 2],
            previewable: true,
        };
        let b = ClipboardContent::Image {
            data: vec![1, 2],
            previewable: false,
        };
        assert_eq!(a, b);
    }
}
