//! Application configuration value object

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::clipboard::{MAX_HISTORY_DEPTH, MIN_HISTORY_DEPTH};
use crate::domain::focus::ExclusionSet;
use crate::domain::hotkey::{modifiers, HotkeyBinding, KEY_CODE_V};

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub history_depth: Option<u32>,
    pub move_selected_pastes_to_top: Option<bool>,
    pub always_paste_plain_text: Option<bool>,
    pub excluded_apps: Option<Vec<String>>,
    pub hotkey_key_code: Option<u32>,
    pub hotkey_modifiers: Option<u32>,
    pub poll_interval_ms: Option<u64>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            history_depth: Some(10),
            move_selected_pastes_to_top: Some(true),
            always_paste_plain_text: Some(false),
            excluded_apps: Some(Vec::new()),
            hotkey_key_code: Some(KEY_CODE_V),
            hotkey_modifiers: Some(modifiers::COMMAND | modifiers::SHIFT),
            poll_interval_ms: Some(100),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            history_depth: other.history_depth.or(self.history_depth),
            move_selected_pastes_to_top: other
                .move_selected_pastes_to_top
                .or(self.move_selected_pastes_to_top),
            always_paste_plain_text: other
                .always_paste_plain_text
                .or(self.always_paste_plain_text),
            excluded_apps: other.excluded_apps.or(self.excluded_apps),
            hotkey_key_code: other.hotkey_key_code.or(self.hotkey_key_code),
            hotkey_modifiers: other.hotkey_modifiers.or(self.hotkey_modifiers),
            poll_interval_ms: other.poll_interval_ms.or(self.poll_interval_ms),
        }
    }

    /// History depth clamped to the allowed range, or 10 if not set
    pub fn history_depth_or_default(&self) -> usize {
        (self.history_depth.unwrap_or(10) as usize).clamp(MIN_HISTORY_DEPTH, MAX_HISTORY_DEPTH)
    }

    /// Whether pasted items jump to the top of history, or true if not set
    pub fn move_to_top_or_default(&self) -> bool {
        self.move_selected_pastes_to_top.unwrap_or(true)
    }

    /// Whether rich text pastes as plain text, or false if not set
    pub fn plain_text_or_default(&self) -> bool {
        self.always_paste_plain_text.unwrap_or(false)
    }

    /// Configured exclusion set (possibly empty)
    pub fn exclusions(&self) -> ExclusionSet {
        ExclusionSet::new(self.excluded_apps.clone().unwrap_or_default())
    }

    /// The configured hotkey binding, or cmd+shift+V if not set
    pub fn hotkey_or_default(&self) -> HotkeyBinding {
        match (self.hotkey_key_code, self.hotkey_modifiers) {
            (Some(key_code), Some(mask)) => HotkeyBinding::new(key_code, mask),
            _ => HotkeyBinding::default(),
        }
    }

    /// Clipboard poll cadence, or 100 ms if not set.
    ///
    /// Floored at 20 ms so a bad config cannot spin the poll loop.
    pub fn poll_interval_or_default(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.unwrap_or(100).max(20))
    }
}
