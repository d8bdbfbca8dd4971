//! Shared CLI plumbing

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::infrastructure::XdgConfigStore;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Load and merge configuration: defaults < file < CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    AppConfig::defaults().merge(file_config).merge(cli_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cli_overrides_defaults() {
        let cli_config = AppConfig {
            history_depth: Some(42),
            ..Default::default()
        };
        let merged = load_merged_config(cli_config).await;
        assert_eq!(merged.history_depth_or_default(), 42);
        // Untouched fields fall back to defaults
        assert!(merged.move_to_top_or_default());
    }
}
