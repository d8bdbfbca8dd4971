//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::clipboard::{MAX_HISTORY_DEPTH, MIN_HISTORY_DEPTH};
use crate::domain::error::ConfigError;
use crate::domain::hotkey::modifiers;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    // Validate value based on key type
    validate_config_value(key, value)?;

    // Load existing config
    let mut config = store.load().await?;

    // Update the appropriate field
    match key {
        "history_depth" => config.history_depth = value.parse().ok(),
        "move_selected_pastes_to_top" => {
            config.move_selected_pastes_to_top = Some(parse_bool_validated(key, value)?)
        }
        "always_paste_plain_text" => {
            config.always_paste_plain_text = Some(parse_bool_validated(key, value)?)
        }
        "excluded_apps" => config.excluded_apps = Some(parse_app_list(value)),
        "hotkey_key_code" => config.hotkey_key_code = value.parse().ok(),
        "hotkey_modifiers" => config.hotkey_modifiers = value.parse().ok(),
        "poll_interval_ms" => config.poll_interval_ms = value.parse().ok(),
        _ => unreachable!(), // Already validated
    }

    // Save config
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;

    let value = match key {
        "history_depth" => config.history_depth.map(|v| v.to_string()),
        "move_selected_pastes_to_top" => {
            config.move_selected_pastes_to_top.map(|b| b.to_string())
        }
        "always_paste_plain_text" => config.always_paste_plain_text.map(|b| b.to_string()),
        "excluded_apps" => config.excluded_apps.map(|apps| apps.join(",")),
        "hotkey_key_code" => config.hotkey_key_code.map(|v| v.to_string()),
        "hotkey_modifiers" => config.hotkey_modifiers.map(|v| v.to_string()),
        "poll_interval_ms" => config.poll_interval_ms.map(|v| v.to_string()),
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    presenter.key_value(
        "history_depth",
        &config
            .history_depth
            .map(|v| v.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value(
        "move_selected_pastes_to_top",
        &config
            .move_selected_pastes_to_top
            .map(|b| b.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value(
        "always_paste_plain_text",
        &config
            .always_paste_plain_text
            .map(|b| b.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value(
        "excluded_apps",
        &config
            .excluded_apps
            .map(|apps| apps.join(","))
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value(
        "hotkey_key_code",
        &config
            .hotkey_key_code
            .map(|v| v.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value(
        "hotkey_modifiers",
        &config
            .hotkey_modifiers
            .map(|v| v.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value(
        "poll_interval_ms",
        &config
            .poll_interval_ms
            .map(|v| v.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "history_depth" => {
            let depth: usize = value.parse().map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Value must be a number".to_string(),
            })?;
            if !(MIN_HISTORY_DEPTH..=MAX_HISTORY_DEPTH).contains(&depth) {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: format!(
                        "Value must be between {} and {}",
                        MIN_HISTORY_DEPTH, MAX_HISTORY_DEPTH
                    ),
                });
            }
        }
        "move_selected_pastes_to_top" | "always_paste_plain_text" => {
            parse_bool_validated(key, value)?;
        }
        "hotkey_key_code" | "poll_interval_ms" => {
            value
                .parse::<u64>()
                .map_err(|_| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be a number".to_string(),
                })?;
        }
        "hotkey_modifiers" => {
            let mask: u32 = value.parse().map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Value must be a modifier mask".to_string(),
            })?;
            if mask & modifiers::ALL == 0 {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Mask must include at least one of cmd(1), alt(2), ctrl(4), shift(8)"
                        .to_string(),
                });
            }
        }
        _ => {} // excluded_apps accepts any comma-separated list
    }
    Ok(())
}

fn parse_bool_validated(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be 'true' or 'false'".to_string(),
    })
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

/// Parse a comma-separated app identifier list
fn parse_app_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert_eq!(parse_bool("yes"), Ok(true));
        assert_eq!(parse_bool("no"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn validate_history_depth_range() {
        assert!(validate_config_value("history_depth", "1").is_ok());
        assert!(validate_config_value("history_depth", "100").is_ok());
        assert!(validate_config_value("history_depth", "0").is_err());
        assert!(validate_config_value("history_depth", "101").is_err());
        assert!(validate_config_value("history_depth", "lots").is_err());
    }

    #[test]
    fn validate_booleans() {
        assert!(validate_config_value("always_paste_plain_text", "true").is_ok());
        assert!(validate_config_value("move_selected_pastes_to_top", "maybe").is_err());
    }

    #[test]
    fn validate_modifier_mask_needs_a_modifier() {
        assert!(validate_config_value("hotkey_modifiers", "9").is_ok());
        assert!(validate_config_value("hotkey_modifiers", "0").is_err());
        assert!(validate_config_value("hotkey_modifiers", "x").is_err());
    }

    #[test]
    fn app_list_splits_and_trims() {
        let apps = parse_app_list("com.example.vault, Passwords,,  ");
        assert_eq!(
            apps,
            vec!["com.example.vault".to_string(), "Passwords".to_string()]
        );
    }
}
