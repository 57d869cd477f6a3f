//! `revealer config set|unset` key handling.

use std::fmt;

use crate::core::config::Config;

/// Errors that can occur when modifying configuration settings.
#[derive(Debug, PartialEq, Eq)]
pub enum SettingError {
    /// The provided setting key is not recognized.
    UnknownKey(String),
    /// The provided value could not be parsed as a boolean.
    InvalidBoolean(String),
    /// The provided value is not a whole number of milliseconds.
    InvalidInterval(String),
    /// The provided theme name is not one of the built-in themes.
    UnknownTheme(String),
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingError::UnknownKey(key) => {
                write!(f, "Unknown config key: {key} (expected one of: {})", KEYS.join(", "))
            }
            SettingError::InvalidBoolean(input) => {
                write!(f, "Invalid boolean value: {input} (use on/off, true/false or yes/no)")
            }
            SettingError::InvalidInterval(input) => {
                write!(f, "Invalid tick interval: {input} (expected milliseconds)")
            }
            SettingError::UnknownTheme(input) => {
                write!(f, "Unknown theme: {input} (expected dark or light)")
            }
        }
    }
}

impl std::error::Error for SettingError {}

pub const KEYS: [&str; 4] = ["tick-interval-ms", "markdown", "syntax", "theme"];

/// Parse a boolean value from user input.
///
/// Accepts: on/off, true/false, yes/no (case-insensitive).
pub fn parse_bool(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Keys are accepted with either dashes or underscores.
fn canonical_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

pub fn set(config: &mut Config, key: &str, value: &str) -> Result<String, SettingError> {
    let value = value.trim();
    match canonical_key(key).as_str() {
        "tick-interval-ms" => {
            let ms = value
                .parse::<u64>()
                .map_err(|_| SettingError::InvalidInterval(value.to_string()))?;
            config.tick_interval_ms = Some(ms);
        }
        "markdown" => {
            let enabled =
                parse_bool(value).ok_or_else(|| SettingError::InvalidBoolean(value.to_string()))?;
            config.markdown = Some(enabled);
        }
        "syntax" => {
            let enabled =
                parse_bool(value).ok_or_else(|| SettingError::InvalidBoolean(value.to_string()))?;
            config.syntax = Some(enabled);
        }
        "theme" => {
            let name = value.to_lowercase();
            if name != "dark" && name != "light" {
                return Err(SettingError::UnknownTheme(value.to_string()));
            }
            config.theme = Some(name);
        }
        _ => return Err(SettingError::UnknownKey(key.to_string())),
    }
    Ok(format!("Set {} to: {value}", canonical_key(key)))
}

pub fn unset(config: &mut Config, key: &str) -> Result<String, SettingError> {
    match canonical_key(key).as_str() {
        "tick-interval-ms" => config.tick_interval_ms = None,
        "markdown" => config.markdown = None,
        "syntax" => config.syntax = None,
        "theme" => config.theme = None,
        _ => return Err(SettingError::UnknownKey(key.to_string())),
    }
    Ok(format!("Unset {} (will use default)", canonical_key(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn set_and_unset_each_key() {
        let mut config = Config::default();
        set(&mut config, "tick_interval_ms", "35").expect("interval");
        set(&mut config, "markdown", "off").expect("markdown");
        set(&mut config, "syntax", "false").expect("syntax");
        set(&mut config, "theme", "Light").expect("theme");
        assert_eq!(config.tick_interval_ms, Some(35));
        assert_eq!(config.markdown, Some(false));
        assert_eq!(config.syntax, Some(false));
        assert_eq!(config.theme.as_deref(), Some("light"));

        for key in KEYS {
            unset(&mut config, key).expect("unset");
        }
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_values_are_rejected_without_changes() {
        let mut config = Config::default();
        assert_eq!(
            set(&mut config, "tick-interval-ms", "fast"),
            Err(SettingError::InvalidInterval("fast".to_string()))
        );
        assert_eq!(
            set(&mut config, "markdown", "sometimes"),
            Err(SettingError::InvalidBoolean("sometimes".to_string()))
        );
        assert_eq!(
            set(&mut config, "theme", "dracula"),
            Err(SettingError::UnknownTheme("dracula".to_string()))
        );
        assert_eq!(
            unset(&mut config, "colour"),
            Err(SettingError::UnknownKey("colour".to_string()))
        );
        assert_eq!(config, Config::default());
    }
}
