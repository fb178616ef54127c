//! Global settings loaded from TOML, following the same OnceLock pattern as
//! the script registry.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub typing: TypingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypingSettings {
    pub auto_context_clear_time_ms: u64,
    pub use_native_numerals: bool,
    pub include_inherent_vowel: bool,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.typing.auto_context_clear_time_ms == 0 {
        return Err(SettingsError::InvalidValue {
            field: "typing.auto_context_clear_time_ms".to_string(),
            reason: "must be positive".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.typing.auto_context_clear_time_ms, 4500);
        assert!(s.typing.use_native_numerals);
        assert!(!s.typing.include_inherent_vowel);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[typing]
auto_context_clear_time_ms = 1000
use_native_numerals = false
include_inherent_vowel = true
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.typing.auto_context_clear_time_ms, 1000);
        assert!(!s.typing.use_native_numerals);
        assert!(s.typing.include_inherent_vowel);
    }

    #[test]
    fn error_zero_clear_time() {
        let toml = r#"
[typing]
auto_context_clear_time_ms = 0
use_native_numerals = true
include_inherent_vowel = false
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("typing.auto_context_clear_time_ms"));
    }

    #[test]
    fn error_unknown_section() {
        let toml = r#"
[typing]
auto_context_clear_time_ms = 4500
use_native_numerals = true
include_inherent_vowel = false

[transliterate]
max_context_length = 5
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let err = parse_settings_toml("[typing]\nauto_context_clear_time_ms = 1\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn default_toml_matches_const() {
        assert_eq!(default_toml(), DEFAULT_SETTINGS_TOML);
    }
}
