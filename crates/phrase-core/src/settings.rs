//! Engine settings loaded from TOML.
//!
//! - `parse_settings_toml(toml_content)` parses and validates a custom file
//! - `EngineSettings::default()` parses the embedded defaults
//! - Default values are embedded via `include_str!("default_settings.toml")`

use regex::Regex;
use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

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
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    pub tokenizer: TokenizerSettings,
    pub cache: CacheSettings,
    pub lookup: LookupSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenizerSettings {
    pub boundary_pattern: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupSettings {
    pub max_results: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("default settings TOML must be valid")
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<EngineSettings, SettingsError> {
    let s: EngineSettings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

pub(crate) fn validate(s: &EngineSettings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive!(cache.capacity);
    check_positive!(lookup.max_results);

    let field = "tokenizer.boundary_pattern".to_string();
    let re = Regex::new(&s.tokenizer.boundary_pattern).map_err(|e| {
        SettingsError::InvalidValue {
            field: field.clone(),
            reason: e.to_string(),
        }
    })?;
    if re.is_match("") {
        return Err(SettingsError::InvalidValue {
            field,
            reason: "must not match the empty string".to_string(),
        });
    }
    Ok(())
}
