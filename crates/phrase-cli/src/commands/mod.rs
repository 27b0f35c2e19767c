pub mod config_ops;
pub mod suggest_ops;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use phrase_core::settings::{parse_settings_toml, EngineSettings, SettingsError};
use phrase_core::{EngineError, LookupError, SuggestionEngine, TermIndex};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}
pub(crate) use die;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("reading {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("writing {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("terms: {0}")]
    Lookup(#[from] LookupError),
    #[error("engine: {0}")]
    Engine(#[from] EngineError),
}

/// Settings from `path`, or the embedded defaults.
pub fn load_settings(path: Option<&str>) -> Result<EngineSettings, CliError> {
    let Some(path) = path else {
        return Ok(EngineSettings::default());
    };
    let content = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })?;
    Ok(parse_settings_toml(&content)?)
}

/// Build an engine over the term list at `terms_file`.
///
/// `max_results` overrides `lookup.max_results` from the settings.
pub fn load_engine(
    terms_file: &str,
    settings: &EngineSettings,
    max_results: Option<usize>,
) -> Result<SuggestionEngine, CliError> {
    let index = TermIndex::open(Path::new(terms_file))?
        .with_max_results(max_results.unwrap_or(settings.lookup.max_results));
    Ok(SuggestionEngine::new(Arc::new(index), settings)?)
}
