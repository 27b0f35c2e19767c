//! Suggestion engine: tokenize, build, enumerate, cache, filter.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::{debug, debug_span, warn};

use crate::cache::{CachedPaths, PathCache};
use crate::lookup::{LookupError, Term, TermLookup};
use crate::paths::{covering, enumerate};
use crate::settings::{validate, EngineSettings, SettingsError};
use crate::tokenizer::Tokenizer;
use crate::tree::{self, MatchNode};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("invalid boundary pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("boundary pattern {0:?} matches the empty string")]
    EmptyBoundary(String),
}

/// Multi-word completion over a [`TermLookup`].
///
/// For a fixed lookup, `suggestions_for` is deterministic. The path cache
/// is the only state kept between calls and is safe to share across
/// threads.
pub struct SuggestionEngine {
    lookup: Arc<dyn TermLookup>,
    tokenizer: Tokenizer,
    cache: PathCache,
}

impl SuggestionEngine {
    /// Build an engine, running the same checks as `parse_settings_toml`
    /// so hand-built settings cannot bypass them.
    pub fn new(lookup: Arc<dyn TermLookup>, settings: &EngineSettings) -> Result<Self, EngineError> {
        validate(settings)?;
        let tokenizer = Tokenizer::new(&settings.tokenizer.boundary_pattern)?;
        let capacity = NonZeroUsize::new(settings.cache.capacity).ok_or_else(|| {
            SettingsError::InvalidValue {
                field: "cache.capacity".to_string(),
                reason: "must be positive".to_string(),
            }
        })?;
        Ok(Self::with_parts(lookup, tokenizer, PathCache::new(capacity)))
    }

    /// Engine with the embedded default settings.
    pub fn with_defaults(lookup: Arc<dyn TermLookup>) -> Result<Self, EngineError> {
        Self::new(lookup, &EngineSettings::default())
    }

    /// Assemble an engine from an already-built tokenizer and cache.
    pub fn with_parts(lookup: Arc<dyn TermLookup>, tokenizer: Tokenizer, cache: PathCache) -> Self {
        Self {
            lookup,
            tokenizer,
            cache,
        }
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    /// Build the match tree for `text` without touching the cache.
    pub fn match_tree(&self, text: &str) -> Result<MatchNode, LookupError> {
        let tokens = self.tokenizer.tokenize(text);
        tree::build(&tokens, self.lookup.as_ref())
    }

    /// Unfiltered root-to-leaf paths for `text`, from cache when possible.
    ///
    /// A failed build is returned as an error and never cached.
    pub fn paths_for(&self, text: &str) -> Result<CachedPaths, LookupError> {
        let tokens = self.tokenizer.tokenize(text);
        self.cached_paths(text, &tokens)
    }

    /// `tokens` must be the tokenization of `text`; the cache is keyed by
    /// `text` alone.
    fn cached_paths(&self, text: &str, tokens: &[String]) -> Result<CachedPaths, LookupError> {
        if let Some(paths) = self.cache.get(text) {
            debug!(paths = paths.len(), "path cache hit");
            return Ok(paths);
        }

        let root = tree::build(tokens, self.lookup.as_ref()).inspect_err(|e| {
            warn!(error = %e, "term lookup failed");
        })?;
        let paths: CachedPaths = enumerate(&root).into();
        debug!(paths = paths.len(), "path cache miss");
        self.cache.insert(text, Arc::clone(&paths));
        Ok(paths)
    }

    /// Completions for `text`: one term sequence per path covering every
    /// typed token, in lookup ranking order.
    ///
    /// Input with no matches yields an empty list. Lookup failures are
    /// returned unchanged.
    pub fn suggestions_for(&self, text: &str) -> Result<Vec<Vec<Term>>, LookupError> {
        let _span = debug_span!("suggestions_for", text).entered();
        let tokens = self.tokenizer.tokenize(text);
        let paths = self.cached_paths(text, &tokens)?;
        let total = tokens.len();
        let suggestions = covering(&paths, total);
        debug!(tokens = total, suggestions = suggestions.len());
        Ok(suggestions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::TermIndex;
    use crate::settings::parse_settings_toml;
    use crate::testutil::{CountingLookup, FailingLookup, MapLookup};

    fn engine(lookup: impl TermLookup + 'static) -> SuggestionEngine {
        SuggestionEngine::with_defaults(Arc::new(lookup)).unwrap()
    }

    fn values(suggestions: &[Vec<Term>]) -> Vec<Vec<&str>> {
        suggestions
            .iter()
            .map(|s| s.iter().map(|t| t.value.as_str()).collect())
            .collect()
    }

    #[test]
    fn test_single_word_completions_in_order() {
        let e = engine(MapLookup::new(&[("new", &["new york", "new jersey"])]));
        let result = e.suggestions_for("new").unwrap();
        assert_eq!(values(&result), vec![vec!["new york"], vec!["new jersey"]]);
    }

    #[test]
    fn test_multi_word_input_matches_whole_term() {
        let e = engine(MapLookup::new(&[
            ("new", &["new york"]),
            ("york", &["york city"]),
        ]));
        let result = e.suggestions_for("new york").unwrap();
        assert_eq!(values(&result), vec![vec!["new york"]]);
    }

    #[test]
    fn test_partial_match_excluded() {
        let e = engine(MapLookup::new(&[("new", &["new"])]));
        assert!(e.suggestions_for("new york").unwrap().is_empty());
    }

    #[test]
    fn test_no_candidates_is_empty_not_error() {
        let e = engine(MapLookup::new(&[]));
        assert!(e.suggestions_for("zzz").unwrap().is_empty());
    }

    #[test]
    fn test_empty_input_has_no_suggestions() {
        let lookup = Arc::new(CountingLookup::new(MapLookup::new(&[("", &["new york"])])));
        let e = SuggestionEngine::with_defaults(lookup.clone()).unwrap();
        assert!(e.suggestions_for("").unwrap().is_empty());
        assert_eq!(lookup.calls(), 0);
    }

    #[test]
    fn test_chained_terms() {
        let e = engine(MapLookup::new(&[
            ("i", &["i love"]),
            ("new", &["new york", "new jersey"]),
        ]));
        let result = e.suggestions_for("i love new").unwrap();
        assert_eq!(
            values(&result),
            vec![vec!["i love", "new york"], vec!["i love", "new jersey"]]
        );
    }

    #[test]
    fn test_trailing_space_completes_next_word() {
        let index = TermIndex::from_values(["new york", "new", "york city"]).unwrap();
        let e = engine(index);
        let result = e.suggestions_for("new ").unwrap();
        assert_eq!(
            values(&result),
            vec![
                vec!["new york"],
                vec!["new", "new york"],
                vec!["new", "new"],
                vec!["new", "york city"],
            ]
        );
    }

    #[test]
    fn test_second_call_hits_cache() {
        let lookup = Arc::new(CountingLookup::new(MapLookup::new(&[(
            "new",
            &["new york"],
        )])));
        let e = SuggestionEngine::with_defaults(lookup.clone()).unwrap();

        let first = e.suggestions_for("new").unwrap();
        let calls = lookup.calls();
        let second = e.suggestions_for("new").unwrap();
        assert_eq!(first, second);
        assert_eq!(lookup.calls(), calls);
        assert!(e.cache().contains("new"));
    }

    #[test]
    fn test_cache_stores_unfiltered_paths() {
        let e = engine(MapLookup::new(&[("new", &["new"])]));
        assert!(e.suggestions_for("new zzz").unwrap().is_empty());
        let paths = e.paths_for("new zzz").unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].last_end(), 1);
    }

    #[test]
    fn test_cache_eviction_recomputes() {
        let settings = parse_settings_toml(
            &crate::settings::default_toml().replace("capacity = 128", "capacity = 2"),
        )
        .unwrap();
        let lookup = Arc::new(CountingLookup::new(MapLookup::new(&[
            ("a", &["a"]),
            ("b", &["b"]),
            ("c", &["c"]),
        ])));
        let e = SuggestionEngine::new(lookup.clone(), &settings).unwrap();

        e.suggestions_for("a").unwrap();
        e.suggestions_for("b").unwrap();
        e.suggestions_for("c").unwrap();
        assert_eq!(e.cache().len(), 2);
        assert!(!e.cache().contains("a"));

        let before = lookup.calls();
        e.suggestions_for("a").unwrap();
        assert_eq!(lookup.calls(), before + 1);
    }

    #[test]
    fn test_match_tree_bypasses_cache() {
        let e = engine(MapLookup::new(&[("new", &["new york"])]));
        let root = e.match_tree("new").unwrap();
        assert_eq!(root.node_count(), 1);
        assert!(e.cache().is_empty());
    }

    #[test]
    fn test_lookup_failure_propagates_and_is_not_cached() {
        let e = engine(FailingLookup);
        let err = e.suggestions_for("new").unwrap_err();
        assert!(matches!(err, LookupError::Unavailable(_)));
        assert!(e.cache().is_empty());
    }

    #[test]
    fn test_custom_boundary_pattern() {
        let settings = parse_settings_toml(
            &crate::settings::default_toml().replace(r"'\W+'", r"'\s*,\s*'"),
        )
        .unwrap();
        let lookup = Arc::new(MapLookup::new(&[("new york", &["new york"])]));
        let e = SuggestionEngine::new(lookup, &settings).unwrap();
        assert_eq!(e.tokenize("new york , boston"), vec!["new york", "boston"]);
    }

    #[test]
    fn test_invalid_pattern_fails_at_construction() {
        let mut settings = EngineSettings::default();
        settings.tokenizer.boundary_pattern = "(".to_string();
        let result = SuggestionEngine::new(Arc::new(MapLookup::new(&[])), &settings);
        assert!(matches!(
            result,
            Err(EngineError::Settings(SettingsError::InvalidValue { field, .. }))
                if field == "tokenizer.boundary_pattern"
        ));
    }

    #[test]
    fn test_empty_matching_pattern_fails_at_construction() {
        let mut settings = EngineSettings::default();
        settings.tokenizer.boundary_pattern = r"\W*".to_string();
        let lookup = Arc::new(MapLookup::new(&[("new", &["new york"])]));
        let result = SuggestionEngine::new(lookup, &settings);
        assert!(matches!(
            result,
            Err(EngineError::Settings(SettingsError::InvalidValue { field, .. }))
                if field == "tokenizer.boundary_pattern"
        ));
    }

    #[test]
    fn test_empty_matching_pattern_rejected_by_tokenizer() {
        // Engines assembled from parts go through Tokenizer::new instead.
        assert!(matches!(
            Tokenizer::new(r"\W*"),
            Err(EngineError::EmptyBoundary(_))
        ));
    }

    #[test]
    fn test_zero_max_results_fails_at_construction() {
        let mut settings = EngineSettings::default();
        settings.lookup.max_results = 0;
        let result = SuggestionEngine::new(Arc::new(MapLookup::new(&[])), &settings);
        assert!(matches!(
            result,
            Err(EngineError::Settings(SettingsError::InvalidValue { field, .. }))
                if field == "lookup.max_results"
        ));
    }

    #[test]
    fn test_leading_boundary_looks_up_empty_token() {
        // " new" tokenizes to ["", "new"]; the empty token is searched like
        // any other word and only single-word terms fit its one-token span.
        let index = TermIndex::from_values(["new york", "boston"]).unwrap();
        let lookup = Arc::new(CountingLookup::new(index));
        let e = SuggestionEngine::with_defaults(lookup.clone()).unwrap();

        assert_eq!(e.tokenize(" new"), vec!["", "new"]);
        let result = e.suggestions_for(" new").unwrap();
        assert_eq!(values(&result), vec![vec!["boston", "new york"]]);
        assert_eq!(lookup.calls(), 2);
    }

    #[test]
    fn test_miss_and_hit_agree_on_token_count() {
        let e = engine(MapLookup::new(&[("new", &["new"]), ("york", &["york city"])]));
        let cold = e.suggestions_for("new york").unwrap();
        let warm = e.suggestions_for("new york").unwrap();
        assert_eq!(values(&cold), vec![vec!["new", "york city"]]);
        assert_eq!(cold, warm);
    }

    #[test]
    fn test_debug_events_compiled_in() {
        use tracing::level_filters::{LevelFilter, STATIC_MAX_LEVEL};
        assert!(STATIC_MAX_LEVEL >= LevelFilter::DEBUG);
    }

    #[test]
    fn test_zero_capacity_fails_at_construction() {
        let mut settings = EngineSettings::default();
        settings.cache.capacity = 0;
        let result = SuggestionEngine::new(Arc::new(MapLookup::new(&[])), &settings);
        assert!(matches!(result, Err(EngineError::Settings(_))));
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SuggestionEngine>();

        let e = Arc::new(engine(MapLookup::new(&[("new", &["new york"])])));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let e = Arc::clone(&e);
                std::thread::spawn(move || e.suggestions_for("new").unwrap())
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), vec![vec![Term::new("new york")]]);
        }
    }
}
