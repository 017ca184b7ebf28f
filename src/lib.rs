//! Multilingual string substitution for template engines
//!
//! `tpl-i18n` wraps a host template engine and makes its templates
//! multilingual: a per-language `key=value` translation file is loaded before
//! each render, `##key##` placeholders in template source (and in bound
//! string variables) are rewritten to the active language's phrases, and the
//! engine's cache/compile identifiers are prefixed with the language code so
//! compiled and cached artifacts never cross languages.
//!
//! The crate does no template compilation, caching, or rendering itself; the
//! host engine stays responsible for those behind the [`TemplateEngine`]
//! trait.
//!
//! # Example
//!
//! ```no_run
//! use tpl_i18n::{MockEngine, MultilingualTemplates};
//!
//! let mut engine = MockEngine::new();
//! engine.with_template("index.tpl", "<h1>##greeting##</h1>");
//!
//! let mut templates = MultilingualTemplates::new(
//!     engine,
//!     &["en".to_string(), "de".to_string()],
//!     "en",
//!     None,
//!     "locales",
//! )?;
//!
//! // Renders with locales/en.txt; compiled artifact keyed "en-..."
//! let html = templates.fetch("index.tpl", None, None)?;
//! # Ok::<(), tpl_i18n::I18nError>(())
//! ```

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use serde_json::Value;

pub mod cache_key;
pub mod config;
pub mod engine;
pub mod error;
pub mod language;
pub mod loader;
pub mod mock;
pub mod rewriter;

pub use cache_key::language_scoped_id;
pub use config::{DEFAULT_LOCALES_DIR, TemplateConfig};
pub use engine::{EngineSettings, Prefilter, TemplateEngine};
pub use error::{I18nError, I18nResult};
pub use language::{AllowedLanguages, validate_language_code};
pub use loader::{
    TranslationCache, load_translation_file, load_translations_from_dir, translation_file_path,
};
pub use mock::MockEngine;
pub use rewriter::{TranslationTable, rewrite};

/// Name of the template variable holding the active language code
pub const LANGUAGE_VARIABLE: &str = "lang";

/// A multilingual wrapper around a host template engine.
///
/// Holds the allowed-language set, the active language, pending variable
/// bindings, and a translation table shared with the prefilter it registers
/// on the engine at construction. One instance per render context; the
/// shared table uses `Rc<RefCell<_>>` and the type is deliberately not
/// `Send`.
pub struct MultilingualTemplates<E: TemplateEngine> {
    engine: E,
    languages: AllowedLanguages,
    language: String,
    locales_dir: PathBuf,
    // Flushed into the engine at render time; string values are rewritten
    // against the table loaded for that render
    pending: Vec<(String, Value, bool)>,
    table: Rc<RefCell<TranslationTable>>,
    table_cache: Option<TranslationCache>,
}

impl<E: TemplateEngine> MultilingualTemplates<E> {
    /// Wrap an engine
    ///
    /// Registers the placeholder-rewriting prefilter on the engine and sets
    /// the initial active language (`None` means the default).
    ///
    /// # Arguments
    /// * `engine` - The host template engine to wrap
    /// * `allowed_languages` - The fixed set of supported language codes
    /// * `default_language` - Must be a member of `allowed_languages`
    /// * `language` - Initial active language, or `None` for the default
    /// * `locales_dir` - Directory holding `<language>.txt` files
    ///
    /// # Errors
    /// * [`I18nError::InvalidLanguage`] - Default or initial language is not
    ///   a member of the allowed set, or a code is malformed
    pub fn new(
        mut engine: E,
        allowed_languages: &[String],
        default_language: &str,
        language: Option<&str>,
        locales_dir: impl Into<PathBuf>,
    ) -> I18nResult<Self> {
        let languages = AllowedLanguages::new(allowed_languages, default_language)?;
        let active = languages.resolve(language)?.to_string();

        let table = Rc::new(RefCell::new(TranslationTable::new()));
        let filter_table = Rc::clone(&table);
        engine.register_prefilter(Box::new(move |source| {
            rewrite(source, &filter_table.borrow())
        }));
        engine.assign(LANGUAGE_VARIABLE, Value::String(active.clone()), false);

        Ok(MultilingualTemplates {
            engine,
            languages,
            language: active,
            locales_dir: locales_dir.into(),
            pending: Vec::new(),
            table,
            table_cache: None,
        })
    }

    /// Wrap an engine using a [`TemplateConfig`], forwarding its engine
    /// settings unchanged.
    pub fn from_config(mut engine: E, config: &TemplateConfig) -> I18nResult<Self> {
        engine.apply_settings(&config.engine);
        Self::new(
            engine,
            &config.allowed_languages,
            &config.default_language,
            config.language.as_deref(),
            config.locales_dir(),
        )
    }

    /// Change the active language, or reset to the default with `None`.
    ///
    /// On success the engine's `lang` variable is updated for subsequent
    /// renders. On failure the previously active language and translation
    /// table are left untouched.
    ///
    /// # Errors
    /// * [`I18nError::InvalidLanguage`] - The requested language is not a
    ///   member of the allowed set
    pub fn set_language(&mut self, language: Option<&str>) -> I18nResult<()> {
        let resolved = self.languages.resolve(language)?.to_string();
        self.language = resolved.clone();
        self.engine
            .assign(LANGUAGE_VARIABLE, Value::String(resolved), false);
        Ok(())
    }

    /// The active language code
    pub fn language(&self) -> &str {
        &self.language
    }

    /// The allowed language codes
    pub fn languages(&self) -> &[String] {
        self.languages.codes()
    }

    /// Bind a template variable for the next renders.
    ///
    /// Bindings accumulate and are flushed into the engine at render time;
    /// string values pass through the placeholder rewriter first, so
    /// translated variable content behaves exactly like translated template
    /// markup. Re-binding a name replaces the earlier binding.
    pub fn assign_var(&mut self, name: &str, value: Value, no_cache: bool) -> &mut Self {
        self.pending
            .retain(|(pending_name, _, _)| pending_name != name);
        self.pending.push((name.to_string(), value, no_cache));
        self
    }

    /// Cache parsed translation tables per language, invalidated by file
    /// modification time. Off by default: the default path re-reads the file
    /// on every render.
    pub fn enable_table_cache(&mut self) -> &mut Self {
        self.table_cache = Some(TranslationCache::new());
        self
    }

    /// Render a template through the engine's output destination.
    ///
    /// Loads the active language's translation table from disk, flushes
    /// pending variable bindings (rewriting string values), scopes both
    /// identifiers by language, and delegates.
    ///
    /// # Errors
    /// * [`I18nError::FileNotFound`] / [`I18nError::ReadError`] - Translation
    ///   file missing or unreadable; aborts this render only
    /// * [`I18nError::EngineError`] - Propagated from the host engine
    pub fn display(
        &mut self,
        template: &str,
        cache_id: Option<&str>,
        compile_id: Option<&str>,
    ) -> I18nResult<()> {
        self.load_table()?;
        self.flush_pending();
        let (cache_id, compile_id) = self.scoped_ids(cache_id, compile_id);
        self.engine.display(template, &cache_id, &compile_id)
    }

    /// Render a template and return the output.
    ///
    /// Same identifier and table treatment as [`display`](Self::display), so
    /// a bare `fetch` is self-sufficient rather than depending on a prior
    /// `display` having loaded the table.
    pub fn fetch(
        &mut self,
        template: &str,
        cache_id: Option<&str>,
        compile_id: Option<&str>,
    ) -> I18nResult<String> {
        self.load_table()?;
        self.flush_pending();
        let (cache_id, compile_id) = self.scoped_ids(cache_id, compile_id);
        self.engine.fetch(template, &cache_id, &compile_id)
    }

    /// Probe for a valid cached artifact under the language-scoped
    /// identifiers a render would use. Always `false` when the engine's
    /// caching is off.
    pub fn is_cached(
        &self,
        template: &str,
        cache_id: Option<&str>,
        compile_id: Option<&str>,
    ) -> bool {
        if !self.engine.caching_enabled() {
            return false;
        }
        let (cache_id, compile_id) = self.scoped_ids(cache_id, compile_id);
        self.engine.is_cached(template, &cache_id, &compile_id)
    }

    /// Borrow the wrapped engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Unwrap, returning the engine
    pub fn into_engine(self) -> E {
        self.engine
    }

    fn scoped_ids(&self, cache_id: Option<&str>, compile_id: Option<&str>) -> (String, String) {
        let cache_id = cache_id.unwrap_or(self.engine.default_cache_id());
        let compile_id = compile_id.unwrap_or(self.engine.default_compile_id());
        (
            language_scoped_id(&self.language, cache_id),
            language_scoped_id(&self.language, compile_id),
        )
    }

    /// Rebuild the shared translation table from the active language's file.
    fn load_table(&mut self) -> I18nResult<()> {
        let loaded = match &mut self.table_cache {
            Some(cache) => cache.load(&self.locales_dir, &self.language)?,
            None => load_translation_file(&translation_file_path(
                &self.locales_dir,
                &self.language,
            ))?,
        };
        *self.table.borrow_mut() = loaded;
        Ok(())
    }

    /// Flush pending bindings into the engine; string values are rewritten
    /// against the freshly loaded table.
    fn flush_pending(&mut self) {
        for (name, value, no_cache) in &self.pending {
            let value = match value {
                Value::String(text) => Value::String(rewrite(text, &self.table.borrow())),
                other => other.clone(),
            };
            self.engine.assign(name, value, *no_cache);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use std::path::Path;

    fn write_locale(dir: &Path, language: &str, content: &str) {
        fs::write(translation_file_path(dir, language), content).unwrap();
    }

    fn allowed() -> Vec<String> {
        vec!["en".to_string(), "de".to_string()]
    }

    fn wrap(engine: MockEngine, dir: &Path) -> MultilingualTemplates<MockEngine> {
        MultilingualTemplates::new(engine, &allowed(), "en", None, dir).unwrap()
    }

    #[test]
    fn test_construction_rejects_invalid_default() {
        let result =
            MultilingualTemplates::new(MockEngine::new(), &allowed(), "fr", None, "locales");
        assert!(matches!(result, Err(I18nError::InvalidLanguage(_))));
    }

    #[test]
    fn test_construction_rejects_invalid_initial_language() {
        let result =
            MultilingualTemplates::new(MockEngine::new(), &allowed(), "en", Some("fr"), "locales");
        assert!(matches!(result, Err(I18nError::InvalidLanguage(_))));
    }

    #[test]
    fn test_construction_defaults_active_language() {
        let templates = wrap(MockEngine::new(), Path::new("locales"));
        assert_eq!(templates.language(), "en");
        assert_eq!(templates.languages(), ["en", "de"]);
        // The lang variable is already bound for the first render
        assert_eq!(templates.engine().assigned("lang"), Some(&json!("en")));
    }

    #[test]
    fn test_display_rewrites_template_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        write_locale(dir.path(), "en", "greeting=Hello\nfarewell=Bye\n");

        let mut engine = MockEngine::new();
        engine.with_template("index.tpl", "##greeting##, ##missing##!");
        let mut templates = wrap(engine, dir.path());

        templates.display("index.tpl", None, None).unwrap();
        assert_eq!(templates.engine().displayed(), ["Hello, !"]);
    }

    #[test]
    fn test_language_switch_changes_phrases_and_keys() {
        let dir = tempfile::tempdir().unwrap();
        write_locale(dir.path(), "en", "greeting=Hello\n");
        write_locale(dir.path(), "de", "greeting=Hallo\n");

        let mut engine = MockEngine::new();
        engine
            .with_template("index.tpl", "##greeting##")
            .with_caching(true);
        let mut templates = wrap(engine, dir.path());

        assert_eq!(
            templates.fetch("index.tpl", Some("X"), Some("X")).unwrap(),
            "Hello"
        );

        templates.set_language(Some("de")).unwrap();
        assert_eq!(
            templates.fetch("index.tpl", Some("X"), Some("X")).unwrap(),
            "Hallo"
        );

        // One artifact per language, keyed de-X and en-X
        let keys = templates.engine().cache_keys();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].1, "de-X");
        assert_eq!(keys[1].1, "en-X");
    }

    #[test]
    fn test_missing_locale_file_aborts_render() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = MockEngine::new();
        engine.with_template("index.tpl", "##greeting##");
        let mut templates = wrap(engine, dir.path());

        assert!(matches!(
            templates.display("index.tpl", None, None),
            Err(I18nError::FileNotFound(_))
        ));
        // Nothing was rendered
        assert!(templates.engine().displayed().is_empty());
    }

    #[test]
    fn test_set_language_failure_leaves_state_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        write_locale(dir.path(), "en", "greeting=Hello\n");

        let mut engine = MockEngine::new();
        engine.with_template("index.tpl", "##greeting##");
        let mut templates = wrap(engine, dir.path());

        assert!(templates.set_language(Some("fr")).is_err());
        assert_eq!(templates.language(), "en");
        assert_eq!(templates.fetch("index.tpl", None, None).unwrap(), "Hello");
    }

    #[test]
    fn test_set_language_none_resets_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let mut templates = wrap(MockEngine::new(), dir.path());
        templates.set_language(Some("de")).unwrap();
        assert_eq!(templates.language(), "de");

        templates.set_language(None).unwrap();
        assert_eq!(templates.language(), "en");
        assert_eq!(templates.engine().assigned("lang"), Some(&json!("en")));
    }

    #[test]
    fn test_assigned_string_variables_are_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        write_locale(dir.path(), "en", "greeting=Hello\n");

        let mut engine = MockEngine::new();
        engine.with_template("index.tpl", "{$message} / {$count}");
        let mut templates = wrap(engine, dir.path());
        templates
            .assign_var("message", json!("##greeting## world"), false)
            .assign_var("count", json!(7), false);

        assert_eq!(
            templates.fetch("index.tpl", None, None).unwrap(),
            "Hello world / 7"
        );
    }

    #[test]
    fn test_reassigning_variable_replaces_binding() {
        let dir = tempfile::tempdir().unwrap();
        write_locale(dir.path(), "en", "greeting=Hello\n");

        let mut engine = MockEngine::new();
        engine.with_template("index.tpl", "{$message}");
        let mut templates = wrap(engine, dir.path());
        templates.assign_var("message", json!("first"), false);
        templates.assign_var("message", json!("second"), false);

        assert_eq!(templates.fetch("index.tpl", None, None).unwrap(), "second");
    }

    #[test]
    fn test_is_cached_uses_render_keys() {
        let dir = tempfile::tempdir().unwrap();
        write_locale(dir.path(), "en", "greeting=Hello\n");
        write_locale(dir.path(), "de", "greeting=Hallo\n");

        let mut engine = MockEngine::new();
        engine
            .with_template("index.tpl", "##greeting##")
            .with_caching(true);
        let mut templates = wrap(engine, dir.path());

        assert!(!templates.is_cached("index.tpl", Some("X"), Some("X")));
        templates
            .display("index.tpl", Some("X"), Some("X"))
            .unwrap();
        assert!(templates.is_cached("index.tpl", Some("X"), Some("X")));

        // The probe is language-scoped: no German artifact exists yet
        templates.set_language(Some("de")).unwrap();
        assert!(!templates.is_cached("index.tpl", Some("X"), Some("X")));
    }

    #[test]
    fn test_is_cached_false_without_caching() {
        let dir = tempfile::tempdir().unwrap();
        write_locale(dir.path(), "en", "greeting=Hello\n");

        let mut engine = MockEngine::new();
        engine.with_template("index.tpl", "##greeting##");
        let mut templates = wrap(engine, dir.path());
        templates.display("index.tpl", None, None).unwrap();
        assert!(!templates.is_cached("index.tpl", None, None));
    }

    #[test]
    fn test_default_ids_come_from_engine() {
        let dir = tempfile::tempdir().unwrap();
        write_locale(dir.path(), "en", "greeting=Hello\n");

        let mut engine = MockEngine::new();
        engine
            .with_template("index.tpl", "##greeting##")
            .with_default_ids("site", "v2")
            .with_caching(true);
        let mut templates = wrap(engine, dir.path());

        templates.display("index.tpl", None, None).unwrap();
        let keys = templates.engine().cache_keys();
        assert_eq!(
            keys,
            [(
                "index.tpl".to_string(),
                "en-site".to_string(),
                "en-v2".to_string()
            )]
        );
    }

    #[test]
    fn test_edited_locale_file_applies_on_next_render() {
        let dir = tempfile::tempdir().unwrap();
        write_locale(dir.path(), "en", "greeting=Hello\n");

        let mut engine = MockEngine::new();
        engine.with_template("index.tpl", "##greeting##");
        let mut templates = wrap(engine, dir.path());
        assert_eq!(templates.fetch("index.tpl", None, None).unwrap(), "Hello");

        write_locale(dir.path(), "en", "greeting=Howdy\n");
        assert_eq!(templates.fetch("index.tpl", None, None).unwrap(), "Howdy");
    }

    #[test]
    fn test_from_config_applies_engine_settings() {
        let dir = tempfile::tempdir().unwrap();
        write_locale(dir.path(), "de", "greeting=Hallo\n");

        let settings = EngineSettings {
            template_dir: Some("templates".to_string()),
            caching: true,
            cache_lifetime_secs: Some(3600),
            ..EngineSettings::default()
        };
        let config = TemplateConfig::new(&["en", "de"], "en")
            .with_language("de")
            .with_locales_dir(dir.path())
            .with_engine_settings(settings.clone());

        let mut engine = MockEngine::new();
        engine.with_template("index.tpl", "##greeting##");
        let mut templates = MultilingualTemplates::from_config(engine, &config).unwrap();

        assert_eq!(templates.language(), "de");
        assert_eq!(templates.engine().applied_settings(), &settings);
        assert_eq!(templates.fetch("index.tpl", None, None).unwrap(), "Hallo");
    }

    #[test]
    fn test_engine_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        write_locale(dir.path(), "en", "greeting=Hello\n");

        let mut engine = MockEngine::new();
        engine
            .with_template("index.tpl", "##greeting##")
            .fail_with("boom");
        let mut templates = wrap(engine, dir.path());

        match templates.display("index.tpl", None, None) {
            Err(I18nError::EngineError(msg)) => assert_eq!(msg, "boom"),
            other => panic!("Expected EngineError, got {:?}", other),
        }
    }

    #[test]
    fn test_table_cache_reuses_unchanged_file() {
        let dir = tempfile::tempdir().unwrap();
        write_locale(dir.path(), "en", "greeting=Hello\n");

        let mut engine = MockEngine::new();
        engine.with_template("index.tpl", "##greeting##");
        let mut templates = wrap(engine, dir.path());
        templates.enable_table_cache();

        assert_eq!(templates.fetch("index.tpl", None, None).unwrap(), "Hello");
        assert_eq!(templates.fetch("index.tpl", None, None).unwrap(), "Hello");
    }
}
