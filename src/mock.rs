//! Mock template engine for testing
//!
//! A deterministic, in-memory [`TemplateEngine`] implementation: templates
//! are registered as strings, prefilters run in registration order, assigned
//! variables interpolate `{$name}` tokens, and rendered output is stored in a
//! cache map keyed by (template, cache id, compile id). No file system, no
//! real compilation.
//!
//! # Example
//!
//! ```
//! use tpl_i18n::{MockEngine, TemplateEngine};
//!
//! let mut engine = MockEngine::new();
//! engine.with_template("hello.tpl", "Hi {$name}!");
//! engine.assign("name", serde_json::json!("World"), false);
//! let out = engine.fetch("hello.tpl", "cache", "compile").unwrap();
//! assert_eq!(out, "Hi World!");
//! ```

use crate::engine::{EngineSettings, Prefilter, TemplateEngine};
use crate::error::{I18nError, I18nResult};
use serde_json::Value;
use std::collections::HashMap;

/// In-memory engine double recording everything it is asked to do.
#[derive(Default)]
pub struct MockEngine {
    templates: HashMap<String, String>,
    variables: HashMap<String, (Value, bool)>,
    prefilters: Vec<Prefilter>,
    cache: HashMap<(String, String, String), String>,
    caching: bool,
    default_cache_id: String,
    default_compile_id: String,
    settings: EngineSettings,
    /// Output of every `display` call, oldest first
    displayed: Vec<String>,
    /// When set, `display` and `fetch` fail with this message
    fail_with: Option<String>,
}

impl MockEngine {
    pub fn new() -> Self {
        MockEngine::default()
    }

    /// Register a template source under a name
    pub fn with_template(&mut self, name: &str, source: &str) -> &mut Self {
        self.templates.insert(name.to_string(), source.to_string());
        self
    }

    /// Set the ids used when a caller supplies none
    pub fn with_default_ids(&mut self, cache_id: &str, compile_id: &str) -> &mut Self {
        self.default_cache_id = cache_id.to_string();
        self.default_compile_id = compile_id.to_string();
        self
    }

    pub fn with_caching(&mut self, caching: bool) -> &mut Self {
        self.caching = caching;
        self
    }

    /// Make subsequent renders fail, simulating an engine-side error
    pub fn fail_with(&mut self, message: &str) -> &mut Self {
        self.fail_with = Some(message.to_string());
        self
    }

    /// Output of every `display` call so far, oldest first
    pub fn displayed(&self) -> &[String] {
        &self.displayed
    }

    /// The value currently assigned to a variable, if any
    pub fn assigned(&self, name: &str) -> Option<&Value> {
        self.variables.get(name).map(|(value, _)| value)
    }

    /// Composite keys of every cached artifact
    pub fn cache_keys(&self) -> Vec<(String, String, String)> {
        let mut keys: Vec<_> = self.cache.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn applied_settings(&self) -> &EngineSettings {
        &self.settings
    }

    fn render_value(value: &Value) -> String {
        match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    fn render(&self, template: &str) -> I18nResult<String> {
        if let Some(message) = &self.fail_with {
            return Err(I18nError::EngineError(message.clone()));
        }

        let source = self
            .templates
            .get(template)
            .ok_or_else(|| I18nError::EngineError(format!("Unknown template: {}", template)))?;

        let mut output = source.clone();
        for filter in &self.prefilters {
            output = filter(&output);
        }

        for (name, (value, _no_cache)) in &self.variables {
            let token = format!("{{${}}}", name);
            output = output.replace(&token, &Self::render_value(value));
        }

        Ok(output)
    }

    fn cache_key(template: &str, cache_id: &str, compile_id: &str) -> (String, String, String) {
        (
            template.to_string(),
            cache_id.to_string(),
            compile_id.to_string(),
        )
    }
}

impl TemplateEngine for MockEngine {
    fn display(&mut self, template: &str, cache_id: &str, compile_id: &str) -> I18nResult<()> {
        let output = self.fetch(template, cache_id, compile_id)?;
        self.displayed.push(output);
        Ok(())
    }

    fn fetch(&mut self, template: &str, cache_id: &str, compile_id: &str) -> I18nResult<String> {
        let key = Self::cache_key(template, cache_id, compile_id);
        if self.caching {
            if let Some(cached) = self.cache.get(&key) {
                return Ok(cached.clone());
            }
        }

        let output = self.render(template)?;
        if self.caching {
            self.cache.insert(key, output.clone());
        }
        Ok(output)
    }

    fn is_cached(&self, template: &str, cache_id: &str, compile_id: &str) -> bool {
        self.caching
            && self
                .cache
                .contains_key(&Self::cache_key(template, cache_id, compile_id))
    }

    fn assign(&mut self, name: &str, value: Value, no_cache: bool) {
        self.variables.insert(name.to_string(), (value, no_cache));
    }

    fn register_prefilter(&mut self, filter: Prefilter) {
        self.prefilters.push(filter);
    }

    fn default_cache_id(&self) -> &str {
        &self.default_cache_id
    }

    fn default_compile_id(&self) -> &str {
        &self.default_compile_id
    }

    fn caching_enabled(&self) -> bool {
        self.caching
    }

    fn apply_settings(&mut self, settings: &EngineSettings) {
        self.caching = settings.caching;
        self.settings = settings.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fetch_interpolates_variables() {
        let mut engine = MockEngine::new();
        engine.with_template("t", "Hi {$name}, you have {$count} messages");
        engine.assign("name", json!("Ada"), false);
        engine.assign("count", json!(3), false);

        let out = engine.fetch("t", "c", "x").unwrap();
        assert_eq!(out, "Hi Ada, you have 3 messages");
    }

    #[test]
    fn test_prefilters_run_in_registration_order() {
        let mut engine = MockEngine::new();
        engine.with_template("t", "a");
        engine.register_prefilter(Box::new(|source| format!("{}b", source)));
        engine.register_prefilter(Box::new(|source| format!("{}c", source)));

        assert_eq!(engine.fetch("t", "c", "x").unwrap(), "abc");
    }

    #[test]
    fn test_unknown_template_is_engine_error() {
        let mut engine = MockEngine::new();
        assert!(matches!(
            engine.fetch("missing", "c", "x"),
            Err(I18nError::EngineError(_))
        ));
    }

    #[test]
    fn test_cache_hit_skips_render() {
        let mut engine = MockEngine::new();
        engine.with_template("t", "{$v}").with_caching(true);
        engine.assign("v", json!("first"), false);
        assert_eq!(engine.fetch("t", "c", "x").unwrap(), "first");

        // A second fetch under the same key serves the cached artifact
        engine.assign("v", json!("second"), false);
        assert_eq!(engine.fetch("t", "c", "x").unwrap(), "first");
        // A different key renders fresh
        assert_eq!(engine.fetch("t", "c2", "x").unwrap(), "second");
    }

    #[test]
    fn test_is_cached_false_when_caching_disabled() {
        let mut engine = MockEngine::new();
        engine.with_template("t", "body");
        engine.fetch("t", "c", "x").unwrap();
        assert!(!engine.is_cached("t", "c", "x"));
    }

    #[test]
    fn test_display_records_output() {
        let mut engine = MockEngine::new();
        engine.with_template("t", "body");
        engine.display("t", "c", "x").unwrap();
        assert_eq!(engine.displayed(), ["body"]);
    }

    #[test]
    fn test_fail_with_surfaces_engine_error() {
        let mut engine = MockEngine::new();
        engine.with_template("t", "body").fail_with("disk full");
        match engine.fetch("t", "c", "x") {
            Err(I18nError::EngineError(msg)) => assert_eq!(msg, "disk full"),
            other => panic!("Expected EngineError, got {:?}", other),
        }
    }
}
