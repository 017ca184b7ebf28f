//! Host template engine seam
//!
//! This crate does no template compilation, caching, or rendering of its own;
//! those belong to a host engine reached through the [`TemplateEngine`]
//! trait. [`MultilingualTemplates`](crate::MultilingualTemplates) wraps any
//! implementation, rewriting placeholders and namespacing identifiers before
//! delegating. [`MockEngine`](crate::MockEngine) is a deterministic in-memory
//! implementation for tests.

use crate::error::I18nResult;
use serde_json::Value;

/// A pre-compilation source filter: receives template source, returns the
/// source the engine should compile instead.
pub type Prefilter = Box<dyn Fn(&str) -> String>;

/// Engine settings forwarded unchanged from configuration to the host engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub template_dir: Option<String>,
    pub compile_dir: Option<String>,
    pub cache_dir: Option<String>,
    pub caching: bool,
    pub cache_lifetime_secs: Option<u64>,
    /// Debug mode implies compile-checking and forced recompiles on engines
    /// that distinguish them
    pub debug: bool,
}

/// The contract a host template engine must expose for multilingual
/// wrapping.
///
/// `display`, `fetch`, and `is_cached` take the engine's usual template name
/// plus explicit cache and compile identifiers; the wrapper always passes
/// language-scoped ids. Prefilters registered through `register_prefilter`
/// must run over template source before compilation, in registration order.
pub trait TemplateEngine {
    /// Render a template to the engine's output destination
    fn display(&mut self, template: &str, cache_id: &str, compile_id: &str) -> I18nResult<()>;

    /// Render a template and return the output as a string
    fn fetch(&mut self, template: &str, cache_id: &str, compile_id: &str) -> I18nResult<String>;

    /// Probe for a valid cached artifact under the given identifiers.
    /// Must return `false` whenever caching is disabled.
    fn is_cached(&self, template: &str, cache_id: &str, compile_id: &str) -> bool;

    /// Bind a template variable
    fn assign(&mut self, name: &str, value: Value, no_cache: bool);

    /// Register a pre-compilation source filter
    fn register_prefilter(&mut self, filter: Prefilter);

    /// The identifier used when a caller supplies no cache id
    fn default_cache_id(&self) -> &str;

    /// The identifier used when a caller supplies no compile id
    fn default_compile_id(&self) -> &str;

    fn caching_enabled(&self) -> bool;

    /// Apply pass-through settings (directories, caching, debug flags)
    fn apply_settings(&mut self, settings: &EngineSettings);
}
