//! Language-scoped cache and compile identifiers
//!
//! The host engine compiles and caches one artifact per identifier. Prefixing
//! every identifier with the active language gives each language its own
//! compiled template and cache entry, so render artifacts never cross
//! languages and a cache-existence probe uses the same composite key a render
//! would.

/// Compose a language-scoped identifier: `"<language>-<id>"`.
///
/// Pure; applied identically to cache ids and compile ids before delegating
/// to the host engine's render, fetch, and cache-probe entry points.
///
/// # Example
///
/// ```
/// use tpl_i18n::language_scoped_id;
///
/// assert_eq!(language_scoped_id("en", "shop"), "en-shop");
/// assert_eq!(language_scoped_id("de", "shop"), "de-shop");
/// ```
pub fn language_scoped_id(language: &str, id: &str) -> String {
    format!("{}-{}", language, id)
}
