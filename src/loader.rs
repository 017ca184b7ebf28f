//! Translation table loading
//!
//! Translation files are plain text, one entry per line:
//!
//! ```text
//! // comment lines start with a double slash
//! greeting=Hello
//! farewell=Bye
//! equation=a=b
//! ```
//!
//! Lines that are blank, start with `//`, are shorter than three characters,
//! or contain no `=` are skipped. The first `=` splits key from value; any
//! further `=` characters belong to the value. Files live at
//! `<locales_dir>/<language>.txt`.
//!
//! No caching happens here: every load re-reads the file from disk, so an
//! edited translation file takes effect on the next render without a process
//! restart. [`TranslationCache`] is the opt-in exception and invalidates on
//! file modification time to preserve that guarantee.

use crate::error::{I18nError, I18nResult};
use crate::rewriter::TranslationTable;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Build the conventional path of a language's translation file:
/// `<dir>/<language>.txt`
pub fn translation_file_path(dir: &Path, language: &str) -> PathBuf {
    dir.join(format!("{}.txt", language))
}

/// True when a line carries a `key=value` entry.
///
/// Blank, commented and `=`-free lines are rejected, as are lines too short
/// to hold a one-character key and value.
fn is_translation_line(line: &str) -> bool {
    line.len() > 2 && !line.starts_with("//") && line.contains('=')
}

/// Load a translation table from a single `key=value` file
///
/// # Arguments
/// * `path` - Path to the translation file
///
/// # Returns
/// A [`TranslationTable`] with one entry per eligible line
///
/// # Errors
/// * [`I18nError::FileNotFound`] - The path does not exist
/// * [`I18nError::ReadError`] - The file exists but could not be read
pub fn load_translation_file(path: &Path) -> I18nResult<TranslationTable> {
    if !path.exists() {
        return Err(I18nError::FileNotFound(path.display().to_string()));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| I18nError::ReadError(format!("{}: {}", path.display(), e)))?;

    let mut table = TranslationTable::new();
    for line in content.lines() {
        // str::lines has already stripped the trailing \n (and \r\n)
        if !is_translation_line(line) {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            table.with_translation(key, value);
        }
    }

    Ok(table)
}

/// Load translation tables for every language in a directory
///
/// Scans `dir` for `*.txt` files and loads each one; the file stem is the
/// language code (`en.txt` → `"en"`, `pt-br.txt` → `"pt-br"`).
///
/// # Errors
/// * [`I18nError::FileNotFound`] - `dir` does not exist or is not a directory
/// * [`I18nError::ReadError`] - A directory entry or file could not be read
pub fn load_translations_from_dir(dir: &Path) -> I18nResult<HashMap<String, TranslationTable>> {
    if !dir.is_dir() {
        return Err(I18nError::FileNotFound(dir.display().to_string()));
    }

    let entries = fs::read_dir(dir)
        .map_err(|e| I18nError::ReadError(format!("{}: {}", dir.display(), e)))?;

    let mut tables = HashMap::new();
    for entry in entries {
        let entry = entry.map_err(|e| I18nError::ReadError(e.to_string()))?;
        let path = entry.path();

        if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
            continue;
        }

        let language = match path.file_stem().and_then(|stem| stem.to_str()) {
            Some(stem) => stem.to_string(),
            None => continue,
        };

        tables.insert(language, load_translation_file(&path)?);
    }

    if tables.is_empty() {
        eprintln!("Warning: no translation files found in {}", dir.display());
    }

    Ok(tables)
}

/// Per-language translation cache keyed by file modification time.
///
/// Reloads a language's file only when its mtime changes, so an edited file
/// still takes effect on the next render. Opt-in; the default render path
/// reloads from disk on every call.
#[derive(Debug, Default)]
pub struct TranslationCache {
    entries: HashMap<String, (SystemTime, TranslationTable)>,
}

impl TranslationCache {
    pub fn new() -> Self {
        TranslationCache {
            entries: HashMap::new(),
        }
    }

    /// Fetch the table for `language`, reloading from disk when the file's
    /// modification time differs from the cached one.
    pub fn load(&mut self, dir: &Path, language: &str) -> I18nResult<TranslationTable> {
        let path = translation_file_path(dir, language);
        let modified = fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => I18nError::FileNotFound(path.display().to_string()),
                _ => I18nError::ReadError(format!("{}: {}", path.display(), e)),
            })?;

        if let Some((cached_at, table)) = self.entries.get(language) {
            if *cached_at == modified {
                return Ok(table.clone());
            }
        }

        let table = load_translation_file(&path)?;
        self.entries
            .insert(language.to_string(), (modified, table.clone()));
        Ok(table)
    }

    /// Drop every cached table, forcing reloads on next use.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
