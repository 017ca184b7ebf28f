//! Language selection and validation
//!
//! A deployment supports a fixed set of language codes configured at
//! construction. The default language must be a member of that set; asking
//! for a language outside the set is an error, never silently corrected.

use crate::error::{I18nError, I18nResult};

/// Validate that a language code is in acceptable format
///
/// Checks that the code is non-empty and contains only ASCII alphanumerics,
/// hyphens, and underscores (following ISO 639 conventions).
pub fn validate_language_code(code: &str) -> I18nResult<()> {
    if code.is_empty() {
        return Err(I18nError::InvalidLanguage(
            "Language code is empty".to_string(),
        ));
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(I18nError::InvalidLanguage(format!(
            "Invalid characters in language code: {}",
            code
        )));
    }

    Ok(())
}

/// The fixed set of language codes a deployment supports, plus its default.
///
/// Constructing one validates every code syntactically and checks the default
/// is a member, so a successfully-built value can always resolve `None` to a
/// valid language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedLanguages {
    codes: Vec<String>,
    default: String,
}

impl AllowedLanguages {
    /// Build the allowed set
    ///
    /// # Errors
    /// * [`I18nError::InvalidLanguage`] - A code is malformed, the set is
    ///   empty, or `default` is not a member of `codes`
    pub fn new(codes: &[String], default: &str) -> I18nResult<Self> {
        if codes.is_empty() {
            return Err(I18nError::InvalidLanguage(
                "Allowed language set is empty".to_string(),
            ));
        }

        for code in codes {
            validate_language_code(code)?;
        }

        if !codes.iter().any(|code| code == default) {
            return Err(I18nError::InvalidLanguage(format!(
                "Default language \"{}\" is not in the allowed set",
                default
            )));
        }

        Ok(AllowedLanguages {
            codes: codes.to_vec(),
            default: default.to_string(),
        })
    }

    /// Resolve a requested language to a member of the allowed set.
    ///
    /// `None` means "use the default". An explicit request outside the set is
    /// an error; callers must leave their previous language untouched then.
    pub fn resolve(&self, requested: Option<&str>) -> I18nResult<&str> {
        match requested {
            None => Ok(&self.default),
            Some(code) if self.contains(code) => {
                // Return the canonical entry, not the borrowed argument
                Ok(self
                    .codes
                    .iter()
                    .find(|member| member.as_str() == code)
                    .map(String::as_str)
                    .unwrap_or(&self.default))
            }
            Some(code) => Err(I18nError::InvalidLanguage(format!(
                "Language \"{}\" is not allowed",
                code
            ))),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|member| member == code)
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn default_language(&self) -> &str {
        &self.default
    }
}
