use anyhow::{anyhow, Result};
use isolang::Language;
use std::path::{Component, Path};

/// Language utilities for ISO language code handling
///
/// This module provides functions for validating ISO 639-1 language codes,
/// deriving the target language of a catalog from its storage path, and
/// producing human-readable language names for translation prompts.
/// Validate a language code of the form `xx` or `xx_YY`
pub fn validate_language_code(code: &str) -> Result<()> {
    let normalized = normalize_code(code);
    let base = normalized.split('_').next().unwrap_or("");

    if base.len() == 2 && Language::from_639_1(base).is_some() {
        return Ok(());
    }

    Err(anyhow!("Invalid language code: {}", code))
}

/// Derive the target language from a catalog file path.
///
/// Locale trees store catalogs under a per-language directory, e.g.
/// `locale/en/LC_MESSAGES/django.po` or `locale/pt_BR/LC_MESSAGES/django.po`.
/// The first path component that looks like an ISO 639-1 code (optionally
/// with a `_REGION` suffix) wins.
pub fn target_language_from_path(path: &Path) -> Result<String> {
    for component in path.components() {
        let Component::Normal(segment) = component else {
            continue;
        };

        let normalized = normalize_code(&segment.to_string_lossy());
        if !looks_like_language_segment(&normalized) {
            continue;
        }

        let base = normalized.split('_').next().unwrap_or("");
        if Language::from_639_1(base).is_some() {
            return Ok(normalized);
        }
    }

    Err(anyhow!(
        "Could not determine target language from path: {}",
        path.display()
    ))
}

/// Get the human-readable language name for a code, for use in prompts
pub fn display_name(code: &str) -> Result<String> {
    let normalized = normalize_code(code);

    // Regional overrides the generic ISO tables cannot express
    match normalized.as_str() {
        "pt" | "pt_br" => return Ok("Portuguese (Brazil)".to_string()),
        _ => {}
    }

    let base = normalized.split('_').next().unwrap_or("");
    let lang = Language::from_639_1(base)
        .ok_or_else(|| anyhow!("Unknown language code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// Lowercase and unify separators so `pt-BR`, `pt_BR` and `pt_br` compare equal
fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase().replace('-', "_")
}

// A language segment is `xx` or `xx_yy`; anything else (LC_MESSAGES,
// file names, project directories) is skipped without consulting ISO tables.
fn looks_like_language_segment(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    match bytes.len() {
        2 => bytes.iter().all(|b| b.is_ascii_lowercase()),
        5 => {
            bytes[2] == b'_'
                && bytes[..2].iter().all(|b| b.is_ascii_lowercase())
                && bytes[3..].iter().all(|b| b.is_ascii_alphanumeric())
        }
        _ => false,
    }
}
