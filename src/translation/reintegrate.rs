/*!
 * Reintegration of translated fragments.
 *
 * Substitutes every placeholder token in a tokenized markup string with its
 * translated fragment. Tokens are mutually exclusive unique strings by
 * construction, so substitution order does not matter.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TranslationError;
use super::segmenter::PlaceholderMap;

// @const: Any placeholder token, for the residual-token guard
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{TEXT_\d+\}\}").unwrap()
});

/// Replace every token occurrence with its mapped translation.
///
/// Tokens absent from the map are left in place; `check_residual_tokens`
/// exists so callers can refuse to persist such a string.
pub fn reintegrate(markup_with_tokens: &str, translations: &PlaceholderMap) -> String {
    let mut result = markup_with_tokens.to_string();
    for (token, translated) in translations.iter() {
        result = result.replace(token, translated);
    }
    result
}

/// Fail if a reassembled string still contains a raw placeholder token
pub fn check_residual_tokens(text: &str) -> Result<(), TranslationError> {
    if let Some(found) = TOKEN_REGEX.find(text) {
        return Err(TranslationError::ResidualToken(found.as_str().to_string()));
    }
    Ok(())
}
