/*!
 * Translatability filter.
 *
 * Decides whether a source text is worth sending to the remote translator.
 * Texts that consist entirely of interpolation syntax, bare URLs or email
 * addresses would only be corrupted by translation, and very short texts
 * waste a remote call for no benefit.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// @const: Text made only of %(name)s / {name} / $name interpolation
static PLACEHOLDER_ONLY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(%\(.*?\)[sd]|\{\w+\}|\$\w+)+$").unwrap()
});

// @const: Bare URL or email address
static URL_OR_EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://|www\.|[\w.-]+@[\w.-]+).*$").unwrap()
});

/// Decide whether a text should be sent to the translator
pub fn should_translate(text: &str) -> bool {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return false;
    }

    // Too short to carry translatable prose
    if trimmed.chars().count() < 2 {
        return false;
    }

    // Pure interpolation syntax (Django/Python style)
    if PLACEHOLDER_ONLY_REGEX.is_match(trimmed) {
        return false;
    }

    // A URL or email with no surrounding prose
    if URL_OR_EMAIL_REGEX.is_match(trimmed) && !text.contains(' ') {
        return false;
    }

    true
}
