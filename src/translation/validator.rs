/*!
 * Response validation for single-text translations.
 *
 * Chat models occasionally echo their own instructions back, prepend
 * commentary, or run away repeating content. This module rejects candidate
 * translations that look like instruction leakage or are implausibly long
 * relative to their source. The numbered-list batch path does not use it;
 * the stricter numbered-line parser already constrains that format.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Default maximum length ratio (translation / source)
const DEFAULT_MAX_LENGTH_RATIO: f64 = 3.0;

// Patterns indicating the response contains prompt scaffolding rather than
// a translation. Matched against the lowercased candidate; kept specific
// (trailing newline on section headers) to limit false positives.
static LEAKAGE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\brules:\s*\n",
        r"\breglas:\s*\n",
        r"translate from .+ to",
        r"traduce del .+ a",
        r"do not translate\b",
        r"no traduzcas\b",
        r"\bpreserve formatting",
        r"return only",
        r"devuelve solo",
        r"format:\s*\n",
        r"formato:\s*\n",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Configuration for response validation
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Maximum acceptable length ratio (translated / source)
    pub max_length_ratio: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_length_ratio: DEFAULT_MAX_LENGTH_RATIO,
        }
    }
}

/// Validator for candidate translations returned by the service
#[derive(Debug, Default)]
pub struct ResponseValidator {
    config: ValidatorConfig,
}

impl ResponseValidator {
    /// Create a new validator with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new validator with custom configuration
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Check a candidate translation against the original text
    pub fn is_valid(&self, candidate: &str, original: &str) -> bool {
        if candidate.trim().is_empty() {
            return false;
        }

        let lowered = candidate.to_lowercase();
        for pattern in LEAKAGE_PATTERNS.iter() {
            if pattern.is_match(&lowered) {
                debug!("Candidate rejected by leakage pattern: {}", pattern.as_str());
                return false;
            }
        }

        // A translation far longer than its source almost always means the
        // response included instructions or repeated content
        let candidate_len = candidate.chars().count() as f64;
        let original_len = original.chars().count() as f64;
        if candidate_len > original_len * self.config.max_length_ratio {
            debug!(
                "Candidate rejected by length ratio: {} chars vs {} source chars",
                candidate_len as usize, original_len as usize
            );
            return false;
        }

        true
    }
}
