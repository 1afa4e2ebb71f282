/*!
 * Translation pipeline for catalog entries.
 *
 * This module contains the markup-safe machinery for translating catalog
 * texts with a remote text-generation service. It is split into several
 * submodules:
 *
 * - `core`: Core translation service and the numbered-list wire protocol
 * - `filter`: Translatability gate for candidate source texts
 * - `segmenter`: Markup segmentation into placeholder fragments
 * - `reintegrate`: Substitution of translated fragments back into markup
 * - `validator`: Heuristics against instruction leakage and runaway output
 * - `prompts`: Prompt templates and builders for both request shapes
 */

// Re-export main types for easier usage
pub use self::core::TranslationService;
pub use self::segmenter::{segment, MarkupTree, PlaceholderMap};
pub use self::validator::ResponseValidator;

// Submodules
pub mod core;
pub mod filter;
pub mod prompts;
pub mod reintegrate;
pub mod segmenter;
pub mod validator;
