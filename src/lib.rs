/*!
 * # YAPTwAI - Yet Another PO Translator with AI
 *
 * A Rust library for batch machine translation of gettext catalogs using
 * the DeepSeek API.
 *
 * ## Features
 *
 * - Select catalog entries that actually need work (empty, fuzzy or stale)
 * - Markup-safe translation: HTML fragments are tokenized, translated as a
 *   numbered batch and reassembled without touching tags or attributes
 * - Response validation against instruction leakage and runaway output
 * - Batched, strictly sequential processing tolerant of remote failures
 * - Dry-run mode, timestamped backups, single save per run
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `catalog`: Gettext `.po` parsing, serialization and backups
 * - `translation`: AI-powered translation pipeline:
 *   - `translation::core`: Translation service and wire-format parsing
 *   - `translation::filter`: Translatability gate
 *   - `translation::segmenter`: Markup segmentation with placeholders
 *   - `translation::reintegrate`: Fragment reintegration
 *   - `translation::validator`: Response validation heuristics
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller (the batch driver)
 * - `language_utils`: ISO language code utilities
 * - `providers`: Client implementations for text-generation providers
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod catalog;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunSummary};
pub use catalog::{Catalog, CatalogEntry};
pub use translation::{PlaceholderMap, TranslationService};
pub use errors::{AppError, ProviderError, TranslationError};
