/*!
 * Core translation service implementation.
 *
 * This module contains the main TranslationService struct and its
 * implementation, which adapts catalog texts onto the remote
 * text-generation service: fragment batches for markup-bearing strings,
 * direct requests for plain text, and the parsing of the ad hoc
 * numbered-list wire format back into placeholder maps.
 */

use anyhow::Result;
use std::time::Duration;
use log::debug;

use crate::app_config::{TranslationConfig, TranslationProvider as ConfigTranslationProvider};
use crate::errors::TranslationError;
use crate::providers::deepseek::{ChatRequest, DeepSeek};
use crate::providers::mock::MockProvider;
use super::prompts::{self, PromptTemplate};
use super::reintegrate;
use super::segmenter::{self, PlaceholderMap};
use super::validator::ResponseValidator;

/// Translation provider implementation variants
enum TranslationProviderImpl {
    /// DeepSeek API service
    DeepSeek {
        /// Client instance
        client: DeepSeek,
    },

    /// Scripted mock, for tests
    Mock {
        /// Client instance
        client: MockProvider,
    },
}

/// Main translation service for catalog entry translation
pub struct TranslationService {
    /// Provider implementation
    provider: TranslationProviderImpl,

    /// Configuration for the translation service
    pub config: TranslationConfig,

    /// Validator applied to single-text responses
    validator: ResponseValidator,
}

impl TranslationService {
    /// Create a new translation service with the given configuration
    pub fn new(config: TranslationConfig) -> Result<Self> {
        let provider = match config.provider {
            ConfigTranslationProvider::DeepSeek => TranslationProviderImpl::DeepSeek {
                client: DeepSeek::new(config.api_key.clone(), config.endpoint.clone()),
            },
        };

        Ok(Self {
            provider,
            config,
            validator: ResponseValidator::new(),
        })
    }

    /// Create a service backed by a mock provider - used by tests
    pub fn with_mock(config: TranslationConfig, client: MockProvider) -> Self {
        Self {
            provider: TranslationProviderImpl::Mock { client },
            config,
            validator: ResponseValidator::new(),
        }
    }

    /// Send one request and extract the raw response text
    async fn complete(&self, request: ChatRequest) -> Result<String, TranslationError> {
        match &self.provider {
            TranslationProviderImpl::DeepSeek { client } => {
                let response = client.complete(request).await?;
                Ok(DeepSeek::extract_text_from_response(&response))
            }
            TranslationProviderImpl::Mock { client } => Ok(client.complete(&request).await?),
        }
    }

    /// Translate a placeholder map of fragments in one numbered-list request.
    ///
    /// Returns a map of token -> translated fragment. Tokens whose ordinal
    /// never appeared in the response are absent from the result; the caller
    /// decides whether a partial map is acceptable (for catalog entries it
    /// is not, see `translate_smart`).
    pub async fn translate_fragments(
        &self,
        fragments: &PlaceholderMap,
        source_language: &str,
        target_language: &str,
    ) -> Result<PlaceholderMap, TranslationError> {
        if fragments.is_empty() {
            return Ok(PlaceholderMap::new());
        }

        let system = PromptTemplate::fragment_translator().render(source_language, target_language);
        let user = prompts::fragment_user_prompt(fragments, source_language, target_language);

        let request = ChatRequest::new(&self.config.model)
            .system(system)
            .add_message("user", user)
            .temperature(self.config.temperature)
            .max_tokens(self.config.fragment_max_tokens)
            .timeout(Duration::from_secs(self.config.fragment_timeout_secs));

        let body = self.complete(request).await?;
        debug!("Fragment response: {} bytes for {} fragments", body.len(), fragments.len());

        let tokens: Vec<&str> = fragments.tokens().collect();
        Ok(Self::parse_numbered_response(&body, &tokens))
    }

    /// Parse a numbered-list response body back into a token -> translation map.
    ///
    /// The wire format is one `<ordinal>. <translation>` per line. Lines
    /// without a leading integer are skipped, out-of-range ordinals are
    /// dropped, and a repeated ordinal overwrites the earlier line. Ordinal
    /// k maps to the k-th token of the request map, by position.
    pub fn parse_numbered_response(body: &str, tokens: &[&str]) -> PlaceholderMap {
        let mut translations = PlaceholderMap::new();

        for line in body.lines() {
            let line = line.trim();
            let Some(first) = line.chars().next() else {
                continue;
            };
            if !first.is_ascii_digit() {
                continue;
            }

            let Some((ordinal_part, rest)) = line.split_once('.') else {
                continue;
            };
            let Ok(ordinal) = ordinal_part.trim().parse::<usize>() else {
                continue;
            };

            if (1..=tokens.len()).contains(&ordinal) {
                translations.insert(tokens[ordinal - 1], rest.trim());
            }
        }

        translations
    }

    /// Strip one enclosing layer of matched double quotes, then of matched
    /// single quotes, from a raw response
    pub fn strip_enclosing_quotes(text: &str) -> &str {
        let mut result = text;
        if result.len() >= 2 && result.starts_with('"') && result.ends_with('"') {
            result = &result[1..result.len() - 1];
        }
        if result.len() >= 2 && result.starts_with('\'') && result.ends_with('\'') {
            result = &result[1..result.len() - 1];
        }
        result
    }

    /// Translate a plain (markup-free) text in a single direct request
    pub async fn translate_plain(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let system = PromptTemplate::text_translator().render(source_language, target_language);
        let user = prompts::text_user_prompt(text, target_language);

        let request = ChatRequest::new(&self.config.model)
            .system(system)
            .add_message("user", user)
            .temperature(self.config.temperature)
            .max_tokens(self.config.text_max_tokens)
            .timeout(Duration::from_secs(self.config.text_timeout_secs));

        let body = self.complete(request).await?;
        let candidate = Self::strip_enclosing_quotes(body.trim());

        if candidate.trim().is_empty() {
            return Err(TranslationError::EmptyResponse);
        }

        if !self.validator.is_valid(candidate, text) {
            return Err(TranslationError::Rejected(
                "candidate echoed instructions or exceeded the length ceiling".to_string(),
            ));
        }

        Ok(candidate.to_string())
    }

    /// Translate a text, picking the markup-safe path when it carries markup.
    ///
    /// Markup-bearing texts are segmented into placeholder fragments,
    /// translated as one numbered batch and reassembled; an incomplete
    /// response fails the whole text rather than producing a string with
    /// raw tokens in it. Plain texts go through the direct path.
    pub async fn translate_smart(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        if !segmenter::has_markup(text) {
            return self.translate_plain(text, source_language, target_language).await;
        }

        let (tokenized, placeholders) = segmenter::segment(text)?;

        if placeholders.is_empty() {
            // Markup with no prose inside; nothing to translate
            return Ok(text.to_string());
        }

        let translations = self
            .translate_fragments(&placeholders, source_language, target_language)
            .await?;

        if translations.len() != placeholders.len() {
            return Err(TranslationError::IncompleteBatch {
                expected: placeholders.len(),
                received: translations.len(),
            });
        }

        let result = reintegrate::reintegrate(&tokenized, &translations);
        reintegrate::check_residual_tokens(&result)?;

        Ok(result)
    }
}
