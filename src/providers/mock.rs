/*!
 * Mock provider implementation for testing.
 *
 * This module provides a mock provider that simulates different behaviors:
 * - `MockProvider::scripted(..)` - Replays a fixed queue of response bodies
 * - `MockProvider::echoing()` - Numbers back whatever fragments it receives
 * - `MockProvider::failing()` - Always fails with an error
 * - `MockProvider::empty()` - Returns empty response bodies
 */

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::ProviderError;
use crate::providers::deepseek::ChatRequest;

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Replay the scripted response queue; error when it runs dry
    Scripted,
    /// Echo each numbered input line back with a marker prefix
    Echoing,
    /// Always fail with a request error
    Failing,
    /// Return an empty response body
    Empty,
}

/// Mock provider for exercising the pipeline without network access
#[derive(Debug)]
pub struct MockProvider {
    /// Behavior mode
    behavior: MockBehavior,
    /// Queue of scripted response bodies
    responses: Mutex<VecDeque<String>>,
    /// Number of completion requests received
    request_count: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            responses: Mutex::new(VecDeque::new()),
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock that replays the given response bodies in order
    pub fn scripted(responses: Vec<String>) -> Self {
        let provider = Self::new(MockBehavior::Scripted);
        *provider.responses.lock().unwrap() = responses.into();
        provider
    }

    /// Create a mock that numbers back the fragments it receives
    pub fn echoing() -> Self {
        Self::new(MockBehavior::Echoing)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Number of completion requests this mock has received
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Shared handle to the request counter, usable after the provider has
    /// been moved into a service
    pub fn request_counter(&self) -> Arc<AtomicUsize> {
        self.request_count.clone()
    }

    /// Complete a request, returning the raw response body text
    pub async fn complete(&self, request: &ChatRequest) -> Result<String, ProviderError> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Scripted => self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| ProviderError::RequestFailed("Mock response queue exhausted".to_string())),
            MockBehavior::Echoing => Ok(Self::echo_numbered(&request.user_content())),
            MockBehavior::Failing => {
                Err(ProviderError::RequestFailed("Mock provider failure".to_string()))
            }
            MockBehavior::Empty => Ok(String::new()),
        }
    }

    // Reproduces the shapes the real service is asked for: every "N. text"
    // input line becomes "N. [MOCK] text"; prompts without numbered lines
    // (single-text mode) echo the text after the instruction header.
    fn echo_numbered(user_content: &str) -> String {
        let mut lines = Vec::new();
        for line in user_content.lines() {
            let trimmed = line.trim();
            // Fragment prompts list rules and a format example below the
            // fragments themselves; only the fragment list is echoed.
            if trimmed == "Rules:" {
                break;
            }
            if let Some((ordinal, rest)) = trimmed.split_once('.') {
                if !ordinal.is_empty() && ordinal.chars().all(|c| c.is_ascii_digit()) {
                    lines.push(format!("{}. [MOCK] {}", ordinal, rest.trim()));
                }
            }
        }

        if lines.is_empty() {
            return match user_content.split_once("\n\n") {
                Some((_, text)) => format!("[MOCK] {}", text.trim()),
                None => String::new(),
            };
        }

        lines.join("\n")
    }
}
