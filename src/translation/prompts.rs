/*!
 * Prompt templates for catalog translation.
 *
 * Two request shapes exist: a numbered fragment batch (markup path) and a
 * direct single-text translation. Both pin the model down hard: exact
 * numbering, no commentary, proper nouns and technical terms untouched.
 */

use super::segmenter::PlaceholderMap;

/// System prompt template with `{source_language}`/`{target_language}` placeholders
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// System prompt for the fragment-batch (markup) path.
    pub const FRAGMENT_TRANSLATOR: &'static str = "\
You are a professional translator specializing in web application content.
Translate precisely, keeping the original context and meaning.
Preserve proper nouns, brand names, place names, technical terms and acronyms.";

    /// System prompt for the single-text path.
    pub const TEXT_TRANSLATOR: &'static str = "\
You are a professional translator. Translate from {source_language} to {target_language}.
Rules:
- Return ONLY the translation, nothing else
- Do NOT include instructions, explanations, or notes
- Do NOT translate proper names, brands, or technical terms
- Preserve formatting and punctuation";

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the fragment-batch translator template.
    pub fn fragment_translator() -> Self {
        Self::new(Self::FRAGMENT_TRANSLATOR)
    }

    /// Create the single-text translator template.
    pub fn text_translator() -> Self {
        Self::new(Self::TEXT_TRANSLATOR)
    }

    /// Render the template with the given language names.
    pub fn render(&self, source_language: &str, target_language: &str) -> String {
        self.template
            .replace("{source_language}", source_language)
            .replace("{target_language}", target_language)
    }
}

/// Build the user prompt listing fragments as a numbered sequence.
///
/// The numbering is the protocol: the response is expected to repeat it
/// exactly, and ordinals are mapped back to tokens by position.
pub fn fragment_user_prompt(
    fragments: &PlaceholderMap,
    source_language: &str,
    target_language: &str,
) -> String {
    let numbered = fragments
        .iter()
        .enumerate()
        .map(|(index, (_, text))| format!("{}. {}", index + 1, text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Translate these texts from {source} to {target}:\n\
         \n\
         {numbered}\n\
         \n\
         Rules:\n\
         - Keep the exact numbering format (1. 2. 3. etc.)\n\
         - Preserve ALL inline markup tags unchanged\n\
         - Do NOT translate proper nouns, brands, place or company names\n\
         - Do NOT translate acronyms, codes or technical terms\n\
         - Return ONLY the numbered translations, with no commentary\n\
         \n\
         Format:\n\
         1. [translation]\n\
         2. [translation]",
        source = source_language,
        target = target_language,
        numbered = numbered,
    )
}

/// Build the user prompt for a direct whole-string translation.
pub fn text_user_prompt(text: &str, target_language: &str) -> String {
    format!("Translate to {}:\n\n{}", target_language, text)
}
