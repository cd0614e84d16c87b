//! Generative-text client.
//!
//! Every operation builds a natural-language prompt from its structured
//! input, runs it through a single opaque completion call, and either
//! returns the raw text or decodes the response into a typed shape. One
//! attempt per call, no retry. Transport failures surface as a generic
//! per-operation failure; malformed structured responses surface as a parse
//! error so callers can message the user differently.

mod types;

pub use types::*;

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// Opaque completion transport: one prompt in, one text response out.
pub trait CompletionTransport: Send + Sync {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Placeholder transport returning a fixed string after a fixed delay.
#[derive(Debug, Clone)]
pub struct StubTransport {
    reply: String,
    delay: Duration,
}

impl StubTransport {
    pub fn new(reply: impl Into<String>, delay: Duration) -> Self {
        Self {
            reply: reply.into(),
            delay,
        }
    }
}

impl Default for StubTransport {
    fn default() -> Self {
        Self::new("Mock AI response", Duration::from_millis(1000))
    }
}

impl CompletionTransport for StubTransport {
    async fn complete(&self, _prompt: &str) -> Result<String, AppError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.reply.clone())
    }
}

/// AI text service, generic over the completion transport so a real backend
/// can replace the stub without touching the call contract.
pub struct AiService<T: CompletionTransport> {
    transport: T,
}

impl<T: CompletionTransport> AiService<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Generate a poem from the given parameters.
    pub async fn generate_poem(&self, params: &PoemParams) -> Result<String, AppError> {
        let prompt = build_poem_prompt(params);
        self.complete_or("Failed to generate poem", &prompt).await
    }

    /// Compare two poems, scoring both across five dimensions.
    pub async fn compare_poems(
        &self,
        poem1: &str,
        poem2: &str,
    ) -> Result<PoemComparison, AppError> {
        let prompt = format!(
            "Compare these two poems in detail:\n\n\
             POEM 1:\n{poem1}\n\n\
             POEM 2:\n{poem2}\n\n\
             Provide a comprehensive comparison including:\n\
             1. Style differences\n\
             2. Theme differences\n\
             3. Literary techniques used in each\n\
             4. Analysis scores (0-100) for: depth, emotion, clarity, rhyme, structure\n\
             5. Similarity percentage (0-100)\n\
             6. Summary of comparative strengths\n\n\
             Format your response as JSON."
        );

        let response = self.complete_or("Failed to compare poems", &prompt).await?;
        parse_structured("poem comparison", &response)
    }

    /// Look up a word: definition, synonyms, usage, origin.
    pub async fn word_meaning(&self, word: &str) -> Result<WordMeaning, AppError> {
        let prompt = format!(
            "Provide detailed information about the word \"{word}\":\n\
             1. Definition\n\
             2. Synonyms (at least 5)\n\
             3. Usage examples (at least 3 sentences)\n\
             4. Etymology/origin\n\n\
             Format as JSON with keys: word, definition, synonyms, usage, origin"
        );

        let response = self
            .complete_or("Failed to get word meaning", &prompt)
            .await?;
        parse_structured("word meaning", &response)
    }

    /// Interpret a poem's theme, symbolism, and key lines.
    pub async fn interpret_theme(&self, poem: &str) -> Result<ThemeInterpretation, AppError> {
        let prompt = format!(
            "Analyze this poem and provide a comprehensive interpretation:\n\n\
             {poem}\n\n\
             Provide:\n\
             1. Main theme\n\
             2. Poet's point of view\n\
             3. Symbolism and hidden meanings (list)\n\
             4. Emotional expression\n\
             5. Important lines with explanations (at least 3)\n\
             6. Simple summary for students\n\n\
             Format as JSON."
        );

        let response = self
            .complete_or("Failed to interpret theme", &prompt)
            .await?;
        parse_structured("theme interpretation", &response)
    }

    /// Rewrite a poem in a different style, keeping its core message.
    pub async fn rewrite_poem(&self, poem: &str, target_style: &str) -> Result<String, AppError> {
        let prompt = format!(
            "Rewrite this poem in {target_style} style while maintaining its core message:\n\n\
             {poem}\n\n\
             Only return the rewritten poem, nothing else."
        );

        self.complete_or("Failed to rewrite poem", &prompt).await
    }

    /// Detect the dominant emotional mood of a poem.
    pub async fn detect_mood(&self, poem: &str) -> Result<String, AppError> {
        let prompt = format!(
            "Analyze the emotional mood/tone of this poem. Provide a single word or \
             short phrase describing the dominant emotion:\n\n{poem}"
        );

        let response = self.complete_or("Failed to detect mood", &prompt).await?;
        Ok(response.trim().to_string())
    }

    /// Suggest titles for a poem, one per response line.
    pub async fn generate_titles(&self, poem: &str) -> Result<Vec<String>, AppError> {
        let prompt = format!(
            "Generate 5 perfect, creative titles for this poem:\n\n\
             {poem}\n\n\
             Return only the titles, one per line."
        );

        let response = self
            .complete_or("Failed to generate titles", &prompt)
            .await?;
        Ok(non_empty_lines(&response))
    }

    /// Suggest poetic alternatives for a word, one per response line.
    pub async fn enhance_vocabulary(&self, word: &str) -> Result<Vec<String>, AppError> {
        let prompt = format!(
            "Suggest 10 advanced poetic alternatives for the word \"{word}\" that would \
             work well in poetry. Return only the words, one per line."
        );

        let response = self
            .complete_or("Failed to enhance vocabulary", &prompt)
            .await?;
        Ok(non_empty_lines(&response))
    }

    /// Run one completion attempt, collapsing any transport failure into a
    /// generic per-operation message.
    async fn complete_or(&self, failure: &str, prompt: &str) -> Result<String, AppError> {
        self.transport.complete(prompt).await.map_err(|e| {
            tracing::error!("{}: {}", failure, e);
            AppError::Transport(failure.to_string())
        })
    }
}

/// Build the generation prompt, defaulting the form to free verse.
fn build_poem_prompt(params: &PoemParams) -> String {
    let form = params
        .form
        .as_ref()
        .map(|f| f.as_str())
        .unwrap_or("free-verse");
    let mut prompt = format!("Write a beautiful {} poem", form);

    if !params.topic.is_empty() {
        prompt.push_str(&format!(" about {}", params.topic));
    }
    if let Some(mood) = &params.mood {
        prompt.push_str(&format!(" with a {} mood", mood));
    }
    if let Some(style) = &params.style {
        prompt.push_str(&format!(" in {} style", style.as_str()));
    }
    if let Some(length) = &params.length {
        prompt.push_str(&format!(" ({} length)", length.as_str()));
    }

    prompt.push_str(
        ". Make it emotionally resonant and use vivid imagery. Return only the poem, no explanations.",
    );

    prompt
}

/// Decode a structured response, mapping malformed output to a parse error
/// rather than a transport failure.
fn parse_structured<D: DeserializeOwned>(what: &str, response: &str) -> Result<D, AppError> {
    serde_json::from_str(response).map_err(|e| {
        tracing::error!("Malformed {} response: {}", what, e);
        AppError::Parse(format!("Malformed {} response: {}", what, e))
    })
}

fn non_empty_lines(response: &str) -> Vec<String> {
    response
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect()
}
