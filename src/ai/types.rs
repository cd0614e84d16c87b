//! Parameter and result shapes for the generative-text operations.
//!
//! Structured results use camelCase keys because that is what the completion
//! backend is prompted to emit.

use serde::{Deserialize, Serialize};

/// Poem style for generation requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PoemStyle {
    Romantic,
    Classical,
    Modern,
    Tragic,
    Humorous,
}

impl PoemStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoemStyle::Romantic => "romantic",
            PoemStyle::Classical => "classical",
            PoemStyle::Modern => "modern",
            PoemStyle::Tragic => "tragic",
            PoemStyle::Humorous => "humorous",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "romantic" => Some(PoemStyle::Romantic),
            "classical" => Some(PoemStyle::Classical),
            "modern" => Some(PoemStyle::Modern),
            "tragic" => Some(PoemStyle::Tragic),
            "humorous" => Some(PoemStyle::Humorous),
            _ => None,
        }
    }
}

/// Poem form for generation requests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PoemForm {
    FreeVerse,
    Sonnet,
    Haiku,
    RhymeBased,
    Limerick,
}

impl PoemForm {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoemForm::FreeVerse => "free-verse",
            PoemForm::Sonnet => "sonnet",
            PoemForm::Haiku => "haiku",
            PoemForm::RhymeBased => "rhyme-based",
            PoemForm::Limerick => "limerick",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "free-verse" => Some(PoemForm::FreeVerse),
            "sonnet" => Some(PoemForm::Sonnet),
            "haiku" => Some(PoemForm::Haiku),
            "rhyme-based" => Some(PoemForm::RhymeBased),
            "limerick" => Some(PoemForm::Limerick),
            _ => None,
        }
    }
}

/// Requested poem length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum PoemLength {
    Short,
    Medium,
    Long,
}

impl PoemLength {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoemLength::Short => "short",
            PoemLength::Medium => "medium",
            PoemLength::Long => "long",
        }
    }
}

/// Parameters for poem generation. Everything but the topic is optional.
#[derive(Debug, Clone, Default)]
pub struct PoemParams {
    pub topic: String,
    pub mood: Option<String>,
    pub style: Option<PoemStyle>,
    pub form: Option<PoemForm>,
    pub length: Option<PoemLength>,
}

/// Per-dimension analysis scores, 0-100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisScores {
    pub depth: u8,
    pub emotion: u8,
    pub clarity: u8,
    pub rhyme: u8,
    pub structure: u8,
}

/// Structured result of comparing two poems.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemComparison {
    pub poem1: String,
    pub poem2: String,
    pub style_differences: String,
    pub theme_differences: String,
    pub literary_techniques: Vec<String>,
    pub analysis_scores: AnalysisScores,
    /// Similarity percentage, 0-100
    pub similarity_score: u8,
    pub summary: String,
}

/// Structured dictionary entry for a word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordMeaning {
    pub word: String,
    pub definition: String,
    pub synonyms: Vec<String>,
    pub usage: Vec<String>,
    pub origin: String,
}

/// A notable line and why it matters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportantLine {
    pub line: String,
    pub explanation: String,
}

/// Structured interpretation of a poem's theme.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeInterpretation {
    pub main_theme: String,
    #[serde(rename = "poetPOV")]
    pub poet_pov: String,
    pub symbolism: Vec<String>,
    pub emotional_expression: String,
    pub important_lines: Vec<ImportantLine>,
    pub simple_summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_round_trip() {
        for form in [
            PoemForm::FreeVerse,
            PoemForm::Sonnet,
            PoemForm::Haiku,
            PoemForm::RhymeBased,
            PoemForm::Limerick,
        ] {
            assert_eq!(PoemForm::from_str(form.as_str()), Some(form));
        }
        assert_eq!(PoemForm::from_str("villanelle"), None);
    }

    #[test]
    fn test_style_round_trip() {
        assert_eq!(
            PoemStyle::from_str(PoemStyle::Tragic.as_str()),
            Some(PoemStyle::Tragic)
        );
        assert_eq!(PoemStyle::from_str("gothic"), None);
    }
}
