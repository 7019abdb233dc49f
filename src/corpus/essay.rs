//! Essays and token occurrences.

use serde::{Deserialize, Serialize};

use crate::analysis::lemma::PosTag;
use crate::corpus::EssayId;

/// One analyzed token of an essay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenOccurrence {
    /// Position within the essay's cleaned token sequence (0-based)
    pub position: usize,
    /// Lowercased form after normalization
    pub surface: String,
    /// Canonical lemma
    pub lemma: String,
    /// Part-of-speech tag
    pub pos: PosTag,
    /// Whether the lemma is the surface form used as a fallback
    pub fallback: bool,
}

/// An essay with its raw text and derived views.
///
/// Immutable once built: the raw lines are retained next to the cleaned
/// lines and the lemmatized tokens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Essay {
    id: EssayId,
    raw_lines: Vec<String>,
    cleaned_lines: Vec<String>,
    tokens: Vec<TokenOccurrence>,
}

impl Essay {
    /// Create an essay from its parts.
    pub fn new(
        id: EssayId,
        raw_lines: Vec<String>,
        cleaned_lines: Vec<String>,
        tokens: Vec<TokenOccurrence>,
    ) -> Self {
        Essay {
            id,
            raw_lines,
            cleaned_lines,
            tokens,
        }
    }

    pub fn id(&self) -> EssayId {
        self.id
    }

    pub fn raw_lines(&self) -> &[String] {
        &self.raw_lines
    }

    pub fn cleaned_lines(&self) -> &[String] {
        &self.cleaned_lines
    }

    pub fn tokens(&self) -> &[TokenOccurrence] {
        &self.tokens
    }

    /// The cleaned token sequence.
    pub fn surfaces(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.surface.as_str())
    }

    /// The lemma sequence, in source order.
    pub fn lemmas(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.lemma.as_str())
    }

    /// Number of cleaned tokens.
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Whether nothing survived cleaning.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of tokens whose lemma is a fallback.
    pub fn fallback_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.fallback).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occurrence(position: usize, surface: &str, lemma: &str, fallback: bool) -> TokenOccurrence {
        TokenOccurrence {
            position,
            surface: surface.to_string(),
            lemma: lemma.to_string(),
            pos: PosTag::new("NNS"),
            fallback,
        }
    }

    #[test]
    fn test_essay_views() {
        let essay = Essay::new(
            EssayId::new(3).unwrap(),
            vec!["The States.".to_string()],
            vec!["states".to_string()],
            vec![
                occurrence(0, "states", "state", false),
                occurrence(1, "shall", "shall", true),
            ],
        );

        assert_eq!(essay.id().get(), 3);
        assert_eq!(essay.raw_lines().to_vec(), vec!["The States.".to_string()]);
        assert_eq!(essay.surfaces().collect::<Vec<_>>(), vec!["states", "shall"]);
        assert_eq!(essay.lemmas().collect::<Vec<_>>(), vec!["state", "shall"]);
        assert_eq!(essay.token_count(), 2);
        assert_eq!(essay.fallback_count(), 1);
        assert!(!essay.is_empty());
    }
}
