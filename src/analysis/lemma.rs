//! Part-of-speech tags and lemmatization.
//!
//! A lemmatizer reduces a lowercased word to its dictionary form using the
//! coarse lexical category derived from its part-of-speech tag. The result is
//! an explicit [`LemmaOutcome`]: either a lemma was found, or the lowercased
//! surface form is used as a fallback. Fallbacks are ordinary values, never
//! errors, so callers can count them.
//!
//! # Examples
//!
//! ```
//! use federalist::analysis::lemma::{Lemmatizer, LemmaOutcome, PosTag};
//! use federalist::analysis::lemma::rules::RuleLemmatizer;
//!
//! let lemmatizer = RuleLemmatizer::new();
//!
//! let outcome = lemmatizer.lemmatize("States", &PosTag::new("NNS"));
//! assert_eq!(outcome, LemmaOutcome::Found("state".to_string()));
//!
//! let outcome = lemmatizer.lemmatize("shall", &PosTag::new("MD"));
//! assert!(outcome.is_fallback());
//! assert_eq!(outcome.lemma(), "shall");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod rules;
pub mod tagger;

pub use rules::{Lexicon, RuleLemmatizer};
pub use tagger::{PosTagger, SuffixTagger};

/// Coarse lexical category used to pick lemmatization rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordCategory {
    Adjective,
    Verb,
    Noun,
    Adverb,
    Other,
}

/// Inflection carried by a fine-grained tag.
///
/// Universal tags such as `NOUN` carry no inflection and report
/// [`Inflection::Unspecified`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Inflection {
    Plural,
    ThirdPerson,
    Past,
    Gerund,
    Comparative,
    Superlative,
    Base,
    Unspecified,
}

/// A part-of-speech tag, Penn Treebank (`NNS`, `VBD`) or universal (`NOUN`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosTag(String);

impl PosTag {
    /// Create a tag from its string form. Tags are stored uppercased.
    pub fn new<S: AsRef<str>>(tag: S) -> Self {
        PosTag(tag.as_ref().trim().to_ascii_uppercase())
    }

    /// The tag string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Map the tag to its coarse lexical category.
    pub fn category(&self) -> WordCategory {
        match self.0.as_str() {
            "ADJ" => WordCategory::Adjective,
            "VERB" | "AUX" => WordCategory::Verb,
            "NOUN" | "PROPN" => WordCategory::Noun,
            "ADV" => WordCategory::Adverb,
            "NUM" => WordCategory::Other,
            tag if tag.starts_with('J') => WordCategory::Adjective,
            tag if tag.starts_with('V') => WordCategory::Verb,
            tag if tag.starts_with('N') => WordCategory::Noun,
            tag if tag.starts_with('R') && tag != "RP" => WordCategory::Adverb,
            _ => WordCategory::Other,
        }
    }

    /// The inflection encoded in a Penn Treebank tag.
    pub fn inflection(&self) -> Inflection {
        match self.0.as_str() {
            "NNS" | "NNPS" => Inflection::Plural,
            "NN" | "NNP" => Inflection::Base,
            "VBZ" => Inflection::ThirdPerson,
            "VBD" | "VBN" => Inflection::Past,
            "VBG" => Inflection::Gerund,
            "VB" | "VBP" => Inflection::Base,
            "JJR" | "RBR" => Inflection::Comparative,
            "JJS" | "RBS" => Inflection::Superlative,
            "JJ" | "RB" => Inflection::Base,
            _ => Inflection::Unspecified,
        }
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of lemmatizing one word.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LemmaOutcome {
    /// A lemma was derived for the word.
    Found(String),
    /// No lemma could be derived; holds the lowercased surface form.
    Fallback(String),
}

impl LemmaOutcome {
    /// The lemma text, whichever outcome produced it.
    pub fn lemma(&self) -> &str {
        match self {
            LemmaOutcome::Found(lemma) | LemmaOutcome::Fallback(lemma) => lemma,
        }
    }

    /// Consume the outcome and return the lemma text.
    pub fn into_lemma(self) -> String {
        match self {
            LemmaOutcome::Found(lemma) | LemmaOutcome::Fallback(lemma) => lemma,
        }
    }

    /// Whether the surface form was used as a fallback.
    pub fn is_fallback(&self) -> bool {
        matches!(self, LemmaOutcome::Fallback(_))
    }
}

/// Trait for lemmatizers.
pub trait Lemmatizer: Send + Sync {
    /// Reduce `word` to its lemma using the category of `tag`.
    ///
    /// Implementations lowercase the word first and must not fail: anything
    /// they cannot handle comes back as [`LemmaOutcome::Fallback`].
    fn lemmatize(&self, word: &str, tag: &PosTag) -> LemmaOutcome;

    /// Get the name of this lemmatizer.
    fn name(&self) -> &'static str;
}
