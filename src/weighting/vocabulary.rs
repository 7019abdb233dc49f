//! Corpus vocabulary.

use std::collections::BTreeSet;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;

/// Dense id of a vocabulary term. Ids follow the lexicographic term order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TermId(pub u32);

impl TermId {
    /// Position of the term in the vocabulary.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// The distinct lemmas of a corpus, sorted, with id lookup.
#[derive(Clone, Debug, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    lookup: AHashMap<String, TermId>,
}

impl Vocabulary {
    /// Collect every lemma that occurs anywhere in the corpus.
    pub fn from_corpus(corpus: &Corpus) -> Self {
        Self::from_terms(corpus.iter().flat_map(|essay| essay.lemmas()))
    }

    /// Build a vocabulary from terms in any order, ignoring repeats.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sorted: BTreeSet<String> = terms
            .into_iter()
            .map(|term| term.as_ref().to_string())
            .collect();
        let terms: Vec<String> = sorted.into_iter().collect();
        let lookup = terms
            .iter()
            .enumerate()
            .map(|(index, term)| (term.clone(), TermId(index as u32)))
            .collect();
        Vocabulary { terms, lookup }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Id of a term, if it is in the vocabulary.
    pub fn id(&self, term: &str) -> Option<TermId> {
        self.lookup.get(term).copied()
    }

    /// Term text for an id.
    pub fn term(&self, id: TermId) -> Option<&str> {
        self.terms.get(id.index()).map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.lookup.contains_key(term)
    }

    /// Terms with their ids, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (TermId, &str)> {
        self.terms
            .iter()
            .enumerate()
            .map(|(index, term)| (TermId(index as u32), term.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_and_deduplicated() {
        let vocabulary = Vocabulary::from_terms(["union", "state", "power", "state"]);
        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.id("power"), Some(TermId(0)));
        assert_eq!(vocabulary.id("union"), Some(TermId(2)));
        assert_eq!(vocabulary.term(TermId(1)), Some("state"));
        assert_eq!(vocabulary.term(TermId(3)), None);
        assert!(!vocabulary.contains("faction"));

        let terms: Vec<&str> = vocabulary.iter().map(|(_, term)| term).collect();
        assert_eq!(terms, vec!["power", "state", "union"]);
    }

    #[test]
    fn test_empty() {
        let vocabulary = Vocabulary::from_terms(Vec::<String>::new());
        assert!(vocabulary.is_empty());
        assert_eq!(vocabulary.id("anything"), None);
    }
}
