//! Two-pass corpus construction.
//!
//! The first pass validates every input id: unparseable or out-of-range ids
//! are rejected, and a repeated id keeps its first occurrence. The second
//! pass analyzes the accepted essays in parallel and collects them into one
//! vector sorted by id. When the lemmatizer validates against the corpus
//! lexicon, normalization and lemmatization run as separate parallel passes
//! so the lexicon can be gathered in between.

use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::normalizer::TextNormalizer;
use crate::analysis::lemma::{Lemmatizer, Lexicon, PosTagger, RuleLemmatizer, SuffixTagger};
use crate::analysis::token::{IntoTokenStream, Token};
use crate::analysis::token_filter::{AlphabeticFilter, Filter, LemmaFilter};
use crate::config::PipelineConfig;
use crate::corpus::{Corpus, Essay, EssayId, TokenOccurrence};
use crate::error::{FederalistError, Result};

/// Raw text of one essay, as produced by ingestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EssaySource {
    /// Id as found in the source, e.g. a file name
    pub raw_id: String,
    /// Text lines in source order
    pub lines: Vec<String>,
}

impl EssaySource {
    pub fn new<S: Into<String>>(raw_id: S, lines: Vec<String>) -> Self {
        EssaySource {
            raw_id: raw_id.into(),
            lines,
        }
    }

    /// Build a source from a block of text, split on line breaks.
    pub fn from_text<S: Into<String>>(raw_id: S, text: &str) -> Self {
        Self::new(raw_id, text.lines().map(str::to_string).collect())
    }
}

/// Counts of what the corpus build accepted, rejected and recovered from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildReport {
    /// Number of sources offered to the builder
    pub sources: usize,
    /// Number of essays in the built corpus
    pub accepted: usize,
    /// Raw ids that did not parse to a valid essay id
    pub rejected_ids: Vec<String>,
    /// Ids seen more than once; the first source was kept
    pub duplicate_ids: Vec<EssayId>,
    /// Essays with no tokens left after cleaning
    pub empty_essays: Vec<EssayId>,
    /// Total number of cleaned tokens
    pub tokens: usize,
    /// Tokens whose lemma fell back to the surface form
    pub lemma_fallbacks: usize,
}

impl BuildReport {
    /// Share of tokens that used the lemma fallback.
    pub fn fallback_rate(&self) -> f64 {
        if self.tokens == 0 {
            0.0
        } else {
            self.lemma_fallbacks as f64 / self.tokens as f64
        }
    }
}

/// Builds a [`Corpus`] from raw essay sources.
#[derive(Clone)]
pub struct CorpusBuilder {
    normalizer: TextNormalizer,
    tagger: Arc<dyn PosTagger>,
    lemmatizer: Arc<dyn Lemmatizer>,
    corpus_lexicon: bool,
    expected_essays: Option<usize>,
}

impl std::fmt::Debug for CorpusBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CorpusBuilder")
            .field("normalizer", &self.normalizer)
            .field("tagger", &self.tagger.name())
            .field("lemmatizer", &self.lemmatizer.name())
            .field("corpus_lexicon", &self.corpus_lexicon)
            .field("expected_essays", &self.expected_essays)
            .finish()
    }
}

/// An essay after normalization, before lemmatization.
struct NormalizedEssay {
    id: EssayId,
    raw_lines: Vec<String>,
    lines: Vec<Vec<Token>>,
}

impl CorpusBuilder {
    /// Create a builder with default components and no size check.
    pub fn new() -> Result<Self> {
        Ok(CorpusBuilder {
            normalizer: TextNormalizer::new()?,
            tagger: Arc::new(SuffixTagger::new()),
            lemmatizer: Arc::new(RuleLemmatizer::new()),
            corpus_lexicon: false,
            expected_essays: None,
        })
    }

    /// Create a builder from the pipeline configuration.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Ok(Self::new()?
            .with_normalizer(TextNormalizer::from_config(&config.normalizer)?)
            .with_corpus_lexicon(config.lemmatizer.corpus_lexicon)
            .with_expected_essays(config.expected_essays))
    }

    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.tagger = tagger;
        self
    }

    /// Use a custom lemmatizer. Disables corpus lexicon validation, which
    /// only applies to the rule lemmatizer.
    pub fn with_lemmatizer(mut self, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        self.lemmatizer = lemmatizer;
        self.corpus_lexicon = false;
        self
    }

    /// Validate lemmas against the surface forms seen in the corpus.
    pub fn with_corpus_lexicon(mut self, enabled: bool) -> Self {
        self.corpus_lexicon = enabled;
        self
    }

    /// Require the built corpus to hold exactly this many essays.
    pub fn with_expected_essays(mut self, expected: Option<usize>) -> Self {
        self.expected_essays = expected;
        self
    }

    /// Build the corpus.
    ///
    /// Fails with a configuration error when the number of accepted essays
    /// differs from the expected count, or when no essay is accepted.
    pub fn build(&self, sources: Vec<EssaySource>) -> Result<(Corpus, BuildReport)> {
        let mut report = BuildReport {
            sources: sources.len(),
            ..BuildReport::default()
        };

        let accepted = Self::accept(sources, &mut report);
        if let Some(expected) = self.expected_essays {
            if accepted.len() != expected {
                return Err(FederalistError::config(format!(
                    "corpus has {} essays, expected {expected}",
                    accepted.len()
                )));
            }
        }
        if accepted.is_empty() {
            return Err(FederalistError::config("no essays to analyze"));
        }

        let normalized: Vec<NormalizedEssay> = accepted
            .into_par_iter()
            .map(|(id, raw_lines)| {
                let lines = raw_lines
                    .iter()
                    .map(|line| self.normalizer.tokens(line))
                    .collect();
                NormalizedEssay {
                    id,
                    raw_lines,
                    lines,
                }
            })
            .collect();

        let lemma_filter = self.lemma_filter(&normalized);
        let alphabetic = AlphabeticFilter::new();

        let essays: Vec<Essay> = normalized
            .into_par_iter()
            .map(|essay| Self::lemmatize(essay, &alphabetic, &lemma_filter))
            .collect::<Result<_>>()?;

        for essay in &essays {
            report.tokens += essay.token_count();
            report.lemma_fallbacks += essay.fallback_count();
            if essay.is_empty() {
                warn!("{} is empty after cleaning", essay.id());
                report.empty_essays.push(essay.id());
            }
        }
        report.accepted = essays.len();

        info!(
            "Built corpus of {} essays, {} tokens, lemma fallback rate {:.3}",
            report.accepted,
            report.tokens,
            report.fallback_rate()
        );

        Ok((Corpus::from_sorted(essays), report))
    }

    /// First pass: parse ids, drop invalid and duplicate ones, sort by id.
    fn accept(sources: Vec<EssaySource>, report: &mut BuildReport) -> Vec<(EssayId, Vec<String>)> {
        let mut seen = HashSet::with_capacity(sources.len());
        let mut accepted = Vec::with_capacity(sources.len());

        for source in sources {
            match source.raw_id.parse::<EssayId>() {
                Ok(id) if seen.insert(id) => accepted.push((id, source.lines)),
                Ok(id) => {
                    warn!("Duplicate essay {id} from '{}' ignored", source.raw_id);
                    report.duplicate_ids.push(id);
                }
                Err(e) => {
                    warn!("Rejected essay source: {e}");
                    report.rejected_ids.push(source.raw_id);
                }
            }
        }

        accepted.sort_by_key(|(id, _)| *id);
        debug!("Accepted {} of {} essay sources", accepted.len(), report.sources);
        accepted
    }

    fn lemma_filter(&self, essays: &[NormalizedEssay]) -> LemmaFilter {
        let filter = LemmaFilter::with_components(self.tagger.clone(), self.lemmatizer.clone());
        if !self.corpus_lexicon {
            return filter;
        }

        let lexicon: Lexicon = essays
            .iter()
            .flat_map(|essay| essay.lines.iter().flatten())
            .map(|token| token.text.as_str())
            .collect();
        debug!("Corpus lexicon holds {} surface forms", lexicon.len());
        filter.with_lemmatizer(Arc::new(RuleLemmatizer::with_lexicon(lexicon)))
    }

    /// Second pass body: lemmatize one essay line by line.
    fn lemmatize(
        essay: NormalizedEssay,
        alphabetic: &AlphabeticFilter,
        lemma_filter: &LemmaFilter,
    ) -> Result<Essay> {
        let mut cleaned_lines = Vec::with_capacity(essay.lines.len());
        let mut tokens = Vec::new();

        for line in essay.lines {
            let cleaned = line
                .iter()
                .map(|token| token.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            if !cleaned.is_empty() {
                cleaned_lines.push(cleaned);
            }

            let stream = alphabetic.filter(line.into_token_stream())?;
            for token in lemma_filter.filter(stream)? {
                let pos = token.part_of_speech().cloned().ok_or_else(|| {
                    FederalistError::analysis(format!("untagged token '{}'", token.text))
                })?;
                tokens.push(TokenOccurrence {
                    position: tokens.len(),
                    surface: token.surface().to_string(),
                    fallback: token.is_lemma_fallback(),
                    lemma: token.text,
                    pos,
                });
            }
        }

        Ok(Essay::new(essay.id, essay.raw_lines, cleaned_lines, tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str, text: &str) -> EssaySource {
        EssaySource::from_text(name, text)
    }

    #[test]
    fn test_build_sorts_and_canonicalizes() {
        let builder = CorpusBuilder::new().unwrap();
        let (corpus, report) = builder
            .build(vec![
                source("essay10.txt", "The powers of the Union."),
                source("essay02.txt", "Governments are instituted."),
                source("essay01.txt", "The people of the States."),
            ])
            .unwrap();

        let ids: Vec<String> = corpus.ids().map(|id| id.to_string()).collect();
        assert_eq!(ids, vec!["Essay 1", "Essay 2", "Essay 10"]);
        assert_eq!(report.accepted, 3);
        assert!(report.rejected_ids.is_empty());

        let first = corpus.get(EssayId::new(1).unwrap()).unwrap();
        assert_eq!(first.cleaned_lines().to_vec(), vec!["people states".to_string()]);
        assert_eq!(first.lemmas().collect::<Vec<_>>(), vec!["people", "state"]);
        assert_eq!(first.tokens()[1].surface, "states");
        assert_eq!(first.tokens()[1].position, 1);
    }

    #[test]
    fn test_rejects_and_duplicates() {
        let builder = CorpusBuilder::new().unwrap();
        let (corpus, report) = builder
            .build(vec![
                source("essay01.txt", "first text"),
                source("essay86.txt", "out of range"),
                source("notes.txt", "not an essay"),
                source("Essay 1", "second text"),
            ])
            .unwrap();

        assert_eq!(corpus.len(), 1);
        assert_eq!(report.sources, 4);
        assert_eq!(report.rejected_ids, vec!["essay86.txt", "notes.txt"]);
        assert_eq!(report.duplicate_ids, vec![EssayId::new(1).unwrap()]);
        let essay = corpus.get(EssayId::new(1).unwrap()).unwrap();
        assert_eq!(essay.surfaces().collect::<Vec<_>>(), vec!["first", "text"]);
    }

    #[test]
    fn test_expected_count_is_enforced() {
        let builder = CorpusBuilder::new().unwrap().with_expected_essays(Some(85));
        let err = builder
            .build(vec![source("essay01.txt", "text")])
            .unwrap_err();
        assert!(err.is_config());

        let err = CorpusBuilder::new().unwrap().build(Vec::new()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_empty_essay_is_reported() {
        let (corpus, report) = CorpusBuilder::new()
            .unwrap()
            .build(vec![
                source("essay01.txt", "The of and 1787."),
                source("essay02.txt", "Liberty"),
            ])
            .unwrap();

        assert_eq!(corpus.len(), 2);
        assert_eq!(report.empty_essays, vec![EssayId::new(1).unwrap()]);
        assert!(corpus.get(EssayId::new(1).unwrap()).unwrap().is_empty());
        assert_eq!(report.tokens, 1);
    }

    #[test]
    fn test_fallbacks_are_counted() {
        let (_, report) = CorpusBuilder::new()
            .unwrap()
            .build(vec![source("essay01.txt", "Congress shall upon reflection")])
            .unwrap();

        // "shall" (modal) and "upon" (preposition) have no lemma category.
        assert_eq!(report.tokens, 4);
        assert_eq!(report.lemma_fallbacks, 2);
        assert!((report.fallback_rate() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_corpus_lexicon_mode() {
        let builder = CorpusBuilder::new().unwrap().with_corpus_lexicon(true);
        let (corpus, _) = builder
            .build(vec![
                source("essay01.txt", "nothing declared"),
                source("essay02.txt", "declare"),
            ])
            .unwrap();

        let essay = corpus.get(EssayId::new(1).unwrap()).unwrap();
        assert_eq!(essay.lemmas().collect::<Vec<_>>(), vec!["nothing", "declare"]);
        assert!(!essay.tokens()[1].fallback);
    }
}
