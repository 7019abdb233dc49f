//! End-to-end analysis: ingest, clean, build, weigh, join.
//!
//! The authorship table is cleaned before any essay is analyzed, so a missing
//! or empty table aborts the run with a configuration error before any
//! computation happens.
//!
//! # Examples
//!
//! ```
//! use federalist::authorship::RawAuthorshipRow;
//! use federalist::config::PipelineConfig;
//! use federalist::corpus::{EssayId, EssaySource};
//! use federalist::pipeline::Pipeline;
//!
//! let mut config = PipelineConfig::default();
//! config.expected_essays = None;
//!
//! let pipeline = Pipeline::new(config).unwrap();
//! let analysis = pipeline
//!     .run(
//!         vec![
//!             EssaySource::from_text("essay01.txt", "The powers of the Union."),
//!             EssaySource::from_text("essay02.txt", "Factions and the Union."),
//!         ],
//!         vec![
//!             RawAuthorshipRow::new("1", "Hamilton", "--", "--"),
//!             RawAuthorshipRow::new("2", "Madison", "--", "--"),
//!         ],
//!     )
//!     .unwrap();
//!
//! assert_eq!(analysis.joined().len(), 2);
//! let report = analysis.similar(EssayId::new(1).unwrap()).unwrap();
//! assert_eq!(report.hits[0].essay, EssayId::new(1).unwrap());
//! ```

use std::path::Path;
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::authorship::{
    AuthorshipCleaner, AuthorshipTable, CleaningReport, JoinReport, JoinedCorpus, RawAuthorshipRow,
    join,
};
use crate::config::PipelineConfig;
use crate::corpus::{BuildReport, Corpus, CorpusBuilder, EssayId, EssaySource};
use crate::dataset::{TokenRecord, token_records};
use crate::error::Result;
use crate::ingest::{IngestReport, read_authorship_csv, read_essay_dir};
use crate::similarity::{SimilarityEngine, SimilarityReport};
use crate::weighting::TermWeights;

/// Counts gathered by every stage of one run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub ingest: IngestReport,
    pub build: BuildReport,
    pub cleaning: CleaningReport,
    pub join: JoinReport,
    /// Number of distinct lemmas in the corpus
    pub vocabulary: usize,
}

impl RunReport {
    /// Records dropped or skipped anywhere along the way.
    pub fn skipped_records(&self) -> usize {
        self.ingest.files_skipped.len()
            + self.ingest.lines_skipped
            + self.ingest.authorship_rows_skipped
            + self.build.rejected_ids.len()
            + self.build.duplicate_ids.len()
            + self.cleaning.invalid_numbers.len()
            + self.cleaning.duplicate_essays.len()
            + self.join.dropped()
    }
}

/// Configured analysis pipeline.
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    builder: CorpusBuilder,
    cleaner: AuthorshipCleaner,
}

impl Pipeline {
    /// Create a pipeline; the configuration is validated first.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Pipeline {
            builder: CorpusBuilder::from_config(&config)?,
            cleaner: AuthorshipCleaner::new(config.authorship.clone()),
            config,
        })
    }

    /// Replace the corpus builder, e.g. to plug in another tagger.
    pub fn with_builder(mut self, builder: CorpusBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Read the essay directory and the authorship CSV, then run.
    pub fn run_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        essay_dir: P,
        authorship_csv: Q,
    ) -> Result<Analysis> {
        let (rows, mut ingest) = read_authorship_csv(authorship_csv)?;
        let (sources, essay_ingest) = read_essay_dir(essay_dir)?;
        ingest.merge(essay_ingest);

        let mut analysis = self.run(sources, rows)?;
        analysis.report.ingest = ingest;
        Ok(analysis)
    }

    /// Run on already ingested inputs.
    pub fn run(&self, sources: Vec<EssaySource>, rows: Vec<RawAuthorshipRow>) -> Result<Analysis> {
        let (authorship, cleaning) = self.cleaner.clean(rows)?;
        let (corpus, build) = self.builder.build(sources)?;
        let weights = Arc::new(TermWeights::from_corpus(&corpus)?);
        let join_report = join(&corpus, &authorship).report().clone();

        let report = RunReport {
            ingest: IngestReport::default(),
            build,
            cleaning,
            join: join_report,
            vocabulary: weights.vocabulary().len(),
        };
        info!(
            "Analysis ready: {} essays, {} joined, vocabulary of {} lemmas",
            corpus.len(),
            report.join.joined,
            report.vocabulary
        );

        Ok(Analysis {
            similarity: SimilarityEngine::new(weights.clone()),
            top_k: self.config.similarity.top_k,
            corpus,
            authorship,
            weights,
            report,
        })
    }
}

/// The result of a pipeline run. Immutable; queries never change it.
#[derive(Clone, Debug)]
pub struct Analysis {
    corpus: Corpus,
    authorship: AuthorshipTable,
    weights: Arc<TermWeights>,
    similarity: SimilarityEngine,
    top_k: usize,
    report: RunReport,
}

impl Analysis {
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn authorship(&self) -> &AuthorshipTable {
        &self.authorship
    }

    pub fn weights(&self) -> &TermWeights {
        &self.weights
    }

    pub fn similarity(&self) -> &SimilarityEngine {
        &self.similarity
    }

    pub fn report(&self) -> &RunReport {
        &self.report
    }

    /// Essays joined with their authorship records.
    pub fn joined(&self) -> JoinedCorpus<'_> {
        join(&self.corpus, &self.authorship)
    }

    /// The flat token dataset of the joined essays.
    pub fn token_records(&self) -> Vec<TokenRecord> {
        token_records(&self.joined())
    }

    /// The configured top-K query, the query essay included.
    pub fn similar(&self, query: EssayId) -> Result<SimilarityReport> {
        self.similarity.top_k(query, self.top_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FederalistError;

    fn config() -> PipelineConfig {
        PipelineConfig {
            expected_essays: None,
            ..PipelineConfig::default()
        }
    }

    fn sources() -> Vec<EssaySource> {
        vec![
            EssaySource::from_text("essay01.txt", "The union of the states."),
            EssaySource::from_text("essay02.txt", "Factions and the union."),
            EssaySource::from_text("essay03.txt", "Energy in the executive."),
        ]
    }

    fn rows() -> Vec<RawAuthorshipRow> {
        vec![
            RawAuthorshipRow::new("1", "Hamilton", "For the Independent Journal", "--"),
            RawAuthorshipRow::new("2", "Madison", "From the New York Packet", "--"),
        ]
    }

    #[test]
    fn test_run_collects_reports() {
        let analysis = Pipeline::new(config()).unwrap().run(sources(), rows()).unwrap();
        let report = analysis.report();

        assert_eq!(report.build.accepted, 3);
        assert_eq!(report.cleaning.accepted, 2);
        assert_eq!(report.join.joined, 2);
        assert_eq!(report.join.missing_authorship, vec![EssayId::new(3).unwrap()]);
        assert_eq!(report.skipped_records(), 1);
        assert!(report.vocabulary > 0);

        assert_eq!(analysis.joined().len(), 2);
        let records = analysis.token_records();
        assert!(records.iter().all(|r| r.essay_id.get() <= 2));
    }

    #[test]
    fn test_empty_authorship_aborts() {
        let err = Pipeline::new(config()).unwrap().run(sources(), Vec::new()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_unusable_authorship_aborts() {
        let rows = vec![
            RawAuthorshipRow::new("x", "Hamilton", "--", "--"),
            RawAuthorshipRow::new("99", "Madison", "--", "--"),
        ];
        let err = Pipeline::new(config()).unwrap().run(sources(), rows).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_expected_count_aborts() {
        let err = Pipeline::new(PipelineConfig::default())
            .unwrap()
            .run(sources(), rows())
            .unwrap_err();
        assert!(matches!(err, FederalistError::Config(_)));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = config();
        config.similarity.top_k = 0;
        assert!(Pipeline::new(config).unwrap_err().is_config());
    }

    #[test]
    fn test_similar_uses_configured_k() {
        let mut config = config();
        config.similarity.top_k = 2;
        let analysis = Pipeline::new(config).unwrap().run(sources(), rows()).unwrap();
        let report = analysis.similar(EssayId::new(1).unwrap()).unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report.hits[0].essay, EssayId::new(1).unwrap());
    }
}
