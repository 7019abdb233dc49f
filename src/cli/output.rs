//! Output formatting for CLI commands.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::authorship::Author;
use crate::cli::args::{FederalistArgs, OutputFormat};
use crate::corpus::EssayId;
use crate::error::Result;
use crate::pipeline::RunReport;
use crate::similarity::SimilarityReport;
use crate::weighting::{TermFrequency, TermWeight};

/// Result structure for the analyze command.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResult {
    pub report: RunReport,
    pub token_records: usize,
    pub authors: BTreeMap<Author, usize>,
    pub output: Option<String>,
}

/// Result structure for the terms command.
#[derive(Debug, Serialize, Deserialize)]
pub struct TermsResult {
    pub essay: EssayId,
    pub terms: Vec<TermWeight>,
}

/// Result structure for the frequency command.
#[derive(Debug, Serialize, Deserialize)]
pub struct FrequencyResult {
    pub essays: usize,
    pub terms: Vec<TermFrequency>,
}

/// Result structure for the matrix command when written to a file.
#[derive(Debug, Serialize, Deserialize)]
pub struct MatrixResult {
    pub essays: usize,
    pub undefined_cells: usize,
    pub output: String,
}

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn render_human(&self) -> String;
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &FederalistArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: HumanOutput>(message: &str, result: &T, args: &FederalistArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }
    print!("{}", result.render_human());
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &FederalistArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    println!("{json}");
    Ok(())
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "═".repeat(title.chars().count()));
}

/// Format a similarity or weight score.
fn format_score(score: f64) -> String {
    format!("{score:.4}")
}

fn format_ids(ids: &[EssayId]) -> String {
    ids.iter()
        .map(|id| id.get().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl HumanOutput for AnalyzeResult {
    fn render_human(&self) -> String {
        let report = &self.report;
        let mut out = String::new();
        heading(&mut out, "Analysis Summary");
        let _ = writeln!(out, "Essay files read: {}", report.ingest.files_read);
        let _ = writeln!(out, "Essays analyzed: {}", report.build.accepted);
        let _ = writeln!(out, "Tokens: {}", report.build.tokens);
        let _ = writeln!(out, "Vocabulary: {} lemmas", report.vocabulary);
        let _ = writeln!(
            out,
            "Lemma fallbacks: {} ({:.1}%)",
            report.build.lemma_fallbacks,
            report.build.fallback_rate() * 100.0
        );
        let _ = writeln!(out, "Authorship records: {}", report.cleaning.accepted);
        let _ = writeln!(out, "Joined essays: {}", report.join.joined);
        let _ = writeln!(out, "Token records: {}", self.token_records);

        if !self.authors.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Essays by author:");
            for (author, count) in &self.authors {
                let _ = writeln!(out, "  {author}: {count}");
            }
        }

        let skipped = report.skipped_records();
        if skipped > 0 {
            let _ = writeln!(out);
            let _ = writeln!(out, "Skipped or dropped records: {skipped}");
            let lines = [
                ("Unreadable files", report.ingest.files_skipped.len()),
                ("Undecodable lines", report.ingest.lines_skipped),
                ("Malformed authorship rows", report.ingest.authorship_rows_skipped),
                ("Rejected essay ids", report.build.rejected_ids.len()),
                ("Duplicate essays", report.build.duplicate_ids.len()),
                ("Invalid essay numbers", report.cleaning.invalid_numbers.len()),
                ("Duplicate authorship rows", report.cleaning.duplicate_essays.len()),
            ];
            for (label, count) in lines.into_iter().filter(|(_, count)| *count > 0) {
                let _ = writeln!(out, "  {label}: {count}");
            }
            if !report.join.missing_authorship.is_empty() {
                let _ = writeln!(
                    out,
                    "  Essays without authorship: {}",
                    format_ids(&report.join.missing_authorship)
                );
            }
            if !report.join.missing_essays.is_empty() {
                let _ = writeln!(
                    out,
                    "  Authorship without essay: {}",
                    format_ids(&report.join.missing_essays)
                );
            }
        }

        if let Some(output) = &self.output {
            let _ = writeln!(out);
            let _ = writeln!(out, "Dataset written to {output}");
        }
        out
    }
}

impl HumanOutput for SimilarityReport {
    fn render_human(&self) -> String {
        let mut out = String::new();
        heading(&mut out, &format!("Essays most similar to {}", self.query));
        for (rank, hit) in self.hits.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. {:<10} {}",
                rank + 1,
                hit.essay.to_string(),
                format_score(hit.score)
            );
        }
        if !self.excluded.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Excluded (empty weight vector): {}",
                format_ids(&self.excluded)
            );
        }
        out
    }
}

impl HumanOutput for TermsResult {
    fn render_human(&self) -> String {
        let mut out = String::new();
        heading(&mut out, &format!("Top terms of {}", self.essay));
        for term in &self.terms {
            let _ = writeln!(
                out,
                "{:<20} tfidf {}  (count {}, idf {})",
                term.term,
                format_score(term.tfidf),
                term.count,
                format_score(term.idf)
            );
        }
        out
    }
}

impl HumanOutput for FrequencyResult {
    fn render_human(&self) -> String {
        let mut out = String::new();
        heading(&mut out, &format!("Most common lemmas in {} essays", self.essays));
        for term in &self.terms {
            let _ = writeln!(out, "{:<20} {}", term.term, term.count);
        }
        out
    }
}

impl HumanOutput for MatrixResult {
    fn render_human(&self) -> String {
        let mut out = format!(
            "Similarity matrix of {} essays written to {}\n",
            self.essays, self.output
        );
        if self.undefined_cells > 0 {
            let _ = writeln!(out, "Undefined cells: {}", self.undefined_cells);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::SimilarityHit;

    fn id(n: u16) -> EssayId {
        EssayId::new(n).unwrap()
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(1.0), "1.0000");
        assert_eq!(format_score(0.123456), "0.1235");
    }

    #[test]
    fn test_similarity_report_human() {
        let report = SimilarityReport {
            query: id(10),
            hits: vec![
                SimilarityHit { essay: id(10), score: 1.0 },
                SimilarityHit { essay: id(51), score: 0.25 },
            ],
            excluded: vec![id(3)],
        };
        let text = report.render_human();
        assert!(text.starts_with("Essays most similar to Essay 10\n"));
        assert!(text.contains("  1. Essay 10   1.0000"));
        assert!(text.contains("  2. Essay 51   0.2500"));
        assert!(text.contains("Excluded (empty weight vector): 3"));
    }

    #[test]
    fn test_analyze_human_lists_drops() {
        let mut report = RunReport::default();
        report.join.missing_authorship = vec![id(7), id(8)];
        report.build.rejected_ids = vec!["notes.txt".to_string()];
        let result = AnalyzeResult {
            report,
            token_records: 0,
            authors: BTreeMap::new(),
            output: None,
        };
        let text = result.render_human();
        assert!(text.contains("Skipped or dropped records: 3"));
        assert!(text.contains("Rejected essay ids: 1"));
        assert!(text.contains("Essays without authorship: 7, 8"));
        assert!(!text.contains("Dataset written"));
    }

    #[test]
    fn test_frequency_human() {
        let result = FrequencyResult {
            essays: 85,
            terms: vec![TermFrequency { term: "state".to_string(), count: 1200 }],
        };
        let text = result.render_human();
        assert!(text.contains("Most common lemmas in 85 essays"));
        assert!(text.contains("state"));
        assert!(text.contains("1200"));
    }
}
