//! Command line argument parsing for the federalist CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::dataset::DatasetFormat;

/// Federalist - stylometric analysis of the Federalist Papers
#[derive(Parser, Debug, Clone)]
#[command(name = "federalist")]
#[command(about = "TF-IDF and cosine similarity analysis of the Federalist Papers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct FederalistArgs {
    /// Verbosity level (0=errors, 1=warnings, 2=info, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Pipeline configuration file (JSON)
    #[arg(long, value_name = "FILE", env = "FEDERALIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl FederalistArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to warnings
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the pipeline and write the joined token dataset
    Analyze(AnalyzeArgs),

    /// Rank essays by similarity to one essay
    Similar(SimilarArgs),

    /// Show the highest TF-IDF terms of one essay
    Terms(TermsArgs),

    /// Show the most common lemmas in the corpus
    Frequency(FrequencyArgs),

    /// Compute the full similarity matrix
    Matrix(MatrixArgs),
}

/// Input locations shared by every command
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Directory holding one text file per essay
    #[arg(long, value_name = "DIR", env = "FEDERALIST_ESSAYS")]
    pub essays: PathBuf,

    /// Authorship table as CSV (No., Author, Publication, Date)
    #[arg(long, value_name = "FILE", env = "FEDERALIST_AUTHORSHIP")]
    pub authorship: PathBuf,
}

/// Arguments for the analyze command
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write the token dataset to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Dataset file format (default: from the file extension)
    #[arg(long)]
    pub output_format: Option<DatasetOutput>,
}

/// Arguments for the similar command
#[derive(Parser, Debug, Clone)]
pub struct SimilarArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Essay number to query
    #[arg(short, long)]
    pub essay: u16,

    /// Number of essays to return (default: from the configuration)
    #[arg(short)]
    pub k: Option<usize>,

    /// Leave the query essay out of the results
    #[arg(long)]
    pub exclude_self: bool,
}

/// Arguments for the terms command
#[derive(Parser, Debug, Clone)]
pub struct TermsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Essay number
    #[arg(short, long)]
    pub essay: u16,

    /// Number of terms to show
    #[arg(short = 'n', long, default_value = "20")]
    pub limit: usize,
}

/// Arguments for the frequency command
#[derive(Parser, Debug, Clone)]
pub struct FrequencyArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of lemmas to show
    #[arg(short = 'n', long, default_value = "100")]
    pub limit: usize,
}

/// Arguments for the matrix command
#[derive(Parser, Debug, Clone)]
pub struct MatrixArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Write the matrix as CSV to this file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Token dataset file formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetOutput {
    Csv,
    Json,
}

impl From<DatasetOutput> for DatasetFormat {
    fn from(output: DatasetOutput) -> Self {
        match output {
            DatasetOutput::Csv => DatasetFormat::Csv,
            DatasetOutput::Json => DatasetFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> FederalistArgs {
        FederalistArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_similar_command() {
        let args = parse(&[
            "federalist",
            "similar",
            "--essays",
            "data/essays",
            "--authorship",
            "data/authors.csv",
            "--essay",
            "10",
            "-k",
            "5",
            "--exclude-self",
        ]);
        if let Command::Similar(similar) = args.command {
            assert_eq!(similar.input.essays, PathBuf::from("data/essays"));
            assert_eq!(similar.input.authorship, PathBuf::from("data/authors.csv"));
            assert_eq!(similar.essay, 10);
            assert_eq!(similar.k, Some(5));
            assert!(similar.exclude_self);
        } else {
            panic!("Expected similar command");
        }
    }

    #[test]
    fn test_analyze_command() {
        let args = parse(&[
            "federalist",
            "-f",
            "json",
            "--pretty",
            "analyze",
            "--essays",
            "essays",
            "--authorship",
            "authors.csv",
            "-o",
            "tokens.out",
            "--output-format",
            "json",
        ]);
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.pretty);
        if let Command::Analyze(analyze) = args.command {
            assert_eq!(analyze.output, Some(PathBuf::from("tokens.out")));
            assert_eq!(analyze.output_format, Some(DatasetOutput::Json));
        } else {
            panic!("Expected analyze command");
        }
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[
            "federalist",
            "terms",
            "--essays",
            "e",
            "--authorship",
            "a.csv",
            "--essay",
            "1",
        ]);
        assert_eq!(args.output_format, OutputFormat::Human);
        assert_eq!(args.verbosity(), 1);
        if let Command::Terms(terms) = args.command {
            assert_eq!(terms.limit, 20);
        } else {
            panic!("Expected terms command");
        }

        let args = parse(&["federalist", "frequency", "--essays", "e", "--authorship", "a.csv"]);
        if let Command::Frequency(frequency) = args.command {
            assert_eq!(frequency.limit, 100);
        } else {
            panic!("Expected frequency command");
        }
    }

    #[test]
    fn test_verbosity() {
        let base = ["matrix", "--essays", "e", "--authorship", "a.csv"];
        let with = |flags: &[&str]| {
            let mut argv = vec!["federalist"];
            argv.extend_from_slice(flags);
            argv.extend_from_slice(&base);
            parse(&argv).verbosity()
        };
        assert_eq!(with(&[]), 1);
        assert_eq!(with(&["-v"]), 2);
        assert_eq!(with(&["-vv"]), 3);
        assert_eq!(with(&["-q", "-vv"]), 0);
    }

    #[test]
    fn test_missing_input_fails() {
        assert!(FederalistArgs::try_parse_from(["federalist", "frequency"]).is_err());
    }
}
