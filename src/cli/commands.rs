//! Command implementations for the federalist CLI.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use log::debug;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::PipelineConfig;
use crate::corpus::EssayId;
use crate::dataset::{DatasetFormat, write_file};
use crate::error::Result;
use crate::pipeline::{Analysis, Pipeline};

/// Execute a CLI command.
pub fn execute_command(args: FederalistArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Analyze(analyze_args) => analyze(analyze_args, config, &args),
        Command::Similar(similar_args) => similar(similar_args, config, &args),
        Command::Terms(terms_args) => terms(terms_args, config, &args),
        Command::Frequency(frequency_args) => frequency(frequency_args, config, &args),
        Command::Matrix(matrix_args) => matrix(matrix_args, config, &args),
    }
}

/// Load the configuration file, or fall back to defaults.
fn load_config(args: &FederalistArgs) -> Result<PipelineConfig> {
    match &args.config {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            PipelineConfig::from_file(path)
        }
        None => Ok(PipelineConfig::default()),
    }
}

fn run_pipeline(input: &InputArgs, config: PipelineConfig) -> Result<Analysis> {
    Pipeline::new(config)?.run_files(&input.essays, &input.authorship)
}

/// Run the pipeline and optionally write the token dataset.
fn analyze(args: &AnalyzeArgs, config: PipelineConfig, cli_args: &FederalistArgs) -> Result<()> {
    let analysis = run_pipeline(&args.input, config)?;
    let records = analysis.token_records();

    let output = match &args.output {
        Some(path) => {
            let format = args
                .output_format
                .map(DatasetFormat::from)
                .unwrap_or_else(|| DatasetFormat::from_path(path));
            write_file(&records, path, format)?;
            Some(path.display().to_string())
        }
        None => None,
    };

    output_result(
        "Analysis complete",
        &AnalyzeResult {
            report: analysis.report().clone(),
            token_records: records.len(),
            authors: analysis.joined().author_counts(),
            output,
        },
        cli_args,
    )
}

/// Rank essays by similarity to the query essay.
fn similar(args: &SimilarArgs, config: PipelineConfig, cli_args: &FederalistArgs) -> Result<()> {
    let query = EssayId::new(args.essay)?;
    let k = args.k.unwrap_or(config.similarity.top_k);
    let analysis = run_pipeline(&args.input, config)?;

    let engine = analysis.similarity();
    let report = if args.exclude_self {
        engine.nearest(query, k)?
    } else {
        engine.top_k(query, k)?
    };

    output_result("Similarity ranking", &report, cli_args)
}

/// Show the highest-weighted terms of one essay.
fn terms(args: &TermsArgs, config: PipelineConfig, cli_args: &FederalistArgs) -> Result<()> {
    let essay = EssayId::new(args.essay)?;
    let analysis = run_pipeline(&args.input, config)?;
    let terms = analysis.weights().top_terms(essay, args.limit)?;

    output_result("Top TF-IDF terms", &TermsResult { essay, terms }, cli_args)
}

/// Show the most common lemmas across the corpus.
fn frequency(args: &FrequencyArgs, config: PipelineConfig, cli_args: &FederalistArgs) -> Result<()> {
    let analysis = run_pipeline(&args.input, config)?;
    let matrix = analysis.weights().matrix();

    output_result(
        "Lemma frequencies",
        &FrequencyResult {
            essays: matrix.document_count(),
            terms: matrix.most_common(args.limit),
        },
        cli_args,
    )
}

/// Compute the similarity matrix and write it as CSV.
fn matrix(args: &MatrixArgs, config: PipelineConfig, cli_args: &FederalistArgs) -> Result<()> {
    let analysis = run_pipeline(&args.input, config)?;
    let matrix = analysis.similarity().matrix();

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            matrix.write_csv(&mut writer)?;
            writer.flush()?;

            let undefined_cells = matrix
                .essays()
                .iter()
                .filter_map(|&essay| matrix.row(essay))
                .flatten()
                .filter(|cell| cell.is_none())
                .count();
            output_result(
                "Similarity matrix written",
                &MatrixResult {
                    essays: matrix.len(),
                    undefined_cells,
                    output: path.display().to_string(),
                },
                cli_args,
            )
        }
        None => match cli_args.output_format {
            OutputFormat::Json => {
                let json = if cli_args.pretty {
                    serde_json::to_string_pretty(&matrix)?
                } else {
                    serde_json::to_string(&matrix)?
                };
                println!("{json}");
                Ok(())
            }
            OutputFormat::Human => {
                let stdout = io::stdout();
                matrix.write_csv(stdout.lock())
            }
        },
    }
}
