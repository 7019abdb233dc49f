//! The joined token dataset: one flat record per (essay, token).

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::lemma::PosTag;
use crate::authorship::{Author, JoinedCorpus};
use crate::corpus::EssayId;
use crate::error::{FederalistError, Result};

/// One token of a joined essay, with the essay's authorship fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub essay_id: EssayId,
    pub token_surface: String,
    pub token_lemma: String,
    pub part_of_speech: PosTag,
    pub author: Author,
    pub publication: String,
    pub date: Option<NaiveDate>,
}

/// Flatten a joined corpus into token records, in essay then token order.
pub fn token_records(joined: &JoinedCorpus<'_>) -> Vec<TokenRecord> {
    let total = joined.iter().map(|j| j.essay.token_count()).sum();
    let mut records = Vec::with_capacity(total);
    for joined in joined.iter() {
        let record = joined.record;
        records.extend(joined.essay.tokens().iter().map(|token| TokenRecord {
            essay_id: joined.id(),
            token_surface: token.surface.clone(),
            token_lemma: token.lemma.clone(),
            part_of_speech: token.pos.clone(),
            author: record.author,
            publication: record.publication.clone(),
            date: record.date,
        }));
    }
    records
}

/// Output format of the dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    #[default]
    Csv,
    Json,
}

impl DatasetFormat {
    /// Guess the format from a file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DatasetFormat::Json,
            _ => DatasetFormat::Csv,
        }
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetFormat::Csv => f.write_str("csv"),
            DatasetFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for DatasetFormat {
    type Err = FederalistError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(DatasetFormat::Csv),
            "json" => Ok(DatasetFormat::Json),
            _ => Err(FederalistError::config(format!("unknown dataset format '{s}'"))),
        }
    }
}

/// Write records as CSV with a header row. Missing dates are empty cells.
pub fn write_csv<W: Write>(records: &[TokenRecord], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write records as a JSON array.
pub fn write_json<W: Write>(records: &[TokenRecord], writer: W, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, records)?;
    } else {
        serde_json::to_writer(writer, records)?;
    }
    Ok(())
}

/// Write records to a file in the given format.
pub fn write_file<P: AsRef<Path>>(
    records: &[TokenRecord],
    path: P,
    format: DatasetFormat,
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        DatasetFormat::Csv => write_csv(records, &mut writer)?,
        DatasetFormat::Json => write_json(records, &mut writer, true)?,
    }
    writer.flush()?;
    info!("Wrote {} token records to {}", records.len(), path.display());
    Ok(())
}
