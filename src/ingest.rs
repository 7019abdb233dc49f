//! Reading essay text files and the authorship CSV export.
//!
//! Bad input is skipped, not fatal: an unreadable file, a line that is not
//! valid UTF-8 and a malformed CSV row are each logged and counted in the
//! [`IngestReport`]. Only a missing input location aborts.

use std::fs;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::authorship::RawAuthorshipRow;
use crate::corpus::EssaySource;
use crate::error::{FederalistError, Result};

/// Extension of essay text files.
pub const ESSAY_EXTENSION: &str = "txt";

/// Counts of what ingestion read and skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Essay files read
    pub files_read: usize,
    /// Essay files that could not be read
    pub files_skipped: Vec<String>,
    /// Directory entries ignored for not being text files
    pub non_text_entries: usize,
    /// Lines skipped for invalid UTF-8
    pub lines_skipped: usize,
    /// Authorship rows read
    pub authorship_rows: usize,
    /// Authorship rows that could not be parsed
    pub authorship_rows_skipped: usize,
}

impl IngestReport {
    /// Fold another report into this one.
    pub fn merge(&mut self, other: IngestReport) {
        self.files_read += other.files_read;
        self.files_skipped.extend(other.files_skipped);
        self.non_text_entries += other.non_text_entries;
        self.lines_skipped += other.lines_skipped;
        self.authorship_rows += other.authorship_rows;
        self.authorship_rows_skipped += other.authorship_rows_skipped;
    }
}

fn is_essay_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(ESSAY_EXTENSION))
}

/// Read every `*.txt` file of a directory, sorted by file name.
///
/// Each file becomes one [`EssaySource`] whose raw id is the file name.
/// Blank lines are dropped.
pub fn read_essay_dir<P: AsRef<Path>>(dir: P) -> Result<(Vec<EssaySource>, IngestReport)> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| {
        FederalistError::config(format!("cannot read essay directory {}: {e}", dir.display()))
    })?;

    let mut report = IngestReport::default();
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) if is_essay_file(&entry.path()) => paths.push(entry.path()),
            Ok(entry) => {
                debug!("Ignoring {}", entry.path().display());
                report.non_text_entries += 1;
            }
            Err(e) => warn!("Cannot list an entry of {}: {e}", dir.display()),
        }
    }
    paths.sort();

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        match fs::read(&path) {
            Ok(bytes) => {
                let (lines, skipped) = split_lines(&bytes);
                if skipped > 0 {
                    warn!("Skipped {skipped} undecodable lines in {name}");
                }
                report.lines_skipped += skipped;
                report.files_read += 1;
                sources.push(EssaySource::new(name, lines));
            }
            Err(e) => {
                warn!("Skipping {}: {e}", path.display());
                report.files_skipped.push(name);
            }
        }
    }

    info!(
        "Read {} essay files from {} ({} skipped)",
        report.files_read,
        dir.display(),
        report.files_skipped.len()
    );
    Ok((sources, report))
}

/// Split raw bytes into non-blank UTF-8 lines, counting undecodable ones.
fn split_lines(bytes: &[u8]) -> (Vec<String>, usize) {
    let mut lines = Vec::new();
    let mut skipped = 0;
    for raw in bytes.split(|&b| b == b'\n') {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        match std::str::from_utf8(raw) {
            Ok(line) if line.trim().is_empty() => {}
            Ok(line) => lines.push(line.to_string()),
            Err(_) => skipped += 1,
        }
    }
    (lines, skipped)
}

/// Read the authorship table from CSV.
///
/// Columns are matched by header (`No.`, `Author`, `Publication`, `Date`);
/// other columns are ignored. A missing file is a configuration error.
pub fn read_authorship_csv<P: AsRef<Path>>(path: P) -> Result<(Vec<RawAuthorshipRow>, IngestReport)> {
    let path = path.as_ref();
    let file = fs::File::open(path).map_err(|e| {
        FederalistError::config(format!("cannot open authorship table {}: {e}", path.display()))
    })?;
    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let mut report = IngestReport::default();
    let mut rows = Vec::new();
    for (line, result) in reader.deserialize::<RawAuthorshipRow>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                warn!("Skipping authorship row {}: {e}", line + 1);
                report.authorship_rows_skipped += 1;
            }
        }
    }
    report.authorship_rows = rows.len();

    info!(
        "Read {} authorship rows from {} ({} skipped)",
        report.authorship_rows,
        path.display(),
        report.authorship_rows_skipped
    );
    Ok((rows, report))
}
