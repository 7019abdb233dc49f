//! Cleaning of the raw authorship table.
//!
//! Each raw row is checked and rewritten independently: the essay number
//! becomes an [`EssayId`], the author label collapses onto [`Author`], the
//! date is parsed with the configured format, and the publication label is
//! looked up in the alias table. Rows that cannot be placed (bad number,
//! repeated essay) are dropped and counted; cells that cannot be read fall
//! back to `Unknown` or `None` and are counted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::authorship::record::{Author, AuthorshipRecord, RawAuthorshipRow};
use crate::config::AuthorshipConfig;
use crate::corpus::EssayId;
use crate::error::{FederalistError, Result};

/// Label used for unknown publications.
pub const UNKNOWN_PUBLICATION: &str = "Unknown";

/// Cleaned authorship records, one per essay, sorted by essay id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorshipTable {
    records: Vec<AuthorshipRecord>,
}

impl AuthorshipTable {
    /// Create a table from records in any order. Repeated essays are an error.
    pub fn from_records(mut records: Vec<AuthorshipRecord>) -> Result<Self> {
        records.sort_by_key(|record| record.essay);
        if let Some(pair) = records.windows(2).find(|pair| pair[0].essay == pair[1].essay) {
            return Err(FederalistError::authorship(format!(
                "{} has more than one authorship record",
                pair[0].essay
            )));
        }
        Ok(AuthorshipTable { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[AuthorshipRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AuthorshipRecord> {
        self.records.iter()
    }

    pub fn get(&self, essay: EssayId) -> Option<&AuthorshipRecord> {
        self.records
            .binary_search_by_key(&essay, |record| record.essay)
            .ok()
            .map(|index| &self.records[index])
    }

    /// Number of essays attributed to each author.
    pub fn author_counts(&self) -> BTreeMap<Author, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.author).or_insert(0) += 1;
        }
        counts
    }
}

/// What cleaning dropped or could not read.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Rows offered to the cleaner
    pub rows: usize,
    /// Records in the cleaned table
    pub accepted: usize,
    /// Essay numbers that did not parse or were out of range
    pub invalid_numbers: Vec<String>,
    /// Essays with more than one row; the first row was kept
    pub duplicate_essays: Vec<EssayId>,
    /// Authors collapsed to Unknown through the configured labels
    pub unknown_authors: usize,
    /// Author labels not recognized at all, also mapped to Unknown
    pub unrecognized_authors: Vec<String>,
    /// Dates given as the missing sentinel or left empty
    pub missing_dates: usize,
    /// Dates that did not match the configured format
    pub unparseable_dates: Vec<String>,
    /// Publications given as the missing sentinel
    pub missing_publications: usize,
}

/// Applies the configured cleaning rules to raw authorship rows.
#[derive(Clone, Debug, Default)]
pub struct AuthorshipCleaner {
    config: AuthorshipConfig,
}

impl AuthorshipCleaner {
    pub fn new(config: AuthorshipConfig) -> Self {
        AuthorshipCleaner { config }
    }

    pub fn config(&self) -> &AuthorshipConfig {
        &self.config
    }

    /// Clean a whole table.
    ///
    /// An empty input, or one where no row survives cleaning, is a
    /// configuration error: analysis never runs without authorship data.
    pub fn clean(&self, rows: Vec<RawAuthorshipRow>) -> Result<(AuthorshipTable, CleaningReport)> {
        if rows.is_empty() {
            return Err(FederalistError::config("authorship table is empty"));
        }

        let mut report = CleaningReport {
            rows: rows.len(),
            ..CleaningReport::default()
        };
        let mut records: BTreeMap<EssayId, AuthorshipRecord> = BTreeMap::new();

        for row in rows {
            let essay = match EssayId::parse_number(&row.number) {
                Ok(essay) => essay,
                Err(e) => {
                    warn!("Skipping authorship row: {e}");
                    report.invalid_numbers.push(row.number);
                    continue;
                }
            };
            if records.contains_key(&essay) {
                warn!("Duplicate authorship row for {essay} ignored");
                report.duplicate_essays.push(essay);
                continue;
            }

            let record = AuthorshipRecord {
                essay,
                author: self.clean_author(&row.author, &mut report),
                publication: self.clean_publication(&row.publication, &mut report),
                date: self.clean_date(&row.date, &mut report),
            };
            records.insert(essay, record);
        }

        if records.is_empty() {
            return Err(FederalistError::config(format!(
                "no usable authorship records in {} rows",
                report.rows
            )));
        }

        report.accepted = records.len();
        debug!(
            "Cleaned {} of {} authorship rows ({} unrecognized authors, {} unparseable dates)",
            report.accepted,
            report.rows,
            report.unrecognized_authors.len(),
            report.unparseable_dates.len()
        );

        // BTreeMap iteration is already sorted and unique.
        let table = AuthorshipTable {
            records: records.into_values().collect(),
        };
        Ok((table, report))
    }

    fn is_missing(&self, cell: &str) -> bool {
        cell.is_empty() || cell == self.config.missing_sentinel
    }

    fn clean_author(&self, label: &str, report: &mut CleaningReport) -> Author {
        let label = label.trim();
        if self.is_missing(label) {
            return Author::Unknown;
        }
        if self
            .config
            .unknown_author_labels
            .iter()
            .any(|unknown| unknown.trim().eq_ignore_ascii_case(label))
        {
            report.unknown_authors += 1;
            return Author::Unknown;
        }
        Author::from_label(label).unwrap_or_else(|| {
            warn!("Unrecognized author '{label}' mapped to Unknown");
            report.unrecognized_authors.push(label.to_string());
            Author::Unknown
        })
    }

    fn clean_publication(&self, label: &str, report: &mut CleaningReport) -> String {
        let label = label.trim();
        if self.is_missing(label) {
            report.missing_publications += 1;
            return UNKNOWN_PUBLICATION.to_string();
        }
        self.config
            .publication_aliases
            .get(label)
            .cloned()
            .unwrap_or_else(|| label.to_string())
    }

    fn clean_date(&self, text: &str, report: &mut CleaningReport) -> Option<NaiveDate> {
        let text = text.trim();
        if self.is_missing(text) {
            report.missing_dates += 1;
            return None;
        }
        match NaiveDate::parse_from_str(text, &self.config.date_format)
            .or_else(|e| self.parse_without_weekday(text).ok_or(e))
        {
            Ok(date) => Some(date),
            Err(e) => {
                warn!("Unparseable date '{text}': {e}");
                report.unparseable_dates.push(text.to_string());
                None
            }
        }
    }

    /// Retry a date whose leading weekday disagrees with the calendar.
    ///
    /// Only applies when the format starts with `%A`; the weekday name and
    /// the separator after it are dropped from both text and format.
    fn parse_without_weekday(&self, text: &str) -> Option<NaiveDate> {
        let format = self.config.date_format.strip_prefix("%A")?;
        let format = format.trim_start_matches([',', ' ']);
        let (_, rest) = text.split_once(|c: char| c == ',' || c.is_whitespace())?;
        let date = NaiveDate::parse_from_str(rest.trim_start_matches([',', ' ']), format).ok()?;
        debug!("Date '{text}' parsed ignoring its weekday");
        Some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(number: &str, author: &str, publication: &str, date: &str) -> RawAuthorshipRow {
        RawAuthorshipRow::new(number, author, publication, date)
    }

    fn id(n: u16) -> EssayId {
        EssayId::new(n).unwrap()
    }

    #[test]
    fn test_clean_rules() {
        let cleaner = AuthorshipCleaner::default();
        let (table, report) = cleaner
            .clean(vec![
                row("1", "Hamilton", "For the Independent Journal", "Saturday, October 27, 1787"),
                row("2.0", "Jay", "Frm the New York Packet", "Wednesday, October 31, 1787"),
                row("49", "Hamilton or Madison", "--", "--"),
                row("10", "Madison", "From the Daily Advertiser", "Thursday, November 22, 1787"),
            ])
            .unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(report.accepted, 4);

        let first = table.get(id(1)).unwrap();
        assert_eq!(first.author, Author::Hamilton);
        assert_eq!(first.publication, "Independent Journal");
        assert_eq!(first.date, NaiveDate::from_ymd_opt(1787, 10, 27));

        let second = table.get(id(2)).unwrap();
        assert_eq!(second.author, Author::Jay);
        assert_eq!(second.publication, "New York Packet");

        let disputed = table.get(id(49)).unwrap();
        assert_eq!(disputed.author, Author::Unknown);
        assert_eq!(disputed.publication, "Unknown");
        assert_eq!(disputed.date, None);

        assert_eq!(report.unknown_authors, 1);
        assert_eq!(report.missing_publications, 1);
        assert_eq!(report.missing_dates, 1);
        assert!(report.unparseable_dates.is_empty());

        let ids: Vec<u16> = table.iter().map(|r| r.essay.get()).collect();
        assert_eq!(ids, vec![1, 2, 10, 49]);
    }

    #[test]
    fn test_bad_rows_are_counted() {
        let cleaner = AuthorshipCleaner::default();
        let (table, report) = cleaner
            .clean(vec![
                row("3", "Jay", "From the New York Packet", "November 3 1787"),
                row("3", "Madison", "From the New York Packet", "--"),
                row("90", "Madison", "--", "--"),
                row("x", "Madison", "--", "--"),
                row("4", "Publius", "Some Gazette", "--"),
            ])
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(report.rows, 5);
        assert_eq!(report.duplicate_essays, vec![id(3)]);
        assert_eq!(report.invalid_numbers, vec!["90", "x"]);
        assert_eq!(report.unparseable_dates, vec!["November 3 1787"]);
        assert_eq!(report.unrecognized_authors, vec!["Publius"]);

        assert_eq!(table.get(id(3)).unwrap().author, Author::Jay);
        assert_eq!(table.get(id(3)).unwrap().date, None);
        let fourth = table.get(id(4)).unwrap();
        assert_eq!(fourth.author, Author::Unknown);
        assert_eq!(fourth.publication, "Some Gazette");
    }

    #[test]
    fn test_empty_table_is_config_error() {
        let err = AuthorshipCleaner::default().clean(Vec::new()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_no_usable_rows_is_config_error() {
        let err = AuthorshipCleaner::default()
            .clean(vec![
                row("x", "Hamilton", "--", "--"),
                row("99", "Madison", "--", "--"),
            ])
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_wrong_weekday_keeps_date() {
        let (table, report) = AuthorshipCleaner::default()
            .clean(vec![
                row("1", "Hamilton", "--", "Tuesday, October 27, 1787"),
                row("2", "Jay", "--", "Someday October 31 1787"),
            ])
            .unwrap();

        assert_eq!(table.get(id(1)).unwrap().date, NaiveDate::from_ymd_opt(1787, 10, 27));
        assert_eq!(table.get(id(2)).unwrap().date, None);
        assert_eq!(report.unparseable_dates, vec!["Someday October 31 1787"]);
    }

    #[test]
    fn test_table_from_records() {
        let record = |n| AuthorshipRecord {
            essay: id(n),
            author: Author::Madison,
            publication: UNKNOWN_PUBLICATION.to_string(),
            date: None,
        };
        let table = AuthorshipTable::from_records(vec![record(5), record(2)]).unwrap();
        assert_eq!(table.records()[0].essay, id(2));
        assert_eq!(table.author_counts().get(&Author::Madison), Some(&2));
        assert!(AuthorshipTable::from_records(vec![record(5), record(5)]).is_err());
    }
}
