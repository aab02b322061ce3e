//! Loading and cleaning of the daily-observation diary
//!
//! The input is a headerless CSV with three columns: date, a 0/1 "sweets
//! consumed" flag, and a 0/1 "on period" flag. Rows that fail to parse are
//! dropped, but never silently: every drop is counted by reason in a
//! `CleaningReport` and logged for auditability.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors for dataset loading
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("No usable rows after cleaning ({rows_read} read, all dropped)")]
    Empty { rows_read: usize },
}

/// Day-first date formats accepted in the input, tried in order
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d.%m.%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// A single cleaned diary row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub sweets_consumed: i64,
    pub on_period: i64,
}

impl Observation {
    /// Human-readable group label derived from the period flag
    pub fn period_status(&self) -> &'static str {
        if self.on_period != 0 {
            "On period"
        } else {
            "Not on period"
        }
    }
}

/// Counts of what happened during cleaning, reported rather than swallowed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Total non-empty lines seen in the input
    pub rows_read: usize,
    /// Rows that survived cleaning
    pub rows_kept: usize,
    /// Rows dropped because the date column did not parse
    pub dropped_bad_date: usize,
    /// Rows dropped because a flag column was not numeric
    pub dropped_bad_numeric: usize,
    /// Rows dropped for having fewer than three fields
    pub dropped_short_row: usize,
}

impl CleaningReport {
    /// Total rows dropped for any reason
    pub fn rows_dropped(&self) -> usize {
        self.dropped_bad_date + self.dropped_bad_numeric + self.dropped_short_row
    }
}

/// The cleaned dataset, sorted by date
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyDataset {
    observations: Vec<Observation>,
}

impl DailyDataset {
    /// Parse and clean a raw CSV string
    ///
    /// No header row is expected; a header line, if present, simply fails
    /// date parsing and is counted as a dropped row. The field delimiter is
    /// sniffed per line (comma, falling back to semicolon), matching the
    /// loose separator handling of the source data.
    ///
    /// # Errors
    /// Fails with `DatasetError::Empty` when nothing survives cleaning.
    pub fn from_csv_str(raw: &str) -> Result<(Self, CleaningReport), DatasetError> {
        let mut report = CleaningReport::default();
        let mut observations = Vec::new();

        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            report.rows_read += 1;

            let fields = split_fields(line);
            if fields.len() < 3 {
                report.dropped_short_row += 1;
                tracing::debug!(line, "dropping row with fewer than 3 fields");
                continue;
            }

            let Some(date) = parse_date(fields[0].trim()) else {
                report.dropped_bad_date += 1;
                tracing::debug!(value = fields[0].trim(), "dropping row with unparseable date");
                continue;
            };

            let (Some(sweets), Some(period)) = (
                parse_flag(fields[1].trim()),
                parse_flag(fields[2].trim()),
            ) else {
                report.dropped_bad_numeric += 1;
                tracing::debug!(line, "dropping row with non-numeric flag");
                continue;
            };

            observations.push(Observation {
                date,
                sweets_consumed: sweets,
                on_period: period,
            });
        }

        observations.sort_by_key(|o| o.date);
        report.rows_kept = observations.len();

        tracing::info!(
            rows_read = report.rows_read,
            rows_kept = report.rows_kept,
            rows_dropped = report.rows_dropped(),
            "cleaned daily dataset"
        );

        if observations.is_empty() {
            return Err(DatasetError::Empty {
                rows_read: report.rows_read,
            });
        }

        Ok((Self { observations }, report))
    }

    /// All observations, ordered by date
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of cleaned rows
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset holds no rows
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Partition the sweets flag into (on-period, off-period) samples
    ///
    /// The on-period sample comes first to match the direction of the
    /// hypothesis ("consumption is higher on period days").
    pub fn samples(&self) -> (Vec<f64>, Vec<f64>) {
        let mut on = Vec::new();
        let mut off = Vec::new();

        for obs in &self.observations {
            let value = obs.sweets_consumed as f64;
            if obs.on_period != 0 {
                on.push(value);
            } else {
                off.push(value);
            }
        }

        (on, off)
    }
}

/// Split a line on the sniffed delimiter (comma unless only semicolons appear)
fn split_fields(line: &str) -> Vec<&str> {
    let delimiter = if line.contains(',') { ',' } else { ';' };
    line.split(delimiter).collect()
}

/// Try the accepted day-first date formats in order
fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Parse a flag column: numeric values are truncated to integers, the way
/// the source data's float-typed flags were
fn parse_flag(value: &str) -> Option<i64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
01/03/2025,1,0
02/03/2025,0,0
03/03/2025,1,1
04/03/2025,1,1
";

    #[test]
    fn test_parses_clean_input() {
        let (dataset, report) = DailyDataset::from_csv_str(SAMPLE).unwrap();
        assert_eq!(dataset.len(), 4);
        assert_eq!(report.rows_read, 4);
        assert_eq!(report.rows_kept, 4);
        assert_eq!(report.rows_dropped(), 0);
    }

    #[test]
    fn test_drops_header_row_as_bad_date() {
        let raw = format!("date,sweets_consumed,on_period\n{}", SAMPLE);
        let (dataset, report) = DailyDataset::from_csv_str(&raw).unwrap();
        assert_eq!(dataset.len(), 4);
        assert_eq!(report.dropped_bad_date, 1);
    }

    #[test]
    fn test_drops_non_numeric_flag() {
        let raw = "01/03/2025,1,0\n02/03/2025,maybe,0\n03/03/2025,1,1\n";
        let (dataset, report) = DailyDataset::from_csv_str(raw).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(report.dropped_bad_numeric, 1);
    }

    #[test]
    fn test_drops_short_row() {
        let raw = "01/03/2025,1,0\n02/03/2025\n";
        let (dataset, report) = DailyDataset::from_csv_str(raw).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(report.dropped_short_row, 1);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let raw = "01/03/2025;1;0\n02/03/2025;0;1\n";
        let (dataset, _) = DailyDataset::from_csv_str(raw).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.observations()[1].on_period, 1);
    }

    #[test]
    fn test_sorts_by_date() {
        let raw = "03/03/2025,1,1\n01/03/2025,0,0\n02/03/2025,1,0\n";
        let (dataset, _) = DailyDataset::from_csv_str(raw).unwrap();
        let dates: Vec<_> = dataset.observations().iter().map(|o| o.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_day_first_parsing() {
        // 05/03 is March 5th, not May 3rd
        let raw = "05/03/2025,1,0\n06/03/2025,0,0\n";
        let (dataset, _) = DailyDataset::from_csv_str(raw).unwrap();
        let date = dataset.observations()[0].date;
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
    }

    #[test]
    fn test_iso_date_accepted() {
        let raw = "2025-03-01,1,0\n2025-03-02,0,1\n";
        let (dataset, _) = DailyDataset::from_csv_str(raw).unwrap();
        assert_eq!(dataset.len(), 2);
    }

    #[test]
    fn test_float_flags_truncate_to_int() {
        let raw = "01/03/2025,1.0,0.0\n";
        let (dataset, _) = DailyDataset::from_csv_str(raw).unwrap();
        assert_eq!(dataset.observations()[0].sweets_consumed, 1);
        assert_eq!(dataset.observations()[0].on_period, 0);
    }

    #[test]
    fn test_all_rows_dropped_is_error() {
        let raw = "not,a,date\nstill,not,one\n";
        let err = DailyDataset::from_csv_str(raw).unwrap_err();
        assert!(err.to_string().contains("2 read"));
    }

    #[test]
    fn test_blank_lines_ignored() {
        let raw = "01/03/2025,1,0\n\n\n02/03/2025,0,1\n";
        let (dataset, report) = DailyDataset::from_csv_str(raw).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(report.rows_read, 2);
    }

    #[test]
    fn test_samples_partition_by_period_status() {
        let (dataset, _) = DailyDataset::from_csv_str(SAMPLE).unwrap();
        let (on, off) = dataset.samples();
        assert_eq!(on, vec![1.0, 1.0]);
        assert_eq!(off, vec![1.0, 0.0]);
    }

    #[test]
    fn test_period_status_labels() {
        let (dataset, _) = DailyDataset::from_csv_str(SAMPLE).unwrap();
        assert_eq!(dataset.observations()[0].period_status(), "Not on period");
        assert_eq!(dataset.observations()[2].period_status(), "On period");
    }
}
