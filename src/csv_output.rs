//! CSV output for the cleaned dataset
//!
//! Writes the `date,sweets_consumed,on_period,period_status` table the rest
//! of the run (and any downstream spreadsheet work) consumes.

use crate::dataset::DailyDataset;

/// CSV formatter for the cleaned dataset
#[derive(Debug)]
pub struct CleanCsvOutput<'a> {
    dataset: &'a DailyDataset,
}

impl<'a> CleanCsvOutput<'a> {
    /// Create a formatter over a cleaned dataset
    pub fn new(dataset: &'a DailyDataset) -> Self {
        Self { dataset }
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str("date,sweets_consumed,on_period,period_status\n");

        for obs in self.dataset.observations() {
            output.push_str(&format!(
                "{},{},{},{}\n",
                obs.date.format("%Y-%m-%d"),
                obs.sweets_consumed,
                obs.on_period,
                Self::escape_field(obs.period_status()),
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_csv_header() {
        let (dataset, _) = DailyDataset::from_csv_str("01/03/2025,1,0\n").unwrap();
        let csv = CleanCsvOutput::new(&dataset).to_csv();
        assert!(csv.starts_with("date,sweets_consumed,on_period,period_status\n"));
    }

    #[test]
    fn test_clean_csv_rows_iso_dates() {
        let (dataset, _) =
            DailyDataset::from_csv_str("01/03/2025,1,0\n02/03/2025,0,1\n").unwrap();
        let csv = CleanCsvOutput::new(&dataset).to_csv();
        assert!(csv.contains("2025-03-01,1,0,Not on period"));
        assert!(csv.contains("2025-03-02,0,1,On period"));
    }

    #[test]
    fn test_clean_csv_row_count() {
        let (dataset, _) =
            DailyDataset::from_csv_str("01/03/2025,1,0\n02/03/2025,0,1\n03/03/2025,1,1\n")
                .unwrap();
        let csv = CleanCsvOutput::new(&dataset).to_csv();
        assert_eq!(csv.lines().count(), 4); // header + 3 rows
    }

    #[test]
    fn test_escape_field_simple() {
        assert_eq!(CleanCsvOutput::escape_field("hello"), "hello");
    }

    #[test]
    fn test_escape_field_with_comma() {
        assert_eq!(
            CleanCsvOutput::escape_field("hello,world"),
            "\"hello,world\""
        );
    }

    #[test]
    fn test_escape_field_with_quote() {
        assert_eq!(
            CleanCsvOutput::escape_field("say \"hi\""),
            "\"say \"\"hi\"\"\""
        );
    }
}
