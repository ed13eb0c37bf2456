//! The journal timesheet layout: who may log time, what they may log it against, and where
//! submissions land.

use std::time::Duration;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::{AppendReceipt, NameMapping, SheetsClient, SheetsError};

pub const NAMES_RANGE: &str = "Names!A2:B";
pub const CATEGORIES_RANGE: &str = "Categories!A2:A";
pub const SUBMISSIONS_RANGE: &str = "Submissions";
pub const SUBMITTED_AT_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

const SECONDS_PER_DAY: f64 = 60.0 * 60.0 * 24.0;

impl SheetsClient {
    pub async fn get_names(&self, spreadsheet_id: &str) -> Result<NameMapping, SheetsError> {
        let rows = self.read_range(spreadsheet_id, NAMES_RANGE).await?;
        names_from_rows(rows)
    }

    pub async fn get_categories(&self, spreadsheet_id: &str) -> Result<Vec<String>, SheetsError> {
        let rows = self.read_range(spreadsheet_id, CATEGORIES_RANGE).await?;
        Ok(categories_from_rows(rows))
    }

    pub async fn add_time(
        &self,
        spreadsheet_id: &str,
        name: &str,
        semester: &str,
        duration: Duration,
        category: &str,
    ) -> Result<AppendReceipt, SheetsError> {
        let submitted_at = chrono::Local::now().naive_local();
        let row = submission_row(name, semester, duration, submitted_at, category);
        self.append_row(spreadsheet_id, SUBMISSIONS_RANGE, row).await
    }
}

/// Each row of the names range must be exactly `[name, pin]`. Rows with a blank name are
/// skipped.
pub fn names_from_rows(rows: Vec<Vec<String>>) -> Result<NameMapping, SheetsError> {
    let mut mapping = NameMapping::new();
    for (i, row) in rows.into_iter().enumerate() {
        if row.first().map_or(true, |name| name.trim().is_empty()) {
            continue;
        }
        let [name, pin]: [String; 2] = row.try_into().map_err(|row: Vec<String>| {
            SheetsError::ParsingError(format!(
                "Names row {} has {} cells, expected 2",
                i + 2,
                row.len()
            ))
        })?;
        mapping.insert(name, pin);
    }
    Ok(mapping)
}

pub fn categories_from_rows(rows: Vec<Vec<String>>) -> Vec<String> {
    rows.into_iter().flatten().collect()
}

/// The store expects durations as a fraction of a day.
pub fn duration_in_days(duration: Duration) -> f64 {
    duration.as_secs_f64() / SECONDS_PER_DAY
}

/// `[name, semester, days, submitted at, category]`
pub fn submission_row(
    name: &str,
    semester: &str,
    duration: Duration,
    submitted_at: NaiveDateTime,
    category: &str,
) -> Vec<Value> {
    vec![
        Value::from(name),
        Value::from(semester),
        Value::from(duration_in_days(duration)),
        Value::from(submitted_at.format(SUBMITTED_AT_FORMAT).to_string()),
        Value::from(category),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn names_are_read_in_sheet_order() {
        let mapping = names_from_rows(rows(&[&["Vincent", "1234"], &["Ada", "0000"]])).unwrap();
        assert_eq!(mapping.names().collect::<Vec<_>>(), vec!["Vincent", "Ada"]);
        assert_eq!(mapping.pin("Ada"), Some("0000"));
    }

    #[test]
    fn names_row_without_pin_is_a_parsing_error() {
        let err = names_from_rows(rows(&[&["Vincent", "1234"], &["Ada"]])).unwrap_err();
        assert!(matches!(err, SheetsError::ParsingError(ref m) if m.contains("row 3")));
    }

    #[test]
    fn rows_with_blank_names_are_skipped() {
        let mapping =
            names_from_rows(rows(&[&["", "1234"], &[], &[" "], &["Ada", "0000"]])).unwrap();
        assert_eq!(mapping.names().collect::<Vec<_>>(), vec!["Ada"]);
        assert_eq!(mapping.pin(""), None);
    }

    #[test]
    fn categories_are_flattened() {
        let categories = categories_from_rows(rows(&[&["Editing"], &["Cite checking"]]));
        assert_eq!(categories, vec!["Editing", "Cite checking"]);
        assert!(categories_from_rows(vec![]).is_empty());
    }

    #[test]
    fn duration_is_persisted_in_days() {
        assert_eq!(duration_in_days(Duration::from_secs(86_400)), 1.0);
        assert_eq!(duration_in_days(Duration::from_secs(21_600)), 0.25);
    }

    #[test]
    fn submission_row_layout() {
        let submitted_at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(14, 5, 9)
            .unwrap();
        let row = submission_row(
            "Vincent",
            "Spring",
            Duration::from_secs(43_200),
            submitted_at,
            "Editing",
        );
        assert_eq!(
            row,
            vec![
                Value::from("Vincent"),
                Value::from("Spring"),
                Value::from(0.5),
                Value::from("03/07/2024 14:05:09"),
                Value::from("Editing"),
            ]
        );
    }
}
