use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sheets::{AppendReceipt, NameMapping, SheetsError, UpdatedRange};

use super::{OpKind, RemoteStore};
use crate::journals::JournalMapping;

/// In-memory stand-in for the journal spreadsheets, used by `journal-timer dev`.
#[derive(Debug, Clone)]
pub struct DevStore {
    sheets: Arc<Mutex<HashMap<String, DevSheet>>>,
    failing: Arc<Mutex<HashSet<OpKind>>>,
    latency: Duration,
}

#[derive(Debug, Clone, Default)]
struct DevSheet {
    names: NameMapping,
    categories: Vec<String>,
    submissions: Vec<DevSubmission>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DevSubmission {
    pub name: String,
    pub semester: String,
    pub duration: Duration,
    pub category: String,
}

impl DevStore {
    pub const LAW_REVIEW_SHEET: &'static str = "dev-law-review";
    pub const JOURNAL_OF_LAW_SHEET: &'static str = "dev-journal-of-law";

    pub fn new() -> Self {
        Self {
            sheets: Arc::new(Mutex::new(seed_dev_sheets())),
            failing: Arc::new(Mutex::new(HashSet::new())),
            latency: Duration::ZERO,
        }
    }

    /// Delay every operation, long enough to try the Stop button.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn journals() -> JournalMapping {
        [
            ("Law Review", Self::LAW_REVIEW_SHEET),
            ("Journal of Law", Self::JOURNAL_OF_LAW_SHEET),
        ]
        .into_iter()
        .collect()
    }

    /// Make every later call of `kind` fail with [`DevStore::failure`].
    pub fn fail(&self, kind: OpKind) {
        self.failing
            .lock()
            .expect("dev store lock poisoned")
            .insert(kind);
    }

    pub fn failure(kind: OpKind) -> SheetsError {
        SheetsError::ResponseError(format!("dev store refused {}", kind))
    }

    #[cfg(test)]
    pub fn names_for(&self, sheet_id: &str) -> Option<NameMapping> {
        self.sheets
            .lock()
            .expect("dev store lock poisoned")
            .get(sheet_id)
            .map(|sheet| sheet.names.clone())
    }

    pub fn submissions(&self, sheet_id: &str) -> Vec<DevSubmission> {
        self.sheets
            .lock()
            .expect("dev store lock poisoned")
            .get(sheet_id)
            .map(|sheet| sheet.submissions.clone())
            .unwrap_or_default()
    }

    async fn enter(&self, kind: OpKind) -> Result<(), SheetsError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self
            .failing
            .lock()
            .expect("dev store lock poisoned")
            .contains(&kind)
        {
            return Err(Self::failure(kind));
        }
        Ok(())
    }

    fn with_sheet<T>(
        &self,
        sheet_id: &str,
        f: impl FnOnce(&mut DevSheet) -> T,
    ) -> Result<T, SheetsError> {
        let mut sheets = self.sheets.lock().expect("dev store lock poisoned");
        let sheet = sheets.get_mut(sheet_id).ok_or_else(|| {
            SheetsError::ResponseError(format!(
                "404 Not Found: Requested entity was not found ({})",
                sheet_id
            ))
        })?;
        Ok(f(sheet))
    }
}

impl Default for DevStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteStore for DevStore {
    async fn get_names(&self, sheet_id: &str) -> Result<NameMapping, SheetsError> {
        self.enter(OpKind::FetchNames).await?;
        self.with_sheet(sheet_id, |sheet| sheet.names.clone())
    }

    async fn get_categories(&self, sheet_id: &str) -> Result<Vec<String>, SheetsError> {
        self.enter(OpKind::FetchCategories).await?;
        self.with_sheet(sheet_id, |sheet| sheet.categories.clone())
    }

    async fn add_time(
        &self,
        sheet_id: &str,
        name: &str,
        semester: &str,
        duration: Duration,
        category: &str,
    ) -> Result<AppendReceipt, SheetsError> {
        self.enter(OpKind::AppendTime).await?;
        self.with_sheet(sheet_id, |sheet| {
            sheet.submissions.push(DevSubmission {
                name: name.to_string(),
                semester: semester.to_string(),
                duration,
                category: category.to_string(),
            });
            let row = sheet.submissions.len() + 1;
            AppendReceipt {
                spreadsheet_id: Some(sheet_id.to_string()),
                table_range: Some(format!("Submissions!A1:E{}", row - 1)),
                updates: Some(UpdatedRange {
                    spreadsheet_id: Some(sheet_id.to_string()),
                    updated_range: Some(format!("Submissions!A{row}:E{row}")),
                    updated_rows: Some(1),
                    updated_columns: Some(5),
                    updated_cells: Some(5),
                }),
            }
        })
    }
}

fn seed_dev_sheets() -> HashMap<String, DevSheet> {
    let mut sheets = HashMap::new();
    sheets.insert(
        DevStore::LAW_REVIEW_SHEET.to_string(),
        DevSheet {
            names: [("Ada", "1234"), ("Grace", "0000"), ("Vincent", "4321")]
                .into_iter()
                .collect(),
            categories: vec![
                "Cite checking".to_string(),
                "Editing".to_string(),
                "Meetings".to_string(),
            ],
            submissions: Vec::new(),
        },
    );
    sheets.insert(
        DevStore::JOURNAL_OF_LAW_SHEET.to_string(),
        DevSheet {
            names: [("Linus", "2468")].into_iter().collect(),
            categories: vec!["Source pulling".to_string(), "Editing".to_string()],
            submissions: Vec::new(),
        },
    );
    sheets
}
