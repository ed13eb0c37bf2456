use std::time::Duration;

use async_trait::async_trait;
use sheets::{AppendReceipt, NameMapping, SheetsClient, SheetsError};

use super::RemoteStore;

#[async_trait]
impl RemoteStore for SheetsClient {
    async fn get_names(&self, sheet_id: &str) -> Result<NameMapping, SheetsError> {
        SheetsClient::get_names(self, sheet_id).await
    }

    async fn get_categories(&self, sheet_id: &str) -> Result<Vec<String>, SheetsError> {
        SheetsClient::get_categories(self, sheet_id).await
    }

    async fn add_time(
        &self,
        sheet_id: &str,
        name: &str,
        semester: &str,
        duration: Duration,
        category: &str,
    ) -> Result<AppendReceipt, SheetsError> {
        SheetsClient::add_time(self, sheet_id, name, semester, duration, category).await
    }
}
