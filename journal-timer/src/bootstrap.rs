use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use sheets::auth::{Authorization, ServiceAccountKey};
use sheets::SheetsClient;

use crate::cli::FailingCall;
use crate::config::{TimerConfig, TOKEN_ENV};
use crate::journals::JournalMapping;
use crate::remote::{DevStore, RemoteStore};

/// Journals from the configured mapping file, backed by Google Sheets.
pub fn sheets_backend(config: &TimerConfig) -> Result<(JournalMapping, Arc<dyn RemoteStore>)> {
    let auth = sheets_authorization(config, config.access_token())?;
    let journals = JournalMapping::load(&config.journals_path()?)?;
    let client = SheetsClient::with_authorization(&config.sheets_api_url, auth);
    tracing::info!(api = %config.sheets_api_url, "using Google Sheets backend");
    Ok((journals, Arc::new(client)))
}

/// An explicit access token wins; otherwise tokens are minted from the service-account key.
pub fn sheets_authorization(config: &TimerConfig, token: Option<String>) -> Result<Authorization> {
    if let Some(token) = token {
        tracing::info!("authorizing with a fixed access token");
        return Ok(Authorization::bearer(token));
    }

    let path = config.service_account_path()?;
    if !path.exists() {
        bail!(
            "No Sheets credentials: put a service-account key at {}, or set {} or access_token",
            path.display(),
            TOKEN_ENV
        );
    }
    let key = ServiceAccountKey::from_file(&path)?;
    tracing::info!(account = %key.client_email(), "authorizing with service account");
    Ok(Authorization::service_account(key))
}

pub fn dev_backend(latency: Duration, fail: Option<FailingCall>) -> DevStore {
    let store = DevStore::new().with_latency(latency);
    if let Some(call) = fail {
        store.fail(call.into());
    }
    tracing::info!(?latency, ?fail, "using in-memory dev backend");
    store
}

/// Rows the dev backend received, for printing after the UI exits.
pub fn dev_submission_report(store: &DevStore) -> Vec<String> {
    let sheets = [DevStore::LAW_REVIEW_SHEET, DevStore::JOURNAL_OF_LAW_SHEET];
    sheets
        .iter()
        .flat_map(|sheet| {
            store.submissions(sheet).into_iter().map(move |row| {
                format!(
                    "{}: {} | {} | {}s | {}",
                    sheet,
                    row.name,
                    row.semester,
                    row.duration.as_secs(),
                    row.category
                )
            })
        })
        .collect()
}
