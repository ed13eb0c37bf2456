use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

use crate::{
    auth::{AuthError, Authorization},
    domain::{AppendReceipt, ValueRange},
    SheetsURL,
};

pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4";

/// Thin client over the Google Sheets v4 `values` endpoints. Clones share one token cache.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: SheetsURL,
    auth: Arc<Authorization>,
}

impl SheetsClient {
    /// Client sending a fixed OAuth bearer token.
    pub fn new(base_url: &str, access_token: impl Into<String>) -> Self {
        Self::with_authorization(base_url, Authorization::bearer(access_token))
    }

    pub fn with_authorization(base_url: &str, auth: Authorization) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: SheetsURL::new(base_url),
            auth: Arc::new(auth),
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, SheetsError> {
        let token = self.auth.access_token(&self.http).await?;
        let resp = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SheetsError::ResponseError(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let err = status_error(status, &body)
            .unwrap_or_else(|| SheetsError::ResponseError(status.to_string()));
        if matches!(err, SheetsError::Unauthorized) {
            self.auth.invalidate().await;
        }
        Err(err)
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SheetsError> {
        self.send(request).await?.json::<T>().await.map_err(|e| {
            SheetsError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })
    }

    /// Read every row of `range`, each cell rendered as text.
    #[instrument(skip(self))]
    pub async fn read_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, SheetsError> {
        let url = self.base_url.values(spreadsheet_id, range);
        let response: ValueRange = self.json(self.http.get(url.as_ref())).await?;
        tracing::debug!(rows = response.values.len(), "read range");
        Ok(response.into_text_rows())
    }

    /// Append one row after the last row of the table found in `range`.
    #[instrument(skip(self, values))]
    pub async fn append_row(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: Vec<Value>,
    ) -> Result<AppendReceipt, SheetsError> {
        let url = self
            .base_url
            .values(spreadsheet_id, range)
            .with_method("append")
            .with_query("valueInputOption", "RAW");
        let body = ValueRange::single_row(values);
        let receipt: AppendReceipt = self.json(self.http.post(url.as_ref()).json(&body)).await?;
        tracing::debug!(updated_range = ?receipt.updated_range(), "appended row");
        Ok(receipt)
    }
}

/// Error for a non-success response: 401 and 403 are `Unauthorized`, anything else carries
/// the status and the API's message, or the raw body when there is none.
fn status_error(status: StatusCode, body: &str) -> Option<SheetsError> {
    if status.is_success() {
        return None;
    }
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Some(SheetsError::Unauthorized);
    }
    let message = api_error_message(body).unwrap_or_else(|| body.to_string());
    Some(SheetsError::ResponseError(format!("{}: {}", status, message)))
}

/// Pull `error.message` out of a Google API error body.
fn api_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("AuthError: {0}")]
    AuthError(#[from] AuthError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_google_error_message() {
        let body = r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#;
        assert_eq!(
            api_error_message(body).as_deref(),
            Some("Requested entity was not found.")
        );
    }

    #[test]
    fn plain_text_body_has_no_api_message() {
        assert_eq!(api_error_message("Bad Gateway"), None);
    }

    fn response_error(status: StatusCode, body: &str) -> String {
        match status_error(status, body) {
            Some(SheetsError::ResponseError(message)) => message,
            other => panic!("expected a response error, got {:?}", other),
        }
    }

    #[test]
    fn auth_statuses_are_unauthorized() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, ""),
            Some(SheetsError::Unauthorized)
        ));
        assert!(matches!(
            status_error(
                StatusCode::FORBIDDEN,
                r#"{"error":{"message":"The caller does not have permission"}}"#
            ),
            Some(SheetsError::Unauthorized)
        ));
    }

    #[test]
    fn not_found_carries_the_api_message() {
        let body = r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#;
        assert_eq!(
            response_error(StatusCode::NOT_FOUND, body),
            "404 Not Found: Requested entity was not found."
        );
    }

    #[test]
    fn plain_text_error_carries_the_body() {
        assert_eq!(
            response_error(StatusCode::BAD_GATEWAY, "upstream unavailable"),
            "502 Bad Gateway: upstream unavailable"
        );
    }

    #[test]
    fn success_is_not_an_error() {
        assert!(status_error(StatusCode::OK, "{}").is_none());
    }
}
