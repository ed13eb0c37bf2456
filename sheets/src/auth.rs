use std::fmt;
use std::path::Path;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::instrument;

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Cached tokens this close to expiry are minted again.
const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Service account key: {0}")]
    KeyFile(String),
    #[error("Signing token request: {0}")]
    Signing(String),
    #[error("Token exchange failed: {0}")]
    Exchange(String),
}

/// The fields of a Google service-account JSON key this client needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self, AuthError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AuthError::KeyFile(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, AuthError> {
        serde_json::from_str(raw).map_err(|e| AuthError::KeyFile(e.to_string()))
    }

    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    fn claims(&self, now: DateTime<Utc>) -> Claims<'_> {
        let iat = now.timestamp();
        Claims {
            iss: &self.client_email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        }
    }

    /// RS256-signed JWT exchanged for an access token.
    fn assertion(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        encode(&Header::new(Algorithm::RS256), &self.claims(now), &key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + TimeDelta::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// Access tokens minted from a service-account key, cached until shortly before they expire.
pub struct ServiceAccountTokens {
    key: ServiceAccountKey,
    cached: Mutex<Option<CachedToken>>,
}

impl fmt::Debug for ServiceAccountTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountTokens")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountTokens {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self {
            key,
            cached: Mutex::new(None),
        }
    }

    pub fn client_email(&self) -> &str {
        self.key.client_email()
    }

    async fn access_token(&self, http: &reqwest::Client) -> Result<String, AuthError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();
        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh(now)) {
            return Ok(token.access_token.clone());
        }
        let token = exchange(http, &self.key, now).await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }

    async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}

#[instrument(skip_all, fields(account = %key.client_email))]
async fn exchange(
    http: &reqwest::Client,
    key: &ServiceAccountKey,
    now: DateTime<Utc>,
) -> Result<CachedToken, AuthError> {
    let assertion = key.assertion(now)?;
    let resp = http
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await
        .map_err(|e| AuthError::Exchange(e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        return Err(AuthError::Exchange(format!("{}: {}", status, body)));
    }

    let token: TokenResponse = resp
        .json()
        .await
        .map_err(|e| AuthError::Exchange(format!("Failed to parse token response: {}", e)))?;
    tracing::debug!(expires_in = token.expires_in, "minted access token");
    Ok(CachedToken {
        access_token: token.access_token,
        expires_at: now + TimeDelta::seconds(token.expires_in),
    })
}

/// How requests to the Sheets API are authorized.
#[derive(Debug)]
pub enum Authorization {
    /// A token minted elsewhere, sent as is.
    BearerToken(String),
    ServiceAccount(ServiceAccountTokens),
}

impl Authorization {
    pub fn bearer(token: impl Into<String>) -> Self {
        Authorization::BearerToken(token.into())
    }

    pub fn service_account(key: ServiceAccountKey) -> Self {
        Authorization::ServiceAccount(ServiceAccountTokens::new(key))
    }

    pub(crate) async fn access_token(&self, http: &reqwest::Client) -> Result<String, AuthError> {
        match self {
            Authorization::BearerToken(token) => Ok(token.clone()),
            Authorization::ServiceAccount(tokens) => tokens.access_token(http).await,
        }
    }

    /// Drop a cached token the API refused so the next request mints a new one.
    pub(crate) async fn invalidate(&self) {
        if let Authorization::ServiceAccount(tokens) = self {
            tokens.invalidate().await;
        }
    }
}
