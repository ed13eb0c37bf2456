//! Remote spreadsheet operations and the single-flight runner that executes them.

mod async_call;
mod dev_store;
mod sheets_store;
#[cfg(test)]
pub(crate) mod testing;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use sheets::{AppendReceipt, NameMapping, SheetsError};
use thiserror::Error;

pub use async_call::{AsyncCall, WaitSurface};
pub use dev_store::DevStore;

/// Backing store for the journal timesheet.
///
/// Implemented by [`sheets::SheetsClient`] for the real spreadsheet and by [`DevStore`] for
/// local runs.
#[async_trait]
pub trait RemoteStore: Send + Sync + 'static {
    async fn get_names(&self, sheet_id: &str) -> Result<NameMapping, SheetsError>;

    async fn get_categories(&self, sheet_id: &str) -> Result<Vec<String>, SheetsError>;

    async fn add_time(
        &self,
        sheet_id: &str,
        name: &str,
        semester: &str,
        duration: Duration,
        category: &str,
    ) -> Result<AppendReceipt, SheetsError>;
}

/// Tag of a [`RemoteOp`], used for allow-listing and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    FetchNames,
    FetchCategories,
    AppendTime,
}

impl OpKind {
    pub const ALL: [OpKind; 3] = [OpKind::AppendTime, OpKind::FetchCategories, OpKind::FetchNames];

    pub fn as_str(self) -> &'static str {
        match self {
            OpKind::FetchNames => "get_names",
            OpKind::FetchCategories => "get_categories",
            OpKind::AppendTime => "add_time",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One remote operation with its arguments captured by value.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteOp {
    FetchNames {
        sheet_id: String,
    },
    FetchCategories {
        sheet_id: String,
    },
    AppendTime {
        sheet_id: String,
        name: String,
        semester: String,
        duration: Duration,
        category: String,
    },
}

impl RemoteOp {
    pub fn kind(&self) -> OpKind {
        match self {
            RemoteOp::FetchNames { .. } => OpKind::FetchNames,
            RemoteOp::FetchCategories { .. } => OpKind::FetchCategories,
            RemoteOp::AppendTime { .. } => OpKind::AppendTime,
        }
    }

    pub fn sheet_id(&self) -> &str {
        match self {
            RemoteOp::FetchNames { sheet_id }
            | RemoteOp::FetchCategories { sheet_id }
            | RemoteOp::AppendTime { sheet_id, .. } => sheet_id,
        }
    }

    async fn dispatch(self, store: &dyn RemoteStore) -> Result<RemoteReply, SheetsError> {
        match self {
            RemoteOp::FetchNames { sheet_id } => {
                store.get_names(&sheet_id).await.map(RemoteReply::Names)
            }
            RemoteOp::FetchCategories { sheet_id } => store
                .get_categories(&sheet_id)
                .await
                .map(RemoteReply::Categories),
            RemoteOp::AppendTime {
                sheet_id,
                name,
                semester,
                duration,
                category,
            } => store
                .add_time(&sheet_id, &name, &semester, duration, &category)
                .await
                .map(RemoteReply::Receipt),
        }
    }
}

/// Value returned by a successful [`RemoteOp`].
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteReply {
    Names(NameMapping),
    Categories(Vec<String>),
    Receipt(AppendReceipt),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    Canceled,
    Error,
    Success(RemoteReply),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStatus {
    Canceled,
    Error,
    Success,
}

impl CallOutcome {
    pub fn status(&self) -> CallStatus {
        match self {
            CallOutcome::Canceled => CallStatus::Canceled,
            CallOutcome::Error => CallStatus::Error,
            CallOutcome::Success(_) => CallStatus::Success,
        }
    }
}

/// Misuse of the remote runner. These indicate a bug in the caller and are not recovered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CallError {
    #[error("{0} is not invocable without a spreadsheet id")]
    InvalidOperation(OpKind),
    #[error("{op} not in {allowed}")]
    NotAllowed { op: OpKind, allowed: String },
}

/// Something that can run one [`RemoteOp`] and report its outcome.
#[async_trait(?Send)]
pub trait RemoteCall {
    async fn call(&mut self, op: RemoteOp) -> Result<CallOutcome, CallError>;
}
