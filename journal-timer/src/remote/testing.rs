use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sheets::{AppendReceipt, NameMapping, SheetsError};
use tokio::sync::Notify;

use super::{CallError, CallOutcome, RemoteCall, RemoteOp, RemoteStore, WaitSurface};

/// Wait surface whose Stop press is scripted up front.
pub(crate) struct ScriptedWait {
    stop_after: Option<Duration>,
    pub errors: Vec<String>,
}

impl ScriptedWait {
    pub fn never_stops() -> Self {
        Self {
            stop_after: None,
            errors: Vec::new(),
        }
    }

    pub fn stops_immediately() -> Self {
        Self::stops_after(Duration::ZERO)
    }

    pub fn stops_after(delay: Duration) -> Self {
        Self {
            stop_after: Some(delay),
            errors: Vec::new(),
        }
    }
}

#[async_trait(?Send)]
impl WaitSurface for ScriptedWait {
    async fn stopped(&mut self) {
        match self.stop_after {
            Some(delay) if delay.is_zero() => {}
            Some(delay) => tokio::time::sleep(delay).await,
            None => std::future::pending::<()>().await,
        }
    }

    async fn notify_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// Store whose `get_names` blocks until released.
pub(crate) struct StallingStore {
    release: Arc<Notify>,
    completed: Arc<Notify>,
}

impl StallingStore {
    pub fn new() -> (Self, Arc<Notify>) {
        let release = Arc::new(Notify::new());
        let store = Self {
            release: Arc::clone(&release),
            completed: Arc::new(Notify::new()),
        };
        (store, release)
    }

    pub fn completed(&self) -> Arc<Notify> {
        Arc::clone(&self.completed)
    }
}

#[async_trait]
impl RemoteStore for StallingStore {
    async fn get_names(&self, _sheet_id: &str) -> Result<NameMapping, SheetsError> {
        self.release.notified().await;
        self.completed.notify_one();
        Ok(NameMapping::new())
    }

    async fn get_categories(&self, _sheet_id: &str) -> Result<Vec<String>, SheetsError> {
        Ok(Vec::new())
    }

    async fn add_time(
        &self,
        _sheet_id: &str,
        _name: &str,
        _semester: &str,
        _duration: Duration,
        _category: &str,
    ) -> Result<AppendReceipt, SheetsError> {
        Ok(AppendReceipt::default())
    }
}

/// Store whose every call panics on the background task.
pub(crate) struct PanickingStore;

#[async_trait]
impl RemoteStore for PanickingStore {
    async fn get_names(&self, sheet_id: &str) -> Result<NameMapping, SheetsError> {
        panic!("names range of {sheet_id} is corrupt");
    }

    async fn get_categories(&self, sheet_id: &str) -> Result<Vec<String>, SheetsError> {
        panic!("categories range of {sheet_id} is corrupt");
    }

    async fn add_time(
        &self,
        sheet_id: &str,
        _name: &str,
        _semester: &str,
        _duration: Duration,
        _category: &str,
    ) -> Result<AppendReceipt, SheetsError> {
        panic!("submissions range of {sheet_id} is corrupt");
    }
}

/// Caller that hands out canned outcomes in order and records every op it was asked to run.
#[derive(Default)]
pub(crate) struct ScriptedCall {
    outcomes: VecDeque<CallOutcome>,
    pub ops: Vec<RemoteOp>,
}

impl ScriptedCall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn returning(outcomes: impl IntoIterator<Item = CallOutcome>) -> Self {
        Self {
            outcomes: outcomes.into_iter().collect(),
            ops: Vec::new(),
        }
    }
}

#[async_trait(?Send)]
impl RemoteCall for ScriptedCall {
    async fn call(&mut self, op: RemoteOp) -> Result<CallOutcome, CallError> {
        self.ops.push(op);
        Ok(self
            .outcomes
            .pop_front()
            .expect("ScriptedCall ran out of outcomes"))
    }
}
