use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::{CallError, CallOutcome, OpKind, RemoteCall, RemoteOp, RemoteStore};

/// Where a running call is shown while the interactive task waits on it.
#[async_trait(?Send)]
pub trait WaitSurface {
    /// Show the progress indicator until the user asks to stop. The future is dropped as soon
    /// as the call finishes, which dismisses the indicator.
    async fn stopped(&mut self);

    /// Blocking error notification for a failed call.
    async fn notify_error(&mut self, message: &str);
}

/// Runs one allow-listed [`RemoteOp`] on a background task while blocking the caller in a
/// cancelable wait.
///
/// Holding the wait surface mutably for the whole call keeps a caller to one call in flight.
pub struct AsyncCall<'a, W: WaitSurface + ?Sized> {
    store: Arc<dyn RemoteStore>,
    allowed: Vec<OpKind>,
    surface: &'a mut W,
}

impl<'a, W: WaitSurface + ?Sized> AsyncCall<'a, W> {
    pub fn new(store: Arc<dyn RemoteStore>, surface: &'a mut W) -> Self {
        Self {
            store,
            allowed: OpKind::ALL.to_vec(),
            surface,
        }
    }

    /// Restrict the operations this runner accepts.
    pub fn with_allowed(mut self, allowed: &[OpKind]) -> Self {
        self.allowed = allowed.to_vec();
        self
    }

    fn check(&self, op: &RemoteOp) -> Result<(), CallError> {
        let kind = op.kind();
        if op.sheet_id().trim().is_empty() {
            return Err(CallError::InvalidOperation(kind));
        }
        if !self.allowed.contains(&kind) {
            let allowed = self
                .allowed
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(CallError::NotAllowed { op: kind, allowed });
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl<W: WaitSurface + ?Sized> RemoteCall for AsyncCall<'_, W> {
    async fn call(&mut self, op: RemoteOp) -> Result<CallOutcome, CallError> {
        self.check(&op)?;

        let kind = op.kind();
        let store = Arc::clone(&self.store);
        let (finished_tx, finished_rx) = oneshot::channel();

        tracing::debug!(op = %kind, "dispatching remote call");
        tokio::spawn(async move {
            let result = op.dispatch(store.as_ref()).await.map_err(|e| e.to_string());
            if finished_tx.send(result).is_err() {
                tracing::debug!(op = %kind, "remote call finished after cancellation, result dropped");
            }
        });

        let finished = tokio::select! {
            biased;
            finished = finished_rx => Some(finished),
            _ = self.surface.stopped() => None,
        };

        let outcome = match finished {
            None => {
                tracing::info!(op = %kind, "remote call canceled by user");
                CallOutcome::Canceled
            }
            Some(Ok(Ok(reply))) => {
                tracing::debug!(op = %kind, "remote call succeeded");
                CallOutcome::Success(reply)
            }
            Some(Ok(Err(message))) => {
                tracing::warn!(op = %kind, error = %message, "remote call failed");
                self.surface.notify_error(&message).await;
                CallOutcome::Error
            }
            Some(Err(_)) => {
                let message = format!("{} ended without a result", kind);
                tracing::error!(op = %kind, "remote call task panicked");
                self.surface.notify_error(&message).await;
                CallOutcome::Error
            }
        };

        Ok(outcome)
    }
}
