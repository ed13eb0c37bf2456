use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Work that needs the remote store, queued by key handlers and run between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Action {
    SelectJournal { index: usize },
    LoadCategories,
    Submit { was_running: bool },
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
