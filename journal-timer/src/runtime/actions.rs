use std::io;
use std::sync::Arc;

use anyhow::Result;
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::timer::SubmitOutcome;
use crate::app::{App, Notice};
use crate::remote::{AsyncCall, CallError, CallStatus, OpKind, RemoteCall, RemoteStore};
use crate::ui;

use super::action_queue::Action;
use super::wait::TerminalWait;

const LOGIN_OPS: &[OpKind] = &[OpKind::FetchNames];
const TIMER_OPS: &[OpKind] = &[OpKind::FetchCategories, OpKind::AppendTime];

pub(super) async fn run_action(
    action: Action,
    app: &mut App,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    store: &Arc<dyn RemoteStore>,
) -> Result<()> {
    let backdrop = terminal.draw(|f| ui::render(f, app))?.buffer.clone();
    let mut wait = TerminalWait::new(terminal, backdrop);
    let caller = AsyncCall::new(Arc::clone(store), &mut wait);

    match action {
        Action::SelectJournal { index } => {
            let mut caller = caller.with_allowed(LOGIN_OPS);
            handle_select_journal(app, index, &mut caller).await?;
        }
        Action::LoadCategories => {
            let mut caller = caller.with_allowed(TIMER_OPS);
            handle_load_categories(app, &mut caller).await?;
        }
        Action::Submit { was_running } => {
            let mut caller = caller.with_allowed(TIMER_OPS);
            handle_submit(app, was_running, &mut caller).await?;
        }
    }
    Ok(())
}

pub(super) async fn handle_select_journal<C: RemoteCall + ?Sized>(
    app: &mut App,
    index: usize,
    caller: &mut C,
) -> Result<(), CallError> {
    if let Some(view) = app.login_view_mut() {
        view.set_journal_index(index, caller).await?;
    }
    Ok(())
}

pub(super) async fn handle_load_categories<C: RemoteCall + ?Sized>(
    app: &mut App,
    caller: &mut C,
) -> Result<(), CallError> {
    if let Some(view) = app.timer_view_mut() {
        view.sync(caller).await?;
        if view.form.categories.is_empty() {
            app.set_status("Categories could not be loaded");
        }
    }
    Ok(())
}

/// The timer was paused before this was queued; `was_running` says whether to resume it.
pub(super) async fn handle_submit<C: RemoteCall + ?Sized>(
    app: &mut App,
    was_running: bool,
    caller: &mut C,
) -> Result<(), CallError> {
    let Some(view) = app.timer_view_mut() else {
        return Ok(());
    };

    let outcome = view.submit(caller).await?;
    tracing::debug!(
        status = ?outcome.status(),
        rejected = ?outcome.error(),
        written = outcome.is_written(),
        "submit handled"
    );
    match outcome {
        SubmitOutcome::Rejected(rejection) => {
            app.notify(Notice::error("Error", rejection.to_string()));
            if was_running {
                app.start_timer();
            }
        }
        SubmitOutcome::Called(CallStatus::Success) => {
            view.reset_timer();
            view.set_manual_hours("0");
            view.set_manual_minutes("0");
            view.set_manual_seconds("0");
            app.notify(Notice::info("Success", "Updated!"));
            app.set_status("Time submitted");
        }
        SubmitOutcome::Called(CallStatus::Canceled) => {
            app.set_status("Submission canceled, timer paused");
        }
        SubmitOutcome::Called(CallStatus::Error) => {
            app.set_status("Submission failed, timer paused");
        }
    }
    Ok(())
}
