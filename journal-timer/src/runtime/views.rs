use crate::app::{App, Screen};
use crossterm::event::KeyEvent;

use super::action_queue::{Action, ActionTx};

mod login;
mod overlay;
mod timer;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.overlay.is_some() {
        overlay::handle_overlay_key(key, app);
        return;
    }
    match &app.screen {
        Screen::Login(_) => login::handle_login_key(key, app, action_tx),
        Screen::Timer(_) => timer::handle_timer_key(key, app, action_tx),
    }
}
