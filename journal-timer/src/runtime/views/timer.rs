use crate::app::{App, Overlay, TimerField};
use crate::presenter::ManualField;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_timer_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        // Ctrl+S: pause, then submit whichever tab is showing
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let was_running = app.timer_view().is_some_and(|view| view.is_running());
            if was_running {
                app.pause_timer();
            }
            enqueue_action(action_tx, Action::Submit { was_running });
        }
        KeyCode::Char(' ') => {
            let start_enabled = app.timer_view().is_some_and(|view| view.form.start_enabled);
            if start_enabled {
                app.start_timer();
            } else {
                app.pause_timer();
            }
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.overlay = Some(Overlay::ConfirmReset);
        }
        KeyCode::Char('m') | KeyCode::Char('M') => {
            if let Some(view) = app.timer_view_mut() {
                view.toggle_tab();
            }
        }
        KeyCode::Tab => {
            if let Some(view) = app.timer_view_mut() {
                view.form.focus = view.form.focus.next(view.form.tab);
            }
        }
        KeyCode::BackTab => {
            if let Some(view) = app.timer_view_mut() {
                view.form.focus = view.form.focus.previous(view.form.tab);
            }
        }
        KeyCode::Down | KeyCode::Up => select_in_focused_list(app, key.code == KeyCode::Down),
        KeyCode::Char(c) if c.is_ascii_digit() => edit_manual_field(app, Some(c)),
        KeyCode::Backspace => edit_manual_field(app, None),
        _ => {}
    }
}

fn select_in_focused_list(app: &mut App, down: bool) {
    let Some(view) = app.timer_view_mut() else {
        return;
    };
    let list = match view.form.focus {
        TimerField::Category => &view.form.categories,
        TimerField::Semester => &view.form.semesters,
        _ => return,
    };
    if list.is_empty() {
        return;
    }
    let index = if down {
        list.next_index()
    } else {
        list.previous_index()
    };
    match view.form.focus {
        TimerField::Category => view.set_category_index(index),
        _ => view.set_semester_index(index),
    }
}

/// Append a digit to, or drop the last character of, the focused manual field.
fn edit_manual_field(app: &mut App, digit: Option<char>) {
    let Some(view) = app.timer_view_mut() else {
        return;
    };
    let Some(field) = ManualField::for_focus(view.form.focus) else {
        return;
    };
    let mut text = view.manual_input(field).as_str().to_string();
    match digit {
        Some(c) => text.push(c),
        None => {
            text.pop();
        }
    }
    if !view.set_manual(field, &text) {
        tracing::debug!(?field, "manual entry refused");
    }
}
