use crate::app::{App, LoginField, Notice};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_login_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(view) = app.login_view_mut() else {
        return;
    };

    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Tab => view.form.focus = view.form.focus.next(),
        KeyCode::BackTab => view.form.focus = view.form.focus.previous(),
        KeyCode::Down | KeyCode::Up => {
            let down = key.code == KeyCode::Down;
            match view.form.focus {
                LoginField::Journal => {
                    let journals = &view.form.journals;
                    let index = if down {
                        journals.next_index()
                    } else {
                        journals.previous_index()
                    };
                    enqueue_action(action_tx, Action::SelectJournal { index });
                }
                LoginField::Name if !view.form.names.is_empty() => {
                    let names = &view.form.names;
                    let index = if down {
                        names.next_index()
                    } else {
                        names.previous_index()
                    };
                    view.set_name_index(index);
                }
                _ => {}
            }
        }
        KeyCode::Char(c) if view.form.focus == LoginField::Pin => view.push_pin_char(c),
        KeyCode::Backspace if view.form.focus == LoginField::Pin => view.pop_pin_char(),
        KeyCode::Enter => match view.login() {
            Some(session) => {
                app.enter_timer(session);
                enqueue_action(action_tx, Action::LoadCategories);
            }
            None => app.notify(Notice::error("Failed", "Incorrect Pin")),
        },
        _ => {}
    }
}
