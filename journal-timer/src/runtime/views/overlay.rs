use crate::app::{App, Overlay};
use crossterm::event::{KeyCode, KeyEvent};

pub(super) fn handle_overlay_key(key: KeyEvent, app: &mut App) {
    match app.overlay {
        Some(Overlay::Notice(_)) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                app.dismiss_overlay();
            }
        }
        Some(Overlay::ConfirmReset) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.dismiss_overlay();
                app.pause_timer();
                if let Some(view) = app.timer_view_mut() {
                    view.reset_timer();
                }
                app.set_status("Timer reset");
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.dismiss_overlay(),
            _ => {}
        },
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::app::Notice;

    #[test]
    fn confirming_reset_pauses_and_zeroes() {
        let mut app = timer_app();
        app.start_timer();
        app.timer_view_mut().unwrap().increment_duration(75);
        app.overlay = Some(Overlay::ConfirmReset);

        handle_overlay_key(key(KeyCode::Char('y')), &mut app);

        let view = app.timer_view().unwrap();
        assert!(!view.is_running());
        assert!(view.form.start_enabled);
        assert_eq!(view.form.duration, "00:00:00");
        assert!(app.overlay.is_none());
    }

    #[test]
    fn declining_reset_keeps_time_running() {
        let mut app = timer_app();
        app.start_timer();
        app.timer_view_mut().unwrap().increment_duration(75);
        app.overlay = Some(Overlay::ConfirmReset);

        handle_overlay_key(key(KeyCode::Esc), &mut app);

        let view = app.timer_view().unwrap();
        assert!(view.is_running());
        assert_eq!(view.form.duration, "00:01:15");
        assert!(app.overlay.is_none());
    }

    #[test]
    fn notice_closes_on_enter_or_esc_only() {
        let mut app = timer_app();
        let notice = Overlay::Notice(Notice::error("Error", "Category not chosen"));
        app.overlay = Some(notice.clone());

        handle_overlay_key(key(KeyCode::Char(' ')), &mut app);
        handle_overlay_key(key(KeyCode::Char('q')), &mut app);
        assert_eq!(app.overlay, Some(notice.clone()));

        handle_overlay_key(key(KeyCode::Esc), &mut app);
        assert!(app.overlay.is_none());

        app.overlay = Some(notice);
        handle_overlay_key(key(KeyCode::Enter), &mut app);
        assert!(app.overlay.is_none());
    }

    #[test]
    fn other_keys_do_not_dismiss_confirmation() {
        let mut app = timer_app();
        app.overlay = Some(Overlay::ConfirmReset);
        handle_overlay_key(key(KeyCode::Char('x')), &mut app);
        assert_eq!(app.overlay, Some(Overlay::ConfirmReset));
    }
}
