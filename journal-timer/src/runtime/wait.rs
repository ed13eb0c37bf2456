use std::io;
use std::time::Duration;

use async_trait::async_trait;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{backend::CrosstermBackend, buffer::Buffer, Frame, Terminal};
use throbber_widgets_tui::ThrobberState;

use crate::app::Notice;
use crate::remote::WaitSurface;
use crate::ui::overlays;

const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Draws the wait overlays above a snapshot of the screen taken when the call began.
pub(super) struct TerminalWait<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>,
    backdrop: Buffer,
    throbber_state: ThrobberState,
}

impl<'a> TerminalWait<'a> {
    pub fn new(terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>, backdrop: Buffer) -> Self {
        Self {
            terminal,
            backdrop,
            throbber_state: ThrobberState::default(),
        }
    }

    fn draw(&mut self, overlay: impl FnOnce(&mut Frame, &mut ThrobberState)) -> io::Result<()> {
        let backdrop = &self.backdrop;
        let throbber_state = &mut self.throbber_state;
        self.terminal.draw(|frame| {
            paint_backdrop(frame, backdrop);
            overlay(frame, throbber_state);
        })?;
        Ok(())
    }
}

#[async_trait(?Send)]
impl WaitSurface for TerminalWait<'_> {
    async fn stopped(&mut self) {
        loop {
            self.throbber_state.calc_next();
            if let Err(e) = self.draw(overlays::render_progress) {
                tracing::warn!(error = %e, "failed to draw progress overlay");
            }
            match next_key() {
                Ok(Some(key)) if is_stop_key(&key) => return,
                Ok(_) => {}
                Err(e) => {
                    // Without input there is no way to stop; let the call finish on its own.
                    tracing::warn!(error = %e, "failed to read terminal input");
                    std::future::pending::<()>().await;
                }
            }
            tokio::time::sleep(FRAME_INTERVAL).await;
        }
    }

    async fn notify_error(&mut self, message: &str) {
        let notice = Notice::error("Error", message);
        loop {
            if let Err(e) = self.draw(|frame, _| overlays::render_notice(frame, &notice)) {
                tracing::warn!(error = %e, "failed to draw error notice");
                return;
            }
            match next_key() {
                Ok(Some(key)) if is_dismiss_key(&key) => return,
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read terminal input");
                    return;
                }
            }
            tokio::time::sleep(FRAME_INTERVAL).await;
        }
    }
}

fn paint_backdrop(frame: &mut Frame, backdrop: &Buffer) {
    let area = frame.area().intersection(backdrop.area);
    let buffer = frame.buffer_mut();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let (Some(src), Some(dst)) = (backdrop.cell((x, y)), buffer.cell_mut((x, y))) {
                *dst = src.clone();
            }
        }
    }
}

fn next_key() -> io::Result<Option<KeyEvent>> {
    if !event::poll(Duration::ZERO)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) => Ok(Some(key)),
        _ => Ok(None),
    }
}

fn is_stop_key(key: &KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('S')
    )
}

fn is_dismiss_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Esc)
}
