use crate::app::{App, Overlay, Screen};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

mod login_view;
pub(crate) mod overlays;
mod timer_view;
pub(super) mod utils;
pub(super) mod widgets;

pub fn render(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(frame.area());

    render_title(frame, root[0], app);

    let body = root[1];
    match &app.screen {
        Screen::Login(view) => login_view::render_login_view(frame, view, body),
        Screen::Timer(view) => {
            timer_view::render_timer_view(frame, view, app.status_message.as_deref(), body)
        }
    }

    match &app.overlay {
        Some(Overlay::Notice(notice)) => overlays::render_notice(frame, notice),
        Some(Overlay::ConfirmReset) => overlays::render_confirm_reset(frame),
        None => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        " Journal Timer",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )];
    if let Some(view) = app.timer_view() {
        spans.push(Span::styled(
            format!("  {}", view.model.journal()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
