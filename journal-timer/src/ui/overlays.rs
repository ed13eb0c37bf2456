use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};
use throbber_widgets_tui::{Throbber, ThrobberState, WhichUse, BRAILLE_SIX};

use super::utils::centered_rect;
use super::widgets::key_hints;
use crate::app::{Notice, NoticeKind};

pub const PROGRESS_LABEL: &str = "Talking to Google...";
pub const RESET_QUESTION: &str = "Are you sure you want to reset your time?";

pub fn render_progress(frame: &mut Frame, throbber_state: &mut ThrobberState) {
    let area = centered_rect(40, 6, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Please wait ")
        .border_style(Style::default().fg(Color::Yellow))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let throbber = Throbber::default()
        .label(PROGRESS_LABEL)
        .style(Style::default().fg(Color::White))
        .throbber_style(Style::default().fg(Color::Yellow))
        .throbber_set(BRAILLE_SIX)
        .use_type(WhichUse::Spin);
    frame.render_stateful_widget(throbber, rows[1], throbber_state);

    frame.render_widget(
        Paragraph::new(key_hints(&[("Esc / S", "Stop")])).alignment(Alignment::Right),
        rows[3],
    );
}

pub fn render_notice(frame: &mut Frame, notice: &Notice) {
    let area = centered_rect(50, 7, frame.area());
    frame.render_widget(Clear, area);

    let color = match notice.kind {
        NoticeKind::Info => Color::Green,
        NoticeKind::Error => Color::Red,
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            notice.message.as_str(),
            Style::default().fg(color),
        )),
        Line::from(""),
        key_hints(&[("Enter", "OK")]),
    ];

    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", notice.title))
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(dialog, area);
}

pub fn render_confirm_reset(frame: &mut Frame) {
    let area = centered_rect(50, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(RESET_QUESTION),
        Line::from(""),
        key_hints(&[("Y", "Yes"), ("N", "No")]),
    ];

    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Confirm Reset ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(dialog, area);
}
