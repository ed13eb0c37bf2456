use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::presenter::SelectList;

pub fn field_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title))
        .border_style(border_style)
        .padding(Padding::horizontal(1))
}

/// One-line combo box: the current item between arrows while focused.
pub fn select_field<'a>(title: &'a str, list: &'a SelectList, focused: bool) -> Paragraph<'a> {
    let current = list
        .items()
        .get(list.current_index())
        .map(String::as_str)
        .unwrap_or_default();

    let line = if list.is_empty() {
        Line::from(Span::styled(
            "(nothing to choose)",
            Style::default().fg(Color::DarkGray),
        ))
    } else if current.is_empty() {
        choice_line("(none)", Style::default().fg(Color::DarkGray), focused)
    } else {
        choice_line(current, Style::default().fg(Color::White), focused)
    };

    Paragraph::new(line).block(field_block(title, focused))
}

fn choice_line(text: &str, style: Style, focused: bool) -> Line<'_> {
    if !focused {
        return Line::from(Span::styled(text, style));
    }
    let arrows = Style::default().fg(Color::Yellow);
    Line::from(vec![
        Span::styled("↑ ", arrows),
        Span::styled(text, style.add_modifier(Modifier::BOLD)),
        Span::styled(" ↓", arrows),
    ])
}

/// Single-line input. `shown` is what to draw, which may differ from the value (masked pins).
pub fn text_field<'a>(title: &'a str, shown: String, focused: bool) -> Paragraph<'a> {
    let mut spans = vec![Span::styled(shown, Style::default().fg(Color::White))];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }
    Paragraph::new(Line::from(spans)).block(field_block(title, focused))
}

/// `Key: label` pairs for a controls bar.
pub fn key_hints<'a>(hints: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(format!(": {}  ", label)));
    }
    Line::from(spans)
}
