use super::widgets::{field_block, key_hints, select_field, text_field};
use super::*;
use crate::app::{EntryTab, TimerField};
use crate::presenter::TimerView;
use ratatui::widgets::Tabs;

pub fn render_timer_view(frame: &mut Frame, view: &TimerView, status: Option<&str>, body: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Category
            Constraint::Length(3), // Semester
            Constraint::Length(3), // Timer / Manual tabs
            Constraint::Length(3), // Tab body
            Constraint::Min(0),
            Constraint::Length(3), // Status
            Constraint::Length(4), // Controls
        ])
        .split(body);

    let form = &view.form;
    frame.render_widget(
        select_field("Category", &form.categories, form.focus == TimerField::Category),
        chunks[0],
    );
    frame.render_widget(
        select_field("Semester", &form.semesters, form.focus == TimerField::Semester),
        chunks[1],
    );
    render_tabs(frame, chunks[2], form.tab);
    match form.tab {
        EntryTab::Timer => render_timer(frame, chunks[3], view),
        EntryTab::Manual => render_manual(frame, chunks[3], view),
    }
    render_status(frame, chunks[5], view, status);
    render_controls(frame, chunks[6], form.tab);
}

fn render_tabs(frame: &mut Frame, area: Rect, tab: EntryTab) {
    let tabs = Tabs::new(vec!["Timer", "Manual"])
        .select(tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL).title(" Entry "));
    frame.render_widget(tabs, area);
}

fn render_timer(frame: &mut Frame, area: Rect, view: &TimerView) {
    let is_running = view.is_running();
    let border_style = if is_running {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let timer_text = if is_running {
        format!("{} ⏵ (running)", view.form.duration)
    } else {
        format!("{} (paused)", view.form.duration)
    };

    let timer = Paragraph::new(timer_text)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Timer ")
                .border_style(border_style)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(timer, area);
}

fn render_manual(frame: &mut Frame, area: Rect, view: &TimerView) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let form = &view.form;
    let fields = [
        ("Hours", &form.hours, TimerField::Hours),
        ("Minutes", &form.minutes, TimerField::Minutes),
        ("Seconds", &form.seconds, TimerField::Seconds),
    ];
    for ((title, input, field), col) in fields.into_iter().zip(cols.iter()) {
        frame.render_widget(
            text_field(title, input.as_str().to_string(), form.focus == field),
            *col,
        );
    }
}

fn render_status(frame: &mut Frame, area: Rect, view: &TimerView, status: Option<&str>) {
    let contextual = format!(
        "{} · {}",
        view.model.name().unwrap_or("?"),
        view.model.journal()
    );
    let text = status.unwrap_or(&contextual);

    let status = Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .block(field_block("Status", false));
    frame.render_widget(status, area);
}

fn render_controls(frame: &mut Frame, area: Rect, tab: EntryTab) {
    let line1 = match tab {
        EntryTab::Timer => key_hints(&[
            ("Space", "Start/Pause"),
            ("R", "Reset"),
            ("Ctrl+S", "Submit"),
        ]),
        EntryTab::Manual => key_hints(&[("0-9", "Type"), ("Backspace", "Erase"), ("Ctrl+S", "Submit")]),
    };
    let line2 = key_hints(&[
        ("Tab", "Next field"),
        ("↑↓", "Choose"),
        ("M", "Timer/Manual"),
        ("Q", "Quit"),
    ]);

    let controls = Paragraph::new(vec![line1, line2])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(vec![Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                )]))
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(controls, area);
}
