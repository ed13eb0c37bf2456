use super::utils::centered_rect;
use super::widgets::{key_hints, select_field, text_field};
use super::*;
use crate::app::session::SessionState;
use crate::app::LoginField;
use crate::presenter::LoginView;

pub fn render_login_view(frame: &mut Frame, view: &LoginView, body: Rect) {
    let area = centered_rect(50, 17, body);

    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" Login ")
        .padding(Padding::uniform(1));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Journal
            Constraint::Length(3), // Name
            Constraint::Length(3), // Pin
            Constraint::Length(1), // Hint
            Constraint::Min(0),
            Constraint::Length(2), // Controls
        ])
        .split(inner);

    let form = &view.form;
    frame.render_widget(
        select_field("Journal", &form.journals, form.focus == LoginField::Journal),
        chunks[0],
    );
    frame.render_widget(
        select_field("Name", &form.names, form.focus == LoginField::Name),
        chunks[1],
    );
    frame.render_widget(
        text_field(
            "Pin",
            "•".repeat(form.pin.len()),
            form.focus == LoginField::Pin,
        ),
        chunks[2],
    );

    let hint = match view.model.state() {
        SessionState::Unauthenticated => "Choose your journal",
        SessionState::NamesLoaded => "Choose your name and enter your pin",
        SessionState::Authenticated => "Logged in",
    };
    frame.render_widget(
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow)),
        chunks[3],
    );

    let controls = Paragraph::new(vec![
        key_hints(&[("Tab", "Next field"), ("↑↓", "Choose")]),
        key_hints(&[("Enter", "Login"), ("Esc", "Quit")]),
    ])
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(controls, chunks[5]);
}
