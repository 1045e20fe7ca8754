//! Signup form overlay.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::ui::create_help_text;

/// Draw the signup form as a centered overlay above the roster.
#[allow(clippy::cast_possible_truncation)]
pub fn draw_signup_form(f: &mut Frame, app: &App, area: Rect) {
    let width = 56.min(area.width.saturating_sub(4));
    let height = 9.min(area.height.saturating_sub(2));

    let modal = Rect {
        x: area.left() + (area.width.saturating_sub(width)) / 2,
        y: area.top() + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    let block = Block::default()
        .title(Span::styled(
            " Sign Up ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, modal);
    f.render_widget(block, modal);

    let inner = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1), // Activity selector
            Constraint::Length(1),
            Constraint::Length(1), // Email input
            Constraint::Min(1),
            Constraint::Length(1), // Key hints
        ])
        .margin(1)
        .split(modal);

    let activity_label = app
        .form
        .activity
        .as_ref()
        .map_or("(choose with Tab)", |name| name.as_str());

    let activity_line = Line::from(vec![
        Span::styled(" Activity: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(activity_label, Style::default().fg(Color::Yellow)),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(activity_line), inner[1]);

    let email_line = Line::from(vec![
        Span::styled(" Email:    ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(app.form.email.clone(), Style::default().fg(Color::White)),
    ]);
    f.render_widget(Paragraph::new(email_line), inner[3]);

    // Put the cursor at the end of the email input
    let cursor_x = inner[3].left() + 11 + app.form.email.width() as u16;
    if cursor_x < modal.right() {
        f.set_cursor(cursor_x, inner[3].top());
    }

    let hints = create_help_text(&[("Enter", "Submit"), ("Tab/↑/↓", "Activity"), ("Esc", "Back")]);
    f.render_widget(
        Paragraph::new(Line::from(hints)).style(Style::default().fg(Color::Gray)),
        inner[5],
    );
}
