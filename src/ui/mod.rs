//! User interface components.
//!
//! Provides TUI widgets and drawing functions for the application's
//! terminal-based user interface using ratatui.

mod browse;
mod signup_form;

pub use browse::draw_browse;
pub use signup_form::draw_signup_form;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, AppMode, Notice, NoticeKind};

/// Render the full application UI to the terminal frame.
#[allow(clippy::cast_possible_truncation)]
pub fn draw(f: &mut Frame, app: &mut App) {
    // Create the base layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3), // Command/status bar at bottom
        ])
        .split(f.size());

    // Draw the main content based on current mode
    match app.mode {
        AppMode::Splash => draw_splash(f, app, chunks[0]),
        AppMode::Browse => draw_browse(f, app, chunks[0]),
        AppMode::Signup => {
            // The form floats above the roster
            draw_browse(f, app, chunks[0]);
            draw_signup_form(f, app, chunks[0]);
        }
    }

    // Draw loading indicator if needed
    if app.is_loading {
        draw_loading_indicator(f);
    }

    // Draw help modal if shown
    if app.show_help {
        draw_help_modal(f, app);
    }

    // Draw command/status bar at the bottom (except in splash screen)
    if app.mode == AppMode::Splash {
        // Draw a simple press any key message
        let msg = "Press any key to continue...";

        // Make sure the area is large enough for the message
        if chunks[1].width >= msg.len() as u16 && chunks[1].height >= 3 {
            let width = msg.len() as u16;
            let x = (chunks[1].width.saturating_sub(width)) / 2;
            let y = chunks[1].top() + 1;

            let text_area = Rect {
                x: chunks[1].left() + x,
                y,
                width,
                height: 1,
            };

            let style = Style::default().fg(Color::Yellow);
            f.render_widget(Paragraph::new(msg).style(style), text_area);
        }
    } else {
        draw_command_bar(f, app, chunks[1]);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn draw_command_bar(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.is_global_command_mode {
        "Command"
    } else if app.filter_active {
        "Filter Activities"
    } else if app.pending_removal.is_some() {
        "Confirm"
    } else {
        "Commands/Status"
    };

    let border_color = if app.filter_active {
        Color::Cyan
    } else if app.pending_removal.is_some() {
        Color::Red
    } else {
        Color::Yellow
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(title, Style::default().fg(border_color)));

    f.render_widget(block, area);

    // Calculate the inner area to render text with more padding
    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1) // Add a margin of 1 to account for the border
        .split(area)[0];

    if app.is_global_command_mode {
        // Show command input with more left padding
        let command = Paragraph::new(format!(" :{}", app.global_command_buffer))
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(command, inner_area);
        f.set_cursor(
            inner_area.left() + app.global_command_buffer.len() as u16 + 2,
            inner_area.top(),
        );
    } else if app.filter_active {
        // Show roster filter input
        let filter = Paragraph::new(format!(" /{}", app.filter_query))
            .style(Style::default().fg(Color::Cyan));
        f.render_widget(filter, inner_area);
        f.set_cursor(
            inner_area.left() + app.filter_query.len() as u16 + 2,
            inner_area.top(),
        );
    } else if let Some(pending) = &app.pending_removal {
        let prompt = Paragraph::new(format!(
            " Remove {} from {}? (y/n)",
            pending.email, pending.activity
        ))
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
        f.render_widget(prompt, inner_area);
    } else if let Some(notice) = &app.notice {
        draw_notice(f, notice, inner_area);
    } else {
        // Show context-sensitive help/status with more left padding
        let mut help_text = match app.mode {
            AppMode::Splash => vec![], // No help text for splash screen
            AppMode::Browse => create_help_text(&[
                ("↑/↓", "Navigate"),
                ("Tab", "Participants"),
                ("Enter/s", "Sign up"),
                ("d", "Remove"),
                ("/", "Filter"),
                ("r", "Refresh"),
                (":q", "Quit"),
            ]),
            AppMode::Signup => create_help_text(&[
                ("Enter", "Submit"),
                ("Tab/↑/↓", "Activity"),
                ("Esc", "Back"),
            ]),
        };

        if let Some(refreshed) = &app.last_refreshed {
            help_text.push(Span::styled(
                format!(" | refreshed {}", refreshed.format("%H:%M:%S")),
                Style::default().fg(Color::Gray),
            ));
        }

        let status_bar = Paragraph::new(Line::from(help_text)).style(Style::default().fg(Color::Gray));

        f.render_widget(status_bar, inner_area);
    }
}

/// Render a transient notice inside the command bar.
fn draw_notice(f: &mut Frame, notice: &Notice, area: Rect) {
    let (color, symbol) = match notice.kind {
        NoticeKind::Success => (Color::Green, "✔"),
        NoticeKind::Error => (Color::Red, "✘"),
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", symbol),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(notice.text.as_str(), Style::default().fg(color)),
        Span::styled("  (Esc to dismiss)", Style::default().fg(Color::DarkGray)),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

/// Build styled help text spans from key-description pairs for the command bar.
pub fn create_help_text<'a>(commands: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut text = vec![Span::raw(" ")]; // Start with padding

    for (i, (key, description)) in commands.iter().enumerate() {
        // Add the key with bold styling
        text.push(Span::styled(
            *key,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));

        // Add the description
        text.push(Span::raw(format!(": {description}")));

        // Add separator unless it's the last item
        if i < commands.len() - 1 {
            text.push(Span::raw(" | "));
        }
    }

    text
}

/// Create a bordered block with a title, highlighted when focused.
pub fn create_titled_block(title: &str, is_focused: bool) -> Block<'_> {
    let title_style = if is_focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let border_style = if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

#[allow(clippy::cast_possible_truncation)]
fn draw_splash(f: &mut Frame, _app: &App, area: Rect) {
    // Define ASCII art logo for the app
    let logo = vec![
        r" ____          _   _    ____         _   _  ",
        r"|  _ \   ___  | | | |  / ___|  __ _ | | | | ",
        r"| |_) | / _ \ | | | | | |     / _` || | | | ",
        r"|  _ < | (_) || | | | | |___ | (_| || | | | ",
        r"|_| \_\ \___/ |_| |_|  \____| \__,_||_| |_| ",
        r"                                            ",
        r" School activity signups from your terminal ",
        r"                                            ",
    ];

    // Use block to create a nice border around the splash
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::LightBlue))
        .title(Span::styled(
            "Rollcall",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));

    f.render_widget(block, area);

    // Calculate center position (accounting for border)
    let logo_height = logo.len() as u16;
    let logo_width = logo[0].len() as u16;

    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1) // Add a margin to account for the border
        .split(area)[0];

    let vertical_pad = (inner_area.height.saturating_sub(logo_height)) / 2;
    let horizontal_pad = (inner_area.width.saturating_sub(logo_width)) / 2;

    // Render each line of the logo
    for (i, line) in logo.iter().enumerate() {
        let y = inner_area.top() + vertical_pad + i as u16;
        if y >= inner_area.bottom() {
            break;
        }

        let text_area = Rect {
            x: inner_area.left() + horizontal_pad,
            y,
            width: (line.len() as u16).min(inner_area.width),
            height: 1,
        };

        let style = if i < 5 {
            // Logo itself is light blue
            Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD)
        } else {
            // Tagline is yellow
            Style::default().fg(Color::Yellow)
        };

        f.render_widget(Paragraph::new(*line).style(style), text_area);
    }

    // Add version info at the bottom
    let version_text = concat!("v", env!("CARGO_PKG_VERSION"));

    // Make sure the area is large enough to display the version
    if area.width > (version_text.len() + 2) as u16 && area.height >= 2 {
        let version_area = Rect {
            x: area.right() - version_text.len() as u16 - 2,
            y: area.bottom() - 2,
            width: version_text.len() as u16,
            height: 1,
        };

        f.render_widget(
            Paragraph::new(version_text).style(Style::default().fg(Color::Gray)),
            version_area,
        );
    }
}

// Draw a loading indicator overlay
fn draw_loading_indicator(f: &mut Frame) {
    let size = f.size();

    // Create a smaller centered box for the loading indicator
    let width = 22;
    let height = 3;

    let area = Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    // Create a block with a border
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    // Create loading text
    let text = Paragraph::new("Loading...")
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);

    f.render_widget(Clear, area); // Clear the area first
    f.render_widget(block, area);

    // Adjust area for inner text
    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1) // Add a margin for the border
        .split(area)[0];

    f.render_widget(text, inner_area);
}

// Draw the help modal with keybindings
fn draw_help_modal(f: &mut Frame, app: &App) {
    let size = f.size();

    // Calculate modal dimensions
    let width = 60.min(size.width.saturating_sub(4));
    let height = 20.min(size.height.saturating_sub(4));

    let area = Rect {
        x: (size.width.saturating_sub(width)) / 2,
        y: (size.height.saturating_sub(height)) / 2,
        width,
        height,
    };

    // Create the modal block
    let block = Block::default()
        .title(Span::styled(
            " Help - Keybindings ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(block, area);

    // Inner area for content
    let inner_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1)])
        .margin(1)
        .split(area)[0];

    // Build help content based on current mode
    let help_lines = build_help_content(app);

    let help_text: Vec<Line> = help_lines
        .iter()
        .map(|(key, desc, is_header)| {
            if *is_header {
                Line::from(vec![Span::styled(
                    *key,
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )])
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{key:>12}"),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(*desc, Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let paragraph = Paragraph::new(help_text).wrap(Wrap { trim: true });

    f.render_widget(paragraph, inner_area);
}

// Build help content based on current mode
fn build_help_content(app: &App) -> Vec<(&'static str, &'static str, bool)> {
    let mut lines = vec![
        ("── Global ──", "", true),
        ("F1 / ?", "Show this help", false),
        (":", "Enter command mode", false),
        (":q / :quit", "Quit application", false),
        (":reload", "Reload the roster", false),
        (":signup", "Open the signup form", false),
        ("Esc", "Go back / dismiss notice", false),
        ("", "", false),
    ];

    match app.mode {
        AppMode::Browse => {
            lines.extend([
                ("── Activities ──", "", true),
                ("↑/↓ or j/k", "Navigate", false),
                ("Tab / →", "Focus participants", false),
                ("←/h", "Back to activities", false),
                ("Enter / s", "Sign up for activity", false),
                ("d / Del", "Remove participant", false),
                ("/", "Filter activities", false),
                ("r", "Refresh roster", false),
            ]);
        }
        AppMode::Signup => {
            lines.extend([
                ("── Signup ──", "", true),
                ("Tab / ↑/↓", "Choose activity", false),
                ("Type", "Edit email", false),
                ("Enter", "Submit signup", false),
                ("Esc", "Back to activities", false),
            ]);
        }
        AppMode::Splash => {
            lines.extend([("── Splash ──", "", true), ("Any key", "Continue to app", false)]);
        }
    }

    // Add dismiss hint at the end
    lines.push(("", "", false));
    lines.push(("Press Esc, F1 or ? to close", "", true));

    lines
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::activities::Activity;
    use crate::app::AppUpdate;
    use crate::config::Config;
    use crate::types::ActivityName;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn loaded_app() -> App {
        let mut app = App::with_config(Config::default());
        let activities = vec![Activity {
            name: ActivityName::new("Chess Club"),
            description: "Learn strategies and compete in tournaments".to_string(),
            schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
            max_participants: 12,
            participants: vec![
                "michael@mergington.edu".to_string(),
                "daniel@mergington.edu".to_string(),
            ],
        }];
        app.async_task_tx
            .try_send(AppUpdate::ActivitiesLoaded(Ok(activities)))
            .unwrap();
        app.handle_updates();
        app.mode = AppMode::Browse;
        app
    }

    #[test]
    fn browse_view_renders_roster_with_availability() {
        let mut app = loaded_app();

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Chess Club"));
        assert!(text.contains("10 spots left"));
        assert!(text.contains("michael@mergington.edu"));
    }

    #[test]
    fn load_failure_renders_the_standing_error_line() {
        let mut app = loaded_app();
        app.async_task_tx
            .try_send(AppUpdate::ActivitiesLoaded(Err(
                crate::error::Error::Network("boom".to_string()),
            )))
            .unwrap();
        app.handle_updates();

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        // The list pane wraps the long placeholder, so match it in fragments
        assert!(text.contains("Failed to load activities."));
        assert!(text.contains("later."));
    }

    #[test]
    fn signup_view_renders_the_draft_form() {
        let mut app = loaded_app();
        app.mode = AppMode::Signup;
        app.form.activity = Some(ActivityName::new("Chess Club"));
        app.form.email = "emma@mergington.edu".to_string();

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Sign Up"));
        assert!(text.contains("emma@mergington.edu"));
    }

    #[test]
    fn empty_roster_shows_the_placeholder() {
        let mut app = App::with_config(Config::default());
        app.mode = AppMode::Browse;

        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("No activities yet."));
        assert!(text.contains("No participants yet."));
    }
}
