//! Activity roster browser.
//!
//! Two-pane view: the activity list on the left, details and the
//! participant roster for the highlighted activity on the right.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::constants;
use crate::services::roster;
use crate::ui::create_titled_block;

/// Draw the activity browser into the given area.
pub fn draw_browse(f: &mut Frame, app: &mut App, area: Rect) {
    // Create a horizontal layout with the activity list and the detail pane
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(constants::ui::DEFAULT_SPLIT_PERCENT),
            Constraint::Percentage(100 - constants::ui::DEFAULT_SPLIT_PERCENT),
        ])
        .split(area);

    let participants_focused = app.participant_list_state.selected().is_some();
    draw_activity_list(f, app, chunks[0], !participants_focused);
    draw_activity_detail(f, app, chunks[1], participants_focused);
}

fn draw_activity_list(f: &mut Frame, app: &mut App, area: Rect, is_focused: bool) {
    let visible = app.visible_indices();
    let selected_index = app.activity_list_state.selected();

    let title = if app.filter_query.is_empty() {
        format!("Activities ({})", app.activities.len())
    } else {
        format!("Activities ({}/{})", visible.len(), app.activities.len())
    };

    if visible.is_empty() {
        let text = if app.load_failed {
            "Failed to load activities. Please try again later."
        } else if app.is_loading {
            "Loading activities..."
        } else if app.activities.is_empty() {
            "No activities yet."
        } else {
            "No activities match the filter."
        };

        let style = if app.load_failed {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };

        let placeholder = Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(create_titled_block(&title, is_focused));
        f.render_widget(placeholder, area);
        return;
    }

    let rows: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(i, &index)| {
            let activity = &app.activities[index];
            let is_selected = Some(i) == selected_index;

            let (prefix, name_style) = if is_selected && is_focused {
                ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else if is_selected {
                ("> ", Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(Color::White))
            };

            // Pad the name so the availability column lines up
            let name = activity.name.as_str();
            let name_width = constants::ui::NAME_COLUMN_WIDTH;
            let name_display = if name.chars().count() > name_width {
                let truncated: String = name.chars().take(name_width - 3).collect();
                format!("{truncated}...")
            } else {
                format!("{name:name_width$}")
            };

            let spots_style = if activity.is_full() {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Gray)
            };

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(name_display, name_style),
                Span::styled(
                    format!(" ({})", roster::availability_label(activity)),
                    spots_style,
                ),
            ]))
        })
        .collect();

    let list = List::new(rows)
        .block(create_titled_block(&title, is_focused))
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(80, 80, 120))
                .add_modifier(Modifier::BOLD),
        );

    f.render_stateful_widget(list, area, &mut app.activity_list_state);
}

fn draw_activity_detail(f: &mut Frame, app: &mut App, area: Rect, is_focused: bool) {
    // Detail summary on top, participant roster below
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(1)])
        .split(area);

    let detail_lines: Vec<Line> = match app.selected_activity() {
        Some(activity) => {
            let spots_style = if activity.is_full() {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };

            vec![
                Line::from(Span::styled(
                    activity.name.as_str().to_string(),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::raw(activity.description.clone())),
                Line::from(vec![
                    Span::styled("Schedule: ", Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(activity.schedule.clone()),
                ]),
                Line::from(vec![
                    Span::styled("Availability: ", Style::default().add_modifier(Modifier::BOLD)),
                    Span::styled(roster::availability_label(activity), spots_style),
                ]),
            ]
        }
        None => vec![Line::from(Span::styled(
            "Select an activity",
            Style::default().fg(Color::Gray),
        ))],
    };

    let details = Paragraph::new(detail_lines)
        .wrap(Wrap { trim: true })
        .block(create_titled_block("Details", false));
    f.render_widget(details, chunks[0]);

    draw_participant_list(f, app, chunks[1], is_focused);
}

fn draw_participant_list(f: &mut Frame, app: &mut App, area: Rect, is_focused: bool) {
    let participants: Vec<String> = app
        .selected_activity()
        .map(|activity| activity.participants.clone())
        .unwrap_or_default();

    if participants.is_empty() {
        let placeholder = Paragraph::new("No participants yet.")
            .style(Style::default().fg(Color::Gray))
            .block(create_titled_block("Participants (0)", is_focused));
        f.render_widget(placeholder, area);
        return;
    }

    let selected_index = app.participant_list_state.selected();
    let rows: Vec<ListItem> = participants
        .iter()
        .enumerate()
        .map(|(i, email)| {
            let is_selected = Some(i) == selected_index;
            let (prefix, style) = if is_selected && is_focused {
                ("> ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            } else {
                ("  ", Style::default().fg(Color::White))
            };

            ListItem::new(Line::from(vec![
                Span::raw(prefix),
                Span::styled(email.clone(), style),
            ]))
        })
        .collect();

    let title = format!("Participants ({})", participants.len());
    let list = List::new(rows)
        .block(create_titled_block(&title, is_focused))
        .highlight_style(
            Style::default()
                .bg(Color::Rgb(80, 80, 120))
                .add_modifier(Modifier::BOLD),
        );

    f.render_stateful_widget(list, area, &mut app.participant_list_state);
}
