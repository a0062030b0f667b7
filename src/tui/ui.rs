//! UI rendering for the focus screen.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::features::focus::{format_duration_clock, ActiveTimer};
use crate::tui::app::App;

/// Render the focus screen.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    // Create layout: header, clock, progress, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Clock
            Constraint::Length(3), // Progress
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    if let Some(timer) = app.timer() {
        render_clock(frame, timer, chunks[1]);
        render_progress(frame, timer, chunks[2]);
    }
    render_status_bar(frame, app, chunks[3]);
}

/// Render the task header.
fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let title = format!(
        " {}  [{}]  {} min ",
        app.task.title, app.task.category, app.task.duration_minutes
    );

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// Render elapsed and remaining time.
fn render_clock(frame: &mut Frame<'_>, timer: &ActiveTimer, area: Rect) {
    let (state, state_color) = if timer.is_running {
        ("RUNNING", Color::Green)
    } else {
        ("PAUSED", Color::Yellow)
    };

    let mut lines = vec![
        Line::from(Span::styled(
            state,
            Style::default().fg(state_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format_duration_clock(timer.elapsed()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} remaining", format_duration_clock(timer.remaining())),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    if timer.target_reached() {
        lines.push(Line::from(Span::styled(
            "Target reached. Press c to complete.",
            Style::default().fg(Color::Yellow),
        )));
    }

    let clock = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(clock, area);
}

/// Render the progress gauge.
fn render_progress(frame: &mut Frame<'_>, timer: &ActiveTimer, area: Rect) {
    let percent = timer.percent_complete();
    let color = if percent >= 80 { Color::Green } else { Color::Blue };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .percent(u16::try_from(percent.min(100)).unwrap_or(100))
        .label(format!("{percent}%"));

    frame.render_widget(gauge, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or("space:pause | c:complete | s:stop | q:quit");

    let style = if app.confirming_stop {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
