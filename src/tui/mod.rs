//! Terminal focus screen.
//!
//! Runs one focus timer interactively. Built with ratatui and crossterm on
//! a single thread: the loop polls for keys with a short timeout and applies
//! whatever ticks the schedule reports as due.

mod app;
mod event;
mod ui;

pub use app::{Action, App};

use std::io;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::MypaError;
use crate::features::focus::{FoldOutcome, SessionTracker};
use crate::features::planner::Task;

/// What a focus run left behind.
pub struct FocusRun {
    /// Tracker with the finished session folded in.
    pub tracker: SessionTracker,
    /// `None` if the screen closed before the session ended.
    pub outcome: Option<FoldOutcome>,
    /// The user completed the task itself.
    pub task_completed: bool,
}

/// Run the focus screen for `task` until the session ends.
///
/// # Errors
///
/// Returns an error if the terminal fails or a timer is already active.
pub fn run_focus(task: Task, tracker: SessionTracker) -> Result<FocusRun, MypaError> {
    let mut app = App::start(task, tracker, Instant::now())?;

    // Setup terminal
    enable_raw_mode().map_err(|e| MypaError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| MypaError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let result = Terminal::new(backend)
        .map_err(|e| MypaError::Terminal(format!("Failed to create terminal: {e}")))
        .and_then(|mut terminal| {
            let result = run_app(&mut terminal, &mut app);
            terminal.show_cursor().ok();
            result
        });

    // Restore terminal
    disable_raw_mode().ok();
    execute!(io::stdout(), LeaveAlternateScreen).ok();

    result?;
    let (tracker, outcome, task_completed) = app.into_parts();
    Ok(FocusRun {
        tracker,
        outcome,
        task_completed,
    })
}

/// Run the main loop until the session ends.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), MypaError> {
    while !app.is_finished() {
        app.apply_due_ticks(Instant::now());

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| MypaError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(app)? {
            log::debug!("focus screen action {action:?}");
            app.apply(action, Instant::now());
        }
    }

    Ok(())
}
