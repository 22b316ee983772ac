//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Loop
//!
//! Each turn draws if something changed, waits up to 250ms for a key,
//! drains any further pending keys, then applies outcomes that background
//! sync tasks have sent back over the channel. Requests never block the
//! loop; an answer simply shows up on a later turn.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::sync::mpsc;
use std::time::Duration;

use crate::core::action::{Action, Effect, update};
use crate::core::selection::Selection;
use crate::core::state::App;
use crate::sync::ChangeHandler;
use crate::tui::component::EventHandler;
use crate::tui::components::{CategoryDropdownState, DropdownEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
#[derive(Default)]
pub struct TuiState {
    /// Category overlay (None = closed)
    pub dropdown: Option<CategoryDropdownState>,
}

impl TuiState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Routes one terminal event. Returns the action for the core, if any.
fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    // When the dropdown is open, route all events to it
    if let Some(dropdown) = tui.dropdown.as_mut() {
        let dropdown_event = dropdown.handle_event(event)?;
        tui.dropdown = None;
        return match dropdown_event {
            DropdownEvent::Commit(index) => Some(Action::CommitSelection(index)),
            DropdownEvent::Dismiss => None,
        };
    }

    match event {
        TuiEvent::Quit | TuiEvent::Escape => Some(Action::Quit),
        TuiEvent::Submit | TuiEvent::CursorDown => {
            tui.dropdown = Some(CategoryDropdownState::new(
                app.dropdown.options().len(),
                app.dropdown.selected_index(),
            ));
            None
        }
        _ => None,
    }
}

/// Hands a selection to the change handler and forwards the outcome to the loop.
fn spawn_sync(handler: &ChangeHandler, selection: Selection, tx: mpsc::Sender<Action>) {
    let task = handler.on_selection_change(selection);
    tokio::spawn(async move {
        match task.await {
            Ok(outcome) => {
                if tx.send(Action::SyncFinished(outcome)).is_err() {
                    warn!("Failed to deliver sync outcome: receiver dropped");
                }
            }
            Err(e) => {
                warn!("Sync task did not complete: {}", e);
                if tx.send(Action::SyncAborted(e.to_string())).is_err() {
                    warn!("Failed to deliver sync abort: receiver dropped");
                }
            }
        }
    });
}

/// Runs the terminal UI until the user quits.
///
/// Must be called from within a tokio runtime; sync tasks are spawned on it.
pub fn run(mut app: App, handler: ChangeHandler) -> std::io::Result<()> {
    let mut tui = TuiState::new();
    let mut terminal = ratatui::init();
    info!("TUI started at {}", app.location);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut needs_redraw = true; // Force first frame

    'outer: loop {
        if needs_redraw {
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, &mut tui)) {
                ratatui::restore();
                return Err(e);
            }
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let Some(action) = route_event(&app, &mut tui, &event) else {
                continue;
            };
            match update(&mut app, action) {
                Effect::Quit => break 'outer,
                Effect::Sync(selection) => spawn_sync(&handler, selection, tx.clone()),
                Effect::None => {}
            }
        }

        // Handle outcomes from sync tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                break 'outer;
            }
        }
    }

    info!("TUI exiting ({} request(s) still in flight)", app.in_flight);
    ratatui::restore();
    Ok(())
}
