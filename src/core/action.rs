//! # Actions
//!
//! Everything that can happen in dashpick becomes an `Action`.
//! User commits a dropdown option? That's `Action::CommitSelection(index)`.
//! Dashboard answers? That's `Action::SyncFinished(outcome)`.
//!
//! The `update()` function applies an action to the state and returns the
//! `Effect` the caller has to perform. No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::core::selection::Selection;
use crate::core::state::App;
use crate::sync::SyncOutcome;

#[derive(Debug)]
pub enum Action {
    /// User committed the option at this index.
    CommitSelection(usize),
    /// A change event finished (successfully or not).
    SyncFinished(SyncOutcome),
    /// The task running a change event died without an outcome.
    SyncAborted(String),
    Quit,
}

/// Work the caller must carry out after `update`.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Hand the selection to the change handler.
    Sync(Selection),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::CommitSelection(index) => match app.dropdown.select(index) {
            Some(selection) => {
                app.in_flight += 1;
                app.status_message = format!("Sending {}...", selection.text);
                app.activity.info(format!(
                    "change: value={:?} text={:?}",
                    selection.value, selection.text
                ));
                Effect::Sync(selection)
            }
            None => Effect::None,
        },
        Action::SyncFinished(outcome) => {
            app.in_flight = app.in_flight.saturating_sub(1);
            match &outcome {
                SyncOutcome::Navigated { seq, visit, .. } => {
                    if app.latest_only && *seq < app.navigated_seq {
                        app.activity.info(format!(
                            "{} (ignored, selection #{} already navigated)",
                            outcome.summary(),
                            app.navigated_seq
                        ));
                    } else {
                        app.navigated_seq = app.navigated_seq.max(*seq);
                        app.location = visit.url.clone();
                        app.activity.info(outcome.summary());
                    }
                }
                SyncOutcome::NoRedirect { response, .. } => {
                    let body = serde_json::to_string(response).unwrap_or_default();
                    app.activity.info(format!("Success: {body}"));
                }
                SyncOutcome::Failed { .. } | SyncOutcome::NavigationFailed { .. } => {
                    app.activity.error(format!("Error: {}", outcome.summary()));
                }
                SyncOutcome::Superseded { .. } | SyncOutcome::RedirectSuppressed { .. } => {
                    app.activity.info(outcome.summary());
                }
            }
            app.status_message = outcome.summary();
            app.last_outcome = Some(outcome);
            Effect::None
        }
        Action::SyncAborted(reason) => {
            app.in_flight = app.in_flight.saturating_sub(1);
            app.activity.error(format!("Error: sync task aborted: {reason}"));
            app.status_message = "Sync task aborted".to_string();
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
