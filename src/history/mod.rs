//! Undo/redo over full-state snapshots.
//!
//! The dispatcher pushes a snapshot of the pre-action state before every
//! action (including ignored ones) and clears the redo stack. `undo` and
//! `redo` shuttle snapshots between the two stacks, capturing the present
//! before overwriting it so the pair is always exactly inverse.

use tracing::trace;

use crate::core::GameState;

pub mod snapshot;

pub use snapshot::HistorySnapshot;

/// Revert to the most recent past snapshot.
///
/// The present is captured onto the redo stack first. Returns `false`
/// without changing anything when there is nothing to undo.
pub fn undo(state: &mut GameState) -> bool {
    let Some(snapshot) = state.past.pop() else {
        trace!("undo ignored: history empty");
        return false;
    };
    let present = HistorySnapshot::capture(state);
    state.future.push(present);
    snapshot.restore_into(state);
    true
}

/// Re-apply the most recently undone snapshot.
///
/// The present is captured onto the undo stack first. Returns `false`
/// without changing anything when there is nothing to redo.
pub fn redo(state: &mut GameState) -> bool {
    let Some(snapshot) = state.future.pop() else {
        trace!("redo ignored: nothing undone");
        return false;
    };
    let present = HistorySnapshot::capture(state);
    state.past.push(present);
    snapshot.restore_into(state);
    true
}
