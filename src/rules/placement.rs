//! Footprint-aware placement validation.
//!
//! Shared by movement and initial unit placement: a unit may stand at an
//! origin only if every square of its footprint is in bounds, unblocked, and
//! free of other units. Pure reads, no side effects.

use crate::core::{Coordinate, GameState};
use crate::units::{UnitId, UnitInstance};

/// Is any unit other than `ignore` occupying the square?
///
/// Scans units in insertion order, so the answer is deterministic even when
/// state is corrupt enough to contain overlaps.
#[must_use]
pub fn is_square_occupied(state: &GameState, coord: Coordinate, ignore: Option<UnitId>) -> bool {
    state
        .units_in_order()
        .filter(|unit| Some(unit.id) != ignore)
        .any(|unit| unit.covers(coord))
}

/// Can `unit` stand with its origin at `at`?
///
/// Checks every footprint offset against bounds, the blocked set, and other
/// units' occupied squares. The unit itself is excluded from the occupancy
/// scan by id, so validating a unit at (or near) its current position works.
#[must_use]
pub fn can_place(state: &GameState, unit: &UnitInstance, at: Coordinate) -> bool {
    unit.footprint.iter().all(|&offset| {
        let target = at.offset(offset);
        state.board.contains(target)
            && !state.board.is_blocked(target)
            && !is_square_occupied(state, target, Some(unit.id))
    })
}
