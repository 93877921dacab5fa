//! History snapshots.
//!
//! A `HistorySnapshot` is a fully self-contained copy of everything the
//! undo/redo contract covers: board geometry, players, units, unit order,
//! selection, and turn state. It holds no reference to any live object, and
//! the persistent collections guarantee later mutation of the live state can
//! never leak into a captured snapshot.
//!
//! The serde shape doubles as the persistence / network-sync format; blocked
//! squares serialize as an explicit sorted list rather than an opaque set.

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};

use crate::core::{Board, Coordinate, GameState, Player, PlayerMap, TurnState};
use crate::units::{UnitId, UnitInstance};

/// A serializable full-state copy, independent of any runtime identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub board_width: i32,
    pub board_height: i32,
    /// Blocked squares as an explicit sorted list.
    pub blocked: Vec<Coordinate>,
    pub players: PlayerMap<Player>,
    pub units: ImHashMap<UnitId, UnitInstance>,
    pub unit_order: Vector<UnitId>,
    pub selected_unit: Option<UnitId>,
    pub turn: TurnState,
}

impl HistorySnapshot {
    /// Capture the live state.
    ///
    /// The history stacks themselves are not part of a snapshot; restoring
    /// never touches them.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        Self {
            board_width: state.board.width(),
            board_height: state.board.height(),
            blocked: state.board.blocked_list(),
            players: state.players.clone(),
            units: state.units.clone(),
            unit_order: state.unit_order.clone(),
            selected_unit: state.selected_unit,
            turn: state.turn,
        }
    }

    /// Replace the live state's snapshot-covered fields with this
    /// snapshot's values, leaving the past/future stacks and the unit id
    /// allocator alone.
    pub(crate) fn restore_into(self, state: &mut GameState) {
        state.board = Board::new(self.board_width, self.board_height, self.blocked);
        state.players = self.players;
        state.units = self.units;
        state.unit_order = self.unit_order;
        state.selected_unit = self.selected_unit;
        state.turn = self.turn;
    }
}
