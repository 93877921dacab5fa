//! Game state: the single authoritative value the engine owns.
//!
//! ## Ownership discipline
//!
//! There is exactly one live `GameState` per game. Readers get `&GameState`;
//! every write goes through the action dispatcher, the history manager, or
//! the initialization routines in this module. Nothing else mutates fields.
//!
//! ## Persistent collections
//!
//! Units, unit order, and the blocked set use `im` persistent structures, so
//! the full-state snapshots the history manager takes before every action are
//! O(1) and never share mutable substructure with the live state.

use im::{HashMap as ImHashMap, Vector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::board::Board;
use super::coord::Coordinate;
use super::player::{Player, PlayerId, PlayerMap};
use crate::history::HistorySnapshot;
use crate::rules::can_place;
use crate::units::{UnitDefinition, UnitId, UnitInstance};

/// Whose turn it is and how many full rotations have completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// The player currently allowed to act.
    pub current_player: PlayerId,

    /// Turn number, starting at 1. Increments once per full rotation
    /// through all players, not per `EndTurn`.
    pub turn_number: u32,
}

impl TurnState {
    /// Turn state at game start: first player, turn 1.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            current_player: PlayerId::new(0),
            turn_number: 1,
        }
    }
}

/// Complete game state.
///
/// Created once at game start; thereafter replaced or mutated only by the
/// dispatcher, undo, and redo.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Board geometry, immutable after creation.
    pub board: Board,

    /// Per-player data, indexed in turn order.
    pub players: PlayerMap<Player>,

    /// Live units by id.
    pub(crate) units: ImHashMap<UnitId, UnitInstance>,

    /// Insertion-ordered unit ids. Defines deterministic iteration order
    /// for occupancy scans and selection.
    pub(crate) unit_order: Vector<UnitId>,

    /// Currently selected unit, if any.
    pub(crate) selected_unit: Option<UnitId>,

    /// Turn tracking.
    pub turn: TurnState,

    /// Undo stack: oldest snapshot at the bottom, most recent on top.
    /// Unbounded; long sessions trade memory for unlimited undo.
    pub(crate) past: Vec<HistorySnapshot>,

    /// Redo stack, symmetric to `past`. Cleared by every new action.
    pub(crate) future: Vec<HistorySnapshot>,

    /// Next unit id to allocate. Monotonic; deliberately not restored by
    /// undo so ids are never reused within a game.
    next_unit_id: u32,
}

impl GameState {
    /// Create the initial state for a game.
    #[must_use]
    pub fn new(board: Board, player_count: usize) -> Self {
        Self {
            board,
            players: PlayerMap::with_default(player_count),
            units: ImHashMap::new(),
            unit_order: Vector::new(),
            selected_unit: None,
            turn: TurnState::initial(),
            past: Vec::new(),
            future: Vec::new(),
            next_unit_id: 0,
        }
    }

    /// Number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.turn.current_player
    }

    // === Unit registry ===

    /// Spawn a unit from a definition.
    ///
    /// Assigns a fresh id, copies the footprint and health from the
    /// definition, and validates the placement. Returns `None` without
    /// creating anything if the owner is unknown or the footprint would be
    /// out of bounds, blocked, or overlapping another unit.
    pub fn add_unit(
        &mut self,
        def: &UnitDefinition,
        owner: PlayerId,
        origin: Coordinate,
    ) -> Option<UnitId> {
        if owner.index() >= self.player_count() {
            debug!(%owner, "add_unit ignored: unknown owner");
            return None;
        }

        let id = UnitId::new(self.next_unit_id);
        let unit = UnitInstance::new(id, def, owner, origin);
        if !can_place(self, &unit, origin) {
            debug!(unit = %id, %origin, "add_unit ignored: invalid placement");
            return None;
        }

        self.next_unit_id += 1;
        self.units.insert(id, unit);
        self.unit_order.push_back(id);
        Some(id)
    }

    /// Look up a unit by id.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&UnitInstance> {
        self.units.get(&id)
    }

    pub(crate) fn unit_mut(&mut self, id: UnitId) -> Option<&mut UnitInstance> {
        self.units.get_mut(&id)
    }

    /// Remove a unit from the registry and the order list, clearing the
    /// selection if it pointed at the unit. Returns the removed instance.
    pub(crate) fn remove_unit(&mut self, id: UnitId) -> Option<UnitInstance> {
        let removed = self.units.remove(&id)?;
        if let Some(index) = self.unit_order.iter().position(|&u| u == id) {
            self.unit_order.remove(index);
        }
        if self.selected_unit == Some(id) {
            self.selected_unit = None;
        }
        Some(removed)
    }

    pub(crate) fn clear_moved_flags(&mut self) {
        for id in self.unit_order.clone() {
            if let Some(unit) = self.units.get_mut(&id) {
                unit.has_moved = false;
            }
        }
    }

    /// Number of live units.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Iterate unit ids in insertion order.
    pub fn unit_ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.unit_order.iter().copied()
    }

    /// Iterate units in insertion order.
    pub fn units_in_order(&self) -> impl Iterator<Item = &UnitInstance> {
        self.unit_order.iter().filter_map(|id| self.units.get(id))
    }

    /// Units owned by a player, in insertion order.
    pub fn units_owned_by(&self, player: PlayerId) -> impl Iterator<Item = &UnitInstance> {
        self.units_in_order().filter(move |u| u.owner == player)
    }

    /// Units owned by anyone except `player`, in insertion order.
    pub fn enemy_units_of(&self, player: PlayerId) -> impl Iterator<Item = &UnitInstance> {
        self.units_in_order().filter(move |u| u.owner != player)
    }

    // === Selection / query layer ===

    /// First unit (by insertion order) whose footprint covers the square.
    #[must_use]
    pub fn unit_at(&self, coord: Coordinate) -> Option<&UnitInstance> {
        self.units_in_order().find(|u| u.covers(coord))
    }

    /// The currently selected unit id, if any.
    #[must_use]
    pub fn selected_unit(&self) -> Option<UnitId> {
        self.selected_unit
    }

    /// Select the unit at a square, gated by ownership and turn.
    ///
    /// The topmost unit covering the square becomes selected only when it
    /// belongs to the current player; any other outcome (empty square,
    /// opponent's unit) clears the selection. This is the sole gate for
    /// "you may only select your own units on your own turn."
    pub fn select_by_square(&mut self, coord: Coordinate) {
        let candidate = self.unit_at(coord);
        self.selected_unit = match candidate {
            Some(unit) if unit.owner == self.turn.current_player => Some(unit.id),
            _ => None,
        };
    }

    // === History ===

    /// Number of snapshots available to undo.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    /// Number of snapshots available to redo.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{DefId, UnitStats};

    fn soldier() -> UnitDefinition {
        UnitDefinition::new(DefId::new(0), "Soldier")
            .with_stats(UnitStats::default().with_max_health(3))
    }

    fn state_2p() -> GameState {
        GameState::new(Board::open(8, 8), 2)
    }

    #[test]
    fn test_new_state() {
        let state = state_2p();

        assert_eq!(state.player_count(), 2);
        assert_eq!(state.turn, TurnState::initial());
        assert_eq!(state.unit_count(), 0);
        assert_eq!(state.selected_unit(), None);
        assert_eq!(state.undo_depth(), 0);
        assert_eq!(state.redo_depth(), 0);
    }

    #[test]
    fn test_add_unit_assigns_ids_in_order() {
        let mut state = state_2p();
        let def = soldier();

        let a = state.add_unit(&def, PlayerId::new(0), Coordinate::new(1, 1)).unwrap();
        let b = state.add_unit(&def, PlayerId::new(1), Coordinate::new(5, 5)).unwrap();

        assert_ne!(a, b);
        let order: Vec<_> = state.unit_ids().collect();
        assert_eq!(order, vec![a, b]);
        assert_eq!(state.unit(a).unwrap().health, Some(3));
    }

    #[test]
    fn test_add_unit_rejects_occupied_square() {
        let mut state = state_2p();
        let def = soldier();

        state.add_unit(&def, PlayerId::new(0), Coordinate::new(1, 1)).unwrap();
        let clash = state.add_unit(&def, PlayerId::new(1), Coordinate::new(1, 1));

        assert!(clash.is_none());
        assert_eq!(state.unit_count(), 1);
    }

    #[test]
    fn test_add_unit_rejects_unknown_owner() {
        let mut state = state_2p();
        let def = soldier();

        assert!(state.add_unit(&def, PlayerId::new(5), Coordinate::new(1, 1)).is_none());
    }

    #[test]
    fn test_unit_at_respects_insertion_order() {
        let mut state = state_2p();
        let def = soldier();

        let a = state.add_unit(&def, PlayerId::new(0), Coordinate::new(2, 2)).unwrap();
        assert_eq!(state.unit_at(Coordinate::new(2, 2)).unwrap().id, a);
        assert!(state.unit_at(Coordinate::new(3, 3)).is_none());
    }

    #[test]
    fn test_select_by_square_ownership_gate() {
        let mut state = state_2p();
        let def = soldier();

        let mine = state.add_unit(&def, PlayerId::new(0), Coordinate::new(1, 1)).unwrap();
        let theirs = state.add_unit(&def, PlayerId::new(1), Coordinate::new(5, 5)).unwrap();

        state.select_by_square(Coordinate::new(1, 1));
        assert_eq!(state.selected_unit(), Some(mine));

        // Opponent's unit: selection clears even though a unit was selected.
        state.select_by_square(Coordinate::new(5, 5));
        assert_eq!(state.selected_unit(), None);
        assert!(state.unit(theirs).is_some());

        state.select_by_square(Coordinate::new(1, 1));
        state.select_by_square(Coordinate::new(7, 7));
        assert_eq!(state.selected_unit(), None);
    }

    #[test]
    fn test_remove_unit_clears_selection_and_order() {
        let mut state = state_2p();
        let def = soldier();

        let a = state.add_unit(&def, PlayerId::new(0), Coordinate::new(1, 1)).unwrap();
        state.select_by_square(Coordinate::new(1, 1));
        assert_eq!(state.selected_unit(), Some(a));

        let removed = state.remove_unit(a).unwrap();
        assert_eq!(removed.id, a);
        assert_eq!(state.unit_count(), 0);
        assert_eq!(state.unit_ids().count(), 0);
        assert_eq!(state.selected_unit(), None);
    }

    #[test]
    fn test_owner_filters() {
        let mut state = state_2p();
        let def = soldier();

        state.add_unit(&def, PlayerId::new(0), Coordinate::new(0, 0)).unwrap();
        state.add_unit(&def, PlayerId::new(0), Coordinate::new(1, 0)).unwrap();
        state.add_unit(&def, PlayerId::new(1), Coordinate::new(5, 5)).unwrap();

        assert_eq!(state.units_owned_by(PlayerId::new(0)).count(), 2);
        assert_eq!(state.enemy_units_of(PlayerId::new(0)).count(), 1);
        assert_eq!(state.enemy_units_of(PlayerId::new(1)).count(), 2);
    }
}
