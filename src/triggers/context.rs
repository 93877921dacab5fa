//! Mutation surface handed to trigger handlers.
//!
//! Handlers never touch `GameState` directly. They get a `GameContext`
//! exposing a curated set of reads and writes; every write is recorded as an
//! [`EngineEvent`] so the game facade can cascade follow-up triggers.

use tracing::debug;

use crate::core::{Coordinate, GameState, PlayerId};
use crate::rules::{apply_damage, can_place, EngineEvent};
use crate::units::{DefinitionRegistry, UnitId, UnitInstance};

/// Scoped view of the game handed to trigger handlers.
pub struct GameContext<'a> {
    state: &'a mut GameState,
    registry: &'a DefinitionRegistry,
    events: Vec<EngineEvent>,
}

impl<'a> GameContext<'a> {
    pub(crate) fn new(state: &'a mut GameState, registry: &'a DefinitionRegistry) -> Self {
        Self {
            state,
            registry,
            events: Vec::new(),
        }
    }

    /// Read-only view of the full state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        self.state
    }

    /// The definition registry.
    #[must_use]
    pub fn registry(&self) -> &DefinitionRegistry {
        self.registry
    }

    /// Look up a live unit.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&UnitInstance> {
        self.state.unit(id)
    }

    /// Units owned by a player, cloned so handlers can iterate while
    /// mutating through the context.
    #[must_use]
    pub fn units_owned_by(&self, player: PlayerId) -> Vec<UnitInstance> {
        self.state.units_owned_by(player).cloned().collect()
    }

    /// Units owned by anyone except `player`, cloned.
    #[must_use]
    pub fn enemy_units_of(&self, player: PlayerId) -> Vec<UnitInstance> {
        self.state.enemy_units_of(player).cloned().collect()
    }

    /// Deal damage to a unit, with the usual floor-at-zero and removal
    /// semantics. Unknown ids are ignored.
    pub fn damage_unit(&mut self, id: UnitId, amount: i32) {
        let events = apply_damage(self.state, id, amount);
        self.events.extend(events);
    }

    /// Teleport a unit to a new origin, subject to placement validation.
    ///
    /// Trigger displacement is not a turn action: it does not mark the unit
    /// as moved and takes no history slot of its own (the whole trigger
    /// cascade is covered by the snapshot of the action that started it).
    /// Returns `false` and leaves the unit in place when the destination is
    /// illegal.
    pub fn move_unit(&mut self, id: UnitId, to: Coordinate) -> bool {
        let Some(unit) = self.state.unit(id).cloned() else {
            debug!(unit = %id, "trigger move ignored: no such unit");
            return false;
        };
        if !can_place(self.state, &unit, to) {
            debug!(unit = %id, %to, "trigger move ignored: illegal destination");
            return false;
        }

        let from = unit.origin;
        if let Some(live) = self.state.unit_mut(id) {
            live.origin = to;
        }
        self.events.push(EngineEvent::UnitMoved {
            unit_id: id,
            from,
            to,
        });
        true
    }

    /// Consume the context, yielding the events its writes produced.
    #[must_use]
    pub(crate) fn into_events(self) -> Vec<EngineEvent> {
        self.events
    }
}
