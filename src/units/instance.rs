//! Unit instances - live units on the board.
//!
//! A `UnitInstance` is a specific unit in a specific game. It copies its
//! footprint, name, and starting health from its definition at creation,
//! then tracks only per-instance state: origin square, remaining health,
//! and the damage/movement flags.

use serde::{Deserialize, Serialize};

use super::definition::{DefId, Footprint, UnitDefinition};
use crate::core::{Coordinate, PlayerId};

/// Unique identifier for a live unit, assigned by the engine at spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Create a new unit ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unit({})", self.0)
    }
}

/// A live unit.
///
/// Invariant, maintained by the placement validator: the absolute squares of
/// the footprint are always in bounds, unblocked, and disjoint from every
/// other unit's squares.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitInstance {
    /// Unique id for this instance.
    pub id: UnitId,

    /// The definition this unit was spawned from.
    pub def_id: DefId,

    /// Display name, copied from the definition.
    pub name: String,

    /// Owning player.
    pub owner: PlayerId,

    /// Origin square; footprint offsets are measured from here.
    pub origin: Coordinate,

    /// Occupied offsets, copied from the definition at creation.
    pub footprint: Footprint,

    /// Remaining health. `None` means the unit is undamageable: damage is
    /// recorded on `has_taken_damage` but never reduces health.
    pub health: Option<i32>,

    /// Set the first time any damage is applied, even to an undamageable
    /// unit. Never cleared.
    pub has_taken_damage: bool,

    /// Set when the unit moves; cleared on `EndTurn`. Gates one move per
    /// unit per turn.
    pub has_moved: bool,
}

impl UnitInstance {
    /// Create an instance of a definition.
    #[must_use]
    pub fn new(id: UnitId, def: &UnitDefinition, owner: PlayerId, origin: Coordinate) -> Self {
        Self {
            id,
            def_id: def.id,
            name: def.name.clone(),
            owner,
            origin,
            footprint: def.resolved_footprint(),
            health: def.stats.max_health,
            has_taken_damage: false,
            has_moved: false,
        }
    }

    /// Absolute squares this unit occupies: origin plus each offset.
    pub fn occupied_squares(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.footprint.iter().map(|&offset| self.origin.offset(offset))
    }

    /// Does this unit's footprint cover the square?
    #[must_use]
    pub fn covers(&self, coord: Coordinate) -> bool {
        self.occupied_squares().any(|sq| sq == coord)
    }
}
