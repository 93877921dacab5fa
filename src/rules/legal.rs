//! Legal-move and legal-target calculation.
//!
//! Pure functions of the current state, recomputed on demand; nothing here
//! caches across turns. Callers (UI highlighting, AI) use these to pre-filter
//! actions, but the dispatcher re-validates everything defensively, so these
//! are a convenience surface, not a trust boundary.

use crate::core::{Coordinate, GameState};
use crate::units::{DefinitionRegistry, UnitId, UnitInstance};

use super::placement::can_place;

/// Squares `unit` may legally move to.
///
/// Every square within the unit's move range (Manhattan distance, inclusive,
/// excluding its current origin) that passes placement validation with the
/// unit hypothetically relocated there. A unit that has already moved this
/// turn has no legal moves. Results are in row-scan order (dx, then dy).
#[must_use]
pub fn legal_moves(
    state: &GameState,
    registry: &DefinitionRegistry,
    unit: &UnitInstance,
) -> Vec<Coordinate> {
    if unit.has_moved {
        return Vec::new();
    }

    let range = registry.move_range(unit.def_id);
    let mut moves = Vec::new();
    for dx in -range..=range {
        for dy in -range..=range {
            let to = unit.origin.offset(Coordinate::new(dx, dy));
            if unit.origin.manhattan(to) > range {
                continue;
            }
            if to == unit.origin {
                continue;
            }
            if can_place(state, unit, to) {
                moves.push(to);
            }
        }
    }
    moves
}

/// Enemy units `unit` may legally attack.
///
/// Units with a different owner whose origin lies within the unit's attack
/// range (Manhattan distance from the unit's origin). Returned in insertion
/// order.
#[must_use]
pub fn legal_attack_targets(
    state: &GameState,
    registry: &DefinitionRegistry,
    unit: &UnitInstance,
) -> Vec<UnitId> {
    let range = registry.attack_range(unit.def_id);
    state
        .enemy_units_of(unit.owner)
        .filter(|enemy| unit.origin.manhattan(enemy.origin) <= range)
        .map(|enemy| enemy.id)
        .collect()
}
