//! The action dispatcher: the single mutation entry point.
//!
//! `apply` is the only path by which gameplay changes state. It records a
//! full pre-action snapshot (invalidating any redo history), applies exactly
//! one action, and reports what happened as [`EngineEvent`]s so the
//! integration layer can feed the trigger bus.
//!
//! ## Error philosophy
//!
//! No action errors. Missing units, illegal destinations, and out-of-range
//! attacks degrade to silent no-ops (logged at debug level) that still
//! consume a history slot. Callers are expected to pre-filter with
//! [`crate::rules::legal_moves`] / [`crate::rules::legal_attack_targets`];
//! the dispatcher re-validates everything anyway because it is the sole
//! trusted boundary.

use tracing::debug;

use crate::core::{GameAction, GameState, PlayerId};
use crate::history::HistorySnapshot;
use crate::units::{DefinitionRegistry, UnitId, UnitInstance};

use super::placement::can_place;

/// Something the dispatcher (or a trigger handler acting through
/// [`crate::triggers::GameContext`]) observed happening to the state.
///
/// Death events carry the removed instance by value: the unit is already
/// gone from the registry when listeners run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineEvent {
    /// A unit's origin changed.
    UnitMoved {
        unit_id: UnitId,
        from: crate::core::Coordinate,
        to: crate::core::Coordinate,
    },
    /// Damage was applied to a unit. `first` is set when this was the first
    /// damage the unit ever took.
    UnitDamaged {
        unit_id: UnitId,
        amount: i32,
        first: bool,
    },
    /// A unit's health reached zero and it was removed.
    UnitDied { unit: UnitInstance },
    /// A player's turn ended.
    TurnEnded { player: PlayerId },
}

/// Apply one action to the state.
///
/// Pushes a pre-action snapshot onto the past stack and clears the future
/// stack before anything else, so even a no-op action consumes a history
/// slot and invalidates redo.
pub fn apply(
    state: &mut GameState,
    registry: &DefinitionRegistry,
    action: &GameAction,
) -> Vec<EngineEvent> {
    let snapshot = HistorySnapshot::capture(state);
    state.past.push(snapshot);
    state.future.clear();

    match *action {
        GameAction::Move { unit_id, to } => apply_move(state, registry, unit_id, to),
        GameAction::Attack {
            attacker_id,
            target_id,
        } => apply_attack(state, registry, attacker_id, target_id),
        GameAction::EndTurn => apply_end_turn(state),
    }
}

fn apply_move(
    state: &mut GameState,
    registry: &DefinitionRegistry,
    unit_id: UnitId,
    to: crate::core::Coordinate,
) -> Vec<EngineEvent> {
    let Some(unit) = state.unit(unit_id).cloned() else {
        debug!(unit = %unit_id, "move ignored: no such unit");
        return Vec::new();
    };
    if unit.has_moved {
        debug!(unit = %unit_id, "move ignored: unit already moved this turn");
        return Vec::new();
    }
    if unit.origin.manhattan(to) > registry.move_range(unit.def_id) || to == unit.origin {
        debug!(unit = %unit_id, %to, "move ignored: destination out of range");
        return Vec::new();
    }
    if !can_place(state, &unit, to) {
        debug!(unit = %unit_id, %to, "move ignored: illegal destination");
        return Vec::new();
    }

    let from = unit.origin;
    if let Some(live) = state.unit_mut(unit_id) {
        live.origin = to;
        live.has_moved = true;
    }
    vec![EngineEvent::UnitMoved { unit_id, from, to }]
}

fn apply_attack(
    state: &mut GameState,
    registry: &DefinitionRegistry,
    attacker_id: UnitId,
    target_id: UnitId,
) -> Vec<EngineEvent> {
    let Some(attacker) = state.unit(attacker_id) else {
        debug!(attacker = %attacker_id, "attack ignored: no such attacker");
        return Vec::new();
    };
    let (attacker_origin, attacker_def) = (attacker.origin, attacker.def_id);

    let Some(target) = state.unit(target_id) else {
        debug!(target = %target_id, "attack ignored: no such target");
        return Vec::new();
    };
    let distance = attacker_origin.manhattan(target.origin);

    let range = registry.attack_range(attacker_def);
    if distance > range {
        debug!(attacker = %attacker_id, target = %target_id, distance, range, "attack ignored: out of range");
        return Vec::new();
    }

    apply_damage(state, target_id, registry.attack_damage(attacker_def))
}

fn apply_end_turn(state: &mut GameState) -> Vec<EngineEvent> {
    let ended = state.turn.current_player;
    let player_count = state.player_count() as u8;
    let next_index = (ended.0 + 1) % player_count;

    state.turn.current_player = PlayerId::new(next_index);
    if next_index == 0 {
        state.turn.turn_number += 1;
    }
    state.clear_moved_flags();

    debug!(
        next = %state.turn.current_player,
        turn = state.turn.turn_number,
        "turn advanced"
    );
    vec![EngineEvent::TurnEnded { player: ended }]
}

/// Apply damage to a unit.
///
/// A unit without numeric health only records that it has taken damage.
/// Otherwise health decreases, floored at zero; at exactly zero the unit is
/// removed from the registry and order, and the selection is cleared if it
/// pointed at the unit.
pub fn apply_damage(state: &mut GameState, unit_id: UnitId, amount: i32) -> Vec<EngineEvent> {
    let Some(unit) = state.unit_mut(unit_id) else {
        debug!(unit = %unit_id, "damage ignored: no such unit");
        return Vec::new();
    };

    let first = !unit.has_taken_damage;
    unit.has_taken_damage = true;

    let mut events = vec![EngineEvent::UnitDamaged {
        unit_id,
        amount,
        first,
    }];

    if let Some(health) = unit.health {
        let next = (health - amount).max(0);
        unit.health = Some(next);
        if next == 0 {
            if let Some(removed) = state.remove_unit(unit_id) {
                debug!(unit = %unit_id, "unit died");
                events.push(EngineEvent::UnitDied { unit: removed });
            }
        }
    }

    events
}
