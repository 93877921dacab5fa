//! Undo/redo contract tests, including property tests over random action
//! sequences and snapshot serialization round-trips.

use proptest::prelude::*;

use tactics_engine::{
    Board, Coordinate, DefId, Game, GameAction, HistorySnapshot, PlayerId, UnitDefinition, UnitId,
    UnitStats,
};

fn setup() -> Game {
    let mut game = Game::new(Board::new(10, 10, [Coordinate::new(4, 4)]), 2);
    game.register_definition(
        UnitDefinition::new(DefId::new(0), "Soldier")
            .with_stats(UnitStats::default().with_max_health(2).with_attack(1)),
    );
    game.register_definition(
        UnitDefinition::new(DefId::new(1), "Archer")
            .with_stats(UnitStats::default().with_max_health(1).with_attack_range(2)),
    );

    game.add_unit(PlayerId::new(0), DefId::new(0), Coordinate::new(1, 1)).unwrap();
    game.add_unit(PlayerId::new(0), DefId::new(1), Coordinate::new(2, 1)).unwrap();
    game.add_unit(PlayerId::new(1), DefId::new(0), Coordinate::new(8, 8)).unwrap();
    game.add_unit(PlayerId::new(1), DefId::new(1), Coordinate::new(7, 8)).unwrap();
    game
}

// =============================================================================
// Basic contract
// =============================================================================

/// Every action, legal or not, is undoable back to the exact prior state.
#[test]
fn test_every_action_is_undoable() {
    let mut game = setup();
    let before = HistorySnapshot::capture(game.state());

    // An illegal move still consumes a history slot.
    game.dispatch(&GameAction::Move {
        unit_id: UnitId::new(0),
        to: Coordinate::new(9, 9),
    });
    assert_eq!(game.state().undo_depth(), 1);

    assert!(game.undo());
    assert_eq!(HistorySnapshot::capture(game.state()), before);
}

/// Undo restores a unit killed by an attack, health and all.
#[test]
fn test_undo_resurrects() {
    let mut game = setup();
    let a = UnitId::new(0);
    let victim = game
        .add_unit(PlayerId::new(1), DefId::new(1), Coordinate::new(1, 2))
        .unwrap();

    game.dispatch(&GameAction::Attack { attacker_id: a, target_id: victim });
    assert!(game.state().unit(victim).is_none());

    assert!(game.undo());
    let restored = game.state().unit(victim).unwrap();
    assert_eq!(restored.health, Some(1));
    assert!(!restored.has_taken_damage);
}

/// A new action after undo discards the redo timeline.
#[test]
fn test_branching_discards_future() {
    let mut game = setup();

    game.dispatch(&GameAction::EndTurn);
    game.dispatch(&GameAction::EndTurn);
    assert!(game.undo());
    assert!(game.undo());
    assert_eq!(game.state().redo_depth(), 2);

    game.dispatch(&GameAction::EndTurn);
    assert_eq!(game.state().redo_depth(), 0);
    assert!(!game.redo());
}

/// Undo and redo refuse politely at the ends of the timeline.
#[test]
fn test_timeline_ends() {
    let mut game = setup();

    assert!(!game.undo());
    game.dispatch(&GameAction::EndTurn);
    assert!(game.undo());
    assert!(!game.undo());
    assert!(game.redo());
    assert!(!game.redo());
}

// =============================================================================
// Serialization
// =============================================================================

/// Snapshots survive JSON and bincode round trips, including blocked
/// squares and mid-game unit state.
#[test]
fn test_snapshot_serialization_round_trip() {
    let mut game = setup();
    game.dispatch(&GameAction::Move {
        unit_id: UnitId::new(0),
        to: Coordinate::new(1, 2),
    });
    let snapshot = HistorySnapshot::capture(game.state());

    let json = serde_json::to_string(&snapshot).unwrap();
    let from_json: HistorySnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(from_json, snapshot);

    let bytes = bincode::serialize(&snapshot).unwrap();
    let from_bytes: HistorySnapshot = bincode::deserialize(&bytes).unwrap();
    assert_eq!(from_bytes, snapshot);
}

// =============================================================================
// Properties
// =============================================================================

fn arb_action() -> impl Strategy<Value = GameAction> {
    prop_oneof![
        (0u32..6, -1i32..11, -1i32..11).prop_map(|(id, x, y)| GameAction::Move {
            unit_id: UnitId::new(id),
            to: Coordinate::new(x, y),
        }),
        (0u32..6, 0u32..6).prop_map(|(a, t)| GameAction::Attack {
            attacker_id: UnitId::new(a),
            target_id: UnitId::new(t),
        }),
        Just(GameAction::EndTurn),
    ]
}

proptest! {
    /// apply → undo is the identity on observable state, for any action.
    #[test]
    fn prop_apply_undo_is_identity(actions in prop::collection::vec(arb_action(), 1..20)) {
        let mut game = setup();

        for action in &actions {
            let before = HistorySnapshot::capture(game.state());
            game.dispatch(action);
            prop_assert!(game.undo());
            prop_assert_eq!(HistorySnapshot::capture(game.state()), before);
            // Re-apply so the next iteration sees a progressed game.
            prop_assert!(game.redo());
        }
    }

    /// undo → redo is the identity on observable state.
    #[test]
    fn prop_undo_redo_is_identity(actions in prop::collection::vec(arb_action(), 1..20)) {
        let mut game = setup();
        for action in &actions {
            game.dispatch(action);
        }

        let end = HistorySnapshot::capture(game.state());
        let depth = game.state().undo_depth();
        for _ in 0..depth {
            prop_assert!(game.undo());
        }
        for _ in 0..depth {
            prop_assert!(game.redo());
        }
        prop_assert_eq!(HistorySnapshot::capture(game.state()), end);
    }

    /// History depth equals the number of dispatched actions, no-ops
    /// included.
    #[test]
    fn prop_history_depth_counts_actions(actions in prop::collection::vec(arb_action(), 0..20)) {
        let mut game = setup();
        for action in &actions {
            game.dispatch(action);
        }
        prop_assert_eq!(game.state().undo_depth(), actions.len());
        prop_assert_eq!(game.state().redo_depth(), 0);
    }
}
