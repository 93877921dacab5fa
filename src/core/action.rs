//! Game actions: the closed set of state transitions.
//!
//! An action is the only way gameplay mutates state. The serde representation
//! doubles as the wire format for a future multiplayer transport: peers
//! serialize actions and replay them through the same dispatcher, so both
//! sides stay deterministic.
//!
//! ## Wire format
//!
//! ```json
//! {"kind":"move","unitId":7,"to":{"x":3,"y":4}}
//! {"kind":"attack","attackerId":7,"targetId":9}
//! {"kind":"endTurn"}
//! ```

use serde::{Deserialize, Serialize};

use super::coord::Coordinate;
use crate::units::UnitId;

/// A single player action, consumed one at a time by the dispatcher.
///
/// Invalid references (a `unit_id` that no longer exists, an unreachable
/// destination) never error; the dispatcher degrades them to no-ops.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GameAction {
    /// Move a unit's origin to a destination square.
    #[serde(rename_all = "camelCase")]
    Move { unit_id: UnitId, to: Coordinate },

    /// Attack a target unit with an attacker unit.
    #[serde(rename_all = "camelCase")]
    Attack {
        attacker_id: UnitId,
        target_id: UnitId,
    },

    /// Pass the turn to the next player in rotation.
    EndTurn,
}
