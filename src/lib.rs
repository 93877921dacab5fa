//! # tactics-engine
//!
//! A turn-based tactical board game engine: a grid board, units with
//! footprints and stats, an action dispatcher, unlimited undo/redo, and an
//! event-driven trigger system.
//!
//! ## Design Principles
//!
//! 1. **Single Mutation Path**: All gameplay mutation flows through the
//!    action dispatcher. Everything else reads.
//!
//! 2. **No-Op Over Error**: Illegal actions are silently ignored (logged at
//!    debug level), never panics or `Err`s. Invalid *configuration* panics
//!    at setup.
//!
//! 3. **Persistent Data Structures**: O(1) full-state snapshots via `im-rs`
//!    make pre-action history capture free.
//!
//! ## Modules
//!
//! - `core`: Coordinates, board, players, actions, game state
//! - `units`: Definitions, instances, the definition registry
//! - `rules`: Placement validation, legality calculation, the dispatcher
//! - `history`: Snapshot-based undo/redo
//! - `triggers`: Event bus, per-definition behaviors, handler context
//! - `game`: The facade wiring dispatcher events into trigger emissions

pub mod core;
pub mod units;
pub mod rules;
pub mod history;
pub mod triggers;
pub mod game;

// Re-export commonly used types
pub use crate::core::{Board, Coordinate, GameAction, GameState, Player, PlayerId, PlayerMap, TurnState};

pub use crate::units::{
    DefId, DefinitionRegistry, Footprint, UnitDefinition, UnitId, UnitInstance, UnitStats,
};

pub use crate::rules::{legal_attack_targets, legal_moves, EngineEvent};

pub use crate::history::HistorySnapshot;

pub use crate::triggers::{EventBus, GameContext, Subscription, TriggerType, UnitBehavior};

pub use crate::game::Game;
