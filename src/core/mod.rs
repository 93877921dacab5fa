//! Core engine types: coordinates, board geometry, players, actions, state.
//!
//! Everything here is data plus invariant-preserving accessors; the rules
//! that change state live in [`crate::rules`].

pub mod action;
pub mod board;
pub mod coord;
pub mod player;
pub mod state;

pub use action::GameAction;
pub use board::Board;
pub use coord::Coordinate;
pub use player::{Player, PlayerId, PlayerMap};
pub use state::{GameState, TurnState};
