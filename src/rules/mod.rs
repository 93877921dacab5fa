//! Game rules: placement validation, legality calculation, and the
//! action dispatcher.
//!
//! Everything here is a pure function over [`crate::core::GameState`] and
//! the definition registry. The dispatcher is the only one that mutates, and
//! it is the single entry point for all gameplay mutation.

pub mod dispatch;
pub mod legal;
pub mod placement;

pub use dispatch::{apply, apply_damage, EngineEvent};
pub use legal::{legal_attack_targets, legal_moves};
pub use placement::{can_place, is_square_occupied};
