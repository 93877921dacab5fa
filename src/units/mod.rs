//! Unit system: definitions, live instances, and the definition registry.
//!
//! ## Key Types
//!
//! - `DefId`: identifier for unit definitions (the unit *type*)
//! - `UnitDefinition`: static template data - stats, footprint, behavior
//! - `UnitId`: identifier for a live unit on the board
//! - `UnitInstance`: runtime unit state - origin, health, flags
//! - `DefinitionRegistry`: definition lookup and stat resolution

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{DefId, Footprint, UnitDefinition, UnitStats, DEFAULT_STAT};
pub use instance::{UnitId, UnitInstance};
pub use registry::DefinitionRegistry;
