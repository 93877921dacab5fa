//! Trigger system: event taxonomy, the global bus, per-definition
//! behaviors, and the handler-facing mutation context.
//!
//! The dispatcher itself never talks to the bus; it reports
//! [`crate::rules::EngineEvent`]s and the game facade translates those into
//! trigger emissions, fanning bystander variants out to other units.

pub mod behavior;
pub mod bus;
pub mod context;
pub mod event;

pub use behavior::{TriggerHandler, UnitBehavior};
pub use bus::{EventBus, Listener, Subscription};
pub use context::GameContext;
pub use event::TriggerType;
