//! Per-definition trigger behaviors.
//!
//! A `UnitBehavior` maps trigger types to handlers that run for every
//! instance of a definition when the instance is the subject of the trigger.
//! Handlers are shared via `Arc` so cloning a definition (or the registry)
//! never duplicates them.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::units::UnitInstance;

use super::context::GameContext;
use super::event::TriggerType;

/// A trigger handler: receives the mutation context and a copy of the
/// subject unit as it was when the trigger fired.
pub type TriggerHandler = Arc<dyn Fn(&mut GameContext<'_>, &UnitInstance)>;

/// Trigger handlers attached to a unit definition.
#[derive(Clone, Default)]
pub struct UnitBehavior {
    handlers: FxHashMap<TriggerType, Vec<TriggerHandler>>,
}

impl UnitBehavior {
    /// Empty behavior: reacts to nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a handler for a trigger (builder pattern). Multiple handlers
    /// for the same trigger run in attachment order.
    #[must_use]
    pub fn on(
        mut self,
        trigger: TriggerType,
        handler: impl Fn(&mut GameContext<'_>, &UnitInstance) + 'static,
    ) -> Self {
        self.handlers
            .entry(trigger)
            .or_default()
            .push(Arc::new(handler));
        self
    }

    /// Handlers registered for a trigger, in attachment order.
    #[must_use]
    pub fn handlers_for(&self, trigger: &TriggerType) -> &[TriggerHandler] {
        self.handlers
            .get(trigger)
            .map_or(&[], Vec::as_slice)
    }

    /// Does this behavior react to anything at all?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for UnitBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut triggers: Vec<String> = self
            .handlers
            .iter()
            .map(|(trigger, handlers)| format!("{trigger} x{}", handlers.len()))
            .collect();
        triggers.sort_unstable();
        f.debug_struct("UnitBehavior")
            .field("handlers", &triggers)
            .finish()
    }
}
