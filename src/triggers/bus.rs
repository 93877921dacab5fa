//! The global trigger bus.
//!
//! Listeners subscribe to a trigger type and are invoked for every emission
//! of that type, regardless of which unit is the subject. Per-definition
//! reactions belong in [`super::UnitBehavior`]; the bus is for game-wide
//! rules and external observers.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::units::UnitInstance;

use super::context::GameContext;
use super::event::TriggerType;

/// A bus listener. Unlike definition handlers these are owned by the bus,
/// so plain boxes suffice.
pub type Listener = Box<dyn Fn(&mut GameContext<'_>, &UnitInstance)>;

/// Receipt returned by [`EventBus::subscribe`]; pass it back to
/// [`EventBus::unsubscribe`] to detach the listener.
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    trigger: TriggerType,
    id: u64,
}

/// Dispatches trigger emissions to subscribed listeners.
#[derive(Default)]
pub struct EventBus {
    listeners: FxHashMap<TriggerType, Vec<(u64, Listener)>>,
    next_id: u64,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for a trigger type. Listeners for the same
    /// trigger run in subscription order.
    pub fn subscribe(
        &mut self,
        trigger: TriggerType,
        listener: impl Fn(&mut GameContext<'_>, &UnitInstance) + 'static,
    ) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners
            .entry(trigger.clone())
            .or_default()
            .push((id, Box::new(listener)));
        trace!(%trigger, id, "listener subscribed");
        Subscription { trigger, id }
    }

    /// Detach a listener. Returns `false` when the subscription was already
    /// removed (double unsubscribe is harmless).
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let Some(entries) = self.listeners.get_mut(&subscription.trigger) else {
            return false;
        };
        let Some(index) = entries.iter().position(|(id, _)| *id == subscription.id) else {
            return false;
        };
        entries.remove(index);
        if entries.is_empty() {
            self.listeners.remove(&subscription.trigger);
        }
        true
    }

    /// Invoke every listener for a trigger, in subscription order.
    pub fn emit(&self, trigger: &TriggerType, ctx: &mut GameContext<'_>, subject: &UnitInstance) {
        let Some(entries) = self.listeners.get(trigger) else {
            return;
        };
        trace!(%trigger, subject = %subject.id, listeners = entries.len(), "emitting trigger");
        for (_, listener) in entries {
            listener(ctx, subject);
        }
    }

    /// Number of listeners currently attached for a trigger.
    #[must_use]
    pub fn listener_count(&self, trigger: &TriggerType) -> usize {
        self.listeners.get(trigger).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut triggers: Vec<String> = self
            .listeners
            .iter()
            .map(|(trigger, entries)| format!("{trigger} x{}", entries.len()))
            .collect();
        triggers.sort_unstable();
        f.debug_struct("EventBus")
            .field("listeners", &triggers)
            .finish()
    }
}
