//! Definition registry.
//!
//! The `DefinitionRegistry` stores every unit definition for a game,
//! configured once at startup and read-only afterwards. Movement and combat
//! rules resolve ranges and damage through it; a definition that has gone
//! missing resolves to the documented defaults rather than failing.

use rustc_hash::FxHashMap;

use super::definition::{DefId, UnitDefinition, DEFAULT_STAT};

/// Registry of unit definitions, keyed by `DefId`.
///
/// ## Example
///
/// ```
/// use tactics_engine::units::{DefId, DefinitionRegistry, UnitDefinition, UnitStats};
///
/// let mut registry = DefinitionRegistry::new();
/// registry.register(
///     UnitDefinition::new(DefId::new(1), "Archer")
///         .with_stats(UnitStats::default().with_attack_range(2)),
/// );
///
/// assert_eq!(registry.attack_range(DefId::new(1)), 2);
/// assert_eq!(registry.attack_range(DefId::new(99)), 1); // default
/// ```
#[derive(Clone, Debug, Default)]
pub struct DefinitionRegistry {
    defs: FxHashMap<DefId, UnitDefinition>,
}

impl DefinitionRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition.
    ///
    /// Panics if a definition with the same ID already exists; definitions
    /// are configuration and duplicate ids are a setup bug.
    pub fn register(&mut self, def: UnitDefinition) {
        if self.defs.contains_key(&def.id) {
            panic!("Definition with ID {} already registered", def.id);
        }
        self.defs.insert(def.id, def);
    }

    /// Get a definition by ID.
    #[must_use]
    pub fn get(&self, id: DefId) -> Option<&UnitDefinition> {
        self.defs.get(&id)
    }

    /// Check if a definition ID is registered.
    #[must_use]
    pub fn contains(&self, id: DefId) -> bool {
        self.defs.contains_key(&id)
    }

    /// Number of registered definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Iterate over all definitions.
    pub fn iter(&self) -> impl Iterator<Item = &UnitDefinition> {
        self.defs.values()
    }

    // === Stat resolution ===
    //
    // Missing definitions resolve like missing stats. The dispatcher and the
    // legal-move calculator share these lookups so legality and application
    // can never disagree about a unit's reach.

    /// Movement range for a definition, defaulting when absent.
    #[must_use]
    pub fn move_range(&self, id: DefId) -> i32 {
        self.get(id).map_or(DEFAULT_STAT, UnitDefinition::move_range)
    }

    /// Attack range for a definition, defaulting when absent.
    #[must_use]
    pub fn attack_range(&self, id: DefId) -> i32 {
        self.get(id).map_or(DEFAULT_STAT, UnitDefinition::attack_range)
    }

    /// Attack damage for a definition, defaulting when absent.
    #[must_use]
    pub fn attack_damage(&self, id: DefId) -> i32 {
        self.get(id).map_or(DEFAULT_STAT, UnitDefinition::attack_damage)
    }
}
