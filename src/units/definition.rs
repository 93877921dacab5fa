//! Unit definitions - static unit data.
//!
//! A `UnitDefinition` holds the immutable template for a unit type: its
//! stats, the squares it occupies, and its trigger behaviors. Per-game
//! mutable data (position, current health) lives in `UnitInstance`.
//!
//! All stats are optional. Absent values resolve to documented defaults at
//! the point of use: ranges and attack damage default to 1, absent max
//! health means instances of the definition are undamageable.

use smallvec::{smallvec, SmallVec};

use crate::core::Coordinate;
use crate::triggers::UnitBehavior;

/// Move range, attack range, and attack damage all fall back to this when
/// the definition leaves the stat unset.
pub const DEFAULT_STAT: i32 = 1;

/// Unique identifier for a unit definition.
///
/// Identifies the unit *type* ("Soldier"), not an instance on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct DefId(pub u32);

impl DefId {
    /// Create a new definition ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for DefId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Def({})", self.0)
    }
}

/// Footprint offsets relative to a unit's origin square.
///
/// Almost every unit occupies a single square, so the one-element inline
/// capacity keeps the common case off the heap.
pub type Footprint = SmallVec<[Coordinate; 2]>;

/// Optional combat stats for a unit type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnitStats {
    /// Starting health. `None` means instances cannot lose health.
    pub max_health: Option<i32>,
    /// Damage dealt per attack. `None` resolves to [`DEFAULT_STAT`].
    pub attack: Option<i32>,
    /// Movement range in Manhattan distance. `None` resolves to [`DEFAULT_STAT`].
    pub move_range: Option<i32>,
    /// Attack range in Manhattan distance. `None` resolves to [`DEFAULT_STAT`].
    pub attack_range: Option<i32>,
}

impl UnitStats {
    /// Set starting health (builder pattern).
    #[must_use]
    pub const fn with_max_health(mut self, health: i32) -> Self {
        self.max_health = Some(health);
        self
    }

    /// Set attack damage (builder pattern).
    #[must_use]
    pub const fn with_attack(mut self, attack: i32) -> Self {
        self.attack = Some(attack);
        self
    }

    /// Set movement range (builder pattern).
    #[must_use]
    pub const fn with_move_range(mut self, range: i32) -> Self {
        self.move_range = Some(range);
        self
    }

    /// Set attack range (builder pattern).
    #[must_use]
    pub const fn with_attack_range(mut self, range: i32) -> Self {
        self.attack_range = Some(range);
        self
    }
}

/// Static unit definition.
///
/// ## Example
///
/// ```
/// use tactics_engine::units::{DefId, UnitDefinition, UnitStats};
///
/// let archer = UnitDefinition::new(DefId::new(1), "Archer")
///     .with_stats(UnitStats::default().with_max_health(2).with_attack_range(2));
///
/// assert_eq!(archer.stats.attack_range, Some(2));
/// assert_eq!(archer.stats.move_range, None); // resolves to 1 at use
/// ```
#[derive(Clone, Debug)]
pub struct UnitDefinition {
    /// Unique identifier for this definition.
    pub id: DefId,

    /// Display name, copied onto instances.
    pub name: String,

    /// Combat stats; all fields optional.
    pub stats: UnitStats,

    /// Squares the unit occupies, as offsets from its origin.
    /// Empty means the default single-square footprint.
    pub footprint: Footprint,

    /// Trigger behaviors for instances of this definition.
    pub behavior: UnitBehavior,
}

impl UnitDefinition {
    /// Create a new unit definition.
    #[must_use]
    pub fn new(id: DefId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            stats: UnitStats::default(),
            footprint: Footprint::new(),
            behavior: UnitBehavior::default(),
        }
    }

    /// Set the stats (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, stats: UnitStats) -> Self {
        self.stats = stats;
        self
    }

    /// Set the footprint offsets (builder pattern).
    #[must_use]
    pub fn with_footprint(mut self, offsets: impl IntoIterator<Item = Coordinate>) -> Self {
        self.footprint = offsets.into_iter().collect();
        self
    }

    /// Set the trigger behavior (builder pattern).
    #[must_use]
    pub fn with_behavior(mut self, behavior: UnitBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Footprint with the default applied: a unit with no declared offsets
    /// occupies exactly its origin square.
    #[must_use]
    pub fn resolved_footprint(&self) -> Footprint {
        if self.footprint.is_empty() {
            smallvec![Coordinate::new(0, 0)]
        } else {
            self.footprint.clone()
        }
    }

    /// Movement range with the default applied.
    #[must_use]
    pub fn move_range(&self) -> i32 {
        self.stats.move_range.unwrap_or(DEFAULT_STAT)
    }

    /// Attack range with the default applied.
    #[must_use]
    pub fn attack_range(&self) -> i32 {
        self.stats.attack_range.unwrap_or(DEFAULT_STAT)
    }

    /// Attack damage with the default applied.
    #[must_use]
    pub fn attack_damage(&self) -> i32 {
        self.stats.attack.unwrap_or(DEFAULT_STAT)
    }
}
