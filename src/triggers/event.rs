//! Trigger event taxonomy.

/// The kinds of events the trigger bus distributes.
///
/// The `Other*` variants are the same underlying events fanned out to
/// bystanders: when a unit dies, that unit's own handlers see
/// [`TriggerType::UnitDied`] while every other live unit sees
/// [`TriggerType::OtherUnitDied`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TriggerType {
    /// A unit arrived on a new square.
    UnitEnteredSquare,
    /// The subject unit died.
    UnitDied,
    /// The current player's turn ended.
    TurnEnded,
    /// A unit other than the subject died.
    OtherUnitDied,
    /// A unit other than the subject took damage.
    OtherUnitDamaged,
    /// The subject took damage for the first time in its life.
    FirstDamageTaken,
    /// The subject took damage (first or not).
    AnyDamageTaken,
    /// A card was drawn. Emitted by integration code, not the dispatcher.
    CardDrawn,
    /// A unit came within range of the subject. Emitted by integration code.
    UnitInRange,
    /// Application-defined trigger, keyed by name.
    Custom(String),
}

impl std::fmt::Display for TriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnitEnteredSquare => write!(f, "unit-entered-square"),
            Self::UnitDied => write!(f, "unit-died"),
            Self::TurnEnded => write!(f, "turn-ended"),
            Self::OtherUnitDied => write!(f, "other-unit-died"),
            Self::OtherUnitDamaged => write!(f, "other-unit-damaged"),
            Self::FirstDamageTaken => write!(f, "first-damage-taken"),
            Self::AnyDamageTaken => write!(f, "any-damage-taken"),
            Self::CardDrawn => write!(f, "card-drawn"),
            Self::UnitInRange => write!(f, "unit-in-range"),
            Self::Custom(name) => write!(f, "custom:{name}"),
        }
    }
}
