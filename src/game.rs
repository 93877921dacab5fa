//! The game facade: state, definitions, and trigger bus in one place.
//!
//! `Game` owns the pieces the lower layers keep separate and wires them
//! together: actions go through the dispatcher, the resulting
//! [`EngineEvent`]s are translated into trigger emissions, and anything the
//! handlers do in response is cascaded back through the same translation.

use tracing::{debug, warn};

use crate::core::{Board, Coordinate, GameAction, GameState, PlayerId};
use crate::history;
use crate::rules::{self, EngineEvent};
use crate::triggers::{EventBus, GameContext, Subscription, TriggerType, UnitBehavior};
use crate::units::{DefId, DefinitionRegistry, UnitDefinition, UnitId, UnitInstance};

/// Trigger cascades deeper than this are cut off. A handler that damages a
/// unit whose death handler damages another unit is fine; an unbounded
/// ping-pong between handlers is not.
const MAX_TRIGGER_CASCADE: usize = 8;

/// A running game: state, definition registry, and trigger bus.
pub struct Game {
    state: GameState,
    registry: DefinitionRegistry,
    bus: EventBus,
}

impl Game {
    /// Create a game on the given board.
    #[must_use]
    pub fn new(board: Board, player_count: usize) -> Self {
        Self {
            state: GameState::new(board, player_count),
            registry: DefinitionRegistry::new(),
            bus: EventBus::new(),
        }
    }

    /// Read-only view of the state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The definition registry.
    #[must_use]
    pub fn registry(&self) -> &DefinitionRegistry {
        &self.registry
    }

    /// Register a unit definition. Panics on a duplicate id.
    pub fn register_definition(&mut self, def: UnitDefinition) {
        self.registry.register(def);
    }

    /// Spawn a unit of a registered definition.
    ///
    /// Returns `None` when the definition is unknown, the owner is unknown,
    /// or the placement is invalid.
    pub fn add_unit(&mut self, owner: PlayerId, def_id: DefId, origin: Coordinate) -> Option<UnitId> {
        let Some(def) = self.registry.get(def_id) else {
            debug!(%def_id, "add_unit ignored: unknown definition");
            return None;
        };
        let def = def.clone();
        self.state.add_unit(&def, owner, origin)
    }

    // === Actions ===

    /// Apply one action and run the trigger cascade it causes.
    ///
    /// Returns every event observed, dispatcher-produced and
    /// handler-produced alike, in emission order.
    pub fn dispatch(&mut self, action: &GameAction) -> Vec<EngineEvent> {
        let events = rules::apply(&mut self.state, &self.registry, action);
        self.run_cascade(events)
    }

    /// Undo the most recent action. Returns `false` when there is nothing
    /// to undo. Undo and redo do not fire triggers.
    pub fn undo(&mut self) -> bool {
        history::undo(&mut self.state)
    }

    /// Redo the most recently undone action. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        history::redo(&mut self.state)
    }

    // === Selection ===

    /// Select the unit at a square, subject to the ownership-and-turn gate.
    pub fn select_by_square(&mut self, coord: Coordinate) {
        self.state.select_by_square(coord);
    }

    /// Legal destinations for the selected unit, or empty when nothing is
    /// selected.
    #[must_use]
    pub fn legal_moves_of_selected(&self) -> Vec<Coordinate> {
        self.selected_instance()
            .map(|unit| rules::legal_moves(&self.state, &self.registry, unit))
            .unwrap_or_default()
    }

    /// Legal attack targets for the selected unit, or empty when nothing is
    /// selected.
    #[must_use]
    pub fn legal_attacks_of_selected(&self) -> Vec<UnitId> {
        self.selected_instance()
            .map(|unit| rules::legal_attack_targets(&self.state, &self.registry, unit))
            .unwrap_or_default()
    }

    fn selected_instance(&self) -> Option<&UnitInstance> {
        self.state.selected_unit().and_then(|id| self.state.unit(id))
    }

    // === Trigger surface ===

    /// Attach a bus listener for a trigger type.
    pub fn subscribe(
        &mut self,
        trigger: TriggerType,
        listener: impl Fn(&mut GameContext<'_>, &UnitInstance) + 'static,
    ) -> Subscription {
        self.bus.subscribe(trigger, listener)
    }

    /// Detach a bus listener.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.bus.unsubscribe(subscription)
    }

    /// Emit a trigger for a unit outside the action flow, then cascade
    /// whatever the handlers do. This is the entry point for triggers the
    /// dispatcher never produces itself, like [`TriggerType::CardDrawn`],
    /// [`TriggerType::UnitInRange`], and custom triggers.
    pub fn emit(&mut self, trigger: &TriggerType, unit_id: UnitId) -> Vec<EngineEvent> {
        let Some(subject) = self.state.unit(unit_id).cloned() else {
            debug!(unit = %unit_id, %trigger, "emit ignored: no such unit");
            return Vec::new();
        };
        let Self { state, registry, bus } = self;
        let events = run_trigger(bus, state, registry, trigger, &subject);
        self.run_cascade(events)
    }

    /// Translate a batch of events into trigger emissions, then keep
    /// translating whatever the handlers produce, up to the cascade cap.
    fn run_cascade(&mut self, initial: Vec<EngineEvent>) -> Vec<EngineEvent> {
        let Self { state, registry, bus } = self;
        let mut observed = Vec::new();
        let mut pending = initial;
        let mut depth = 0;

        while !pending.is_empty() {
            if depth >= MAX_TRIGGER_CASCADE {
                warn!(depth, "trigger cascade cut off");
                observed.extend(pending);
                break;
            }
            depth += 1;

            let mut follow_ups = Vec::new();
            for event in &pending {
                follow_ups.extend(emit_for_event(bus, state, registry, event));
            }
            observed.append(&mut pending);
            pending = follow_ups;
        }

        observed
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("turn", &self.state.turn)
            .field("units", &self.state.unit_count())
            .field("definitions", &self.registry.len())
            .field("bus", &self.bus)
            .finish()
    }
}

/// Map one engine event onto trigger emissions.
///
/// Subject-facing triggers go to the unit the event is about; bystander
/// variants fan out to every other live unit. Subjects that are no longer
/// alive (killed earlier in the same batch) are skipped, except for death
/// itself, whose subject is the carried instance.
fn emit_for_event(
    bus: &EventBus,
    state: &mut GameState,
    registry: &DefinitionRegistry,
    event: &EngineEvent,
) -> Vec<EngineEvent> {
    match event {
        EngineEvent::UnitMoved { unit_id, .. } => {
            let Some(subject) = state.unit(*unit_id).cloned() else {
                return Vec::new();
            };
            run_trigger(bus, state, registry, &TriggerType::UnitEnteredSquare, &subject)
        }

        EngineEvent::UnitDamaged { unit_id, first, .. } => {
            let mut out = Vec::new();
            if let Some(subject) = state.unit(*unit_id).cloned() {
                if *first {
                    out.extend(run_trigger(
                        bus,
                        state,
                        registry,
                        &TriggerType::FirstDamageTaken,
                        &subject,
                    ));
                }
                out.extend(run_trigger(
                    bus,
                    state,
                    registry,
                    &TriggerType::AnyDamageTaken,
                    &subject,
                ));
            }

            let bystanders: Vec<UnitInstance> = state
                .units_in_order()
                .filter(|u| u.id != *unit_id)
                .cloned()
                .collect();
            for other in &bystanders {
                out.extend(run_trigger(
                    bus,
                    state,
                    registry,
                    &TriggerType::OtherUnitDamaged,
                    other,
                ));
            }
            out
        }

        EngineEvent::UnitDied { unit } => {
            let mut out = run_trigger(bus, state, registry, &TriggerType::UnitDied, unit);

            let bystanders: Vec<UnitInstance> = state.units_in_order().cloned().collect();
            for other in &bystanders {
                out.extend(run_trigger(
                    bus,
                    state,
                    registry,
                    &TriggerType::OtherUnitDied,
                    other,
                ));
            }
            out
        }

        EngineEvent::TurnEnded { player } => {
            let subjects: Vec<UnitInstance> = state.units_owned_by(*player).cloned().collect();
            let mut out = Vec::new();
            for unit in &subjects {
                out.extend(run_trigger(bus, state, registry, &TriggerType::TurnEnded, unit));
            }
            out
        }
    }
}

/// Run one trigger for one subject: bus listeners first, then the subject
/// definition's own handlers.
fn run_trigger(
    bus: &EventBus,
    state: &mut GameState,
    registry: &DefinitionRegistry,
    trigger: &TriggerType,
    subject: &UnitInstance,
) -> Vec<EngineEvent> {
    let behavior: Option<&UnitBehavior> = registry.get(subject.def_id).map(|def| &def.behavior);

    let mut ctx = GameContext::new(state, registry);
    bus.emit(trigger, &mut ctx, subject);
    if let Some(behavior) = behavior {
        for handler in behavior.handlers_for(trigger) {
            handler(&mut ctx, subject);
        }
    }
    ctx.into_events()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::units::UnitStats;

    fn game_with_soldiers() -> (Game, UnitId, UnitId) {
        let mut game = Game::new(Board::open(12, 12), 2);
        game.register_definition(
            UnitDefinition::new(DefId::new(0), "Soldier")
                .with_stats(UnitStats::default().with_max_health(2)),
        );
        let a = game.add_unit(PlayerId::new(0), DefId::new(0), Coordinate::new(3, 3)).unwrap();
        let b = game.add_unit(PlayerId::new(1), DefId::new(0), Coordinate::new(3, 4)).unwrap();
        (game, a, b)
    }

    #[test]
    fn test_add_unit_unknown_definition_is_noop() {
        let mut game = Game::new(Board::open(4, 4), 1);
        assert!(game.add_unit(PlayerId::new(0), DefId::new(9), Coordinate::new(0, 0)).is_none());
        assert_eq!(game.state().unit_count(), 0);
    }

    #[test]
    fn test_move_fires_unit_entered_square() {
        let (mut game, a, _) = game_with_soldiers();
        let entered = Rc::new(Cell::new(false));
        let flag = Rc::clone(&entered);
        game.subscribe(TriggerType::UnitEnteredSquare, move |_, subject| {
            assert_eq!(subject.origin, Coordinate::new(2, 3));
            flag.set(true);
        });

        game.dispatch(&GameAction::Move { unit_id: a, to: Coordinate::new(2, 3) });
        assert!(entered.get());
    }

    #[test]
    fn test_first_and_any_damage_triggers() {
        let (mut game, a, b) = game_with_soldiers();
        let firsts = Rc::new(Cell::new(0));
        let anys = Rc::new(Cell::new(0));
        let f = Rc::clone(&firsts);
        game.subscribe(TriggerType::FirstDamageTaken, move |_, _| f.set(f.get() + 1));
        let any = Rc::clone(&anys);
        game.subscribe(TriggerType::AnyDamageTaken, move |_, _| any.set(any.get() + 1));

        game.dispatch(&GameAction::Attack { attacker_id: a, target_id: b });
        game.dispatch(&GameAction::Attack { attacker_id: a, target_id: b });

        // Second attack kills b: the subject is gone, so only the first
        // attack reaches damage handlers.
        assert_eq!(firsts.get(), 1);
        assert_eq!(anys.get(), 1);
        assert!(game.state().unit(b).is_none());
    }

    #[test]
    fn test_death_fans_out_to_bystanders() {
        let (mut game, a, b) = game_with_soldiers();
        let died = Rc::new(Cell::new(0));
        let other_died = Rc::new(Cell::new(0));
        let d = Rc::clone(&died);
        game.subscribe(TriggerType::UnitDied, move |_, subject| {
            assert_eq!(subject.health, Some(0));
            d.set(d.get() + 1);
        });
        let od = Rc::clone(&other_died);
        game.subscribe(TriggerType::OtherUnitDied, move |_, _| od.set(od.get() + 1));

        game.dispatch(&GameAction::Attack { attacker_id: a, target_id: b });
        game.dispatch(&GameAction::Attack { attacker_id: a, target_id: b });

        assert_eq!(died.get(), 1);
        // Only `a` survives to witness the death.
        assert_eq!(other_died.get(), 1);
    }

    #[test]
    fn test_turn_ended_goes_to_ending_players_units() {
        let (mut game, a, _) = game_with_soldiers();
        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        game.subscribe(TriggerType::TurnEnded, move |_, subject| {
            log.borrow_mut().push(subject.id);
        });

        game.dispatch(&GameAction::EndTurn);
        // Player 0 ended; only their unit is a subject.
        assert_eq!(*seen.borrow(), vec![a]);
    }

    #[test]
    fn test_definition_behavior_runs_for_subject_only() {
        let mut game = Game::new(Board::open(8, 8), 2);
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        game.register_definition(
            UnitDefinition::new(DefId::new(0), "Martyr")
                .with_stats(UnitStats::default().with_max_health(1))
                .with_behavior(UnitBehavior::new().on(TriggerType::AnyDamageTaken, move |_, _| {
                    h.set(h.get() + 1)
                })),
        );
        game.register_definition(
            UnitDefinition::new(DefId::new(1), "Brute")
                .with_stats(UnitStats::default().with_max_health(5)),
        );

        let martyr = game.add_unit(PlayerId::new(0), DefId::new(0), Coordinate::new(2, 2)).unwrap();
        let brute = game.add_unit(PlayerId::new(1), DefId::new(1), Coordinate::new(2, 3)).unwrap();

        // Damage the brute: the martyr's behavior must not run.
        game.dispatch(&GameAction::Attack { attacker_id: martyr, target_id: brute });
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_handler_damage_cascades() {
        let mut game = Game::new(Board::open(8, 8), 2);
        game.register_definition(
            UnitDefinition::new(DefId::new(0), "Soldier")
                .with_stats(UnitStats::default().with_max_health(2)),
        );

        let a = game.add_unit(PlayerId::new(0), DefId::new(0), Coordinate::new(3, 3)).unwrap();
        let b = game.add_unit(PlayerId::new(1), DefId::new(0), Coordinate::new(3, 4)).unwrap();

        // Retaliation: any damage to anyone reflects one damage back onto a.
        game.subscribe(TriggerType::AnyDamageTaken, move |ctx, subject| {
            if subject.id != a {
                ctx.damage_unit(a, 1);
            }
        });

        game.dispatch(&GameAction::Attack { attacker_id: a, target_id: b });

        assert_eq!(game.state().unit(b).unwrap().health, Some(1));
        assert_eq!(game.state().unit(a).unwrap().health, Some(1));
    }

    #[test]
    fn test_cascade_is_capped() {
        let mut game = Game::new(Board::open(8, 8), 2);
        game.register_definition(
            UnitDefinition::new(DefId::new(0), "Anvil")
                .with_stats(UnitStats::default().with_max_health(1_000)),
        );
        let a = game.add_unit(PlayerId::new(0), DefId::new(0), Coordinate::new(1, 1)).unwrap();
        let b = game.add_unit(PlayerId::new(1), DefId::new(0), Coordinate::new(1, 2)).unwrap();

        // Ping-pong: damage to either reflects onto the other, forever.
        game.subscribe(TriggerType::AnyDamageTaken, move |ctx, subject| {
            let next = if subject.id == a { b } else { a };
            ctx.damage_unit(next, 1);
        });

        game.dispatch(&GameAction::Attack { attacker_id: a, target_id: b });

        // The cap stopped the loop and both units are still alive.
        assert!(game.state().unit(a).is_some());
        assert!(game.state().unit(b).is_some());
    }

    #[test]
    fn test_emit_custom_trigger() {
        let (mut game, a, _) = game_with_soldiers();
        let drawn = Rc::new(Cell::new(0));
        let d = Rc::clone(&drawn);
        game.subscribe(TriggerType::CardDrawn, move |_, _| d.set(d.get() + 1));

        game.emit(&TriggerType::CardDrawn, a);
        assert_eq!(drawn.get(), 1);

        // Unknown unit: ignored.
        game.emit(&TriggerType::CardDrawn, UnitId::new(99));
        assert_eq!(drawn.get(), 1);
    }

    #[test]
    fn test_selection_legality_helpers() {
        let (mut game, _, b) = game_with_soldiers();

        // Nothing selected.
        assert!(game.legal_moves_of_selected().is_empty());
        assert!(game.legal_attacks_of_selected().is_empty());

        game.select_by_square(Coordinate::new(3, 3));
        let moves = game.legal_moves_of_selected();
        assert_eq!(moves.len(), 3); // (3,4) occupied by b
        assert_eq!(game.legal_attacks_of_selected(), vec![b]);
    }

    #[test]
    fn test_undo_redo_through_facade() {
        let (mut game, a, _) = game_with_soldiers();

        game.dispatch(&GameAction::Move { unit_id: a, to: Coordinate::new(2, 3) });
        assert!(game.undo());
        assert_eq!(game.state().unit(a).unwrap().origin, Coordinate::new(3, 3));
        assert!(game.redo());
        assert_eq!(game.state().unit(a).unwrap().origin, Coordinate::new(2, 3));
    }
}
