//! Simulation owner for the authoritative [`embers_core::GameState`].
//!
//! Every engine call runs to completion inside [`Simulation::execute`]; the
//! events it buffered are then drained and published in order, so observers
//! never see a half-applied action. Cooperative movement lives in
//! [`travel`].

mod travel;

use embers_core::{
    ActorId, Archetype, AttackError, AttackReport, BuildError, ErrorContext, GameEngine,
    GameError, GamePhase, GameState, MoveError, Position, StepReport, TargetRef, TurnError,
    TurnHandoff,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::events::{EventBus, Notice};
use crate::oracle::OracleManager;

pub use travel::TravelOutcome;

/// Tunables for the cooperative movement tasks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickSettings {
    /// Simulated seconds per movement tick.
    pub tick: f32,
    /// Upper bound on ticks a single travel may take.
    pub max_ticks_per_move: u32,
}

impl Default for TickSettings {
    fn default() -> Self {
        Self {
            tick: 0.1,
            max_ticks_per_move: 600,
        }
    }
}

/// Single owner of the match: state, oracles, AI randomness and event bus.
pub struct Simulation {
    state: GameState,
    oracles: OracleManager,
    bus: EventBus,
    rng: StdRng,
    ticks: TickSettings,
}

impl Simulation {
    pub fn new(
        state: GameState,
        oracles: OracleManager,
        bus: EventBus,
        ticks: TickSettings,
    ) -> Self {
        let rng = StdRng::seed_from_u64(state.game_seed);
        Self {
            state,
            oracles,
            bus,
            rng,
            ticks,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn oracles(&self) -> &OracleManager {
        &self.oracles
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn ticks(&self) -> TickSettings {
        self.ticks
    }

    /// Randomness for AI choices. Rule rolls never draw from here.
    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn is_over(&self) -> bool {
        self.state.phase() == GamePhase::Postgame
    }

    pub fn current_actor(&self) -> Option<ActorId> {
        self.state.turn.current()
    }

    /// True while `actor` heads the queue of a running game.
    pub fn is_acting(&self, actor: ActorId) -> bool {
        self.state.turn.is_running() && self.state.turn.current() == Some(actor)
    }

    /// Runs one engine operation and publishes the events it produced.
    pub fn execute<R>(&mut self, op: impl FnOnce(&mut GameEngine<'_>) -> R) -> R {
        let env = self.oracles.env();
        let mut engine = GameEngine::new(&mut self.state, env);
        let result = op(&mut engine);
        let events = engine.take_events();
        for event in events {
            self.bus.publish(event);
        }
        result
    }

    pub fn start(&mut self) -> Result<ActorId, TurnError> {
        let head = self.execute(|engine| engine.start())?;
        info!(actor = %head, "match started");
        Ok(head)
    }

    pub fn toggle_pause(&mut self) -> Result<GamePhase, TurnError> {
        let phase = self.execute(|engine| engine.toggle_pause())?;
        info!(%phase, "phase toggled");
        Ok(phase)
    }

    /// Ends the head's turn and activates the next actor.
    pub fn advance(&mut self) -> Result<TurnHandoff, TurnError> {
        let handoff = self.execute(|engine| engine.advance())?;
        info!(
            ended = %handoff.ended,
            started = %handoff.started,
            controller = %handoff.controller,
            turn = self.state.turn.turn_number,
            "turn handed off"
        );
        Ok(handoff)
    }

    pub fn attack(
        &mut self,
        attacker: ActorId,
        target: TargetRef,
    ) -> Result<AttackReport, AttackError> {
        let result = self.execute(|engine| engine.attack(attacker, target));
        match &result {
            Ok(report) => debug!(
                %attacker,
                %target,
                weapon = %report.weapon,
                damage = report.total_damage(),
                killed = report.killed,
                "attack resolved"
            ),
            Err(error) => self.report_failure(attacker, error),
        }
        result
    }

    pub fn build(&mut self, builder: ActorId, archetype: Archetype) -> Result<ActorId, BuildError> {
        let result = self.execute(|engine| engine.build(builder, archetype));
        match &result {
            Ok(unit) => info!(%builder, %unit, %archetype, "bot built"),
            Err(error) => self.report_failure(builder, error),
        }
        result
    }

    pub fn switch_weapon(&mut self, actor: ActorId) -> Result<String, AttackError> {
        let result = self.execute(|engine| engine.switch_weapon(actor));
        match &result {
            Ok(weapon) => debug!(%actor, %weapon, "weapon switched"),
            Err(error) => self.report_failure(actor, error),
        }
        result
    }

    pub fn move_to(&mut self, actor: ActorId, destination: Position) -> Result<(), MoveError> {
        let result = self.execute(|engine| engine.move_to(actor, destination));
        if let Err(error) = &result {
            self.report_failure(actor, error);
        }
        result
    }

    pub fn halt(&mut self, actor: ActorId) -> Result<(), MoveError> {
        self.execute(|engine| engine.halt(actor))
    }

    /// Advances the acting mover by one tick.
    pub fn step(&mut self) -> Option<StepReport> {
        let dt = self.ticks.tick;
        self.execute(|engine| engine.step(dt))
    }

    /// Logs a rejected action and tells subscribers about it.
    pub fn report_failure<E>(&self, actor: ActorId, error: &E)
    where
        E: GameError + std::fmt::Display,
    {
        let mut context = ErrorContext::new(self.state.turn.nonce).with_actor(actor);
        if let Some(position) = self.state.entities.actor(actor).map(|a| a.position) {
            context = context.with_position(position);
        }
        let severity = error.severity();
        if severity.is_internal() {
            warn!(code = error.error_code(), %context, "action failed: {}", error);
        } else {
            debug!(code = error.error_code(), %context, "action failed: {}", error);
        }
        self.bus.publish(Notice::action_failed(actor, error));
    }

    pub fn publish_notice(&self, notice: Notice) {
        self.bus.publish(notice);
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("phase", &self.state.phase())
            .field("turn", &self.state.turn.turn_number)
            .field("queue", &self.state.turn.queue)
            .field("oracles", &self.oracles)
            .finish_non_exhaustive()
    }
}
