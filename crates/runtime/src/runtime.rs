//! High-level runtime orchestrator.
//!
//! The runtime owns the [`Simulation`], asks the player provider or the AI
//! controller to play the head's turn, and hands the turn over afterwards.
//! A builder-based API wires oracles, scenario and providers together.

use embers_content::ScenarioSpec;
use embers_core::{
    ActorId, Alignment, Controller, GamePhase, GameState, TurnError,
};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::api::{PlayerCommand, PlayerProvider, Result, RuntimeError};
use crate::events::{Event, EventBus, Notice, Topic};
use crate::oracle::OracleManager;
use crate::providers::ai::{AiController, DEFAULT_MAX_DECISIONS};
use crate::scenario::{self, Roster};
use crate::simulation::{Simulation, TickSettings};

/// Runtime configuration shared across the orchestrator and the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Simulated seconds per movement tick.
    pub tick: f32,
    pub event_buffer_size: usize,
    /// Bound on AI decisions, and on player commands, per turn.
    pub max_decisions_per_turn: usize,
    pub max_ticks_per_move: u32,
    /// Match seed; drawn from entropy when absent.
    pub seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let ticks = TickSettings::default();
        Self {
            tick: ticks.tick,
            event_buffer_size: 256,
            max_decisions_per_turn: DEFAULT_MAX_DECISIONS,
            max_ticks_per_move: ticks.max_ticks_per_move,
            seed: None,
        }
    }
}

impl RuntimeConfig {
    fn validate(&self) -> Result<()> {
        if !(self.tick.is_finite() && self.tick > 0.0) {
            return Err(RuntimeError::InvalidConfig(format!(
                "tick must be a positive number of seconds, got {}",
                self.tick
            )));
        }
        if self.max_ticks_per_move == 0 {
            return Err(RuntimeError::InvalidConfig(
                "max_ticks_per_move must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// What one call to [`Runtime::play_turn`] did.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub actor: ActorId,
    pub controller: Controller,
    /// Commands or AI decisions taken during the turn.
    pub steps: usize,
    pub game_over: bool,
}

/// End-of-run report, suitable for printing as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub seed: u64,
    pub turns: u64,
    pub phase: GamePhase,
    pub winner: Option<Alignment>,
    pub survivors: Vec<SurvivorSummary>,
    pub crates_left: usize,
    pub pickups_left: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurvivorSummary {
    pub id: ActorId,
    pub name: String,
    pub alignment: Alignment,
    pub health: u32,
}

/// Main runtime that orchestrates a skirmish.
pub struct Runtime {
    sim: Simulation,
    player_provider: Option<Box<dyn PlayerProvider>>,
    ai: AiController,
    config: RuntimeConfig,
    roster: Option<Roster>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn state(&self) -> &GameState {
        self.sim.state()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Ids assigned by the scenario, when the runtime was built from one.
    pub fn roster(&self) -> Option<&Roster> {
        self.roster.as_ref()
    }

    /// A cloneable handle on the event bus.
    pub fn events(&self) -> EventBus {
        self.sim.bus().clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sim.bus().subscribe(topic)
    }

    /// Set the player command provider
    pub fn set_player_provider(&mut self, provider: impl PlayerProvider + 'static) {
        self.player_provider = Some(Box::new(provider));
    }

    /// Moves the match from pregame to running.
    pub fn start(&mut self) -> Result<ActorId> {
        Ok(self.sim.start()?)
    }

    pub fn toggle_pause(&mut self) -> Result<GamePhase> {
        Ok(self.sim.toggle_pause()?)
    }

    /// Plays the head's turn to completion and hands the turn over.
    ///
    /// Starts the match on first use.
    pub async fn play_turn(&mut self) -> Result<TurnOutcome> {
        if self.sim.phase() == GamePhase::Pregame {
            self.start()?;
        }
        let phase = self.sim.phase();
        if phase != GamePhase::Running {
            return Err(TurnError::NotRunning(phase).into());
        }

        let actor = self.sim.current_actor().ok_or(RuntimeError::NoActiveActors)?;
        let controller = self
            .sim
            .state()
            .entities
            .actor(actor)
            .map(|state| state.identity.controller())
            .ok_or(RuntimeError::NoActiveActors)?;

        let steps = match controller {
            Controller::Human => self.play_human_turn(actor).await?,
            Controller::Ai => {
                let ai = self.ai;
                ai.play_turn(&mut self.sim, actor).await.actions.len()
            }
        };

        if !self.sim.is_over() {
            self.sim.advance()?;
        }
        Ok(TurnOutcome {
            actor,
            controller,
            steps,
            game_over: self.sim.is_over(),
        })
    }

    async fn play_human_turn(&mut self, actor: ActorId) -> Result<usize> {
        let provider = self
            .player_provider
            .as_deref()
            .ok_or(RuntimeError::ProviderNotSet)?;
        let sim = &mut self.sim;
        let limit = self.config.max_decisions_per_turn;

        for issued in 0..limit {
            if !sim.is_acting(actor) {
                return Ok(issued);
            }
            let command = provider.next_command(actor, sim.state()).await?;
            debug!(%actor, ?command, "player command");
            match command {
                PlayerCommand::MoveTo(destination) => {
                    let outcome = sim.travel(actor, destination).await;
                    debug!(%actor, ?outcome, "player moved");
                }
                PlayerCommand::Attack(target) => {
                    let _ = sim.attack(actor, target);
                }
                PlayerCommand::Build(archetype) => {
                    let _ = sim.build(actor, archetype);
                }
                PlayerCommand::SwitchWeapon => {
                    let _ = sim.switch_weapon(actor);
                }
                PlayerCommand::EndTurn => return Ok(issued + 1),
            }
        }

        warn!(%actor, limit, "command bound reached; ending turn");
        sim.publish_notice(Notice::DecisionLimitReached {
            actor,
            decisions: limit,
        });
        Ok(limit)
    }

    /// Plays up to `max_turns` turns, stopping early when the game ends.
    /// Returns the winner, if any.
    pub async fn run(&mut self, max_turns: u64) -> Result<Option<Alignment>> {
        for _ in 0..max_turns {
            if self.sim.is_over() {
                break;
            }
            let outcome = self.play_turn().await?;
            if outcome.game_over {
                break;
            }
        }

        let winner = self.sim.state().turn.winner;
        match winner {
            Some(side) => info!(
                winner = %side,
                turns = self.sim.state().turn.turn_number,
                "game over"
            ),
            None => info!(
                turns = self.sim.state().turn.turn_number,
                "turn bound reached without a winner"
            ),
        }
        Ok(winner)
    }

    pub fn summary(&self) -> RunSummary {
        let state = self.sim.state();
        let survivors = state
            .entities
            .actors()
            .filter(|actor| actor.is_alive())
            .map(|actor| SurvivorSummary {
                id: actor.id(),
                name: actor.identity.name.clone(),
                alignment: actor.alignment(),
                health: actor.fighter.as_ref().map_or(0, |f| f.health()),
            })
            .collect();
        RunSummary {
            seed: state.game_seed,
            turns: state.turn.turn_number,
            phase: state.phase(),
            winner: state.turn.winner,
            survivors,
            crates_left: state.entities.crates().count(),
            pickups_left: state.entities.pickups().count(),
        }
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    scenario: Option<ScenarioSpec>,
    state: Option<GameState>,
    player_provider: Option<Box<dyn PlayerProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            scenario: None,
            state: None,
            player_provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Populate the match from a scenario.
    pub fn scenario(mut self, scenario: ScenarioSpec) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Provide a prepared pregame state instead of a scenario.
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set player command provider (optional until a human turn comes up)
    pub fn player_provider(mut self, provider: impl PlayerProvider + 'static) -> Self {
        self.player_provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<Runtime> {
        self.config.validate()?;
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;

        let (state, roster) = match (self.state, self.scenario) {
            (Some(state), _) => (state, None),
            (None, Some(spec)) => {
                let seed = self.config.seed.unwrap_or_else(rand::random);
                let (state, roster) = scenario::create_initial_state(&spec, &oracles, seed)?;
                (state, Some(roster))
            }
            (None, None) => return Err(RuntimeError::MissingScenario),
        };
        if state.turn.queue.is_empty() {
            return Err(RuntimeError::NoActiveActors);
        }

        info!(
            seed = state.game_seed,
            actors = state.turn.queue.len(),
            "runtime built"
        );

        let bus = EventBus::with_capacity(self.config.event_buffer_size);
        let ticks = TickSettings {
            tick: self.config.tick,
            max_ticks_per_move: self.config.max_ticks_per_move,
        };
        let sim = Simulation::new(state, oracles, bus, ticks);

        Ok(Runtime {
            sim,
            player_provider: self.player_provider,
            ai: AiController::new(self.config.max_decisions_per_turn),
            config: self.config,
            roster,
        })
    }
}
