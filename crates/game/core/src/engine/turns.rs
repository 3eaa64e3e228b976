use crate::events::GameEvent;
use crate::state::{ActorId, Alignment, Controller, GamePhase};

use super::{GameEngine, TurnError};

/// Result of rotating the turn queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnHandoff {
    pub ended: ActorId,
    pub started: ActorId,
    /// Who drives the new head.
    pub controller: Controller,
}

/// Turn scheduling methods for GameEngine.
impl<'a> GameEngine<'a> {
    /// Returns the actor taking its turn, if the queue is non-empty.
    pub fn current_actor(&self) -> Option<ActorId> {
        self.state.turn.current()
    }

    /// Adds an actor to the queue. The player commander always goes first;
    /// everyone else joins at the tail.
    pub fn register(&mut self, actor: ActorId) -> Result<(), TurnError> {
        if self.state.turn.contains(actor) {
            return Err(TurnError::AlreadyRegistered(actor));
        }
        if actor.is_player() {
            if self.state.phase() != GamePhase::Pregame {
                return Err(TurnError::PlayerAfterStart);
            }
            self.state.turn.queue.push_front(actor);
        } else {
            self.state.turn.queue.push_back(actor);
        }
        self.emit_sequence();
        Ok(())
    }

    /// Removes an actor from the queue.
    ///
    /// If the actor was the last one standing for its side, the game ends
    /// with the opposing side as winner. Removing the acting head hands the
    /// turn to the next actor.
    pub fn deregister(&mut self, actor: ActorId) -> Result<(), TurnError> {
        let index = self
            .state
            .turn
            .queue
            .iter()
            .position(|id| *id == actor)
            .ok_or(TurnError::NotRegistered(actor))?;
        self.state.turn.queue.remove(index);
        self.emit_sequence();

        if let Some(alignment) = self.state.entities.actor(actor).map(|a| a.alignment()) {
            self.check_side_defeated(alignment);
        }

        if index == 0 && self.state.turn.is_running() {
            if let Some(next) = self.state.turn.current() {
                self.begin_turn(next);
            }
        }
        Ok(())
    }

    /// Moves the match from pregame to running and activates the head.
    pub fn start(&mut self) -> Result<ActorId, TurnError> {
        let phase = self.state.phase();
        if phase != GamePhase::Pregame {
            return Err(TurnError::AlreadyStarted(phase));
        }
        let head = self.state.turn.current().ok_or(TurnError::EmptyQueue)?;
        self.set_phase(GamePhase::Running);
        self.begin_turn(head);
        Ok(head)
    }

    /// Switches between running and paused.
    pub fn toggle_pause(&mut self) -> Result<GamePhase, TurnError> {
        let next = match self.state.phase() {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            phase => return Err(TurnError::NotRunning(phase)),
        };
        self.set_phase(next);
        Ok(next)
    }

    /// Ends the head's turn, rotates it to the tail and starts the new head.
    pub fn advance(&mut self) -> Result<TurnHandoff, TurnError> {
        let phase = self.state.phase();
        if phase != GamePhase::Running {
            return Err(TurnError::NotRunning(phase));
        }
        let ended = self
            .state
            .turn
            .queue
            .pop_front()
            .ok_or(TurnError::EmptyQueue)?;
        self.end_turn(ended);
        self.state.turn.queue.push_back(ended);
        self.emit_sequence();

        // The queue held `ended`, so it is non-empty here.
        let started = self.state.turn.current().ok_or(TurnError::EmptyQueue)?;
        self.begin_turn(started);

        let controller = self
            .state
            .entities
            .actor(started)
            .map_or(Controller::Ai, |a| a.identity.controller());
        Ok(TurnHandoff {
            ended,
            started,
            controller,
        })
    }

    fn begin_turn(&mut self, actor: ActorId) {
        self.state.turn.turn_number += 1;
        let turn_number = self.state.turn.turn_number;

        let Some(state) = self.state.entities.actor_mut(actor) else {
            return;
        };
        state.start_turn();

        let attacks = state.fighter.as_ref().map(|f| f.attacks_remaining());
        let move_time = state.mover.as_ref().map(|m| m.move_time());
        let builds = state
            .builder
            .as_ref()
            .map(|b| (b.builds(), b.max_builds(), b.ledger()));

        self.emit(GameEvent::TurnStarted { actor, turn_number });
        if let Some(remaining) = attacks {
            self.emit(GameEvent::AttackCountChanged { actor, remaining });
        }
        if let Some(remaining) = move_time {
            self.emit(GameEvent::MoveTimeChanged { actor, remaining });
        }
        if let Some((builds, max_builds, ledger)) = builds {
            self.emit(GameEvent::BuildCountChanged {
                builder: actor,
                builds,
                max_builds,
            });
            self.refresh_build_ability(ledger);
        }
    }

    fn end_turn(&mut self, actor: ActorId) {
        if let Some(state) = self.state.entities.actor_mut(actor) {
            let was_moving = state.mover.as_ref().is_some_and(|m| m.is_moving());
            state.end_turn();
            let position = state.position;
            if was_moving {
                self.emit(GameEvent::MoveStateChanged {
                    actor,
                    moving: false,
                    position,
                });
            }
        }
        self.emit(GameEvent::TurnEnded { actor });
    }

    fn check_side_defeated(&mut self, alignment: Alignment) {
        let Some(winner) = alignment.opponent() else {
            return;
        };
        let entities = &self.state.entities;
        let standing = self.state.turn.queue.iter().any(|id| {
            entities.actor(*id).is_some_and(|a| {
                a.alignment() == alignment && a.is_alive() && a.identity.counts_toward_side()
            })
        });
        if !standing {
            self.end_game(winner);
        }
    }

    /// Declares the winner. Only the first call has an effect.
    fn end_game(&mut self, winner: Alignment) {
        if self.state.turn.winner.is_some() {
            return;
        }
        self.state.turn.winner = Some(winner);
        self.set_phase(GamePhase::Postgame);
        self.emit(GameEvent::GameEnded { winner });
    }

    fn set_phase(&mut self, phase: GamePhase) {
        self.state.turn.phase = phase;
        self.emit(GameEvent::GamePhaseChanged { phase });
    }

    fn emit_sequence(&mut self) {
        let queue = self.state.turn.queue.iter().copied().collect();
        self.emit(GameEvent::TurnSequenceChanged { queue });
    }
}
