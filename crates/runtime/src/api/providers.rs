//! Asynchronous abstraction for sourcing human intent.
//!
//! Runtime users plug in [`PlayerProvider`] implementations so player-aligned
//! turns can be driven by a UI, a network peer, scripted fixtures or an
//! autopilot. Enemy turns are always planned by the built-in AI.
use std::collections::VecDeque;

use async_trait::async_trait;
use embers_core::{ActorId, GameState};
use tokio::sync::Mutex;

use super::commands::PlayerCommand;
use super::errors::Result;

/// Trait for providing commands for human-controlled actors.
///
/// The runtime keeps asking for commands until the provider answers
/// [`PlayerCommand::EndTurn`] or the per-turn command bound is reached.
#[async_trait]
pub trait PlayerProvider: Send + Sync {
    /// Next command for `actor`, given a read-only view of the match.
    async fn next_command(&self, actor: ActorId, state: &GameState) -> Result<PlayerCommand>;
}

/// Ends every turn immediately. Useful for tests and AI-only showcases.
pub struct EndTurnProvider;

#[async_trait]
impl PlayerProvider for EndTurnProvider {
    async fn next_command(&self, _actor: ActorId, _state: &GameState) -> Result<PlayerCommand> {
        Ok(PlayerCommand::EndTurn)
    }
}

/// Replays a fixed list of commands, then ends every turn.
#[derive(Default)]
pub struct ScriptedProvider {
    script: Mutex<VecDeque<PlayerCommand>>,
}

impl ScriptedProvider {
    pub fn new(commands: impl IntoIterator<Item = PlayerCommand>) -> Self {
        Self {
            script: Mutex::new(commands.into_iter().collect()),
        }
    }

    pub async fn remaining(&self) -> usize {
        self.script.lock().await.len()
    }
}

#[async_trait]
impl PlayerProvider for ScriptedProvider {
    async fn next_command(&self, _actor: ActorId, _state: &GameState) -> Result<PlayerCommand> {
        let mut script = self.script.lock().await;
        Ok(script.pop_front().unwrap_or(PlayerCommand::EndTurn))
    }
}
