//! Read-only view of the match from one AI actor's point of view.
//!
//! The [`AiContext`] is the planner's blackboard: it borrows the state and
//! oracles for the duration of a single decision and answers the distance,
//! budget and target questions the evaluators ask. All distances are
//! squared.

use embers_core::{
    ActorId, ActorKind, ActorState, Alignment, CrateState, Env, GameState, PickupState, Position,
    ResourceCounts,
};

pub struct AiContext<'a> {
    /// The actor making the decision.
    pub actor: &'a ActorState,

    /// Read-only access to the current game state.
    pub state: &'a GameState,

    /// Read-only access to all game oracles.
    pub env: Env<'a>,
}

impl<'a> AiContext<'a> {
    /// Returns `None` when `actor` is not in the match.
    pub fn new(actor: ActorId, state: &'a GameState, env: Env<'a>) -> Option<Self> {
        let actor = state.entities.actor(actor)?;
        Some(Self { actor, state, env })
    }

    pub fn id(&self) -> ActorId {
        self.actor.id()
    }

    pub fn position(&self) -> Position {
        self.actor.position
    }

    pub fn attacks_remaining(&self) -> u32 {
        self.actor.attacks_remaining()
    }

    pub fn sqr_attack_range(&self) -> f32 {
        self.actor.sqr_attack_range()
    }

    pub fn move_time(&self) -> f32 {
        self.actor.move_time()
    }

    pub fn max_travel_sqr(&self) -> f32 {
        self.actor.max_travel_distance_sqr()
    }

    pub fn distance_sqr(&self, to: Position) -> f32 {
        self.env.spatial().distance_sqr(self.position(), to)
    }

    /// Travel budget plus weapon reach covers `to`. The sum of squares is
    /// deliberate; it is the reach estimate the planner has always used.
    pub fn within_attack_reach(&self, to: Position) -> bool {
        self.max_travel_sqr() + self.sqr_attack_range() >= self.distance_sqr(to)
    }

    pub fn within_travel(&self, to: Position) -> bool {
        self.max_travel_sqr() >= self.distance_sqr(to)
    }

    pub fn player(&self) -> Option<&'a ActorState> {
        self.state.player().filter(|player| player.is_alive())
    }

    /// Living bots fighting for the player.
    pub fn player_allies(&self) -> impl Iterator<Item = &'a ActorState> + 'a {
        self.state
            .entities
            .aligned(Alignment::Player)
            .filter(|actor| actor.identity.kind == ActorKind::Bot && actor.is_alive())
    }

    pub fn closest_player_ally(&self) -> Option<&'a ActorState> {
        let from = self.position();
        self.player_allies().min_by(|a, b| {
            from.distance_sqr(a.position)
                .total_cmp(&from.distance_sqr(b.position))
        })
    }

    pub fn closest_crate(&self) -> Option<&'a CrateState> {
        self.state.entities.closest_crate(self.position())
    }

    pub fn closest_pickup(&self) -> Option<&'a PickupState> {
        self.state.entities.closest_pickup(self.position())
    }

    /// Counts of the ledger this actor builds or collects into.
    pub fn ledger_counts(&self) -> Option<&'a ResourceCounts> {
        let ledger = self
            .actor
            .builder
            .as_ref()
            .map(|builder| builder.ledger())
            .or(self.actor.ledger)?;
        self.state.ledgers.counts(ledger).ok()
    }

    /// A reachable spot out of the player's line of fire, if the actor is
    /// exposed and can still move.
    pub fn cover_destination(&self) -> Option<Position> {
        let threat = self.player()?.position;
        let here = self.position();
        let spatial = self.env.spatial();
        if spatial.in_cover(threat, here) || self.move_time() <= 0.0 {
            return None;
        }
        let candidates = spatial.cover_positions(threat, here);
        let destination =
            spatial.find_reachable_destination(here, &candidates, self.max_travel_sqr())?;
        let epsilon = self.env.config().cover_epsilon_sqr;
        (spatial.distance_sqr(here, destination) > epsilon).then_some(destination)
    }
}
