//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use embers_core::GameEvent;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::notice::Notice;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Turn order, phase changes and game end
    Turn,
    /// Actor activity: shots, damage, deaths, spawns and movement
    Combat,
    /// Ledgers, build ability and pickups
    Economy,
    /// Rejected actions and runtime warnings
    Notice,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Turn, Topic::Combat, Topic::Economy, Topic::Notice];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Game(GameEvent),
    Notice(Notice),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Game(event) if event.is_turn_event() => Topic::Turn,
            Event::Game(event) if event.is_economy_event() => Topic::Economy,
            Event::Game(_) => Topic::Combat,
            Event::Notice(_) => Topic::Notice,
        }
    }
}

impl From<GameEvent> for Event {
    fn from(event: GameEvent) -> Self {
        Event::Game(event)
    }
}

impl From<Notice> for Event {
    fn from(notice: Notice) -> Self {
        Event::Notice(notice)
    }
}

struct Channels {
    turn: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
    economy: broadcast::Sender<Event>,
    notice: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Turn => &self.turn,
            Topic::Combat => &self.combat,
            Topic::Economy => &self.economy,
            Topic::Notice => &self.notice,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Channels are created up front and never change,
/// so publishing takes no lock.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                turn: broadcast::channel(capacity).0,
                combat: broadcast::channel(capacity).0,
                economy: broadcast::channel(capacity).0,
                notice: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: impl Into<Event>) {
        let event = event.into();
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("turn_subscribers", &self.channels.turn.receiver_count())
            .field("combat_subscribers", &self.channels.combat.receiver_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use embers_core::{ActorId, Alignment, GamePhase};

    use super::*;

    #[tokio::test]
    async fn events_are_routed_by_topic() {
        let bus = EventBus::with_capacity(8);
        let mut turn = bus.subscribe(Topic::Turn);
        let mut combat = bus.subscribe(Topic::Combat);

        bus.publish(GameEvent::GamePhaseChanged {
            phase: GamePhase::Running,
        });
        bus.publish(GameEvent::ActorDied {
            actor: ActorId(3),
            alignment: Alignment::Enemy,
        });

        assert!(matches!(
            turn.recv().await.unwrap(),
            Event::Game(GameEvent::GamePhaseChanged { .. })
        ));
        assert!(matches!(
            combat.recv().await.unwrap(),
            Event::Game(GameEvent::ActorDied { .. })
        ));
        assert!(turn.try_recv().is_err());
    }

    #[tokio::test]
    async fn notices_have_their_own_topic() {
        let bus = EventBus::new();
        let mut receivers = bus.subscribe_multiple(&[Topic::Notice, Topic::Economy]);

        bus.publish(Notice::DecisionLimitReached {
            actor: ActorId(1),
            decisions: 8,
        });

        let notice = receivers.get_mut(&Topic::Notice).unwrap();
        assert_eq!(notice.recv().await.unwrap().topic(), Topic::Notice);
        assert!(receivers.get_mut(&Topic::Economy).unwrap().try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::default();
        bus.publish(GameEvent::TurnEnded { actor: ActorId(0) });
    }
}
