//! Topic-based event bus for runtime events.
//!
//! Engine events are drained after every completed operation and published
//! in order to one of four topics; consumers subscribe only to the topics
//! they need.

mod bus;
mod notice;

pub use bus::{Event, EventBus, Topic};
pub use notice::Notice;
