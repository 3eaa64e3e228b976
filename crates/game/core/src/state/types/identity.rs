//! Immutable actor identity: team, kind and archetype.

use std::fmt;

use bitflags::bitflags;
use strum::{Display, EnumCount, EnumIter};

use super::ActorId;

/// Team membership. Fixed at spawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    Player,
    Enemy,
    /// Props such as supply crates; hostile to nobody, attackable by everyone.
    Neutral,
}

impl Alignment {
    /// The side that wins when this side is wiped out.
    pub const fn opponent(self) -> Option<Alignment> {
        match self {
            Self::Player => Some(Self::Enemy),
            Self::Enemy => Some(Self::Player),
            Self::Neutral => None,
        }
    }

    /// Same-alignment actors can never target one another.
    #[inline]
    pub fn can_target(self, other: Alignment) -> bool {
        self != other
    }
}

/// Controller family of an actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActorKind {
    /// The human-controlled commander.
    Player,
    /// Enemy commanders and enemy troops.
    Enemy,
    /// Units produced by a builder.
    Bot,
}

/// Unit subtype. Drives recipes and some AI overrides.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumCount, EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Archetype {
    Collector,
    Defender,
    Warrior,
    Default,
}

impl Archetype {
    /// Order in which AI builders and ally hunters consider archetypes.
    pub const BUILD_PRIORITY: [Archetype; 3] =
        [Archetype::Warrior, Archetype::Collector, Archetype::Defender];

    /// True for archetypes that are allowed to gather resources.
    pub const fn can_gather(self) -> bool {
        matches!(self, Self::Collector | Self::Default)
    }
}

bitflags! {
    /// Capability set owned by an actor.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Capabilities: u8 {
        const MOVEMENT = 1 << 0;
        const COMBAT = 1 << 1;
        const BUILD = 1 << 2;
    }
}

/// Who drives an actor's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Controller {
    Human,
    Ai,
}

/// Stable identity of an actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorIdentity {
    pub id: ActorId,
    pub name: String,
    pub kind: ActorKind,
    pub archetype: Archetype,
    pub alignment: Alignment,
}

impl ActorIdentity {
    /// Player-aligned actors are driven by human input; everything else by AI.
    pub fn controller(&self) -> Controller {
        match self.alignment {
            Alignment::Player => Controller::Human,
            Alignment::Enemy | Alignment::Neutral => Controller::Ai,
        }
    }

    /// Actors whose removal can decide the game for their side.
    ///
    /// The player side falls with its commander; the enemy side falls when
    /// its last member is gone.
    pub fn counts_toward_side(&self) -> bool {
        match self.alignment {
            Alignment::Player => self.kind == ActorKind::Player,
            Alignment::Enemy => true,
            Alignment::Neutral => false,
        }
    }
}

impl fmt::Display for ActorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponents_are_symmetric() {
        assert_eq!(Alignment::Player.opponent(), Some(Alignment::Enemy));
        assert_eq!(Alignment::Enemy.opponent(), Some(Alignment::Player));
        assert_eq!(Alignment::Neutral.opponent(), None);
    }

    #[test]
    fn same_alignment_cannot_target() {
        assert!(!Alignment::Enemy.can_target(Alignment::Enemy));
        assert!(Alignment::Enemy.can_target(Alignment::Neutral));
        assert!(Alignment::Player.can_target(Alignment::Enemy));
    }

    #[test]
    fn build_priority_excludes_default() {
        assert!(!Archetype::BUILD_PRIORITY.contains(&Archetype::Default));
        assert_eq!(Archetype::BUILD_PRIORITY[0], Archetype::Warrior);
    }
}
