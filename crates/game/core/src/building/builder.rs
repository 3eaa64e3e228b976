use crate::engine::SpawnError;
use crate::error::{ErrorSeverity, GameError};
use crate::resources::{Recipe, RecipeCatalog, ResourceCounts};
use crate::state::{ActorId, Archetype, LedgerId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("insufficient resources for {0}")]
    InsufficientResources(Archetype),

    #[error("build limit reached (max: {max})")]
    BuildLimitReached { max: u32 },

    #[error("{0} cannot build")]
    NoBuildCapability(ActorId),

    #[error("{0} is not the acting actor")]
    OutOfTurn(ActorId),

    #[error("no blueprint for {0}")]
    MissingBlueprint(Archetype),

    #[error("builder ledger is unavailable")]
    LedgerUnavailable,

    #[error("bot could not be placed: {0}")]
    Spawn(#[from] SpawnError),
}

impl GameError for BuildError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientResources(_) | Self::BuildLimitReached { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::NoBuildCapability(_) | Self::OutOfTurn(_) => ErrorSeverity::Validation,
            Self::MissingBlueprint(_) | Self::LedgerUnavailable => ErrorSeverity::Internal,
            Self::Spawn(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientResources(_) => "BUILD_INSUFFICIENT_RESOURCES",
            Self::BuildLimitReached { .. } => "BUILD_LIMIT_REACHED",
            Self::NoBuildCapability(_) => "BUILD_NO_BUILD_CAPABILITY",
            Self::OutOfTurn(_) => "BUILD_OUT_OF_TURN",
            Self::MissingBlueprint(_) => "BUILD_MISSING_BLUEPRINT",
            Self::LedgerUnavailable => "BUILD_LEDGER_UNAVAILABLE",
            Self::Spawn(err) => err.error_code(),
        }
    }
}

/// Build capability: spends its ledger per recipe to produce bots.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Builder {
    ledger: LedgerId,
    max_builds: u32,
    builds: u32,
    built: Vec<ActorId>,
}

impl Builder {
    pub fn new(ledger: LedgerId, max_builds: u32) -> Self {
        Self {
            ledger,
            max_builds,
            builds: 0,
            built: Vec::new(),
        }
    }

    pub fn ledger(&self) -> LedgerId {
        self.ledger
    }

    pub fn max_builds(&self) -> u32 {
        self.max_builds
    }

    /// Builds performed this turn.
    pub fn builds(&self) -> u32 {
        self.builds
    }

    /// Every unit this builder produced, alive or not.
    pub fn built(&self) -> &[ActorId] {
        &self.built
    }

    pub fn has_builds_left(&self) -> bool {
        self.builds < self.max_builds
    }

    pub fn start_turn(&mut self) {
        self.builds = 0;
    }

    /// Validates a build. The limit is checked before affordability.
    pub fn check<'c>(
        &self,
        archetype: Archetype,
        catalog: &'c RecipeCatalog,
        counts: &ResourceCounts,
    ) -> Result<&'c Recipe, BuildError> {
        if !self.has_builds_left() {
            return Err(BuildError::BuildLimitReached {
                max: self.max_builds,
            });
        }
        match catalog.get(archetype) {
            Some(recipe) if recipe.can_afford(counts) => Ok(recipe),
            _ => Err(BuildError::InsufficientResources(archetype)),
        }
    }

    pub fn record_build(&mut self, unit: ActorId) {
        self.builds += 1;
        self.built.push(unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::ResourceKind;

    fn catalog() -> RecipeCatalog {
        RecipeCatalog::new([Recipe::new(
            Archetype::Warrior,
            ResourceCounts::from_pairs([(ResourceKind::Steel, 2)]),
        )])
        .unwrap()
    }

    #[test]
    fn limit_wins_over_resources() {
        let catalog = catalog();
        let rich = ResourceCounts::new([50; 5]);
        let mut builder = Builder::new(LedgerId(0), 1);
        builder.record_build(ActorId(4));

        assert_eq!(
            builder.check(Archetype::Warrior, &catalog, &rich),
            Err(BuildError::BuildLimitReached { max: 1 })
        );
        assert_eq!(
            builder.check(Archetype::Warrior, &catalog, &ResourceCounts::ZERO),
            Err(BuildError::BuildLimitReached { max: 1 })
        );
    }

    #[test]
    fn insufficient_resources_detected() {
        let catalog = catalog();
        let builder = Builder::new(LedgerId(0), 2);
        let poor = ResourceCounts::from_pairs([(ResourceKind::Steel, 1)]);
        assert_eq!(
            builder.check(Archetype::Warrior, &catalog, &poor),
            Err(BuildError::InsufficientResources(Archetype::Warrior))
        );
        assert_eq!(
            builder.check(Archetype::Default, &catalog, &ResourceCounts::new([9; 5])),
            Err(BuildError::InsufficientResources(Archetype::Default))
        );
    }

    #[test]
    fn start_turn_resets_count_but_keeps_history() {
        let mut builder = Builder::new(LedgerId(0), 1);
        builder.record_build(ActorId(2));
        assert!(!builder.has_builds_left());
        builder.start_turn();
        assert!(builder.has_builds_left());
        assert_eq!(builder.built(), &[ActorId(2)]);
    }
}
