//! Actor template loader.
//!
//! Templates reference weapons by name; the loader resolves them against a
//! [`WeaponCatalog`] so a typo fails at load time instead of mid-match.

use std::path::Path;

use embers_core::{ActorKind, ActorStats, ActorTemplate, Alignment, Archetype, WeaponProfile};
use serde::Deserialize;

use crate::loaders::{LoadResult, WeaponCatalog, read_file};

/// On-disk actor definition.
#[derive(Debug, Deserialize)]
struct ActorSpec {
    id: String,
    name: String,
    kind: ActorKind,
    #[serde(default = "default_archetype")]
    archetype: Archetype,
    alignment: Alignment,
    #[serde(default)]
    stats: ActorStats,
    #[serde(default)]
    melee: Option<String>,
    #[serde(default)]
    primary: Option<String>,
    #[serde(default)]
    secondary: Option<String>,
    #[serde(default)]
    can_build: bool,
    #[serde(default)]
    has_ledger: bool,
    #[serde(default = "default_can_move")]
    can_move: bool,
}

fn default_archetype() -> Archetype {
    Archetype::Default
}

fn default_can_move() -> bool {
    true
}

/// A resolved template together with its catalog key and side.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorEntry {
    pub id: String,
    pub alignment: Alignment,
    pub template: ActorTemplate,
}

/// Loader for actor templates from RON files.
pub struct ActorLoader;

impl ActorLoader {
    /// Load actor templates, resolving weapon names.
    ///
    /// An actor without a `melee` entry fights with bare fists.
    pub fn load(path: &Path, weapons: &WeaponCatalog) -> LoadResult<Vec<ActorEntry>> {
        let content = read_file(path)?;
        let specs: Vec<ActorSpec> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor catalog RON: {}", e))?;

        let mut entries = Vec::with_capacity(specs.len());
        for spec in specs {
            if entries.iter().any(|e: &ActorEntry| e.id == spec.id) {
                anyhow::bail!("Duplicate actor '{}' in {}", spec.id, path.display());
            }
            let weapon = |name: &Option<String>| -> LoadResult<Option<WeaponProfile>> {
                name.as_ref()
                    .map(|name| {
                        weapons.get(name).cloned().ok_or_else(|| {
                            anyhow::anyhow!(
                                "Actor '{}' references unknown weapon '{}'",
                                spec.id,
                                name
                            )
                        })
                    })
                    .transpose()
            };

            let template = ActorTemplate {
                name: spec.name.clone(),
                kind: spec.kind,
                archetype: spec.archetype,
                stats: spec.stats,
                melee: weapon(&spec.melee)?.unwrap_or_else(WeaponProfile::fists),
                primary: weapon(&spec.primary)?,
                secondary: weapon(&spec.secondary)?,
                can_build: spec.can_build,
                has_ledger: spec.has_ledger,
                can_move: spec.can_move,
            };
            entries.push(ActorEntry {
                id: spec.id,
                alignment: spec.alignment,
                template,
            });
        }
        Ok(entries)
    }
}
