//! Actor catalog implementing [`embers_core::BlueprintOracle`].

use std::collections::HashMap;

use embers_content::ActorEntry;
use embers_core::{ActorKind, ActorTemplate, Alignment, Archetype, BlueprintOracle};

/// Oracle providing actor templates by catalog id and bot blueprints by
/// archetype and side.
#[derive(Clone, Debug, Default)]
pub struct BlueprintCatalog {
    entries: Vec<ActorEntry>,
    by_id: HashMap<String, usize>,
    bots: HashMap<(Archetype, Alignment), usize>,
}

impl BlueprintCatalog {
    /// Later entries with an id already seen are ignored; the first bot
    /// template for an (archetype, side) pair wins.
    pub fn new(entries: impl IntoIterator<Item = ActorEntry>) -> Self {
        let mut catalog = Self::default();
        for entry in entries {
            catalog.add(entry);
        }
        catalog
    }

    pub fn add(&mut self, entry: ActorEntry) {
        if self.by_id.contains_key(&entry.id) {
            return;
        }
        let index = self.entries.len();
        self.by_id.insert(entry.id.clone(), index);
        if entry.template.kind == ActorKind::Bot {
            self.bots
                .entry((entry.template.archetype, entry.alignment))
                .or_insert(index);
        }
        self.entries.push(entry);
    }

    pub fn entry(&self, id: &str) -> Option<&ActorEntry> {
        self.by_id.get(id).and_then(|&index| self.entries.get(index))
    }

    pub fn template(&self, id: &str) -> Option<&ActorTemplate> {
        self.entry(id).map(|entry| &entry.template)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BlueprintOracle for BlueprintCatalog {
    fn bot_template(&self, archetype: Archetype, alignment: Alignment) -> Option<&ActorTemplate> {
        self.bots
            .get(&(archetype, alignment))
            .and_then(|&index| self.entries.get(index))
            .map(|entry| &entry.template)
    }
}
