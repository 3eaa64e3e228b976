use std::collections::BTreeMap;
use std::fmt;

use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::error::{ErrorSeverity, GameError};
use crate::state::LedgerId;

/// Kinds of counted resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumCount, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceKind {
    CyanCrystal,
    MagentaCrystal,
    YellowCrystal,
    Steel,
    Wood,
}

impl ResourceKind {
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Fixed-width vector of counts, one slot per [`ResourceKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceCounts([u32; ResourceKind::COUNT]);

impl ResourceCounts {
    pub const ZERO: Self = Self([0; ResourceKind::COUNT]);

    pub const fn new(counts: [u32; ResourceKind::COUNT]) -> Self {
        Self(counts)
    }

    /// Builds counts from `(kind, amount)` pairs; repeated kinds accumulate.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (ResourceKind, u32)>) -> Self {
        let mut counts = Self::ZERO;
        for (kind, amount) in pairs {
            counts.0[kind.index()] = counts.0[kind.index()].saturating_add(amount);
        }
        counts
    }

    #[inline]
    pub fn get(&self, kind: ResourceKind) -> u32 {
        self.0[kind.index()]
    }

    #[inline]
    pub fn set(&mut self, kind: ResourceKind, count: u32) {
        self.0[kind.index()] = count;
    }

    /// True when every slot of `self` is at least the matching slot of `cost`.
    pub fn covers(&self, cost: &ResourceCounts) -> bool {
        self.0.iter().zip(cost.0.iter()).all(|(have, need)| have >= need)
    }

    pub fn total(&self) -> u32 {
        self.0.iter().fold(0u32, |acc, c| acc.saturating_add(*c))
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|c| *c == 0)
    }

    /// Non-zero slots in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        ResourceKind::iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|(_, count)| *count > 0)
    }

    pub fn as_array(&self) -> &[u32; ResourceKind::COUNT] {
        &self.0
    }
}

impl fmt::Display for ResourceCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (kind, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{kind}: {count}")?;
        }
        write!(f, "]")
    }
}

/// Ownership mode of a single ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LedgerMode {
    Owned(ResourceCounts),
    /// All reads and writes go to the referenced owned ledger.
    Forwarding(LedgerId),
}

/// A single slot mutation, reported against the ledger that actually changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerChange {
    pub ledger: LedgerId,
    pub kind: ResourceKind,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("{0} does not exist")]
    UnknownLedger(LedgerId),

    #[error("cannot forward to {owner}: it is itself forwarding")]
    NestedForwarding { owner: LedgerId },

    #[error("{0} still has forwarding ledgers attached")]
    InUse(LedgerId),
}

impl GameError for LedgerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownLedger(_) => ErrorSeverity::Internal,
            Self::NestedForwarding { .. } | Self::InUse(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownLedger(_) => "LEDGER_UNKNOWN",
            Self::NestedForwarding { .. } => "LEDGER_NESTED_FORWARDING",
            Self::InUse(_) => "LEDGER_IN_USE",
        }
    }
}

/// Storage for every ledger in a match.
///
/// Forwarding is limited to one hop: a forwarding ledger must point at an
/// owned ledger, so cycles cannot be expressed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerBook {
    ledgers: BTreeMap<LedgerId, LedgerMode>,
    next_id: u32,
}

impl LedgerBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an empty owned ledger.
    pub fn open(&mut self) -> LedgerId {
        self.open_with(ResourceCounts::ZERO)
    }

    /// Opens an owned ledger with starting counts.
    pub fn open_with(&mut self, counts: ResourceCounts) -> LedgerId {
        let id = self.allocate();
        self.ledgers.insert(id, LedgerMode::Owned(counts));
        id
    }

    /// Opens a ledger that forwards to `owner`.
    pub fn open_forwarding(&mut self, owner: LedgerId) -> Result<LedgerId, LedgerError> {
        match self.ledgers.get(&owner) {
            None => return Err(LedgerError::UnknownLedger(owner)),
            Some(LedgerMode::Forwarding(_)) => {
                return Err(LedgerError::NestedForwarding { owner });
            }
            Some(LedgerMode::Owned(_)) => {}
        }
        let id = self.allocate();
        self.ledgers.insert(id, LedgerMode::Forwarding(owner));
        Ok(id)
    }

    /// Removes a ledger. Owned ledgers with forwarders attached are kept.
    pub fn close(&mut self, id: LedgerId) -> Result<(), LedgerError> {
        if !self.ledgers.contains_key(&id) {
            return Err(LedgerError::UnknownLedger(id));
        }
        let referenced = self
            .ledgers
            .values()
            .any(|mode| *mode == LedgerMode::Forwarding(id));
        if referenced {
            return Err(LedgerError::InUse(id));
        }
        self.ledgers.remove(&id);
        Ok(())
    }

    pub fn contains(&self, id: LedgerId) -> bool {
        self.ledgers.contains_key(&id)
    }

    pub fn mode(&self, id: LedgerId) -> Option<&LedgerMode> {
        self.ledgers.get(&id)
    }

    /// Returns the owned ledger that backs `id`.
    pub fn resolve(&self, id: LedgerId) -> Result<LedgerId, LedgerError> {
        match self.ledgers.get(&id) {
            Some(LedgerMode::Owned(_)) => Ok(id),
            Some(LedgerMode::Forwarding(owner)) => match self.ledgers.get(owner) {
                Some(LedgerMode::Owned(_)) => Ok(*owner),
                _ => Err(LedgerError::UnknownLedger(*owner)),
            },
            None => Err(LedgerError::UnknownLedger(id)),
        }
    }

    /// Current counts seen through `id`.
    pub fn counts(&self, id: LedgerId) -> Result<&ResourceCounts, LedgerError> {
        let owner = self.resolve(id)?;
        match self.ledgers.get(&owner) {
            Some(LedgerMode::Owned(counts)) => Ok(counts),
            _ => Err(LedgerError::UnknownLedger(owner)),
        }
    }

    pub fn total(&self, id: LedgerId) -> Result<u32, LedgerError> {
        Ok(self.counts(id)?.total())
    }

    pub fn add(
        &mut self,
        id: LedgerId,
        kind: ResourceKind,
        amount: u32,
    ) -> Result<LedgerChange, LedgerError> {
        let (owner, counts) = self.owned_mut(id)?;
        let count = counts.get(kind).saturating_add(amount);
        counts.set(kind, count);
        Ok(LedgerChange {
            ledger: owner,
            kind,
            count,
        })
    }

    /// Removes `amount`, clamping at zero. Never fails on insufficient funds.
    pub fn remove(
        &mut self,
        id: LedgerId,
        kind: ResourceKind,
        amount: u32,
    ) -> Result<LedgerChange, LedgerError> {
        let (owner, counts) = self.owned_mut(id)?;
        let count = counts.get(kind).saturating_sub(amount);
        counts.set(kind, count);
        Ok(LedgerChange {
            ledger: owner,
            kind,
            count,
        })
    }

    /// Removes a whole cost vector; one change per non-zero cost slot.
    pub fn remove_vector(
        &mut self,
        id: LedgerId,
        costs: &ResourceCounts,
    ) -> Result<Vec<LedgerChange>, LedgerError> {
        let (owner, counts) = self.owned_mut(id)?;
        let mut changes = Vec::new();
        for (kind, cost) in costs.iter() {
            let count = counts.get(kind).saturating_sub(cost);
            counts.set(kind, count);
            changes.push(LedgerChange {
                ledger: owner,
                kind,
                count,
            });
        }
        Ok(changes)
    }

    /// Adds a whole stack vector; one change per non-zero slot.
    pub fn add_vector(
        &mut self,
        id: LedgerId,
        stacks: &ResourceCounts,
    ) -> Result<Vec<LedgerChange>, LedgerError> {
        let (owner, counts) = self.owned_mut(id)?;
        let mut changes = Vec::new();
        for (kind, amount) in stacks.iter() {
            let count = counts.get(kind).saturating_add(amount);
            counts.set(kind, count);
            changes.push(LedgerChange {
                ledger: owner,
                kind,
                count,
            });
        }
        Ok(changes)
    }

    /// Ledgers whose reads resolve to `owner`, including `owner` itself.
    pub fn sharing(&self, owner: LedgerId) -> impl Iterator<Item = LedgerId> + '_ {
        self.ledgers.iter().filter_map(move |(id, mode)| match mode {
            LedgerMode::Owned(_) if *id == owner => Some(*id),
            LedgerMode::Forwarding(target) if *target == owner => Some(*id),
            _ => None,
        })
    }

    fn owned_mut(
        &mut self,
        id: LedgerId,
    ) -> Result<(LedgerId, &mut ResourceCounts), LedgerError> {
        let owner = self.resolve(id)?;
        match self.ledgers.get_mut(&owner) {
            Some(LedgerMode::Owned(counts)) => Ok((owner, counts)),
            _ => Err(LedgerError::UnknownLedger(owner)),
        }
    }

    fn allocate(&mut self) -> LedgerId {
        let id = LedgerId(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_clamps_at_zero() {
        let mut book = LedgerBook::new();
        let id = book.open_with(ResourceCounts::from_pairs([(ResourceKind::Steel, 3)]));

        let change = book.remove(id, ResourceKind::Steel, 10).unwrap();
        assert_eq!(change.count, 0);
        assert_eq!(book.counts(id).unwrap().get(ResourceKind::Steel), 0);

        book.add(id, ResourceKind::Steel, 4).unwrap();
        let change = book.remove(id, ResourceKind::Steel, 1).unwrap();
        assert_eq!(change.count, 3);
    }

    #[test]
    fn remove_vector_reports_only_costed_slots() {
        let mut book = LedgerBook::new();
        let id = book.open_with(ResourceCounts::new([5, 5, 5, 5, 5]));
        let cost = ResourceCounts::from_pairs([
            (ResourceKind::CyanCrystal, 2),
            (ResourceKind::Wood, 9),
        ]);

        let changes = book.remove_vector(id, &cost).unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].kind, ResourceKind::CyanCrystal);
        assert_eq!(changes[0].count, 3);
        assert_eq!(changes[1].kind, ResourceKind::Wood);
        assert_eq!(changes[1].count, 0);
        assert_eq!(book.total(id).unwrap(), 3 + 5 + 5 + 5);
    }

    #[test]
    fn forwarding_ledger_writes_to_owner() {
        let mut book = LedgerBook::new();
        let owner = book.open();
        let collector = book.open_forwarding(owner).unwrap();

        let change = book.add(collector, ResourceKind::Wood, 2).unwrap();
        assert_eq!(change.ledger, owner);
        assert_eq!(book.counts(owner).unwrap().get(ResourceKind::Wood), 2);
        assert_eq!(book.total(collector).unwrap(), 2);
        assert_eq!(book.resolve(collector).unwrap(), owner);
    }

    #[test]
    fn forwarding_is_one_level_deep() {
        let mut book = LedgerBook::new();
        let owner = book.open();
        let first = book.open_forwarding(owner).unwrap();

        assert_eq!(
            book.open_forwarding(first),
            Err(LedgerError::NestedForwarding { owner: first })
        );
        assert_eq!(
            book.open_forwarding(LedgerId(99)),
            Err(LedgerError::UnknownLedger(LedgerId(99)))
        );
    }

    #[test]
    fn owner_with_forwarders_cannot_close() {
        let mut book = LedgerBook::new();
        let owner = book.open();
        let collector = book.open_forwarding(owner).unwrap();

        assert_eq!(book.close(owner), Err(LedgerError::InUse(owner)));
        book.close(collector).unwrap();
        book.close(owner).unwrap();
        assert!(!book.contains(owner));
    }

    #[test]
    fn sharing_lists_owner_and_forwarders() {
        let mut book = LedgerBook::new();
        let owner = book.open();
        let other = book.open();
        let collector = book.open_forwarding(owner).unwrap();

        let shared: Vec<_> = book.sharing(owner).collect();
        assert_eq!(shared, vec![owner, collector]);
        assert!(!shared.contains(&other));
    }
}
