//! Resource ledgers and build recipes.
//!
//! Ledgers are stored in a single [`LedgerBook`] and addressed by
//! [`LedgerId`](crate::state::LedgerId). A ledger either owns its counts or
//! forwards every read and write to an owning ledger, which lets a collector
//! bot deposit straight into its builder's stockpile.

pub mod ledger;
pub mod recipe;

pub use ledger::{LedgerBook, LedgerChange, LedgerError, LedgerMode, ResourceCounts, ResourceKind};
pub use recipe::{Recipe, RecipeCatalog, RecipeError};
