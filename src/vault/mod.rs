//! Vault module — encrypted record storage.
//!
//! This module provides:
//! - `Record`, `StoredRecord` and `RecordPatch` (`record`)
//! - The encrypted three-field record codec (`codec`)
//! - Regex and fuzzy record filters (`filter`)
//! - `RecordStore`, the facade over a persistence `Manager` (`store`)
//! - Master password rotation (`rotate`)
//! - `Vault`, the handle the command layer works with (`handle`)

pub mod codec;
pub mod filter;
pub mod handle;
pub mod record;
pub mod rotate;
pub mod store;

pub use filter::{Filter, FuzzyField};
pub use handle::Vault;
pub use record::{Record, RecordPatch, StoredRecord};
pub use rotate::RotationReport;
pub use store::RecordStore;
