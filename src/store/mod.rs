//! Durable append-only store for activity records
//!
//! This module provides the persistence core of the ledger:
//! - `ActivityStore`: append-only JSONL log plus in-memory state
//! - `RecordIndex`: the three maintained access paths (actor, action
//!   type, timestamp)
//! - `StoreConfig`: data directory layout
//!
//! ```text
//! Write Path:
//! ┌──────────┐    ┌──────────┐    ┌─────────────────────┐    ┌───────────────┐
//! │ Recorder │───►│ validate │───►│ append JSONL + sync │───►│ update indexes│
//! └──────────┘    └──────────┘    └─────────────────────┘    └───────────────┘
//!
//! Read Path (Startup):
//! ┌────────────────────┐    ┌────────────────┐
//! │ Load activity log  │───►│ Rebuild indexes│───► Ready!
//! │ (one JSON per line)│    └────────────────┘
//! └────────────────────┘
//! ```

mod index;
#[allow(clippy::module_inception)]
mod store;

pub(crate) use index::RecordIndex;
pub use store::{ActivityStore, LedgerError, LedgerResult, StoreConfig};
