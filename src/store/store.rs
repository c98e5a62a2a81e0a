//! ActivityStore - durable append and raw lookup of event records
//!
//! The store owns the append-only JSONL log and an in-memory copy of all
//! records with secondary indexes. Appends are written to disk with fsync
//! before they become visible to readers; a failed write leaves no
//! in-memory trace. All operations take `&self`; shared state lives behind
//! a single RwLock so the store is safe under unbounded concurrent use.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::warn;

use crate::types::EventRecord;

use super::RecordIndex;

/// Configuration for the ActivityStore
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the data directory
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
        }
    }
}

impl StoreConfig {
    /// Create config with custom data directory
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get path to the activity log file
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("activity_log.jsonl")
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Errors that can occur in ledger operations
///
/// `Io` and `Json` are the store-unavailable class: the operation could not
/// reach or decode durable state. `Validation` means the input was malformed
/// and the operation was never attempted.
#[derive(Debug)]
pub enum LedgerError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Validation(String),
}

impl LedgerError {
    /// True for malformed-input rejections (as opposed to store failures)
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::Io(e) => write!(f, "store unavailable: {}", e),
            LedgerError::Json(e) => write!(f, "store serialization error: {}", e),
            LedgerError::Validation(msg) => write!(f, "validation error: {}", msg),
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<std::io::Error> for LedgerError {
    fn from(e: std::io::Error) -> Self {
        LedgerError::Io(e)
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(e: serde_json::Error) -> Self {
        LedgerError::Json(e)
    }
}

/// Mutable store state guarded by one lock
#[derive(Debug, Default)]
struct StoreState {
    /// All records in insertion order; position is the index key
    records: Vec<EventRecord>,
    index: RecordIndex,
    /// Next id to assign
    next_id: u64,
    /// Highest timestamp assigned so far; appends never go below it
    last_timestamp: Option<DateTime<Utc>>,
}

/// Durable, append-only store of activity records
pub struct ActivityStore {
    config: StoreConfig,
    state: RwLock<StoreState>,
}

impl ActivityStore {
    /// Open the store, loading any existing activity log
    ///
    /// This is the single explicit init point: construct once at startup
    /// and share behind an `Arc`. Lines that fail to parse are skipped
    /// with a warning so one corrupt entry cannot take the ledger down.
    pub fn open(config: StoreConfig) -> LedgerResult<Self> {
        let records = Self::load_records(&config.log_path())?;

        let next_id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let last_timestamp = records.iter().map(|r| r.timestamp).max();

        let mut index = RecordIndex::default();
        index.rebuild(&records);

        Ok(Self {
            config,
            state: RwLock::new(StoreState {
                records,
                index,
                next_id,
                last_timestamp,
            }),
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Append a new record
    ///
    /// The store assigns `id` and `timestamp`; the timestamp is truncated
    /// to millisecond storage precision and clamped so it never goes below
    /// the previously assigned one. Returns the persisted record.
    pub fn append(
        &self,
        actor_id: i64,
        actor_label: &str,
        action_type: &str,
        details: Value,
    ) -> LedgerResult<EventRecord> {
        validate_input(actor_label, action_type, &details)?;

        let mut state = self.state.write();

        let mut timestamp = truncate_to_millis(Utc::now());
        if let Some(last) = state.last_timestamp {
            if timestamp < last {
                timestamp = last;
            }
        }

        self.persist_record(&mut state, actor_id, actor_label, action_type, details, timestamp)
    }

    /// Append a record with a caller-supplied timestamp
    ///
    /// Backfill/import path for carrying over historical records from
    /// another system. Validation and durability match `append`; only the
    /// timestamp source differs.
    pub fn append_at(
        &self,
        actor_id: i64,
        actor_label: &str,
        action_type: &str,
        details: Value,
        timestamp: DateTime<Utc>,
    ) -> LedgerResult<EventRecord> {
        validate_input(actor_label, action_type, &details)?;

        let mut state = self.state.write();
        let timestamp = truncate_to_millis(timestamp);

        self.persist_record(&mut state, actor_id, actor_label, action_type, details, timestamp)
    }

    /// Shared tail of the append paths: write the line, then publish the
    /// record in memory. Expects the write lock to be held.
    fn persist_record(
        &self,
        state: &mut StoreState,
        actor_id: i64,
        actor_label: &str,
        action_type: &str,
        details: Value,
        timestamp: DateTime<Utc>,
    ) -> LedgerResult<EventRecord> {
        let record = EventRecord {
            id: state.next_id,
            actor_id,
            actor_label: actor_label.to_string(),
            action_type: action_type.to_string(),
            timestamp,
            details,
        };

        self.write_line(&record)?;

        state.next_id += 1;
        if state.last_timestamp.is_none_or(|last| timestamp > last) {
            state.last_timestamp = Some(timestamp);
        }

        let pos = state.records.len();
        state.index.insert(pos, &record);
        state.records.push(record.clone());

        Ok(record)
    }

    /// Serialize one record and append it to the log with fsync
    fn write_line(&self, record: &EventRecord) -> LedgerResult<()> {
        let path = self.config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let line = record.to_json_line()?;

        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{}", line)?;
        file.sync_all()?;

        Ok(())
    }

    /// One actor's records, newest first
    pub fn records_for_actor(&self, actor_id: i64) -> LedgerResult<Vec<EventRecord>> {
        let state = self.state.read();
        Ok(collect_recency(
            &state.records,
            state.index.actor_positions(actor_id).iter().copied(),
        ))
    }

    /// One action type's records across all actors, newest first
    pub fn records_for_action(&self, action_type: &str) -> LedgerResult<Vec<EventRecord>> {
        let state = self.state.read();
        Ok(collect_recency(
            &state.records,
            state.index.action_positions(action_type).iter().copied(),
        ))
    }

    /// Records with timestamp in the inclusive `[start, end]` window,
    /// optionally restricted to one actor, newest first
    pub fn records_in_range(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        actor_id: Option<i64>,
    ) -> LedgerResult<Vec<EventRecord>> {
        let state = self.state.read();
        let positions = state
            .index
            .range_positions(start, end)
            .into_iter()
            .filter(|&pos| actor_id.is_none_or(|id| state.records[pos].actor_id == id));
        Ok(collect_recency(&state.records, positions))
    }

    /// Number of records for one actor
    pub fn count_for_actor(&self, actor_id: i64) -> LedgerResult<usize> {
        Ok(self.state.read().index.actor_positions(actor_id).len())
    }

    /// Number of records in the inclusive window, optionally per actor
    pub fn count_in_range(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        actor_id: Option<i64>,
    ) -> LedgerResult<usize> {
        let state = self.state.read();
        let count = state
            .index
            .range_positions(start, end)
            .into_iter()
            .filter(|&pos| actor_id.is_none_or(|id| state.records[pos].actor_id == id))
            .count();
        Ok(count)
    }

    /// Total records ever appended
    pub fn total_count(&self) -> LedgerResult<usize> {
        Ok(self.state.read().records.len())
    }

    /// Records with timestamp at or after `since`
    pub fn count_since(&self, since: DateTime<Utc>) -> LedgerResult<usize> {
        self.count_in_range(Some(since), None, None)
    }

    /// Clone of all records in insertion order (aggregation scan input)
    pub fn snapshot(&self) -> LedgerResult<Vec<EventRecord>> {
        Ok(self.state.read().records.clone())
    }

    /// Load all records from the log file, skipping corrupt lines
    fn load_records(path: &Path) -> LedgerResult<Vec<EventRecord>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            if line.trim().is_empty() {
                continue;
            }

            match EventRecord::from_json_line(&line) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(
                        line = line_num + 1,
                        error = %e,
                        "skipping unparseable activity log line"
                    );
                }
            }
        }

        Ok(records)
    }
}

/// Reject malformed append input before anything is written
fn validate_input(actor_label: &str, action_type: &str, details: &Value) -> LedgerResult<()> {
    if actor_label.trim().is_empty() {
        return Err(LedgerError::Validation(
            "actor_label must not be empty".to_string(),
        ));
    }
    if action_type.trim().is_empty() {
        return Err(LedgerError::Validation(
            "action_type must not be empty".to_string(),
        ));
    }
    if !details.is_object() {
        return Err(LedgerError::Validation(
            "details must be a JSON object".to_string(),
        ));
    }
    Ok(())
}

/// Truncate to the store's millisecond timestamp precision
fn truncate_to_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}

/// Gather records at `positions` and sort newest first
fn collect_recency(
    records: &[EventRecord],
    positions: impl Iterator<Item = usize>,
) -> Vec<EventRecord> {
    let mut out: Vec<EventRecord> = positions.map(|pos| records[pos].clone()).collect();
    out.sort_by(EventRecord::recency_cmp);
    out
}
