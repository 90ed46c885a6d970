//! ==============================================================================
//! store.rs - latest reading + bounded history
//! ==============================================================================
//!
//! purpose:
//!     holds the most recent sensor reading and the last N readings (N = 10 by
//!     default). created empty at startup, lives for the whole process, never
//!     written to disk.
//!
//! relationships:
//!     - used by: server.rs (POST /api/data ingests, GET /api/data snapshots)
//!     - uses: domain.rs (Reading, HistoryEntry, StoreView)
//!
//! locking:
//!     one tokio mutex guards all three fields together, so a snapshot never
//!     sees a reading without its timestamp, or a history that was appended
//!     to but not yet trimmed. parsing, clock reads and logging all happen
//!     outside the lock.
//!
//! ==============================================================================

use std::collections::VecDeque;

use tokio::sync::Mutex;

use crate::domain::{annotate, HistoryEntry, Reading, StoreView, TIMESTAMP_FORMAT};
use crate::error::IngestError;

/// default number of history entries kept
pub const HISTORY_CAPACITY: usize = 10;

#[derive(Default)]
struct Inner {
    last_update: Option<String>,
    sensor_data: Option<Reading>,
    history: VecDeque<HistoryEntry>,
}

pub struct SensorStore {
    inner: Mutex<Inner>,
    capacity: usize,
}

impl Default for SensorStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorStore {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    /// store keeping at most `capacity` history entries, clamped to 1..=10
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, HISTORY_CAPACITY);
        Self {
            inner: Mutex::new(Inner {
                history: VecDeque::with_capacity(capacity + 1),
                ..Inner::default()
            }),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// ingest a raw body, stamped with the current local time
    pub async fn ingest(&self, raw: &[u8], source: &str) -> Result<(), IngestError> {
        let now = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.ingest_at(raw, source, now).await
    }

    /// ingest a raw body with an explicit timestamp
    ///
    /// the body must be a JSON object. anything else is rejected and the
    /// store is left untouched.
    pub async fn ingest_at(
        &self,
        raw: &[u8],
        source: &str,
        timestamp: String,
    ) -> Result<(), IngestError> {
        let reading = parse_reading(raw)?;
        let annotated = annotate(reading.clone(), source);

        {
            let mut inner = self.inner.lock().await;
            inner.sensor_data = Some(annotated.clone());
            inner.last_update = Some(timestamp.clone());
            inner.history.push_back(HistoryEntry { timestamp, data: annotated });
            while inner.history.len() > self.capacity {
                inner.history.pop_front();
            }
        }

        tracing::info!(
            client_ip = %source,
            "received data from {}: {}",
            source,
            serde_json::Value::Object(reading)
        );
        Ok(())
    }

    /// owned copy of the current contents
    pub async fn snapshot(&self) -> StoreView {
        let inner = self.inner.lock().await;
        StoreView {
            last_update: inner.last_update.clone(),
            sensor_data: inner.sensor_data.clone(),
            history: inner.history.iter().cloned().collect(),
        }
    }
}

/// parse a body into a reading, rejecting every JSON kind except objects
fn parse_reading(raw: &[u8]) -> Result<Reading, IngestError> {
    match serde_json::from_slice::<serde_json::Value>(raw)? {
        serde_json::Value::Object(map) => Ok(map),
        serde_json::Value::Array(_) => Err(IngestError::NotAnObject("an array")),
        serde_json::Value::String(_) => Err(IngestError::NotAnObject("a string")),
        serde_json::Value::Number(_) => Err(IngestError::NotAnObject("a number")),
        serde_json::Value::Bool(_) => Err(IngestError::NotAnObject("a boolean")),
        serde_json::Value::Null => Err(IngestError::NotAnObject("null")),
    }
}
