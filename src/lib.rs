//! sensor sink: keeps the latest reading a device posted, plus a short history,
//! and serves both as JSON and as a polling dashboard.

pub mod config;
pub mod domain;
pub mod error;
pub mod page;
pub mod server;
pub mod store;

pub use config::SinkConfig;
pub use domain::{HistoryEntry, Reading, StoreView};
pub use error::IngestError;
pub use server::{build_router, serve, SharedStore};
pub use store::SensorStore;
