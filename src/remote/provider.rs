use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;

use crate::model::{PlayerRecord, PositionGroup};

/// Trait for the remote scoring service. Opaque to the engine: any transport
/// failure or malformed response surfaces as a single error the session maps
/// to `PredictionFailed`.
#[async_trait]
pub trait ScoreModel: Send + Sync {
    /// Score one prospect's attribute vector.
    async fn predict(&self, group: PositionGroup, values: &HashMap<String, f64>) -> Result<f64>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Trait for the historical-results source, fetched once per session.
#[async_trait]
pub trait ResultsSource: Send + Sync {
    /// Return every historical draft result the source knows about.
    async fn fetch_all(&self) -> Result<Vec<PlayerRecord>>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
