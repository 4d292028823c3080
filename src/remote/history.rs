use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::model::{Origin, PlayerRecord, PositionGroup};
use super::provider::ResultsSource;

/// Client for the historical draft-results endpoint, fetched once per session
/// on startup: `GET /results` → array of row objects keyed by the dataset's
/// column names ("Name", "Draft Year", "Pick Number", "Position Group",
/// "Predicted Score").
pub struct ResultsApi {
    http: Client,
    /// Base URL, overridable in tests.
    base_url: String,
}

impl ResultsApi {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ResultsApi {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ResultsSource for ResultsApi {
    fn name(&self) -> &str {
        "ResultsApi"
    }

    async fn fetch_all(&self) -> Result<Vec<PlayerRecord>> {
        let url = format!("{}/results", self.base_url);
        debug!("Fetching historical results from {}", url);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .context("Historical results request failed")?;

        if !resp.status().is_success() {
            anyhow::bail!("Historical results error: {}", resp.status());
        }

        let raw: Value = resp
            .json()
            .await
            .context("Failed to parse historical results response")?;

        parse_results_response(&raw)
    }
}

// ── Parsing helpers ────────────────────────────────────────────────────────────

/// Parse the results payload. The endpoint normally returns a bare array;
/// some revisions wrapped it as `{ "data": [...] }`. Rows missing required
/// fields are skipped with a warning rather than failing the whole load.
fn parse_results_response(raw: &Value) -> Result<Vec<PlayerRecord>> {
    let rows = match raw.as_array() {
        Some(a) => a,
        None => match raw.get("data").and_then(|v| v.as_array()) {
            Some(a) => a,
            None => return Ok(vec![]),
        },
    };

    let records = rows
        .iter()
        .filter_map(|row| match parse_row(row) {
            Some(rec) => Some(rec),
            None => {
                warn!("Skipping malformed results row: {}", row);
                None
            }
        })
        .collect();

    Ok(records)
}

fn parse_row(row: &Value) -> Option<PlayerRecord> {
    let name = row["Name"].as_str()?.to_string();

    let draft_year: i32 = row["Draft Year"]
        .as_i64()
        .map(|v| v as i32)
        .or_else(|| row["Draft Year"].as_str().and_then(|s| s.parse().ok()))?;

    // Null, absent, or placeholder picks ("—") mean undrafted/unknown.
    let pick_number: Option<u32> = row["Pick Number"]
        .as_u64()
        .map(|v| v as u32)
        .or_else(|| row["Pick Number"].as_str().and_then(|s| s.parse().ok()));

    let position_group = PositionGroup::parse(row["Position Group"].as_str()?).ok()?;

    let predicted_score: f64 = row["Predicted Score"]
        .as_f64()
        .or_else(|| row["Predicted Score"].as_str().and_then(|s| s.parse().ok()))?;

    Some(PlayerRecord {
        name,
        draft_year,
        pick_number,
        position_group,
        predicted_score,
        origin: Origin::Historical,
    })
}
