use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use crate::model::PositionGroup;
use super::provider::ScoreModel;

/// Client for the prediction endpoint of the scoring service.
///
/// The service keys its per-group models by the plural group label and
/// expects the group's full attribute vector in one flat JSON object:
/// `POST /predict { "Age": 19.5, ..., "Position Group": "Guards" }`
/// → `{ "Predicted Score": 6.43 }`.
#[derive(Clone)]
pub struct ScoringApi {
    http: Client,
    base_url: String,
}

impl ScoringApi {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(ScoringApi {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl ScoreModel for ScoringApi {
    fn name(&self) -> &str {
        "ScoringApi"
    }

    async fn predict(&self, group: PositionGroup, values: &HashMap<String, f64>) -> Result<f64> {
        let mut payload = json!(values);
        payload["Position Group"] = Value::String(group.api_name().to_string());

        let url = format!("{}/predict", self.base_url);
        debug!("Requesting prediction from {} ({} attributes)", url, values.len());

        let resp = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .context("Scoring service request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Scoring service error {}: {}", status, body);
        }

        let raw: Value = resp
            .json()
            .await
            .context("Failed to parse scoring service response")?;

        parse_predicted_score(&raw)
    }
}

// ── Parsing helpers ────────────────────────────────────────────────────────────

/// Extract the predicted score from a response body. Some deployments return
/// the score as a JSON string, so fall back to parsing text.
fn parse_predicted_score(raw: &Value) -> Result<f64> {
    let score = raw["Predicted Score"]
        .as_f64()
        .or_else(|| raw["Predicted Score"].as_str().and_then(|s| s.parse().ok()));

    match score {
        Some(s) if s.is_finite() => Ok(s),
        Some(s) => anyhow::bail!("Scoring service returned a non-finite score: {}", s),
        None => anyhow::bail!("Response missing 'Predicted Score': {}", raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_numeric_score() {
        let raw = json!({ "Predicted Score": 6.43 });
        assert_relative_eq!(parse_predicted_score(&raw).unwrap(), 6.43);
    }

    #[test]
    fn test_parse_string_score() {
        let raw = json!({ "Predicted Score": "5.91" });
        assert_relative_eq!(parse_predicted_score(&raw).unwrap(), 5.91);
    }

    #[test]
    fn test_parse_missing_score_field() {
        let raw = json!({ "error": "No model for Centers" });
        assert!(parse_predicted_score(&raw).is_err());
    }

    #[test]
    fn test_parse_non_numeric_score() {
        let raw = json!({ "Predicted Score": "elite" });
        assert!(parse_predicted_score(&raw).is_err());
    }
}
