use chrono::Datelike;
use clap::Parser;

use crate::engine::sort::SortCycle;

/// Draft prospect scoring console
#[derive(Parser, Debug, Clone)]
#[command(name = "draftscope", version, about)]
pub struct Config {
    /// Base URL of the scoring/results API
    #[arg(
        long,
        env = "DRAFTSCOPE_API_URL",
        default_value = "http://127.0.0.1:5000/api"
    )]
    pub api_url: String,

    /// Draft year assigned to user-created prospects (defaults to the current year)
    #[arg(long, env = "DRAFT_YEAR")]
    pub draft_year: Option<i32>,

    /// Sort-header cycle: "three-state" (asc → desc → unsorted) or "two-state" (asc ↔ desc)
    #[arg(long, env = "SORT_CYCLE", default_value = "three-state")]
    pub sort_cycle: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "10")]
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must be an http(s) URL, got '{}'", self.api_url);
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be positive");
        }
        if self.parse_sort_cycle().is_none() {
            anyhow::bail!(
                "sort_cycle must be 'three-state' or 'two-state', got '{}'",
                self.sort_cycle
            );
        }
        if let Some(year) = self.draft_year {
            // The BAA's first draft was 1947.
            if !(1947..=2100).contains(&year) {
                anyhow::bail!("draft_year {} is out of range", year);
            }
        }
        Ok(())
    }

    /// The draft year stamped on user-created records.
    pub fn effective_draft_year(&self) -> i32 {
        self.draft_year
            .unwrap_or_else(|| chrono::Utc::now().year())
    }

    pub fn parse_sort_cycle(&self) -> Option<SortCycle> {
        match self.sort_cycle.trim().to_lowercase().as_str() {
            "three-state" | "three" | "3" => Some(SortCycle::ThreeState),
            "two-state" | "two" | "2" => Some(SortCycle::TwoState),
            _ => None,
        }
    }
}
