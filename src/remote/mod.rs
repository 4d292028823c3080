pub mod history;
pub mod provider;
pub mod scoring;

pub use history::ResultsApi;
pub use provider::{ResultsSource, ScoreModel};
pub use scoring::ScoringApi;
