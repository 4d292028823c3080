use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{EngineError, ValidationWarning};
use crate::features;
use crate::model::{Origin, PlayerRecord, PositionGroup};

use super::filter::{self, FilterState, Selection};
use super::highlight::{HighlightState, ScrollTarget};
use super::sort::{SortColumn, SortCycle, SortSpec, SortState};
use super::view::compute_view;

/// A validated submission waiting on the remote scoring call. Carries no
/// reference into the session, so the call can run while further commands
/// are processed.
#[derive(Debug, Clone)]
pub struct Submission {
    pub group: PositionGroup,
    pub values: HashMap<String, f64>,
    pub requested_name: Option<String>,
}

/// The session engine: owns both record collections and all derived-view
/// inputs (filter, sort, highlight). All mutation happens on the single
/// event-processing task; the view is recomputed from scratch on demand.
///
/// The current draft year and the auto-name sequence are explicit fields
/// here — they are session state, not process-wide globals.
pub struct Session {
    draft_year: i32,
    auto_name_seq: u32,
    historical: Vec<PlayerRecord>,
    user_created: Vec<PlayerRecord>,
    filter: FilterState,
    sort: SortState,
    highlight: HighlightState,
    sort_cycle: SortCycle,
    fetched_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(draft_year: i32, sort_cycle: SortCycle) -> Self {
        Session {
            draft_year,
            auto_name_seq: 0,
            historical: Vec::new(),
            user_created: Vec::new(),
            filter: FilterState::default(),
            sort: SortState::new(sort_cycle),
            highlight: HighlightState::new(),
            sort_cycle,
            fetched_at: None,
        }
    }

    pub fn draft_year(&self) -> i32 {
        self.draft_year
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Install the once-fetched historical set. Every record is stamped
    /// `Historical` regardless of how the source parsed it.
    pub fn load_historical(&mut self, mut records: Vec<PlayerRecord>) {
        for r in &mut records {
            r.origin = Origin::Historical;
        }
        info!("Loaded {} historical draft results", records.len());
        self.historical = records;
        self.fetched_at = Some(Utc::now());
    }

    // ── Submission flow ──────────────────────────────────────────────────────

    /// Validate a form payload into a `Submission`. No state is mutated:
    /// the record only exists once the remote call succeeds.
    ///
    /// Unknown groups and missing attributes are typed errors; out-of-range
    /// values only produce warnings — the remote service is the final
    /// arbiter of validity. Attributes outside the group's schema are
    /// dropped from the payload.
    pub fn prepare_submission(
        &self,
        group_name: &str,
        mut values: HashMap<String, f64>,
        name: Option<&str>,
    ) -> Result<(Submission, Vec<ValidationWarning>), EngineError> {
        let group = PositionGroup::parse(group_name)?;
        let specs = features::specs_for(group);

        let mut warnings = Vec::new();
        for spec in specs {
            match values.get(spec.name) {
                None => {
                    return Err(EngineError::MissingAttribute {
                        group,
                        attribute: spec.name.to_string(),
                    })
                }
                Some(&v) if v < spec.min || v > spec.max => warnings.push(ValidationWarning {
                    attribute: spec.name.to_string(),
                    value: v,
                    min: spec.min,
                    max: spec.max,
                }),
                Some(_) => {}
            }
        }
        values.retain(|k, _| specs.iter().any(|s| s.name == k));

        let requested_name = name
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        Ok((
            Submission {
                group,
                values,
                requested_name,
            },
            warnings,
        ))
    }

    /// Apply the outcome of a remote scoring call. On success the new record
    /// is prepended to the user-created collection (most-recent-first) and
    /// becomes the scroll target. On failure every piece of local state is
    /// left exactly as it was.
    pub fn apply_prediction(
        &mut self,
        submission: Submission,
        outcome: Result<f64>,
    ) -> Result<&PlayerRecord, EngineError> {
        let score = match outcome {
            Ok(s) => s,
            Err(e) => {
                warn!("Prediction for {} failed: {}", submission.group, e);
                return Err(EngineError::PredictionFailed(e));
            }
        };

        self.auto_name_seq += 1;
        let name = submission
            .requested_name
            .unwrap_or_else(|| format!("Player {}", self.auto_name_seq));

        let record = PlayerRecord {
            name: name.clone(),
            draft_year: self.draft_year,
            pick_number: None,
            position_group: submission.group,
            predicted_score: score,
            origin: Origin::UserCreated,
        };

        info!(
            "Created {} ({}, {}): predicted score {:.3}",
            name, submission.group, self.draft_year, score
        );
        self.user_created.insert(0, record);
        self.highlight.mark_created(&name);
        Ok(&self.user_created[0])
    }

    // ── Filters & sorting ────────────────────────────────────────────────────

    pub fn set_year_filter(&mut self, years: Selection<i32>) {
        self.filter.years = years;
    }

    pub fn set_group_filter(&mut self, groups: Selection<PositionGroup>) {
        self.filter.groups = groups;
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Column-header activation; cycles per the configured mode.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sort.activate(column);
    }

    pub fn sort_spec(&self) -> Option<&SortSpec> {
        self.sort.spec()
    }

    // ── Derived views ────────────────────────────────────────────────────────

    /// The current filtered, sorted view. Recomputed from scratch on every
    /// call; never mutated in place.
    pub fn view(&self) -> Vec<PlayerRecord> {
        compute_view(
            &self.historical,
            &self.user_created,
            &self.filter,
            self.sort.spec(),
        )
    }

    /// Filter options, derived from the historical set only.
    pub fn available_years(&self) -> Vec<i32> {
        filter::available_years(&self.historical)
    }

    pub fn available_groups(&self) -> Vec<PositionGroup> {
        filter::available_groups(&self.historical)
    }

    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    pub fn scroll_target(&self, view: &[PlayerRecord]) -> Option<ScrollTarget> {
        self.highlight.scroll_target(view)
    }

    pub fn user_created(&self) -> &[PlayerRecord] {
        &self.user_created
    }

    pub fn historical(&self) -> &[PlayerRecord] {
        &self.historical
    }

    /// Full session reset: drops user-created records, highlight state,
    /// filters, sort state, and the auto-name sequence. The historical set
    /// survives — it is per-session, not per-reset.
    pub fn reset(&mut self) {
        self.user_created.clear();
        self.highlight.reset();
        self.filter = FilterState::default();
        self.sort = SortState::new(self.sort_cycle);
        self.auto_name_seq = 0;
        info!("Session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn session() -> Session {
        Session::new(2026, SortCycle::ThreeState)
    }

    fn historical_fixture() -> Vec<PlayerRecord> {
        vec![
            PlayerRecord {
                name: "A".into(),
                draft_year: 2024,
                pick_number: Some(12),
                position_group: PositionGroup::Guard,
                predicted_score: 5.1,
                origin: Origin::Historical,
            },
            PlayerRecord {
                name: "B".into(),
                draft_year: 2025,
                pick_number: Some(3),
                position_group: PositionGroup::Big,
                predicted_score: 6.2,
                origin: Origin::Historical,
            },
        ]
    }

    fn guard_values() -> HashMap<String, f64> {
        features::defaults_for(PositionGroup::Guard)
    }

    fn submit_ok(session: &mut Session, name: Option<&str>, score: f64) {
        let (submission, warnings) = session
            .prepare_submission("Guard", guard_values(), name)
            .unwrap();
        assert!(warnings.is_empty());
        session.apply_prediction(submission, Ok(score)).unwrap();
    }

    fn names(view: &[PlayerRecord]) -> Vec<&str> {
        view.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_scenario_a_default_view_after_submission() {
        let mut s = session();
        s.load_historical(historical_fixture());
        submit_ok(&mut s, Some("C"), 7.0);

        let view = s.view();
        assert_eq!(names(&view), vec!["C", "B", "A"]);
        assert_relative_eq!(view[0].predicted_score, 7.0);
        assert_eq!(view[0].draft_year, 2026);
        assert_eq!(view[0].pick_number, None);
    }

    #[test]
    fn test_scenario_b_group_filter_exempts_user_record() {
        let mut s = session();
        s.load_historical(historical_fixture());
        submit_ok(&mut s, Some("C"), 7.0);
        s.set_group_filter(Selection::only([PositionGroup::Big]));

        let view = s.view();
        // C is a Guard but user-created; A (Guard, historical) is filtered out.
        assert_eq!(names(&view), vec!["C", "B"]);
    }

    #[test]
    fn test_scenario_c_failed_prediction_leaves_state_unchanged() {
        let mut s = session();
        s.load_historical(historical_fixture());
        submit_ok(&mut s, Some("C"), 7.0);

        let view_before = s.view();
        let created_before = s.user_created().to_vec();
        let most_recent_before = s.highlight().most_recent().map(String::from);

        let (submission, _) = s
            .prepare_submission("Wing", features::defaults_for(PositionGroup::Wing), None)
            .unwrap();
        let err = s
            .apply_prediction(submission, Err(anyhow::anyhow!("503 Service Unavailable")))
            .unwrap_err();
        assert!(matches!(err, EngineError::PredictionFailed(_)));

        assert_eq!(s.user_created(), created_before.as_slice());
        assert_eq!(s.view(), view_before);
        assert_eq!(
            s.highlight().most_recent().map(String::from),
            most_recent_before
        );
    }

    #[test]
    fn test_auto_naming_counts_prior_user_records() {
        let mut s = session();
        submit_ok(&mut s, None, 5.0);
        submit_ok(&mut s, Some("Named"), 5.5);
        submit_ok(&mut s, None, 6.0);

        // Most-recent-first: the third record is "Player 3" even though the
        // second was explicitly named.
        assert_eq!(names(&s.view()), vec!["Player 3", "Named", "Player 1"]);
    }

    #[test]
    fn test_blank_name_falls_back_to_auto_name() {
        let mut s = session();
        let (submission, _) = s
            .prepare_submission("Guard", guard_values(), Some("   "))
            .unwrap();
        s.apply_prediction(submission, Ok(5.0)).unwrap();
        assert_eq!(s.user_created()[0].name, "Player 1");
    }

    #[test]
    fn test_unknown_group_rejected() {
        let s = session();
        let err = s
            .prepare_submission("Forward", HashMap::new(), None)
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownGroup(_)));
    }

    #[test]
    fn test_missing_attribute_rejected() {
        let s = session();
        let mut values = guard_values();
        values.remove("C_3P%");
        let err = s.prepare_submission("Guard", values, None).unwrap_err();
        assert!(
            matches!(err, EngineError::MissingAttribute { ref attribute, .. } if attribute == "C_3P%")
        );
    }

    #[test]
    fn test_out_of_range_warns_but_proceeds() {
        let mut s = session();
        let mut values = guard_values();
        values.insert("Age".into(), 40.0);
        let (submission, warnings) = s.prepare_submission("Guard", values, None).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].attribute, "Age");
        assert_relative_eq!(warnings[0].value, 40.0);
        // Submission still goes through with the out-of-range value intact.
        assert_relative_eq!(submission.values["Age"], 40.0);
        s.apply_prediction(submission, Ok(4.2)).unwrap();
        assert_eq!(s.user_created().len(), 1);
    }

    #[test]
    fn test_extra_attributes_ignored() {
        let s = session();
        let mut values = guard_values();
        values.insert("Wingspan".into(), 84.0);
        let (submission, warnings) = s.prepare_submission("Guard", values, None).unwrap();
        assert!(warnings.is_empty());
        assert!(!submission.values.contains_key("Wingspan"));
        assert_eq!(submission.values.len(), 24);
    }

    #[test]
    fn test_filter_options_ignore_user_created_records() {
        let mut s = session();
        s.load_historical(historical_fixture());
        submit_ok(&mut s, Some("C"), 7.0); // draft_year 2026, not in history

        assert_eq!(s.available_years(), vec![2025, 2024]);
        assert_eq!(
            s.available_groups(),
            vec![PositionGroup::Big, PositionGroup::Guard]
        );
    }

    #[test]
    fn test_completion_order_wins_most_recent() {
        let mut s = session();
        let (first, _) = s
            .prepare_submission("Guard", guard_values(), Some("First"))
            .unwrap();
        let (second, _) = s
            .prepare_submission("Guard", guard_values(), Some("Second"))
            .unwrap();

        // Both submissions in flight; the second completes first.
        s.apply_prediction(second, Ok(6.0)).unwrap();
        s.apply_prediction(first, Ok(5.0)).unwrap();

        // "First" completed last, so it is the most recent and leads the view.
        assert_eq!(s.highlight().most_recent(), Some("First"));
        assert_eq!(names(&s.view()), vec!["Second", "First"]);
    }

    #[test]
    fn test_scroll_target_follows_latest_creation() {
        let mut s = session();
        s.load_historical(historical_fixture());
        submit_ok(&mut s, Some("C"), 7.0);

        let view = s.view();
        let target = s.scroll_target(&view).unwrap();
        assert_eq!(target.name, "C");
        assert_eq!(target.row, 0);
    }

    #[test]
    fn test_reset_clears_session_but_keeps_history() {
        let mut s = session();
        s.load_historical(historical_fixture());
        submit_ok(&mut s, None, 7.0);
        s.set_year_filter(Selection::only([2024]));
        s.toggle_sort(SortColumn::Name);

        s.reset();
        assert!(s.user_created().is_empty());
        assert_eq!(s.historical().len(), 2);
        assert!(s.filter().years.is_all());
        assert_eq!(s.highlight().most_recent(), None);
        // Auto-name sequence restarts.
        submit_ok(&mut s, None, 5.0);
        assert_eq!(s.user_created()[0].name, "Player 1");
    }
}
