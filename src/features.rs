//! Per-position-group attribute schemas.
//!
//! Each group has a fixed attribute vector that the scoring service expects
//! in full; the registry is the single source of truth for attribute names,
//! slider ranges, defaults, and form grouping. Switching position group in a
//! front-end resets every value to its default (`defaults_for`) — attribute
//! values never carry over between groups.

use std::collections::HashMap;

use crate::error::EngineError;
use crate::model::PositionGroup;

/// One attribute definition: range, default, and display metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureSpec {
    /// Wire name, exactly as the scoring service expects it.
    pub name: &'static str,
    /// Human-readable form label.
    pub label: &'static str,
    /// Form section this attribute renders under.
    pub group: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

const fn spec(
    name: &'static str,
    label: &'static str,
    group: &'static str,
    min: f64,
    max: f64,
    default: f64,
) -> FeatureSpec {
    FeatureSpec {
        name,
        label,
        group,
        min,
        max,
        default,
    }
}

// Form sections.
const PROFILE: &str = "Profile";
const TEAM: &str = "Team Context";
const ROLE: &str = "Role";
const EFFICIENCY: &str = "Efficiency";
const PLAYMAKING: &str = "Playmaking";
const REBOUNDING: &str = "Rebounding";
const DEFENSE: &str = "Defense";
const IMPACT: &str = "Impact";
const RATES: &str = "Per-40 Rates";

/// Guard attribute vector (24 features).
const GUARD_SPECS: [FeatureSpec; 24] = [
    spec("Age", "Age", PROFILE, 16.0, 26.0, 19.5),
    spec("Height", "Height (inches)", PROFILE, 68.0, 80.0, 74.0),
    spec("BMI", "Body Mass Index", PROFILE, 18.0, 32.0, 23.5),
    spec("CT_Win%", "College Team Win %", TEAM, 0.0, 100.0, 65.0),
    spec("CT_SOS", "Strength of Schedule", TEAM, -5.0, 15.0, 5.0),
    spec("C_GS%", "Games Started %", ROLE, 0.0, 100.0, 80.0),
    spec("C_MPG", "Minutes Per Game", ROLE, 8.0, 40.0, 30.0),
    spec("C_FG%", "Field Goal %", EFFICIENCY, 30.0, 65.0, 44.0),
    spec("C_3P%", "Three-Point %", EFFICIENCY, 20.0, 50.0, 35.0),
    spec("C_FT%", "Free Throw %", EFFICIENCY, 40.0, 95.0, 75.0),
    spec("C_TS%", "True Shooting %", EFFICIENCY, 42.0, 70.0, 55.0),
    spec("C_AST_TO", "Assist/Turnover Ratio", PLAYMAKING, 0.3, 5.0, 1.8),
    spec("C_AST%", "Assist %", PLAYMAKING, 5.0, 45.0, 22.0),
    spec("C_TOV%", "Turnover %", PLAYMAKING, 5.0, 30.0, 15.0),
    spec("C_USG%", "Usage %", ROLE, 10.0, 38.0, 24.0),
    spec("C_OBPM", "Offensive Box Plus-Minus", IMPACT, -5.0, 15.0, 4.0),
    spec("C_OWS", "Offensive Win Shares", IMPACT, 0.0, 8.0, 3.0),
    spec("C_FGA/40", "FGA per 40", RATES, 5.0, 25.0, 14.0),
    spec("C_3PA/40", "3PA per 40", RATES, 0.0, 14.0, 5.5),
    spec("C_FTA/40", "FTA per 40", RATES, 0.5, 12.0, 5.0),
    spec("C_AST/40", "AST per 40", RATES, 0.5, 12.0, 4.5),
    spec("C_STL/40", "STL per 40", RATES, 0.0, 4.5, 1.5),
    spec("C_TOV/40", "TOV per 40", RATES, 0.5, 6.0, 2.5),
    spec("C_PTS/40", "PTS per 40", RATES, 8.0, 35.0, 18.0),
];

/// Wing attribute vector (21 features).
const WING_SPECS: [FeatureSpec; 21] = [
    spec("Age", "Age", PROFILE, 16.0, 26.0, 19.5),
    spec("Height", "Height (inches)", PROFILE, 74.0, 84.0, 79.0),
    spec("BMI", "Body Mass Index", PROFILE, 19.0, 32.0, 24.0),
    spec("CT_Win%", "College Team Win %", TEAM, 0.0, 100.0, 65.0),
    spec("CT_SOS", "Strength of Schedule", TEAM, -5.0, 15.0, 5.0),
    spec("C_GS%", "Games Started %", ROLE, 0.0, 100.0, 80.0),
    spec("C_MPG", "Minutes Per Game", ROLE, 8.0, 40.0, 29.0),
    spec("C_TS%", "True Shooting %", EFFICIENCY, 42.0, 70.0, 56.0),
    spec("C_AST_TO", "Assist/Turnover Ratio", PLAYMAKING, 0.2, 4.0, 1.3),
    spec("C_ORB_DRB", "ORB/DRB Ratio", REBOUNDING, 0.1, 2.0, 0.5),
    spec("C_TRB%", "Total Rebound %", REBOUNDING, 3.0, 22.0, 9.0),
    spec("C_USG%", "Usage %", ROLE, 10.0, 38.0, 23.0),
    spec("C_BPM", "Box Plus-Minus", IMPACT, -5.0, 15.0, 4.5),
    spec("C_WS", "Win Shares", IMPACT, 0.0, 10.0, 3.5),
    spec("C_FGA/40", "FGA per 40", RATES, 5.0, 25.0, 13.5),
    spec("C_3PA/40", "3PA per 40", RATES, 0.0, 14.0, 5.0),
    spec("C_FTA/40", "FTA per 40", RATES, 0.5, 12.0, 5.0),
    spec("C_TRB/40", "TRB per 40", RATES, 2.0, 16.0, 7.5),
    spec("C_AST/40", "AST per 40", RATES, 0.5, 10.0, 3.0),
    spec("C_TOV/40", "TOV per 40", RATES, 0.5, 6.0, 2.3),
    spec("C_PTS/40", "PTS per 40", RATES, 8.0, 35.0, 18.5),
];

/// Big attribute vector (22 features).
const BIG_SPECS: [FeatureSpec; 22] = [
    spec("Age", "Age", PROFILE, 16.0, 26.0, 19.8),
    spec("Height", "Height (inches)", PROFILE, 78.0, 90.0, 82.0),
    spec("BMI", "Body Mass Index", PROFILE, 20.0, 34.0, 25.0),
    spec("CT_Win%", "College Team Win %", TEAM, 0.0, 100.0, 65.0),
    spec("CT_SOS", "Strength of Schedule", TEAM, -5.0, 15.0, 5.0),
    spec("C_GS%", "Games Started %", ROLE, 0.0, 100.0, 75.0),
    spec("C_MPG", "Minutes Per Game", ROLE, 8.0, 38.0, 27.0),
    spec("C_FG%", "Field Goal %", EFFICIENCY, 40.0, 75.0, 55.0),
    spec("C_FT%", "Free Throw %", EFFICIENCY, 30.0, 90.0, 65.0),
    spec("C_TS%", "True Shooting %", EFFICIENCY, 45.0, 72.0, 58.0),
    spec("C_ORB_DRB", "ORB/DRB Ratio", REBOUNDING, 0.2, 2.0, 0.7),
    spec("C_BLK%", "Block %", DEFENSE, 0.0, 16.0, 4.5),
    spec("C_TRB%", "Total Rebound %", REBOUNDING, 8.0, 28.0, 16.0),
    spec("C_USG%", "Usage %", ROLE, 10.0, 35.0, 22.0),
    spec("C_DBPM", "Defensive Box Plus-Minus", IMPACT, -3.0, 12.0, 2.5),
    spec("C_DWS", "Defensive Win Shares", IMPACT, 0.0, 6.0, 2.0),
    spec("C_FGA/40", "FGA per 40", RATES, 5.0, 22.0, 12.0),
    spec("C_FTA/40", "FTA per 40", RATES, 1.0, 14.0, 6.0),
    spec("C_TRB/40", "TRB per 40", RATES, 5.0, 20.0, 11.0),
    spec("C_STL/40", "STL per 40", RATES, 0.0, 3.5, 1.0),
    spec("C_BLK/40", "BLK per 40", RATES, 0.0, 7.0, 2.2),
    spec("C_PTS/40", "PTS per 40", RATES, 8.0, 32.0, 17.0),
];

/// The full attribute schema for a position group. Pure and total over the
/// three supported groups.
pub fn specs_for(group: PositionGroup) -> &'static [FeatureSpec] {
    match group {
        PositionGroup::Guard => &GUARD_SPECS,
        PositionGroup::Wing => &WING_SPECS,
        PositionGroup::Big => &BIG_SPECS,
    }
}

/// Schema lookup from a raw group label; fails with `UnknownGroup` for any
/// string the registry does not recognise.
pub fn specs_for_name(name: &str) -> Result<&'static [FeatureSpec], EngineError> {
    Ok(specs_for(PositionGroup::parse(name)?))
}

/// Default attribute values for a group, keyed by wire name. This is the
/// payload a form starts from (and resets to when the group changes).
pub fn defaults_for(group: PositionGroup) -> HashMap<String, f64> {
    specs_for(group)
        .iter()
        .map(|s| (s.name.to_string(), s.default))
        .collect()
}
