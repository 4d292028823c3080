use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::EngineError;

/// Categorical partition of prospects. Each group carries its own fixed
/// attribute schema (see `features`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PositionGroup {
    Guard,
    Wing,
    Big,
}

impl PositionGroup {
    /// Display form, matching the historical dataset's "Position Group" column.
    pub fn as_str(&self) -> &'static str {
        match self {
            PositionGroup::Guard => "Guard",
            PositionGroup::Wing => "Wing",
            PositionGroup::Big => "Big",
        }
    }

    /// Plural form the scoring service keys its models by.
    pub fn api_name(&self) -> &'static str {
        match self {
            PositionGroup::Guard => "Guards",
            PositionGroup::Wing => "Wings",
            PositionGroup::Big => "Bigs",
        }
    }

    /// Parse a group label as it appears in dataset rows or user input.
    /// Accepts both singular and plural forms, case-insensitively.
    pub fn parse(s: &str) -> Result<Self, EngineError> {
        match s.trim().to_lowercase().as_str() {
            "guard" | "guards" | "pg" => Ok(PositionGroup::Guard),
            "wing" | "wings" => Ok(PositionGroup::Wing),
            "big" | "bigs" => Ok(PositionGroup::Big),
            _ => Err(EngineError::UnknownGroup(s.trim().to_string())),
        }
    }
}

impl fmt::Display for PositionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionGroup {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PositionGroup::parse(s)
    }
}

/// Where a record came from. Never serialized outward; controls highlight
/// eligibility and filter exemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Fetched from the historical results dataset.
    Historical,
    /// Created locally via a prediction submission this session.
    UserCreated,
}

/// One row in the results view, historical or user-created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Draft Year")]
    pub draft_year: i32,
    /// `None` is the "unknown pick" sentinel: user-created records, and
    /// historical rows whose pick column is null (undrafted players).
    #[serde(rename = "Pick Number")]
    pub pick_number: Option<u32>,
    #[serde(rename = "Position Group")]
    pub position_group: PositionGroup,
    #[serde(rename = "Predicted Score")]
    pub predicted_score: f64,
    #[serde(skip)]
    pub origin: Origin,
}

impl PlayerRecord {
    pub fn is_user_created(&self) -> bool {
        self.origin == Origin::UserCreated
    }
}
