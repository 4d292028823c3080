use std::collections::BTreeSet;

use crate::model::{PlayerRecord, PositionGroup};

/// A multi-select filter dimension. Absence of an explicit selection is the
/// `All` sentinel — an empty explicit set is never stored, so `only([])`
/// normalises back to `All`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T: Ord> {
    All,
    Only(BTreeSet<T>),
}

impl<T: Ord> Selection<T> {
    pub fn only(items: impl IntoIterator<Item = T>) -> Self {
        let set: BTreeSet<T> = items.into_iter().collect();
        if set.is_empty() {
            Selection::All
        } else {
            Selection::Only(set)
        }
    }

    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(set) => set.contains(value),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl<T: Ord> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

/// The two independent filter dimensions of the results view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub years: Selection<i32>,
    pub groups: Selection<PositionGroup>,
}

impl FilterState {
    /// User-created records are exempt from both dimensions: they stay
    /// visible regardless of the active selection. The origin check must
    /// run before either predicate.
    pub fn admits(&self, record: &PlayerRecord) -> bool {
        record.is_user_created()
            || (self.years.admits(&record.draft_year)
                && self.groups.admits(&record.position_group))
    }
}

/// Distinct draft years present in the historical set, newest first.
/// Derived exclusively from historical records — user-created records never
/// introduce new filter options.
pub fn available_years(historical: &[PlayerRecord]) -> Vec<i32> {
    let distinct: BTreeSet<i32> = historical.iter().map(|r| r.draft_year).collect();
    distinct.into_iter().rev().collect()
}

/// Distinct position groups present in the historical set, alphabetical.
pub fn available_groups(historical: &[PlayerRecord]) -> Vec<PositionGroup> {
    let distinct: BTreeSet<PositionGroup> =
        historical.iter().map(|r| r.position_group).collect();
    let mut groups: Vec<PositionGroup> = distinct.into_iter().collect();
    groups.sort_by_key(|g| g.as_str());
    groups
}
