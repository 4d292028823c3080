use std::cmp::Ordering;

use crate::model::PlayerRecord;

/// A sortable column of the results table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Year,
    Pick,
    Name,
    Group,
    Score,
}

impl SortColumn {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "year" | "draftyear" => Some(SortColumn::Year),
            "pick" => Some(SortColumn::Pick),
            "name" => Some(SortColumn::Name),
            "group" | "position" | "pos" => Some(SortColumn::Group),
            "score" | "pred" => Some(SortColumn::Score),
            _ => None,
        }
    }

}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// The active `(column, direction)` pair governing table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub order: SortOrder,
}

/// Header-activation cycle behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCycle {
    /// unsorted → ascending → descending → unsorted
    ThreeState,
    /// ascending → descending → ascending
    TwoState,
}

/// Single-column sort state with the configured activation cycle. Starts on
/// predicted score, descending.
#[derive(Debug, Clone)]
pub struct SortState {
    spec: Option<SortSpec>,
    cycle: SortCycle,
}

impl SortState {
    pub fn new(cycle: SortCycle) -> Self {
        SortState {
            spec: Some(SortSpec {
                column: SortColumn::Score,
                order: SortOrder::Descending,
            }),
            cycle,
        }
    }

    pub fn spec(&self) -> Option<&SortSpec> {
        self.spec.as_ref()
    }

    /// Activate a column header. Re-activating the active column advances
    /// the cycle; activating a different column makes it the sole sort key,
    /// ascending.
    pub fn activate(&mut self, column: SortColumn) {
        self.spec = match self.spec {
            Some(spec) if spec.column == column => match (spec.order, self.cycle) {
                (SortOrder::Ascending, _) => Some(SortSpec {
                    column,
                    order: SortOrder::Descending,
                }),
                (SortOrder::Descending, SortCycle::ThreeState) => None,
                (SortOrder::Descending, SortCycle::TwoState) => Some(SortSpec {
                    column,
                    order: SortOrder::Ascending,
                }),
            },
            _ => Some(SortSpec {
                column,
                order: SortOrder::Ascending,
            }),
        };
    }
}

/// Type-aware column comparison. Numeric columns compare numerically;
/// formatted as text, "10.2" would sort before "9.5". Text columns compare
/// by case-sensitive lexicographic order of their display form.
pub fn compare(a: &PlayerRecord, b: &PlayerRecord, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Year => a.draft_year.cmp(&b.draft_year),
        SortColumn::Pick => compare_picks(a.pick_number, b.pick_number),
        SortColumn::Name => a.name.cmp(&b.name),
        SortColumn::Group => a.position_group.as_str().cmp(b.position_group.as_str()),
        SortColumn::Score => a
            .predicted_score
            .partial_cmp(&b.predicted_score)
            .unwrap_or(Ordering::Equal),
    }
}

/// Known picks compare numerically; the unknown sentinel orders after every
/// known pick under ascending order. Direction reverses the comparator
/// wholesale (see DESIGN.md).
fn compare_picks(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// The full ordering for a sort spec: column comparison, then direction.
pub fn ordering_for(spec: &SortSpec, a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
    let ord = compare(a, b, spec.column);
    match spec.order {
        SortOrder::Ascending => ord,
        SortOrder::Descending => ord.reverse(),
    }
}
