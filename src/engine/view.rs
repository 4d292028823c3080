use crate::model::PlayerRecord;

use super::filter::FilterState;
use super::sort::{ordering_for, SortSpec};

/// Compute the filtered, sorted results view from scratch.
///
/// 1. user-created records (most-recent-first) ahead of historical records
///    (source order);
/// 2. retain records the filter admits (user-created records are exempt);
/// 3. stable sort by the active spec — ties keep their pre-sort order, and
///    `None` leaves the merge order untouched.
///
/// The result is a fresh `Vec` every time; identical inputs produce an
/// identical ordering. Datasets are hundreds of rows, so recomputing on
/// every change beats incremental bookkeeping.
pub fn compute_view(
    historical: &[PlayerRecord],
    user_created: &[PlayerRecord],
    filter: &FilterState,
    sort: Option<&SortSpec>,
) -> Vec<PlayerRecord> {
    let mut rows: Vec<PlayerRecord> = user_created
        .iter()
        .chain(historical.iter())
        .filter(|r| filter.admits(r))
        .cloned()
        .collect();

    if let Some(spec) = sort {
        rows.sort_by(|a, b| ordering_for(spec, a, b));
    }

    rows
}
