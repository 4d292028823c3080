use crate::model::PlayerRecord;

/// Visual-emphasis and scroll-targeting state for user-created rows.
///
/// Names created this session stay flagged until a full session reset —
/// highlighting never expires on its own. At most one name (the most
/// recently created) is the scroll target.
#[derive(Debug, Clone, Default)]
pub struct HighlightState {
    /// Names in creation order.
    created: Vec<String>,
    most_recent: Option<String>,
}

/// A best-effort request to bring a row into view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollTarget {
    pub row: usize,
    pub name: String,
}

impl HighlightState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flag a newly created record and make it the scroll target.
    pub fn mark_created(&mut self, name: &str) {
        self.created.push(name.to_string());
        self.most_recent = Some(name.to_string());
    }

    /// Whether a row with this name should be visually emphasised. Two
    /// distinct records sharing a name both match.
    pub fn is_highlighted(&self, name: &str) -> bool {
        self.created.iter().any(|n| n == name)
    }

    pub fn most_recent(&self) -> Option<&str> {
        self.most_recent.as_deref()
    }

    pub fn created_names(&self) -> &[String] {
        &self.created
    }

    /// Resolve the most-recent name against the current view: the first row
    /// with a matching name, in view order. Returns `None` when no row
    /// matches — the request is dropped silently, not an error.
    pub fn scroll_target(&self, view: &[PlayerRecord]) -> Option<ScrollTarget> {
        let name = self.most_recent.as_deref()?;
        view.iter()
            .position(|r| r.name == name)
            .map(|row| ScrollTarget {
                row,
                name: name.to_string(),
            })
    }

    /// Full session reset is the only way highlight state clears.
    pub fn reset(&mut self) {
        self.created.clear();
        self.most_recent = None;
    }
}
