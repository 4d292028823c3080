//! Line-oriented front-end for the session engine: command parsing, a
//! plain-text table renderer, and a JSON snapshot export. One possible
//! renderer of the engine's view — the engine itself does not dictate any.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::engine::filter::{FilterState, Selection};
use crate::engine::highlight::HighlightState;
use crate::engine::sort::{SortColumn, SortOrder, SortSpec};
use crate::engine::Session;
use crate::features;
use crate::model::{PlayerRecord, PositionGroup};

/// A parsed console command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Json,
    Reset,
    Quit,
    Help,
    Submit {
        group: String,
        name: Option<String>,
        overrides: Vec<(String, f64)>,
    },
    Specs(String),
    FilterYears(Selection<i32>),
    FilterGroups(Selection<PositionGroup>),
    Sort(SortColumn),
}

pub const HELP: &str = "\
commands:
  submit <group> [name=<name>] [<Attr>=<value> ...]
      score a prospect; attributes start at the group's defaults
      e.g.  submit guard name=Ace C_3P%=43.5 Age=18.9
  specs <group>
      list a group's attribute schema (ranges and defaults)
  filter years all | <year>[,<year>...]
  filter groups all | <group>[,<group>...]
  sort <year|pick|name|group|score>
      re-activating the same column cycles the direction
  show    render the current table
  json    export the current snapshot as JSON
  reset   clear user-created records, filters, and sorting
  quit";

/// Parse one input line. Commands are whitespace-separated; attribute
/// overrides use `key=value` (no spaces inside either side).
pub fn parse_command(line: &str) -> Result<Command> {
    let mut tokens = line.split_whitespace();
    let head = tokens.next().context("empty command")?;

    match head.to_lowercase().as_str() {
        "show" | "view" => Ok(Command::Show),
        "json" => Ok(Command::Json),
        "reset" => Ok(Command::Reset),
        "quit" | "exit" => Ok(Command::Quit),
        "help" | "?" => Ok(Command::Help),
        "submit" => {
            let group = tokens
                .next()
                .context("usage: submit <group> [name=<name>] [<Attr>=<value> ...]")?
                .to_string();
            let mut name = None;
            let mut overrides = Vec::new();
            for token in tokens {
                let (key, value) = token
                    .split_once('=')
                    .with_context(|| format!("expected key=value, got '{}'", token))?;
                if key.eq_ignore_ascii_case("name") {
                    name = Some(value.to_string());
                } else {
                    let parsed: f64 = value
                        .parse()
                        .with_context(|| format!("'{}' is not a number for {}", value, key))?;
                    overrides.push((key.to_string(), parsed));
                }
            }
            Ok(Command::Submit {
                group,
                name,
                overrides,
            })
        }
        "filter" => {
            let dimension = tokens.next().context("usage: filter <years|groups> ...")?;
            let values = tokens.next().context("usage: filter <years|groups> <all|list>")?;
            match dimension.to_lowercase().as_str() {
                "years" | "year" => {
                    if values.eq_ignore_ascii_case("all") {
                        return Ok(Command::FilterYears(Selection::All));
                    }
                    let years = values
                        .split(',')
                        .map(|s| {
                            s.trim()
                                .parse::<i32>()
                                .with_context(|| format!("'{}' is not a year", s))
                        })
                        .collect::<Result<Vec<i32>>>()?;
                    Ok(Command::FilterYears(Selection::only(years)))
                }
                "groups" | "group" => {
                    if values.eq_ignore_ascii_case("all") {
                        return Ok(Command::FilterGroups(Selection::All));
                    }
                    let groups = values
                        .split(',')
                        .map(|s| PositionGroup::parse(s).map_err(anyhow::Error::from))
                        .collect::<Result<Vec<PositionGroup>>>()?;
                    Ok(Command::FilterGroups(Selection::only(groups)))
                }
                other => anyhow::bail!("unknown filter dimension '{}'", other),
            }
        }
        "specs" => {
            let group = tokens.next().context("usage: specs <group>")?;
            Ok(Command::Specs(group.to_string()))
        }
        "sort" => {
            let column = tokens.next().context("usage: sort <column>")?;
            SortColumn::parse(column)
                .map(Command::Sort)
                .with_context(|| format!("unknown sort column '{}'", column))
        }
        other => anyhow::bail!("unknown command '{}' (try 'help')", other),
    }
}

// ── Rendering ──────────────────────────────────────────────────────────────────

fn sort_marker(sort: Option<&SortSpec>, column: SortColumn) -> &'static str {
    match sort {
        Some(spec) if spec.column == column => match spec.order {
            SortOrder::Ascending => " ▲",
            SortOrder::Descending => " ▼",
        },
        _ => "",
    }
}

/// Render the view as an aligned text table. User-created rows are marked
/// `*` in the leftmost column (`★` for the most recently created one); the
/// active sort column carries a direction arrow in its header.
pub fn render_table(
    view: &[PlayerRecord],
    highlight: &HighlightState,
    sort: Option<&SortSpec>,
) -> String {
    let name_width = view
        .iter()
        .map(|r| r.name.chars().count())
        .chain(std::iter::once("Name".len()))
        .max()
        .unwrap_or(4);

    let mut out = String::new();
    out.push_str(&format!(
        "  {:<6} {:<5} {:<name_width$} {:<7} {}\n",
        format!("Year{}", sort_marker(sort, SortColumn::Year)),
        format!("Pick{}", sort_marker(sort, SortColumn::Pick)),
        format!("Name{}", sort_marker(sort, SortColumn::Name)),
        format!("Pos{}", sort_marker(sort, SortColumn::Group)),
        format!("Score{}", sort_marker(sort, SortColumn::Score)),
    ));

    for record in view {
        let marker = if !record.is_user_created() || !highlight.is_highlighted(&record.name) {
            " "
        } else if highlight.most_recent() == Some(record.name.as_str()) {
            "★"
        } else {
            "*"
        };
        let pick = match record.pick_number {
            Some(p) => p.to_string(),
            None => "—".to_string(),
        };
        out.push_str(&format!(
            "{} {:<6} {:<5} {:<name_width$} {:<7} {:.3}\n",
            marker,
            record.draft_year,
            pick,
            record.name,
            record.position_group.as_str(),
            record.predicted_score,
        ));
    }

    if view.is_empty() {
        out.push_str("  (no rows match the active filters)\n");
    }
    out
}

/// One line per attribute of a group's schema, for the `specs` command.
pub fn render_specs(group_name: &str) -> Result<String> {
    let specs = features::specs_for_name(group_name)?;
    let mut out = String::new();
    for s in specs {
        out.push_str(&format!(
            "  {:<10} {:<13} [{}, {}]  default {}  {}\n",
            s.name, s.group, s.min, s.max, s.default, s.label
        ));
    }
    Ok(out)
}

/// A one-line summary of the active filters, or `None` when both dimensions
/// are `All`.
pub fn describe_filters(filter: &FilterState) -> Option<String> {
    if filter.years.is_all() && filter.groups.is_all() {
        return None;
    }
    let years = match &filter.years {
        Selection::All => "all".to_string(),
        Selection::Only(set) => set
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(","),
    };
    let groups = match &filter.groups {
        Selection::All => "all".to_string(),
        Selection::Only(set) => set
            .iter()
            .map(|g| g.as_str())
            .collect::<Vec<_>>()
            .join(","),
    };
    Some(format!(
        "filters: years={} groups={} (user-created rows always shown)",
        years, groups
    ))
}

// ── Snapshot export ────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Snapshot<'a> {
    fetched_at: Option<DateTime<Utc>>,
    available_years: Vec<i32>,
    available_groups: Vec<PositionGroup>,
    highlighted: &'a [String],
    rows: &'a [PlayerRecord],
}

/// Serialize the current view plus filter options and highlight state.
/// This is the same data the engine hands any renderer, in portable form.
pub fn snapshot_json(session: &Session, view: &[PlayerRecord]) -> Result<String> {
    let snapshot = Snapshot {
        fetched_at: session.fetched_at(),
        available_years: session.available_years(),
        available_groups: session.available_groups(),
        highlighted: session.highlight().created_names(),
        rows: view,
    };
    serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::sort::SortCycle;
    use crate::model::Origin;

    #[test]
    fn test_parse_submit_with_overrides() {
        let cmd = parse_command("submit guard name=Ace C_3P%=43.5 Age=18.9").unwrap();
        assert_eq!(
            cmd,
            Command::Submit {
                group: "guard".into(),
                name: Some("Ace".into()),
                overrides: vec![("C_3P%".into(), 43.5), ("Age".into(), 18.9)],
            }
        );
    }

    #[test]
    fn test_parse_submit_rejects_bad_value() {
        assert!(parse_command("submit guard Age=young").is_err());
    }

    #[test]
    fn test_parse_filter_years() {
        assert_eq!(
            parse_command("filter years 2024,2025").unwrap(),
            Command::FilterYears(Selection::only([2024, 2025]))
        );
        assert_eq!(
            parse_command("filter years all").unwrap(),
            Command::FilterYears(Selection::All)
        );
    }

    #[test]
    fn test_parse_filter_groups_accepts_plural() {
        assert_eq!(
            parse_command("filter groups Guards,Wing").unwrap(),
            Command::FilterGroups(Selection::only([
                PositionGroup::Guard,
                PositionGroup::Wing
            ]))
        );
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(
            parse_command("sort score").unwrap(),
            Command::Sort(SortColumn::Score)
        );
        assert!(parse_command("sort vibes").is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(parse_command("dance").is_err());
        assert!(parse_command("   ").is_err());
    }

    #[test]
    fn test_render_marks_user_rows_and_unknown_picks() {
        let mut highlight = HighlightState::new();
        highlight.mark_created("Mine");
        let view = vec![
            PlayerRecord {
                name: "Mine".into(),
                draft_year: 2026,
                pick_number: None,
                position_group: PositionGroup::Guard,
                predicted_score: 7.0,
                origin: Origin::UserCreated,
            },
            PlayerRecord {
                name: "Hist".into(),
                draft_year: 2024,
                pick_number: Some(5),
                position_group: PositionGroup::Big,
                predicted_score: 6.2,
                origin: Origin::Historical,
            },
        ];
        let table = render_table(&view, &highlight, None);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[1].starts_with('★'));
        assert!(lines[1].contains('—'));
        assert!(lines[2].starts_with(' '));
        assert!(lines[2].contains("6.200"));
    }

    #[test]
    fn test_render_earlier_creations_keep_plain_marker() {
        let mut highlight = HighlightState::new();
        highlight.mark_created("Old");
        highlight.mark_created("New");
        let record = |name: &str| PlayerRecord {
            name: name.into(),
            draft_year: 2026,
            pick_number: None,
            position_group: PositionGroup::Guard,
            predicted_score: 5.0,
            origin: Origin::UserCreated,
        };
        let table = render_table(&[record("New"), record("Old")], &highlight, None);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[1].starts_with('★'));
        assert!(lines[2].starts_with('*'));
    }

    #[test]
    fn test_parse_specs_command() {
        assert_eq!(
            parse_command("specs bigs").unwrap(),
            Command::Specs("bigs".into())
        );
    }

    #[test]
    fn test_render_specs_lists_schema() {
        let out = render_specs("guard").unwrap();
        assert_eq!(out.lines().count(), 24);
        assert!(out.contains("C_3P%"));
        assert!(out.contains("Three-Point %"));
        assert!(render_specs("mascot").is_err());
    }

    #[test]
    fn test_describe_filters() {
        assert_eq!(describe_filters(&FilterState::default()), None);
        let filter = FilterState {
            years: Selection::only([2025, 2024]),
            groups: Selection::only([PositionGroup::Big]),
        };
        let line = describe_filters(&filter).unwrap();
        assert!(line.contains("years=2024,2025"));
        assert!(line.contains("groups=Big"));
    }

    #[test]
    fn test_render_sort_marker_on_active_column() {
        let spec = SortSpec {
            column: SortColumn::Score,
            order: SortOrder::Descending,
        };
        let table = render_table(&[], &HighlightState::new(), Some(&spec));
        assert!(table.lines().next().unwrap().contains("Score ▼"));
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut session = Session::new(2026, SortCycle::ThreeState);
        session.load_historical(vec![PlayerRecord {
            name: "A".into(),
            draft_year: 2024,
            pick_number: Some(1),
            position_group: PositionGroup::Guard,
            predicted_score: 5.1,
            origin: Origin::Historical,
        }]);
        let view = session.view();
        let json = snapshot_json(&session, &view).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["available_years"][0], 2024);
        assert_eq!(value["rows"][0]["Name"], "A");
        assert!(value["fetched_at"].is_string());
        assert!(value["rows"][0].get("origin").is_none());
    }
}
