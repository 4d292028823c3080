use anyhow::Result;
use clap::Parser;
use futures_util::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

mod config;
mod console;
mod engine;
mod error;
mod features;
mod model;
mod remote;

use config::Config;
use console::Command;
use engine::Session;
use error::EngineError;
use remote::{ResultsApi, ResultsSource, ScoreModel, ScoringApi};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;

    let scoring: Arc<dyn ScoreModel> =
        Arc::new(ScoringApi::new(&config.api_url, config.request_timeout_secs)?);
    let results = ResultsApi::new(&config.api_url, config.request_timeout_secs)?;

    let mut session = Session::new(
        config.effective_draft_year(),
        config.parse_sort_cycle().expect("validated"),
    );

    // One-time historical fetch. Failure degrades to an empty historical
    // set — the session still works for user-created records.
    info!("Fetching historical draft results via {}", results.name());
    match results.fetch_all().await {
        Ok(records) => session.load_historical(records),
        Err(e) => {
            let err = EngineError::FetchFailed(e);
            warn!("{}; continuing with an empty historical set", err);
        }
    }

    info!(
        "Session ready: scoring via {}, draft year {}, {} historical records, years {:?}, groups {:?}",
        scoring.name(),
        session.draft_year(),
        session.historical().len(),
        session.available_years(),
        session
            .available_groups()
            .iter()
            .map(|g| g.as_str())
            .collect::<Vec<_>>(),
    );
    println!("{}", console::HELP);
    render(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    // In-flight prediction calls. Completions are applied in completion
    // order, which under concurrent submissions may differ from submission
    // order; there is no cancellation.
    let mut inflight = FuturesUnordered::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match console::parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        if let Some(submission) = handle_command(&mut session, command) {
                            let scoring = Arc::clone(&scoring);
                            inflight.push(async move {
                                let outcome = scoring
                                    .predict(submission.group, &submission.values)
                                    .await;
                                (submission, outcome)
                            });
                            println!("scoring... ({} call(s) in flight)", inflight.len());
                        }
                    }
                    Err(e) => println!("error: {:#}", e),
                }
            }
            Some((submission, outcome)) = inflight.next(), if !inflight.is_empty() => {
                match session.apply_prediction(submission, outcome) {
                    Ok(record) => {
                        println!(
                            "created {} ({}): predicted score {:.3}",
                            record.name,
                            record.position_group,
                            record.predicted_score
                        );
                        render(&session);
                    }
                    Err(e) => println!("error: {}", e),
                }
            }
        }
    }

    Ok(())
}

/// Apply one parsed command to the session. Returns a `Submission` when the
/// command needs a remote scoring call; everything else completes
/// synchronously.
fn handle_command(session: &mut Session, command: Command) -> Option<engine::Submission> {
    match command {
        Command::Help => println!("{}", console::HELP),
        Command::Show => render(session),
        Command::Json => {
            let view = session.view();
            match console::snapshot_json(session, &view) {
                Ok(json) => println!("{}", json),
                Err(e) => println!("error: {:#}", e),
            }
        }
        Command::Reset => {
            let cleared = session.user_created().len();
            session.reset();
            println!("cleared {} user-created record(s)", cleared);
            render(session);
        }
        Command::Specs(group) => match console::render_specs(&group) {
            Ok(listing) => print!("{}", listing),
            Err(e) => println!("error: {}", e),
        },
        Command::FilterYears(selection) => {
            session.set_year_filter(selection);
            render(session);
        }
        Command::FilterGroups(selection) => {
            session.set_group_filter(selection);
            render(session);
        }
        Command::Sort(column) => {
            session.toggle_sort(column);
            render(session);
        }
        Command::Submit {
            group,
            name,
            overrides,
        } => {
            // Start from the group's defaults, then apply overrides — the
            // same reset-to-defaults behavior a form has when the group
            // changes.
            let group_for_defaults = match crate::model::PositionGroup::parse(&group) {
                Ok(g) => g,
                Err(e) => {
                    println!("error: {}", e);
                    return None;
                }
            };
            let mut values = features::defaults_for(group_for_defaults);
            for (key, value) in overrides {
                values.insert(key, value);
            }
            match session.prepare_submission(&group, values, name.as_deref()) {
                Ok((submission, warnings)) => {
                    for w in &warnings {
                        println!("warning: {}", w);
                    }
                    return Some(submission);
                }
                Err(e) => println!("error: {}", e),
            }
        }
        Command::Quit => unreachable!("handled by the caller"),
    }
    None
}

/// Render the current view, then report the scroll target the way a
/// graphical renderer would scroll to it.
fn render(session: &Session) {
    if let Some(line) = console::describe_filters(session.filter()) {
        println!("{}", line);
    }
    let view = session.view();
    print!(
        "{}",
        console::render_table(&view, session.highlight(), session.sort_spec())
    );
    if let Some(target) = session.scroll_target(&view) {
        println!("→ {} at row {}", target.name, target.row + 1);
    }
}
