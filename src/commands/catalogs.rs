//! Catalogs command implementation
//!
//! Probes every federated catalog for reachability and item count, so an
//! operator can see at a glance which parts of the federation answer.

use std::path::PathBuf;

use console::Style;

use crate::error::Result;
use crate::ui::{InteractiveProgressReporter, ProgressReporter, SilentProgressReporter};

use super::helpers;

struct ProbeOutcome {
    endpoint: String,
    result: Result<usize>,
}

/// Run catalogs command
pub fn run(config: Option<PathBuf>, overrides: &[String]) -> Result<()> {
    let remotes = helpers::open_remotes(config, overrides)?;

    let mut progress: Box<dyn ProgressReporter> = if console::Term::stderr().is_term() {
        Box::new(InteractiveProgressReporter::new())
    } else {
        Box::new(SilentProgressReporter)
    };
    progress.begin(remotes.len() as u64);

    let mut outcomes = Vec::with_capacity(remotes.len());
    for remote in &remotes {
        progress.probing(&remote.endpoint);
        let result = remote.client.get_many(1, 1).map(|page| page.total);
        outcomes.push(ProbeOutcome {
            endpoint: remote.endpoint.clone(),
            result,
        });
        progress.inc();
    }
    progress.finish();

    println!("Federated catalogs ({}):", outcomes.len());
    println!();
    let mut total = 0;
    for outcome in &outcomes {
        println!(
            "  {}",
            Style::new().bold().yellow().apply_to(&outcome.endpoint)
        );
        match &outcome.result {
            Ok(count) => {
                total += count;
                println!(
                    "    {} {}",
                    Style::new().bold().apply_to("Devices:"),
                    count
                );
            }
            Err(err) => {
                println!(
                    "    {} {}",
                    Style::new().bold().red().apply_to("Unreachable:"),
                    err
                );
            }
        }
        println!();
    }
    println!("{} {total}", Style::new().bold().apply_to("Total devices:"));

    Ok(())
}
