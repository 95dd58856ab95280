//! Handler for the `analyze` command.

use std::io::IsTerminal;

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::adapter::inbound::cli::command::AnalyzeArgs;
use crate::adapter::inbound::cli::{output, report};
use crate::application::BatchRanker;
use crate::domain::{fabricator_candidates, select, Outcome, Selection};
use crate::error::{ConfigError, Result};
use crate::infrastructure::bootstrap::{build_ranker, Sources};
use crate::infrastructure::config::settings::Config;

/// Execute the analyze command against the live sources.
pub async fn execute(args: &AnalyzeArgs) -> Result<()> {
    let config = super::load_config(&args.config)?;
    super::init_logging(&config);
    let sources = Sources::live(&config)?;
    run(&config, &sources, args).await
}

/// Run the analyze flow over `sources`.
pub async fn run(config: &Config, sources: &Sources, args: &AnalyzeArgs) -> Result<()> {
    let ranker = build_ranker(config, sources, args.concurrency)?;
    let fiat_symbol = config.pricing.fiat_symbol.as_str();
    output::header(env!("CARGO_PKG_VERSION"));

    if let Some(name) = args
        .fabricator
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
    {
        return analyze_one(&ranker, name, fiat_symbol).await;
    }

    let account = resolve_account(args.steam_id.as_deref(), config.default_account.as_deref())?;
    output::field("Account", &account);

    let pb = output::spinner("Fetching inventory...");
    let items = match sources
        .inventory
        .list_items(&account, config.sources.app_id, &config.sources.item_type)
        .await
    {
        Ok(items) => items,
        Err(err) => {
            output::spinner_fail(&pb, "Could not read inventory");
            return Err(err);
        }
    };
    let candidates = fabricator_candidates(items);
    output::spinner_success(&pb, &format!("Found {} killstreak fabricators", candidates.len()));

    if candidates.is_empty() {
        output::warning("No killstreak fabricators found in inventory!");
        output::hint("use --fabricator to analyze a fabricator by name");
        return Ok(());
    }

    let selection = resolve_selection(args.choice.as_deref(), &candidates)?;
    info!(selection = ?selection, "Selection resolved");

    match selection {
        Selection::All => {
            let report = analyze_all(&ranker, &candidates).await;
            report::render_summary(&report, args.profitable_only);
            Ok(())
        }
        selection => {
            let names = select(&candidates, &selection)?;
            for name in &names {
                analyze_one(&ranker, name, fiat_symbol).await?;
            }
            Ok(())
        }
    }
}

async fn analyze_one(ranker: &BatchRanker, name: &str, fiat_symbol: &str) -> Result<()> {
    let pb = output::spinner(&format!("Analyzing {name}..."));
    match ranker.engine().analyze(name).await {
        Outcome::Analyzed(result) => {
            output::spinner_success(&pb, "Analysis complete");
            report::render_detail(&result, fiat_symbol);
        }
        Outcome::Skipped(skip) => {
            output::spinner_fail(&pb, &format!("Could not analyze {name}: {}", skip.reason));
        }
    }
    Ok(())
}

async fn analyze_all(ranker: &BatchRanker, candidates: &[String]) -> crate::application::BatchReport {
    let (cancel_tx, cancel_rx) = watch::channel(false);
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, finishing analyses in flight");
            let _ = cancel_tx.send(true);
        }
    });

    let total = candidates.len();
    let pb = output::spinner(&format!("Analyzing {total} fabricators..."));
    let report = ranker
        .rank_all_with_progress(candidates, &cancel_rx, |done, outcome| {
            let name = match outcome {
                Outcome::Analyzed(result) => result.candidate.as_str(),
                Outcome::Skipped(skip) => skip.candidate.as_str(),
            };
            pb.set_message(format!("[{done}/{total}] {name}"));
        })
        .await;
    interrupt.abort();

    if report.is_cancelled() {
        output::spinner_fail(&pb, "Analysis interrupted");
    } else {
        output::spinner_success(&pb, &format!("Analyzed {total} fabricators"));
    }
    report
}

fn interactive() -> bool {
    !output::is_json() && std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Account from the flag, the config or a prompt, in that order.
fn resolve_account(flag: Option<&str>, configured: Option<&str>) -> Result<String> {
    let given = flag
        .or(configured)
        .map(str::trim)
        .filter(|account| !account.is_empty());
    if let Some(account) = given {
        return Ok(account.to_string());
    }

    if !interactive() {
        return Err(ConfigError::MissingField {
            field: "default_account",
        }
        .into());
    }
    let account: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Steam ID")
        .interact_text()?;
    Ok(account.trim().to_string())
}

/// Selection from the `--choice` flag or the interactive menu.
///
/// Without a flag and without a terminal every candidate is analyzed.
fn resolve_selection(choice: Option<&str>, candidates: &[String]) -> Result<Selection> {
    let choice = match choice {
        Some(choice) => choice.trim().to_string(),
        None if interactive() => prompt_choice(candidates)?,
        None => "0".to_string(),
    };

    if choice == "00" {
        let name = if interactive() {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt("Fabricator name")
                .interact_text()?
        } else {
            String::new()
        };
        return Ok(Selection::parse(&choice, Some(&name))?);
    }
    Ok(Selection::parse(&choice, None)?)
}

fn prompt_choice(candidates: &[String]) -> Result<String> {
    let mut items = Vec::with_capacity(candidates.len() + 2);
    items.push("Analyze ALL fabricators".to_string());
    items.extend(candidates.iter().cloned());
    items.push("Input custom fabricator name".to_string());

    let picked = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Select a fabricator")
        .items(&items)
        .default(0)
        .interact()?;

    Ok(menu_choice(picked, candidates.len()))
}

/// Map a menu position to the `--choice` syntax.
fn menu_choice(position: usize, candidates: usize) -> String {
    if position > candidates {
        "00".to_string()
    } else {
        position.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_positions_map_to_choices() {
        assert_eq!(menu_choice(0, 3), "0");
        assert_eq!(menu_choice(2, 3), "2");
        assert_eq!(menu_choice(4, 3), "00");
    }

    #[test]
    fn flag_account_wins_over_config() {
        let account = resolve_account(Some(" 765 "), Some("111")).unwrap();
        assert_eq!(account, "765");
    }

    #[test]
    fn configured_account_is_used() {
        assert_eq!(resolve_account(None, Some("111")).unwrap(), "111");
    }

    #[test]
    fn explicit_choice_is_parsed() {
        let candidates = vec!["Killstreak Fabricator - Scattergun".to_string()];
        assert_eq!(resolve_selection(Some("1"), &candidates).unwrap(), Selection::Index(1));
        assert_eq!(resolve_selection(Some("0"), &candidates).unwrap(), Selection::All);
        assert!(resolve_selection(Some("x"), &candidates).is_err());
    }
}
