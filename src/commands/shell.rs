//! Interactive line shell over a single session.

use anyhow::Result;
use colored::Colorize;
use pipecost::{
    compare,
    config::{Config, GeminiConfig},
    estimator,
    models::{CloudProvider, ComponentField},
    prompt::describe_component,
    providers::GeminiClient,
    render::{self, AlternativesView, ComparisonView, EstimateView},
    scenario,
    session::{Lane, Session},
};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

const HELP: &str = "\
Commands:
  provider <aws|gcp|azure>            select the cloud provider
  add [a|b]                           append a component row (default: a)
  remove [a|b]                        remove the last component row
  set <a|b> <row> <field> <value>     edit a field: service, operation, quantity,
                                      unit, frequency (monthly|daily|each_run), runs
  show                                print the session
  estimate                            estimate Option A
  alternatives                        suggest cheaper alternatives for Option A
  compare                             compare Option A and Option B
  prompt [a|b]                        print the estimate prompt for a lane
  clear                               reset the whole session
  help                                show this help
  quit                                leave the shell";

/// One parsed shell line
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Provider(CloudProvider),
    Add(Lane),
    Remove(Lane),
    Set {
        lane: Lane,
        row: usize,
        field: ComponentField,
        value: String,
    },
    Show,
    Estimate,
    Alternatives,
    Compare,
    Prompt(Lane),
    Clear,
    Help,
    Quit,
}

/// Parse one input line; blank lines yield `None`
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let (verb, rest) = next_word(line);
    let command = match verb.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "provider" => ShellCommand::Provider(required(rest, "provider")?.parse()?),
        "add" => ShellCommand::Add(optional_lane(rest)?),
        "remove" | "rm" => ShellCommand::Remove(optional_lane(rest)?),
        "set" => {
            let (lane, rest) = next_word(rest);
            let (row, rest) = next_word(rest);
            let (field, value) = next_word(rest);
            if field.is_empty() {
                return Err("usage: set <a|b> <row> <field> <value>".to_string());
            }
            let row = match row.parse::<usize>() {
                Ok(row) if row > 0 => row,
                _ => return Err(format!("row must be a positive number, got '{}'", row)),
            };
            ShellCommand::Set {
                lane: lane.parse()?,
                row,
                field: field.parse::<ComponentField>().map_err(|e| e.to_string())?,
                value: value.trim().to_string(),
            }
        }
        "show" | "ls" => ShellCommand::Show,
        "estimate" => ShellCommand::Estimate,
        "alternatives" | "alt" => ShellCommand::Alternatives,
        "compare" => ShellCommand::Compare,
        "prompt" => ShellCommand::Prompt(optional_lane(rest)?),
        "clear" | "reset" => ShellCommand::Clear,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{}' (type 'help')", other)),
    };
    Ok(Some(command))
}

fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    input
        .split_once(char::is_whitespace)
        .unwrap_or((input, ""))
}

fn required<'a>(input: &'a str, what: &str) -> Result<&'a str, String> {
    let value = input.trim();
    if value.is_empty() {
        Err(format!("missing {}", what))
    } else {
        Ok(value)
    }
}

fn optional_lane(input: &str) -> Result<Lane, String> {
    match input.trim() {
        "" => Ok(Lane::A),
        lane => lane.parse(),
    }
}

struct Shell {
    session: Session,
    gemini: GeminiConfig,
    client: Option<GeminiClient>,
}

/// Build the client on first use so offline commands work without a key
fn ensure_client<'c>(
    slot: &'c mut Option<GeminiClient>,
    gemini: &GeminiConfig,
) -> Result<&'c GeminiClient> {
    if slot.is_none() {
        *slot = Some(super::connect(gemini)?);
    }
    slot.as_ref()
        .ok_or_else(|| anyhow::anyhow!("Gemini client unavailable"))
}

impl Shell {
    async fn run(&mut self, command: ShellCommand) {
        debug!(session = %self.session.id(), ?command, "Shell command");
        match command {
            ShellCommand::Provider(provider) => {
                self.session.set_provider(provider);
                println!("Provider set to {}", provider.to_string().cyan());
            }
            ShellCommand::Add(lane) => {
                self.session.add_component(lane);
                println!(
                    "Added row {} to Option {}",
                    self.session.components(lane).len(),
                    lane
                );
            }
            ShellCommand::Remove(lane) => match self.session.remove_last(lane) {
                Some(removed) if removed.has_service() => {
                    println!("Removed {} from Option {}", removed.service, lane)
                }
                Some(_) => println!("Removed last row from Option {}", lane),
                None => println!("{}", format!("Option {} is already empty", lane).dimmed()),
            },
            ShellCommand::Set {
                lane,
                row,
                field,
                value,
            } => match row
                .checked_sub(1)
                .and_then(|idx| self.session.component_mut(lane, idx))
            {
                Some(component) => {
                    if let Err(e) = component.apply_edit(field, &value) {
                        render::print_validation(&e);
                    }
                }
                None => eprintln!(
                    "{}",
                    format!("Option {} has no row {}", lane, row).yellow()
                ),
            },
            ShellCommand::Show => self.show(),
            ShellCommand::Estimate => {
                let client = match ensure_client(&mut self.client, &self.gemini) {
                    Ok(client) => client,
                    Err(e) => {
                        eprintln!("{} {}", "✗".red(), e);
                        return;
                    }
                };
                match estimator::generate_cost_estimate(&mut self.session, client).await {
                    Ok(estimate) => render::print_estimate(&EstimateView::from(estimate)),
                    Err(e) => render::print_error(&e),
                }
            }
            ShellCommand::Alternatives => {
                let client = match ensure_client(&mut self.client, &self.gemini) {
                    Ok(client) => client,
                    Err(e) => {
                        eprintln!("{} {}", "✗".red(), e);
                        return;
                    }
                };
                match estimator::suggest_alternatives(&mut self.session, client).await {
                    Ok(suggestion) => render::print_alternatives(&AlternativesView::from(suggestion)),
                    Err(e) => render::print_error(&e),
                }
            }
            ShellCommand::Compare => {
                let client = match ensure_client(&mut self.client, &self.gemini) {
                    Ok(client) => client,
                    Err(e) => {
                        eprintln!("{} {}", "✗".red(), e);
                        return;
                    }
                };
                match compare::compare_scenarios(&mut self.session, client).await {
                    Ok(run) => render::print_comparison(&ComparisonView::from(&run)),
                    Err(e) => render::print_validation(&e),
                }
            }
            ShellCommand::Prompt(lane) => match super::prompt::build(&self.session, lane, false) {
                Ok(request) => println!("{}", request.prompt),
                Err(e) => eprintln!("{} {}", "!".yellow().bold(), e.to_string().yellow()),
            },
            ShellCommand::Clear => {
                self.session.clear();
                println!("Session cleared");
            }
            ShellCommand::Help => println!("{}", HELP),
            ShellCommand::Quit => {}
        }
    }

    fn show(&self) {
        println!("{} {}", "Provider:".bold(), self.session.provider());
        for (lane, title) in [(Lane::A, "Option A (main pipeline)"), (Lane::B, "Option B")] {
            println!("{}", title.bold());
            let components = self.session.components(lane);
            if components.is_empty() {
                println!("  {}", "(no components)".dimmed());
            }
            for (idx, component) in components.iter().enumerate() {
                let line = describe_component(component);
                let line = line.trim_start_matches("- ");
                if component.is_valid() {
                    println!("  {}. {}", idx + 1, line);
                } else {
                    println!("  {}. {} {}", idx + 1, line, "(incomplete)".yellow());
                }
            }
        }
        if let Some(estimate) = self.session.estimate() {
            println!();
            render::print_estimate(&EstimateView::from(estimate));
        }
    }
}

/// Execute the shell command
pub async fn execute(cfg: &Config, scenario_path: Option<&Path>) -> Result<()> {
    let session = match scenario_path {
        Some(path) => scenario::load_scenario(path)?,
        None => Session::default(),
    };
    info!(session = %session.id(), "Starting interactive session");

    let mut shell = Shell {
        session,
        gemini: cfg.gemini.clone(),
        client: None,
    };

    println!("{}", "Data pipeline cost estimator".green().bold());
    println!("{}", "Type 'help' for commands, 'quit' to leave.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", "pipecost>".cyan());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        match parse_line(&line) {
            Ok(None) => continue,
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(command)) => shell.run(command).await,
            Err(message) => eprintln!("{} {}", "!".yellow().bold(), message),
        }
    }

    info!(session = %shell.session.id(), "Interactive session ended");
    Ok(())
}
