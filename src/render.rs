//! Terminal views of estimates, suggestions and comparisons.
//!
//! Views are plain data built from shared references; `print_*` adds color.

use colored::Colorize;
use std::fmt;

use crate::compare::{ComparisonRun, Verdict};
use crate::error::{EstimateError, ValidationError};
use crate::models::{AlternativesSuggestion, CostEstimate};
use crate::session::Lane;

/// Dollar amount with two fraction digits, sign kept as-is (`$-3.00`)
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// One breakdown line, e.g. `AWS Glue: $42.50`
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownCard {
    pub component: String,
    pub cost: String,
}

impl fmt::Display for BreakdownCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.component, self.cost)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EstimateView {
    pub total: String,
    pub breakdown: Vec<BreakdownCard>,
    pub notes: Option<String>,
}

impl From<&CostEstimate> for EstimateView {
    fn from(estimate: &CostEstimate) -> Self {
        Self {
            total: format_currency(estimate.total_monthly_cost),
            breakdown: estimate
                .breakdown
                .iter()
                .map(|item| BreakdownCard {
                    component: item.component.clone(),
                    cost: format_currency(item.cost),
                })
                .collect(),
            notes: estimate.notes.clone().filter(|n| !n.trim().is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionCard {
    pub swap: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlternativesView {
    pub suggestions: Vec<SuggestionCard>,
    pub notes: Option<String>,
}

impl From<&AlternativesSuggestion> for AlternativesView {
    fn from(suggestion: &AlternativesSuggestion) -> Self {
        Self {
            suggestions: suggestion
                .suggestions
                .iter()
                .map(|s| SuggestionCard {
                    swap: format!("{} → {}", s.original_service, s.alternative_service),
                    explanation: s.explanation.clone(),
                })
                .collect(),
            notes: suggestion.notes.clone().filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Both lanes of a comparison; a failed lane keeps its error message
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub a: Result<EstimateView, String>,
    pub b: Result<EstimateView, String>,
    pub verdict: Option<Verdict>,
}

impl From<&ComparisonRun> for ComparisonView {
    fn from(run: &ComparisonRun) -> Self {
        let lane = |result: &Result<CostEstimate, EstimateError>| {
            result
                .as_ref()
                .map(EstimateView::from)
                .map_err(ToString::to_string)
        };
        Self {
            a: lane(&run.a),
            b: lane(&run.b),
            verdict: run.verdict(),
        }
    }
}

impl ComparisonView {
    pub fn lane(&self, lane: Lane) -> &Result<EstimateView, String> {
        match lane {
            Lane::A => &self.a,
            Lane::B => &self.b,
        }
    }
}

pub fn print_estimate(view: &EstimateView) {
    println!(
        "{} {}",
        "Total Estimated Monthly Cost:".bold(),
        view.total.green().bold()
    );
    print_breakdown(view, "  ");
}

fn print_breakdown(view: &EstimateView, indent: &str) {
    if view.breakdown.is_empty() {
        println!("{}{}", indent, "(no breakdown returned)".dimmed());
    }
    for card in &view.breakdown {
        println!("{}{}: {}", indent, card.component.cyan(), card.cost);
    }
    if let Some(notes) = &view.notes {
        println!("{}{} {}", indent, "Notes:".yellow(), notes);
    }
}

pub fn print_alternatives(view: &AlternativesView) {
    println!("{}", "Cost Saving Alternatives:".bold());
    if view.suggestions.is_empty() {
        println!("  {}", "No cheaper alternatives suggested".dimmed());
    }
    for (idx, card) in view.suggestions.iter().enumerate() {
        println!("  {}. {}", idx + 1, card.swap.cyan());
        println!("     {}", card.explanation);
    }
    if let Some(notes) = &view.notes {
        println!("  {} {}", "Notes:".yellow(), notes);
    }
}

pub fn print_comparison(view: &ComparisonView) {
    for lane in [Lane::A, Lane::B] {
        match view.lane(lane) {
            Ok(estimate) => {
                println!(
                    "{} {}",
                    format!("Option {}:", lane).bold(),
                    estimate.total.green().bold()
                );
                print_breakdown(estimate, "  ");
            }
            Err(message) => {
                println!("{} {}", format!("Option {}:", lane).bold(), message.red());
            }
        }
        println!();
    }
    match view.verdict {
        Some(Verdict::Cheaper(lane)) => {
            println!("{}", format!("✓ Option {} is cheaper", lane).green().bold())
        }
        Some(Verdict::Comparable) => println!("{}", "Both options have comparable cost".yellow()),
        None => println!("{}", "No verdict: both options need an estimate".dimmed()),
    }
}

/// Guidance for local problems, errors for everything else
pub fn print_error(err: &EstimateError) {
    match err {
        EstimateError::Validation(e) => print_validation(e),
        EstimateError::Ai(e) => eprintln!("{} {}", "✗ Estimate failed:".red().bold(), e),
    }
}

pub fn print_validation(err: &ValidationError) {
    eprintln!("{} {}", "!".yellow().bold(), err.to_string().yellow());
}
