//! Side-by-side estimate of two pipelines.

use std::fmt;
use tracing::{info, info_span, warn, Instrument};

use crate::error::{EstimateError, ValidationError};
use crate::estimator::request_estimate;
use crate::models::CostEstimate;
use crate::providers::StructuredClient;
use crate::session::{Lane, Session};

/// Which lane came out cheaper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Cheaper(Lane),
    Comparable,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cheaper(lane) => write!(f, "Option {} is cheaper", lane),
            Self::Comparable => f.write_str("comparable cost"),
        }
    }
}

/// Compare two totals; only available when both lanes produced an estimate
pub fn verdict(a: Option<&CostEstimate>, b: Option<&CostEstimate>) -> Option<Verdict> {
    let (a, b) = (a?, b?);
    let verdict = if a.total_monthly_cost < b.total_monthly_cost {
        Verdict::Cheaper(Lane::A)
    } else if b.total_monthly_cost < a.total_monthly_cost {
        Verdict::Cheaper(Lane::B)
    } else {
        Verdict::Comparable
    };
    Some(verdict)
}

/// Outcome of both lanes; one failing never hides the other
#[derive(Debug)]
pub struct ComparisonRun {
    pub a: Result<CostEstimate, EstimateError>,
    pub b: Result<CostEstimate, EstimateError>,
}

impl ComparisonRun {
    pub fn lane(&self, lane: Lane) -> &Result<CostEstimate, EstimateError> {
        match lane {
            Lane::A => &self.a,
            Lane::B => &self.b,
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        verdict(self.a.as_ref().ok(), self.b.as_ref().ok())
    }
}

/// Estimate both lanes and store each result in its comparison slot.
///
/// Both lanes need at least one component with a service name before any
/// request is sent. The slots are cleared first and each lane is then
/// requested independently.
pub async fn compare_scenarios(
    session: &mut Session,
    client: &dyn StructuredClient,
) -> Result<ComparisonRun, ValidationError> {
    for lane in [Lane::A, Lane::B] {
        if !session.components(lane).iter().any(|c| c.has_service()) {
            return Err(ValidationError::MissingLane(lane));
        }
    }

    session.set_comparison(Lane::A, None);
    session.set_comparison(Lane::B, None);

    let a = run_lane(session, client, Lane::A).await;
    let b = run_lane(session, client, Lane::B).await;

    let run = ComparisonRun { a, b };
    if let Some(verdict) = run.verdict() {
        info!(session = %session.id(), %verdict, "Scenario comparison finished");
    }
    Ok(run)
}

async fn run_lane(
    session: &mut Session,
    client: &dyn StructuredClient,
    lane: Lane,
) -> Result<CostEstimate, EstimateError> {
    let span = info_span!("compare", session = %session.id(), lane = %lane);
    let result = request_estimate(client, session.provider(), session.components(lane))
        .instrument(span)
        .await;

    match &result {
        Ok(estimate) => {
            info!(session = %session.id(), lane = %lane, total = estimate.total_monthly_cost, "Lane estimated");
            session.set_comparison(lane, Some(estimate.clone()));
        }
        Err(e) => warn!(session = %session.id(), lane = %lane, error = %e, "Lane estimate failed"),
    }
    result
}
