use anyhow::Result;
use pipecost::{
    prompt::{self, StructuredPrompt},
    scenario,
    session::{Lane, Session},
};
use std::path::Path;

/// Execute the prompt command
///
/// Works offline: nothing is sent and no API key is needed.
pub fn execute(scenario_path: &Path, lane: Lane, alternatives: bool) -> Result<()> {
    let session = scenario::load_scenario(scenario_path)?;
    let request = build(&session, lane, alternatives)?;
    print!("{}", request.prompt);
    Ok(())
}

pub fn build(session: &Session, lane: Lane, alternatives: bool) -> Result<StructuredPrompt> {
    let components = session.components(lane);
    let request = if alternatives {
        prompt::alternatives_prompt(session.provider(), components)?
    } else {
        prompt::cost_estimate_prompt(session.provider(), components)?
    };
    Ok(request)
}
