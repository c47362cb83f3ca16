use chrono::NaiveDate;
use tracing::{debug, warn};
use wayfarer_core::domain::plan::PlannerOutcome;

use crate::llm::LlmClient;
use crate::prompts;

/// Extracts an ordered tool plan from a free-text message via one LLM call.
///
/// Parsing is deliberately forgiving at the boundary: a transport failure or
/// malformed model output degrades to an empty outcome, which routes the
/// request to the generic conversational branch instead of failing it.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntentPlanner;

impl IntentPlanner {
    pub fn new() -> Self {
        Self
    }

    pub async fn plan(
        &self,
        llm: &dyn LlmClient,
        message: &str,
        today: NaiveDate,
    ) -> PlannerOutcome {
        let prompt = prompts::planner_prompt(message, today);

        let raw = match llm.complete(&prompt).await {
            Ok(raw) => raw,
            Err(error) => {
                warn!(error = %error, "intent extraction call failed, continuing with empty plan");
                return PlannerOutcome::default();
            }
        };

        match parse_outcome(&raw) {
            Ok(outcome) => {
                debug!(steps = outcome.plan.len(), needs_more_info = outcome.needs_more_info,
                    "intent extracted");
                outcome
            }
            Err(error) => {
                warn!(error = %error, "intent output was not valid JSON, continuing with empty plan");
                PlannerOutcome::default()
            }
        }
    }
}

fn parse_outcome(raw: &str) -> Result<PlannerOutcome, serde_json::Error> {
    serde_json::from_str(strip_code_fences(raw))
}

/// Models often wrap the JSON payload in a ``` or ```json fence; take the
/// fenced body when one is present, otherwise the trimmed text as-is.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(rest) = trimmed.split_once("```json").map(|(_, rest)| rest) {
        if let Some((body, _)) = rest.split_once("```") {
            return body.trim();
        }
    }
    if let Some(rest) = trimmed.split_once("```").map(|(_, rest)| rest) {
        if let Some((body, _)) = rest.split_once("```") {
            return body.trim();
        }
    }

    trimmed
}
