use serde::{Deserialize, Serialize};

/// One tool invocation extracted from the user message.
///
/// Location fields are optional at the type level; the executor skips a step
/// whose required locations are missing rather than failing the request.
/// Dates are `YYYY-MM-DD` strings and are defaulted at execution time when
/// absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum PlanStep {
    SearchFlights {
        #[serde(default)]
        origin: Option<String>,
        #[serde(default)]
        destination: Option<String>,
        #[serde(default)]
        departure_date: Option<String>,
    },
    SearchHotels {
        #[serde(default)]
        city: Option<String>,
        #[serde(default)]
        check_in: Option<String>,
        #[serde(default)]
        check_out: Option<String>,
    },
    SearchCarRentals {
        #[serde(default)]
        city: Option<String>,
        #[serde(default)]
        pick_up: Option<String>,
        #[serde(default)]
        drop_off: Option<String>,
    },
}

/// The planner's parsed output: an ordered plan plus the incomplete-extraction
/// signal. An empty outcome with no flag routes the request to the generic
/// conversational branch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PlannerOutcome {
    #[serde(default)]
    pub plan: Vec<PlanStep>,
    #[serde(default)]
    pub needs_more_info: bool,
    #[serde(default)]
    pub missing: Vec<String>,
}
