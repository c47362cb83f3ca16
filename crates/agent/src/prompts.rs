//! Prompt templates for the two LLM calls. The planner prompt demands strict
//! JSON; the composer prompts share a fixed persona and differ per branch.

use chrono::NaiveDate;

/// Persona for every phrasing call. The assistant mirrors the user's
/// language, so Thai input gets a Thai reply and English gets English.
pub const PERSONA: &str = "\
You are \"Wayfarer\", a friendly travel-planning assistant.

You can:
- search flights between cities
- find hotels in a city
- find rental cars in a city
- recommend destinations and give travel advice
- handle small talk, gently steering back to travel planning

Style:
- warm and casual, never stiff
- concise (2-4 sentences)
- use fitting emoji such as \u{2708}\u{fe0f} \u{1f3e8} \u{1f697} \u{1f30d} \u{1f60a}
- always answer in the same language the user wrote in";

const CODE_HINTS: &str = "\
Airport codes:
Bangkok=BKK, Tokyo=NRT, New York=JFK, London=LHR, Paris=CDG, Singapore=SIN,
Dubai=DXB, Los Angeles=LAX, Hong Kong=HKG, Seoul=ICN, Osaka=KIX, Phuket=HKT,
Chiang Mai=CNX, San Francisco=SFO, Sydney=SYD, Melbourne=MEL

City codes:
Bangkok=BKK, Tokyo=TYO, New York=NYC, London=LON, Paris=PAR, Singapore=SIN,
Dubai=DXB, Los Angeles=LAX, Hong Kong=HKG, Seoul=SEL, Osaka=OSA";

/// Intent-extraction prompt. Today's date lets the model resolve relative
/// dates ("Dec 25") into explicit `YYYY-MM-DD` values.
pub fn planner_prompt(message: &str, today: NaiveDate) -> String {
    format!(
        r#"Analyze the user's message and extract travel-search requests.
Today's date is {today} (use it to resolve relative dates into YYYY-MM-DD).

Message: "{message}"

Answer with exactly one JSON object and nothing else:
{{
  "plan": [ <zero or more steps, in the order they should run> ],
  "needs_more_info": true/false,
  "missing": [ <names of missing fields, when needs_more_info is true> ]
}}

Each step takes one of these shapes:
{{"tool": "search_flights", "origin": "<3-letter airport>", "destination": "<3-letter airport>", "departure_date": "YYYY-MM-DD"}}
{{"tool": "search_hotels", "city": "<3-letter city>", "check_in": "YYYY-MM-DD", "check_out": "YYYY-MM-DD"}}
{{"tool": "search_car_rentals", "city": "<3-letter city>", "pick_up": "YYYY-MM-DD", "drop_off": "YYYY-MM-DD"}}

Omit a date field when the user did not give one. Leave the plan empty for
greetings or messages with no travel-search request. Set needs_more_info only
when a search is wanted but a required location is unknown.

{code_hints}

Examples:
- "I want to fly from Bangkok to Tokyo on 2025-12-25" ->
  {{"plan": [{{"tool": "search_flights", "origin": "BKK", "destination": "NRT", "departure_date": "2025-12-25"}}], "needs_more_info": false, "missing": []}}
- "find me a hotel in New York" ->
  {{"plan": [{{"tool": "search_hotels", "city": "NYC"}}], "needs_more_info": false, "missing": []}}
- "I need a flight and a rental car" ->
  {{"plan": [], "needs_more_info": true, "missing": ["origin", "destination", "city"]}}
- "hello" ->
  {{"plan": [], "needs_more_info": false, "missing": []}}"#,
        code_hints = CODE_HINTS,
    )
}

/// Results branch: acknowledge the tally, point to the details, invite a
/// follow-up.
pub fn results_prompt(message: &str, tally: &str) -> String {
    format!(
        r#"{PERSONA}

Search finished: {tally}.

Message: "{message}"

Reply:
1. say what was found ({tally})
2. point the user to the detailed results below
3. ask whether they need anything else

2-3 sentences, with emoji."#
    )
}

/// Missing-info branch: ask specifically for the named fields.
pub fn missing_info_prompt(message: &str, missing: &[String]) -> String {
    let missing = if missing.is_empty() { "some details".to_string() } else { missing.join(", ") };
    format!(
        r#"{PERSONA}

The user wants a travel search but these details are missing: {missing}.

Message: "{message}"

Reply:
1. confirm you will help with the search
2. ask naturally for the missing details
3. give one concrete example of a complete request

2-3 sentences, with emoji."#
    )
}

/// Generic branch: greeting, off-topic, or travel chat with nothing to
/// search.
pub fn conversational_prompt(message: &str) -> String {
    format!(
        r#"{PERSONA}

Message: "{message}"

Reply naturally:
- a greeting -> greet back and introduce yourself
- another topic -> answer briefly, then steer toward travel plans
- a travel question -> share advice and offer to search

2-4 sentences, with emoji."#
    )
}
