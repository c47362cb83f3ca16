use anyhow::Result;
use wayfarer_core::domain::results::SearchResultBag;

use crate::llm::LlmClient;
use crate::prompts;

/// Phrases the final reply with one LLM call, choosing between three
/// mutually exclusive branches: results tally, missing-info follow-up, or
/// generic persona chat.
///
/// This call has no fallback; its error propagates to the request boundary.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponseComposer;

impl ResponseComposer {
    pub fn new() -> Self {
        Self
    }

    pub async fn compose(
        &self,
        llm: &dyn LlmClient,
        message: &str,
        results: &SearchResultBag,
        needs_more_info: bool,
        missing: &[String],
    ) -> Result<String> {
        let prompt = if !results.is_empty() {
            prompts::results_prompt(message, &tally_line(results))
        } else if needs_more_info {
            prompts::missing_info_prompt(message, missing)
        } else {
            prompts::conversational_prompt(message)
        };

        llm.complete(&prompt).await
    }
}

/// Human-readable per-slot tally, e.g. "3 flights found, 2 hotels found".
pub fn tally_line(results: &SearchResultBag) -> String {
    let mut parts = Vec::new();
    if let Some(flights) = &results.flights {
        parts.push(format!("{} flights found", flights.data.len()));
    }
    if let Some(hotels) = &results.hotels {
        parts.push(format!("{} hotels found", hotels.data.len()));
    }
    if let Some(cars) = &results.cars {
        parts.push(format!("{} cars found", cars.data.len()));
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use wayfarer_core::domain::results::{
        FlightOffer, FlightQuery, FlightResults, HotelOffer, HotelQuery, HotelResults,
        SearchResultBag,
    };

    use super::{tally_line, ResponseComposer};
    use crate::llm::LlmClient;

    struct CapturingLlm {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    impl CapturingLlm {
        fn new() -> Self {
            Self { prompts: Mutex::new(Vec::new()), fail: false }
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().expect("prompts lock").last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl LlmClient for CapturingLlm {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().expect("prompts lock").push(prompt.to_string());
            if self.fail {
                bail!("phrasing model unavailable");
            }
            Ok("generated reply".to_string())
        }
    }

    fn bag_with_results() -> SearchResultBag {
        SearchResultBag {
            flights: Some(FlightResults {
                query: FlightQuery {
                    origin: "BKK".to_string(),
                    destination: "NRT".to_string(),
                    departure_date: "2025-12-25".to_string(),
                },
                data: vec![
                    FlightOffer { price: "450.00 USD".to_string(), segments: Vec::new() },
                    FlightOffer { price: "512.00 USD".to_string(), segments: Vec::new() },
                ],
            }),
            hotels: Some(HotelResults {
                query: HotelQuery {
                    city_code: "TYO".to_string(),
                    check_in_date: "2025-12-25".to_string(),
                    check_out_date: "2025-12-27".to_string(),
                },
                data: vec![HotelOffer { name: "Grand Riverside".to_string(), offers: Vec::new() }],
            }),
            cars: None,
        }
    }

    #[tokio::test]
    async fn results_branch_is_selected_when_any_slot_is_populated() {
        let llm = CapturingLlm::new();

        let reply = ResponseComposer::new()
            .compose(&llm, "find me flights", &bag_with_results(), false, &[])
            .await
            .expect("compose should succeed");

        assert_eq!(reply, "generated reply");
        let prompt = llm.last_prompt();
        assert!(prompt.contains("2 flights found, 1 hotels found"));
        assert!(prompt.contains("detailed results"));
    }

    #[tokio::test]
    async fn missing_info_branch_names_the_missing_fields() {
        let llm = CapturingLlm::new();

        ResponseComposer::new()
            .compose(
                &llm,
                "I want to fly",
                &SearchResultBag::default(),
                true,
                &["origin".to_string(), "departure_date".to_string()],
            )
            .await
            .expect("compose should succeed");

        let prompt = llm.last_prompt();
        assert!(prompt.contains("origin, departure_date"));
    }

    #[tokio::test]
    async fn generic_branch_is_selected_when_nothing_was_extracted() {
        let llm = CapturingLlm::new();

        ResponseComposer::new()
            .compose(&llm, "สวัสดี", &SearchResultBag::default(), false, &[])
            .await
            .expect("compose should succeed");

        let prompt = llm.last_prompt();
        assert!(prompt.contains("Reply naturally"));
        assert!(prompt.contains("สวัสดี"));
    }

    #[tokio::test]
    async fn results_branch_wins_over_missing_info_flag() {
        let llm = CapturingLlm::new();

        ResponseComposer::new()
            .compose(&llm, "flights?", &bag_with_results(), true, &["city".to_string()])
            .await
            .expect("compose should succeed");

        assert!(llm.last_prompt().contains("flights found"));
    }

    #[tokio::test]
    async fn phrasing_failure_propagates() {
        let llm = CapturingLlm { prompts: Mutex::new(Vec::new()), fail: true };

        let result = ResponseComposer::new()
            .compose(&llm, "hello", &SearchResultBag::default(), false, &[])
            .await;

        assert!(result.is_err());
    }

    #[test]
    fn tally_covers_only_populated_slots() {
        assert_eq!(tally_line(&bag_with_results()), "2 flights found, 1 hotels found");
        assert_eq!(tally_line(&SearchResultBag::default()), "");
    }
}
