//! The single chat endpoint: planner → executor → composer.
//!
//! Degradation is handled upstream (adapters and planner fail soft); the only
//! failure that reaches this boundary is the phrasing call, which maps to a
//! generic 500 with the error text as detail.

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::Utc;
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{error, info};
use uuid::Uuid;
use wayfarer_agent::composer::ResponseComposer;
use wayfarer_agent::executor::execute_plan;
use wayfarer_agent::llm::LlmClient;
use wayfarer_agent::planner::IntentPlanner;
use wayfarer_core::domain::chat::{ChatRequest, ChatResponse};
use wayfarer_core::provider::TravelProvider;

#[derive(Clone)]
pub struct ChatState {
    pub llm: Arc<dyn LlmClient>,
    pub travel: Arc<dyn TravelProvider>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

pub fn router(state: ChatState) -> Router {
    Router::new().route("/api/chat", post(chat)).with_state(state)
}

/// Only the configured origins are allowed; all methods and headers for them.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = allowed_origins.iter().filter_map(|origin| origin.parse::<HeaderValue>().ok());
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

pub async fn chat(
    State(state): State<ChatState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorBody>)> {
    let correlation_id = Uuid::new_v4();
    info!(
        event_name = "chat.request.received",
        correlation_id = %correlation_id,
        message_chars = request.message.len(),
        "chat request received"
    );

    let today = Utc::now().date_naive();

    let outcome = IntentPlanner::new().plan(state.llm.as_ref(), &request.message, today).await;
    info!(
        event_name = "chat.plan.extracted",
        correlation_id = %correlation_id,
        steps = outcome.plan.len(),
        needs_more_info = outcome.needs_more_info,
        "intent plan extracted"
    );

    let results = execute_plan(state.travel.as_ref(), &outcome.plan, today).await;

    let response = ResponseComposer::new()
        .compose(
            state.llm.as_ref(),
            &request.message,
            &results,
            outcome.needs_more_info,
            &outcome.missing,
        )
        .await
        .map_err(|failure| {
            error!(
                event_name = "chat.request.failed",
                correlation_id = %correlation_id,
                error = %failure,
                "chat request failed"
            );
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { detail: failure.to_string() }))
        })?;

    info!(
        event_name = "chat.request.completed",
        correlation_id = %correlation_id,
        has_travel_intent = !results.is_empty(),
        "chat request completed"
    );

    Ok(Json(ChatResponse {
        response,
        has_travel_intent: !results.is_empty(),
        travel_data: results.travel_data(),
        search_results: results,
    }))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use anyhow::{bail, Result};
    use async_trait::async_trait;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::Json;
    use wayfarer_agent::llm::LlmClient;
    use wayfarer_core::domain::chat::ChatRequest;
    use wayfarer_core::domain::results::{
        CarOffer, CarQuery, FlightOffer, FlightQuery, HotelOffer, HotelQuery,
    };
    use wayfarer_core::provider::TravelProvider;

    use super::{chat, ChatState};

    /// Replies in order: one entry per expected LLM call.
    struct ScriptedLlm {
        replies: Mutex<VecDeque<Result<String, String>>>,
    }

    impl ScriptedLlm {
        fn new(replies: Vec<Result<String, String>>) -> Self {
            Self { replies: Mutex::new(replies.into_iter().collect()) }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedLlm {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            match self.replies.lock().expect("replies lock").pop_front() {
                Some(Ok(reply)) => Ok(reply),
                Some(Err(message)) => bail!(message),
                None => bail!("unexpected llm call"),
            }
        }
    }

    #[derive(Default)]
    struct ScriptedProvider {
        flights: Option<Vec<FlightOffer>>,
        flight_queries: Mutex<Vec<FlightQuery>>,
    }

    #[async_trait]
    impl TravelProvider for ScriptedProvider {
        async fn search_flights(&self, query: &FlightQuery) -> Option<Vec<FlightOffer>> {
            self.flight_queries.lock().expect("queries lock").push(query.clone());
            self.flights.clone()
        }

        async fn search_hotels(&self, _query: &HotelQuery) -> Option<Vec<HotelOffer>> {
            None
        }

        async fn search_car_rentals(&self, _query: &CarQuery) -> Option<Vec<CarOffer>> {
            None
        }
    }

    fn request(message: &str) -> Json<ChatRequest> {
        Json(ChatRequest { message: message.to_string(), conversation_history: Vec::new() })
    }

    fn state(llm: ScriptedLlm, provider: ScriptedProvider) -> (State<ChatState>, Arc<ScriptedProvider>) {
        let provider = Arc::new(provider);
        let chat_state =
            ChatState { llm: Arc::new(llm), travel: provider.clone() as Arc<dyn TravelProvider> };
        (State(chat_state), provider)
    }

    #[tokio::test]
    async fn flight_request_end_to_end_populates_the_flights_slot() {
        let llm = ScriptedLlm::new(vec![
            Ok(r#"{"plan": [{"tool": "search_flights", "origin": "BKK",
                "destination": "NRT", "departure_date": "2025-12-25"}],
                "needs_more_info": false, "missing": []}"#
                .to_string()),
            Ok("พบเที่ยวบิน 1 เที่ยว ดูรายละเอียดด้านล่างได้เลยค่ะ ✈️".to_string()),
        ]);
        let provider = ScriptedProvider {
            flights: Some(vec![FlightOffer {
                price: "450.00 USD".to_string(),
                segments: Vec::new(),
            }]),
            ..Default::default()
        };
        let (state, provider) = state(llm, provider);

        let Json(response) = chat(state, request("หาเที่ยวบิน BKK ไป NRT วันที่ 2025-12-25"))
            .await
            .expect("chat should succeed");

        assert!(response.has_travel_intent);
        assert!(response.response.contains("เที่ยวบิน"));

        let queries = provider.flight_queries.lock().expect("queries lock");
        assert_eq!(queries.len(), 1, "adapter should be invoked exactly once");
        assert_eq!(queries[0].origin, "BKK");
        assert_eq!(queries[0].destination, "NRT");
        assert_eq!(queries[0].departure_date, "2025-12-25");

        let flights = response.search_results.flights.expect("flights slot populated");
        assert_eq!(flights.data.len(), 1);
        let travel_data = response.travel_data.expect("travel data present");
        assert_eq!(travel_data["flights"]["origin"], "BKK");
    }

    #[tokio::test]
    async fn message_without_travel_intent_still_gets_a_reply() {
        let llm = ScriptedLlm::new(vec![
            Ok(r#"{"plan": [], "needs_more_info": false, "missing": []}"#.to_string()),
            Ok("Hello! Planning a trip? 😊".to_string()),
        ]);
        let (state, provider) = state(llm, ScriptedProvider::default());

        let Json(response) = chat(state, request("hello")).await.expect("chat should succeed");

        assert!(!response.has_travel_intent);
        assert_eq!(response.travel_data, None);
        assert!(response.search_results.is_empty());
        assert!(!response.response.is_empty());
        assert!(provider.flight_queries.lock().expect("queries lock").is_empty());
    }

    #[tokio::test]
    async fn malformed_extraction_output_never_fails_the_request() {
        let llm = ScriptedLlm::new(vec![
            Ok("I would rather write prose than JSON".to_string()),
            Ok("What trip can I help with? 🌍".to_string()),
        ]);
        let (state, _provider) = state(llm, ScriptedProvider::default());

        let Json(response) =
            chat(state, request("plan my vacation")).await.expect("chat should succeed");

        assert!(!response.has_travel_intent);
        assert!(response.search_results.is_empty());
    }

    #[tokio::test]
    async fn phrasing_failure_maps_to_internal_server_error() {
        let llm = ScriptedLlm::new(vec![
            Ok(r#"{"plan": []}"#.to_string()),
            Err("phrasing model unavailable".to_string()),
        ]);
        let (state, _provider) = state(llm, ScriptedProvider::default());

        let (status, Json(body)) =
            chat(state, request("hello")).await.expect_err("chat should fail");

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.detail.contains("phrasing model unavailable"));
    }

    #[tokio::test]
    async fn empty_provider_result_keeps_the_request_alive() {
        let llm = ScriptedLlm::new(vec![
            Ok(r#"{"plan": [{"tool": "search_flights", "origin": "BKK",
                "destination": "NRT"}]}"#
                .to_string()),
            Ok("No flights on that route yet 😢 want to try other dates?".to_string()),
        ]);
        let (state, provider) = state(llm, ScriptedProvider::default());

        let Json(response) =
            chat(state, request("fly BKK to NRT")).await.expect("chat should succeed");

        assert!(!response.has_travel_intent);
        assert_eq!(provider.flight_queries.lock().expect("queries lock").len(), 1);
    }
}
