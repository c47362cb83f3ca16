use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::results::SearchResultBag;

/// One prior turn of the conversation. Accepted on the wire but not fed back
/// into generation; each request is handled from the latest message alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
}

/// Wire response for `POST /api/chat`.
///
/// `has_travel_intent` is true exactly when any result slot is populated, and
/// `travel_data` carries the query echoes of the populated slots (`null` when
/// none). `search_results` always carries the full bag.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub has_travel_intent: bool,
    pub travel_data: Option<Value>,
    pub search_results: SearchResultBag,
}

#[cfg(test)]
mod tests {
    use super::ChatRequest;

    #[test]
    fn chat_request_accepts_missing_history() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"message": "hello"}"#).expect("request should parse");

        assert_eq!(request.message, "hello");
        assert!(request.conversation_history.is_empty());
    }

    #[test]
    fn chat_request_accepts_prior_turns() {
        let request: ChatRequest = serde_json::from_str(
            r#"{
                "message": "and hotels?",
                "conversation_history": [
                    {"role": "user", "text": "find flights to NRT"},
                    {"role": "assistant", "text": "Found 3 flights"}
                ]
            }"#,
        )
        .expect("request should parse");

        assert_eq!(request.conversation_history.len(), 2);
        assert_eq!(request.conversation_history[0].role, "user");
    }
}
