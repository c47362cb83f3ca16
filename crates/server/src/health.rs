use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LivenessResponse {
    pub message: &'static str,
}

pub fn router() -> Router {
    Router::new().route("/", get(root))
}

pub async fn root() -> Json<LivenessResponse> {
    Json(LivenessResponse { message: "wayfarer api is running" })
}
