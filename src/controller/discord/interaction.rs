use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{
    Json,
    response::{IntoResponse, Response},
};

use crate::shared::structs::AppState;
use crate::shared::structs::discord::interaction::{InteractionRequest, InteractionResponse};

/// Entry point for verified interactions. Signature validation already
/// happened in the middleware, so a body that fails to parse here is a
/// malformed-but-authentic interaction: Discord still expects a structured
/// reply, not a transport error.
pub async fn handle_interaction(State(state): State<AppState>, request: Bytes) -> Response {
    match serde_json::from_slice::<InteractionRequest>(&request) {
        Ok(interaction) => {
            tracing::debug!("Received incoming interaction: {:?}", &interaction);
            let response = state.checkin.handle(&interaction).await;
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to deserialize incoming payload: {}", e);
            (
                StatusCode::OK,
                Json(InteractionResponse::ephemeral(
                    "Sorry, I couldn't understand that interaction.",
                )),
            )
                .into_response()
        }
    }
}
