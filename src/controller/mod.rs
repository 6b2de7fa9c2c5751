use axum::{Router, middleware::from_fn_with_state, routing::post};

use crate::controller::discord::interaction::handle_interaction;
use crate::shared::middleware::discord_validation::validate_interaction;
use crate::shared::structs::AppState;

pub mod discord;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/discord/interaction", post(handle_interaction))
        .layer(from_fn_with_state(state.clone(), validate_interaction))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::controller::discord::checkin::CheckinHandler;
    use crate::shared::middleware::discord_validation::SignatureVerifier;
    use crate::shared::structs::location::{
        LocationResolver, LocationToken, ResolvedLocation, ResolverError,
    };

    // RFC 8032 test vector 2: the signed message is the single byte "r",
    // which stands in for timestamp "" concatenated with body "r".
    const TEST_PUBLIC_KEY: &str =
        "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c";
    const TEST_SIGNATURE: &str = "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00";

    struct RefusingResolver;

    #[async_trait]
    impl LocationResolver for RefusingResolver {
        async fn resolve(
            &self,
            token: &LocationToken,
        ) -> Result<ResolvedLocation, ResolverError> {
            Err(ResolverError::NotFound(token.as_str().to_string()))
        }
    }

    fn test_app() -> Router {
        let state = AppState {
            verifier: SignatureVerifier::new(TEST_PUBLIC_KEY).unwrap(),
            checkin: Arc::new(CheckinHandler::new(
                Arc::new(RefusingResolver),
                Duration::from_secs(2),
                true,
            )),
        };

        create_router(state)
    }

    fn interaction_request(signature: &str, timestamp: &str, body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/discord/interaction")
            .header("X-Signature-Ed25519", signature)
            .header("X-Signature-Timestamp", timestamp)
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_signature_headers_are_rejected() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/discord/interaction")
            .body(Body::from(r#"{"type":1}"#))
            .unwrap();

        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_signature_is_rejected_before_the_handler() {
        let request = interaction_request(&"00".repeat(64), "1700000000", r#"{"type":1}"#);

        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_signature_is_rejected_not_crashed() {
        let request = interaction_request("definitely-not-hex", "1700000000", r#"{"type":1}"#);

        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_signature_reaches_the_handler() {
        // The signed body is not JSON, so the handler answers with an in-band
        // error payload; the point is that the middleware let it through.
        let request = interaction_request(TEST_SIGNATURE, "", "r");

        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["type"], 4);
        assert_eq!(value["data"]["flags"], 64);
    }

    #[tokio::test]
    async fn tampered_body_never_reaches_the_handler() {
        // Same valid signature, different body byte.
        let request = interaction_request(TEST_SIGNATURE, "", "s");

        let response = test_app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
