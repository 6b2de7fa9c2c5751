use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body_util::BodyExt;

use crate::shared::structs::AppState;

const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";
const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

/// Verifies Discord's Ed25519 request signatures. Holds the decoded
/// application public key so each request only pays for the hex decode of its
/// own signature header.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    public_key: Vec<u8>,
}

impl SignatureVerifier {
    pub fn new(public_key_hex: &str) -> anyhow::Result<Self> {
        let public_key = hex::decode(public_key_hex)?;

        Ok(SignatureVerifier { public_key })
    }

    /// Checks `signature_hex` against `timestamp || raw_body`. Verification
    /// runs over the exact bytes received; re-serializing the body would
    /// change whitespace and break the signature.
    ///
    /// Invalid signatures are an everyday occurrence (replay probes,
    /// misconfigured clients), so every malformed input maps to a plain
    /// `false` rather than an error.
    pub fn verify(&self, raw_body: &[u8], timestamp: &str, signature_hex: &str) -> bool {
        if raw_body.is_empty() {
            return false;
        }

        let Ok(signature) = hex::decode(signature_hex) else {
            return false;
        };

        let mut message = Vec::with_capacity(timestamp.len() + raw_body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(raw_body);

        matches!(
            nacl::sign::verify(&signature, &message, &self.public_key),
            Ok(true)
        )
    }
}

pub async fn validate_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: axum::extract::Request,
    next: Next,
) -> Response {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let timestamp = headers
        .get(TIMESTAMP_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
        tracing::warn!("Rejecting interaction with missing signature headers");
        return StatusCode::UNAUTHORIZED.into_response();
    };

    match buffer_request_body(request).await {
        Ok((request, bytes)) => {
            if state.verifier.verify(&bytes, &timestamp, &signature) {
                next.run(request).await
            } else {
                tracing::warn!("Rejecting interaction with invalid signature");
                StatusCode::UNAUTHORIZED.into_response()
            }
        }
        Err(e) => e,
    }
}

async fn buffer_request_body(
    request: axum::extract::Request,
) -> Result<(axum::extract::Request, Bytes), Response> {
    let (parts, body) = request.into_parts();

    let bytes = body
        .collect()
        .await
        .map_err(|e| {
            let error_msg = format!("Internal server error when collecting body bytes: {e:?}");
            tracing::error!("{}", &error_msg);
            (StatusCode::INTERNAL_SERVER_ERROR, error_msg).into_response()
        })?
        .to_bytes();

    let request = axum::extract::Request::from_parts(parts, Body::from(bytes.clone()));

    Ok((request, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 8032 test vector 2: one-byte message 0x72 ("r").
    const TEST_PUBLIC_KEY: &str =
        "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c";
    const TEST_SIGNATURE: &str = "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00";

    fn verifier() -> SignatureVerifier {
        SignatureVerifier::new(TEST_PUBLIC_KEY).unwrap()
    }

    #[test]
    fn accepts_valid_signature() {
        assert!(verifier().verify(b"r", "", TEST_SIGNATURE));
    }

    #[test]
    fn rejects_tampered_body() {
        assert!(!verifier().verify(b"s", "", TEST_SIGNATURE));
    }

    #[test]
    fn rejects_tampered_timestamp() {
        assert!(!verifier().verify(b"r", "1700000000", TEST_SIGNATURE));
    }

    #[test]
    fn rejects_tampered_signature() {
        let mut tampered = TEST_SIGNATURE.to_string();
        tampered.replace_range(0..2, "00");
        assert!(!verifier().verify(b"r", "", &tampered));
    }

    #[test]
    fn rejects_non_hex_signature() {
        assert!(!verifier().verify(b"r", "", "not hex at all"));
    }

    #[test]
    fn rejects_empty_body() {
        assert!(!verifier().verify(b"", "", TEST_SIGNATURE));
    }

    #[test]
    fn rejects_wrong_length_signature() {
        assert!(!verifier().verify(b"r", "", "deadbeef"));
    }

    #[test]
    fn rejects_wrong_length_public_key() {
        let verifier = SignatureVerifier::new("deadbeef").unwrap();
        assert!(!verifier.verify(b"r", "", TEST_SIGNATURE));
    }

    #[test]
    fn non_hex_public_key_is_a_construction_error() {
        assert!(SignatureVerifier::new("zz").is_err());
    }
}
