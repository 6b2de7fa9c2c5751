use std::sync::Arc;
use std::time::Duration;

use crate::shared::GOOGLE_MAPS_SEARCH_ENDPOINT;
use crate::shared::structs::discord::interaction::{
    InteractionRequest, InteractionResponse, InteractionType,
};
use crate::shared::structs::location::{
    LocationResolver, LocationToken, ResolvedLocation, ResolverError,
};

/// Check-in pipeline for one verified interaction: dispatch on the
/// interaction type, resolve the button's location token, and build the
/// reply. Every code path returns a well-formed response because Discord
/// expects a structured payload within its reply window, not a 5xx.
pub struct CheckinHandler {
    resolver: Arc<dyn LocationResolver>,
    resolver_timeout: Duration,
    show_coordinates: bool,
}

impl CheckinHandler {
    pub fn new(
        resolver: Arc<dyn LocationResolver>,
        resolver_timeout: Duration,
        show_coordinates: bool,
    ) -> Self {
        CheckinHandler {
            resolver,
            resolver_timeout,
            show_coordinates,
        }
    }

    pub async fn handle(&self, request: &InteractionRequest) -> InteractionResponse {
        match request.interaction_type() {
            InteractionType::Ping => InteractionResponse::pong(),
            InteractionType::ButtonPress => self.handle_button_press(request).await,
            InteractionType::Unknown(other) => {
                tracing::warn!("Received unsupported interaction type {other}");
                InteractionResponse::ephemeral("Sorry, I don't know how to handle that interaction.")
            }
        }
    }

    async fn handle_button_press(&self, request: &InteractionRequest) -> InteractionResponse {
        let custom_id = request.custom_id().unwrap_or_default();

        if custom_id.is_empty() {
            tracing::warn!("Button press without a custom_id");
            return InteractionResponse::ephemeral(
                "This button doesn't carry a location, so I can't check you in.",
            );
        }

        let Some(token) = LocationToken::from_custom_id(custom_id) else {
            tracing::warn!("Button custom_id `{custom_id}` is not a check-in token");
            return InteractionResponse::ephemeral(
                "This button doesn't look like a check-in button.",
            );
        };

        tracing::debug!("Resolving check-in token `{token}`");

        let resolution =
            tokio::time::timeout(self.resolver_timeout, self.resolver.resolve(&token)).await;

        match resolution {
            Ok(Ok(location)) => self.build_confirmation(request.display_name(), &location),
            Ok(Err(ResolverError::NotFound(token))) => {
                tracing::warn!("No known location for token `{token}`");
                InteractionResponse::ephemeral(format!(
                    "I couldn't find any place matching `{token}`, so the check-in didn't go through."
                ))
            }
            Ok(Err(ResolverError::Unavailable(reason))) => {
                tracing::error!("Location resolver unavailable: {reason}");
                InteractionResponse::ephemeral(
                    "The location service isn't responding right now. Your check-in couldn't be completed, please try again later.",
                )
            }
            Err(_elapsed) => {
                tracing::error!(
                    "Location resolver exceeded the {}s budget",
                    self.resolver_timeout.as_secs_f64()
                );
                InteractionResponse::ephemeral(
                    "The location service isn't responding right now. Your check-in couldn't be completed, please try again later.",
                )
            }
        }
    }

    fn build_confirmation(
        &self,
        display_name: &str,
        location: &ResolvedLocation,
    ) -> InteractionResponse {
        if self.show_coordinates {
            InteractionResponse::message(format!(
                "📍 {} just checked in at **{}**! ({:.3}, {:.3})\n[View on Google Maps]({}{:.5},{:.5})",
                display_name,
                location.name,
                location.latitude,
                location.longitude,
                GOOGLE_MAPS_SEARCH_ENDPOINT,
                location.latitude,
                location.longitude,
            ))
        } else {
            InteractionResponse::message(format!(
                "📍 {} just checked in at **{}**!",
                display_name, location.name
            ))
        }
    }
}
