use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;

use crate::shared::structs::location::{
    LocationResolver, LocationToken, ResolvedLocation, ResolverError,
};

/// Production resolver: a static token-to-place table from configuration,
/// geocoded through the Google Maps API. Tokens outside the table never hit
/// the network.
pub struct GoogleMapsResolver {
    client: Arc<google_maps::Client>,
    places: HashMap<String, String>,
}

impl GoogleMapsResolver {
    pub fn new(client: Arc<google_maps::Client>, places: HashMap<String, String>) -> Self {
        GoogleMapsResolver { client, places }
    }
}

#[async_trait]
impl LocationResolver for GoogleMapsResolver {
    async fn resolve(&self, token: &LocationToken) -> Result<ResolvedLocation, ResolverError> {
        let place_query = self
            .places
            .get(token.as_str())
            .ok_or_else(|| ResolverError::NotFound(token.as_str().to_string()))?;

        let response = self
            .client
            .geocoding()
            .with_address(place_query)
            .execute()
            .await
            .map_err(|e| {
                tracing::error!("Geocoding request failed: {e:?}");
                ResolverError::Unavailable(e.to_string())
            })?;

        let geocoding = response
            .results
            .first()
            .ok_or_else(|| ResolverError::NotFound(token.as_str().to_string()))?;

        let location = geocoding.geometry.location;

        Ok(ResolvedLocation {
            name: geocoding.formatted_address.clone(),
            latitude: location.lat.to_f64().unwrap_or_default(),
            longitude: location.lng.to_f64().unwrap_or_default(),
        })
    }
}
