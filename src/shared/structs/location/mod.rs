use async_trait::async_trait;

/// Prefix check-in buttons put in front of their location token.
pub const CUSTOM_ID_PREFIX: &str = "checkin:";

/// Location token carried in a button's `custom_id`, e.g.
/// `checkin:central-park` yields the token `central-park`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationToken(String);

impl LocationToken {
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        let token = custom_id.strip_prefix(CUSTOM_ID_PREFIX)?;

        if token.is_empty() {
            None
        } else {
            Some(LocationToken(token.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LocationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Bad input and dependency outage must stay distinguishable, so the user
/// message and the operator logs can tell them apart.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolverError {
    #[error("no location matches token `{0}`")]
    NotFound(String),
    #[error("geolocation service unavailable: {0}")]
    Unavailable(String),
}

/// Capability for turning a location token into place details. Injected into
/// the handler so tests can substitute a deterministic stub.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn resolve(&self, token: &LocationToken) -> Result<ResolvedLocation, ResolverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_parses_from_prefixed_custom_id() {
        let token = LocationToken::from_custom_id("checkin:central-park").unwrap();
        assert_eq!(token.as_str(), "central-park");
    }

    #[test]
    fn token_rejects_missing_prefix() {
        assert!(LocationToken::from_custom_id("central-park").is_none());
    }

    #[test]
    fn token_rejects_empty_remainder() {
        assert!(LocationToken::from_custom_id("checkin:").is_none());
    }
}
