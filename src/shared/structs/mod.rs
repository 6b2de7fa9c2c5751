use std::sync::Arc;

use crate::controller::discord::checkin::CheckinHandler;
use crate::shared::middleware::discord_validation::SignatureVerifier;

pub mod config;
pub mod discord;
pub mod location;

#[derive(Clone)]
pub struct AppState {
    pub verifier: SignatureVerifier,
    pub checkin: Arc<CheckinHandler>,
}
