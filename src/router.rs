use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::config::Config;
use crate::entra::{EntraTokenService, TokenSource};
use crate::handlers::records;

/// Shared state injected into every handler: the startup configuration, one
/// pooled HTTP client for both upstreams, and the token source.
#[derive(Clone)]
pub struct RelayState {
    pub config: Arc<Config>,
    pub client: reqwest::Client,
    pub tokens: Arc<dyn TokenSource>,
}

impl RelayState {
    pub fn new(config: Arc<Config>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("arbor-relay/0.1")
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("FATAL: initialize relay HTTP client failed");

        let tokens: Arc<dyn TokenSource> =
            Arc::new(EntraTokenService::new(config.clone(), client.clone()));

        Self {
            config,
            client,
            tokens,
        }
    }
}

pub fn relay_router(state: RelayState) -> Router {
    Router::new()
        .route("/api/data", get(records::list_storm_inspections))
        .route("/api/data/{id}", patch(records::update_storm_inspection))
        .route("/api/srdata", get(records::list_service_requests))
        .route("/api/srdata/{id}", patch(records::update_service_request))
        .route("/api/wodata", get(records::list_work_orders))
        .route("/api/wodata/{id}", patch(records::update_work_order))
        .with_state(state)
}
