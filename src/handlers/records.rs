use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;
use tracing::info;

use crate::api::dataverse::{
    DataverseApi, EntitySet, SERVICE_REQUESTS, STORM_INSPECTIONS, WORK_ORDERS,
};
use crate::entra::TokenSource;
use crate::error::RelayError;
use crate::router::RelayState;

pub async fn list_storm_inspections(
    State(state): State<RelayState>,
) -> Result<Json<Vec<Value>>, RelayError> {
    list_records(&state, &STORM_INSPECTIONS).await
}

pub async fn update_storm_inspection(
    State(state): State<RelayState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<StatusCode, RelayError> {
    update_record(&state, &STORM_INSPECTIONS, &id, &body).await
}

pub async fn list_service_requests(
    State(state): State<RelayState>,
) -> Result<Json<Vec<Value>>, RelayError> {
    list_records(&state, &SERVICE_REQUESTS).await
}

pub async fn update_service_request(
    State(state): State<RelayState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<StatusCode, RelayError> {
    update_record(&state, &SERVICE_REQUESTS, &id, &body).await
}

pub async fn list_work_orders(
    State(state): State<RelayState>,
) -> Result<Json<Vec<Value>>, RelayError> {
    list_records(&state, &WORK_ORDERS).await
}

pub async fn update_work_order(
    State(state): State<RelayState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<StatusCode, RelayError> {
    update_record(&state, &WORK_ORDERS, &id, &body).await
}

/// Acquire a token, list the collection, return the records verbatim.
async fn list_records(
    state: &RelayState,
    set: &EntitySet,
) -> Result<Json<Vec<Value>>, RelayError> {
    let token = state.tokens.acquire().await?;
    let records = DataverseApi::list(
        &state.client,
        &state.config.dataverse_url,
        token.secret(),
        set,
    )
    .await?;
    Ok(Json(records))
}

/// Acquire a token, forward the update, answer 204 on success. The caller
/// reconciles its local view by merging the fields it sent.
async fn update_record(
    state: &RelayState,
    set: &EntitySet,
    id: &str,
    body: &Value,
) -> Result<StatusCode, RelayError> {
    info!(collection = set.collection, id, "updating Dataverse record");
    let token = state.tokens.acquire().await?;
    DataverseApi::update(
        &state.client,
        &state.config.dataverse_url,
        token.secret(),
        set,
        id,
        body,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
