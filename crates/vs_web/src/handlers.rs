use axum::{extract::State, Json};
use std::sync::Arc;
use vs_core::{StatusResponse, Variant};

use crate::AppState;

fn status_for(state: &AppState, variant: Variant) -> Json<StatusResponse> {
    Json(StatusResponse::ok(state.hasher.digest(variant.label())))
}

pub async fn inference(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    status_for(&state, Variant::Inference)
}

pub async fn training(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    status_for(&state, Variant::Training)
}
