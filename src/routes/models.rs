//! Models endpoint
//!
//! Lists the public model ids the adapter accepts.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{registry::ModelsResponse, AppState};

/// List available models
///
/// One entry per configured mapping, in configuration order. The `created`
/// timestamp is fixed for the life of the process.
pub async fn list_models(State(state): State<Arc<AppState>>) -> Json<ModelsResponse> {
    Json(state.registry.listing())
}
