//! Profile controller.

use crate::{
    extractors::ValidatedJson,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Router,
};
use serde::Serialize;
use strata_core::Profile;
use tracing::debug;

/// Result of a cache eviction.
#[derive(Debug, Serialize)]
pub struct EvictResponse {
    pub id: String,
    pub evicted: bool,
}

/// Creates the profile router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_profile))
        .route("/search/:id", get(search_profile))
        .route("/cache/:id", delete(evict_profile))
}

/// Write a profile to the store and the cache.
async fn add_profile(
    State(state): State<AppState>,
    ValidatedJson(profile): ValidatedJson<Profile>,
) -> ApiResult<Profile> {
    debug!("Add profile request: {}", profile.id);

    let saved = state.profile_service.save_profile(profile).await?;
    ok(saved)
}

/// Look up a profile, cache first.
async fn search_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Profile> {
    debug!("Search profile request: {}", id);

    let profile = state.profile_service.get_profile(&id).await?;
    ok(profile)
}

/// Drop the cached copy of a profile.
async fn evict_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<EvictResponse> {
    debug!("Evict profile request: {}", id);

    let evicted = state.profile_service.evict_profile(&id).await?;
    ok(EvictResponse { id, evicted })
}
