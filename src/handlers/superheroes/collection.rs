use axum::extract::{Extension, State};

use crate::api::CreatePayload;
use crate::auth::AuthUser;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Superhero;
use crate::state::AppState;

/// GET /superheroes - every superhero, regardless of owner
pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<Superhero>> {
    let superheroes = state.store.find_all().await?;
    tracing::debug!("Listed {} superheroes for {}", superheroes.len(), user.id);

    Ok(ApiResponse::success("superheroes", superheroes))
}

/// POST /superheroes - create a superhero owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    CreatePayload(input): CreatePayload,
) -> ApiResult<Superhero> {
    let superhero = state.store.create(input.into_new(user.id)).await?;
    tracing::info!("Created superhero {} for {}", superhero.id, user.id);

    Ok(ApiResponse::created("superhero", superhero))
}
