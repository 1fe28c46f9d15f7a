use axum::extract::{Extension, Path, State};

use crate::api::UpdatePayload;
use crate::auth::AuthUser;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Superhero;
use crate::state::AppState;

use super::utils::{find_or_404, require_ownership};

/// GET /superheroes/:id - any authenticated caller may read
pub async fn show(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Superhero> {
    let superhero = find_or_404(&state, &id).await?;
    tracing::debug!("Showing superhero {} to {}", superhero.id, user.id);

    Ok(ApiResponse::success("superhero", superhero))
}

/// PATCH /superheroes/:id - partial update, owner only
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    UpdatePayload(patch): UpdatePayload,
) -> ApiResult<()> {
    let superhero = find_or_404(&state, &id).await?;
    require_ownership(&user, &superhero)?;

    state.store.update_by_id(superhero.id, patch).await?;
    tracing::info!("Updated superhero {} for {}", superhero.id, user.id);

    Ok(ApiResponse::no_content())
}

/// DELETE /superheroes/:id - owner only
pub async fn destroy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let superhero = find_or_404(&state, &id).await?;
    require_ownership(&user, &superhero)?;

    state.store.delete_by_id(superhero.id).await?;
    tracing::info!("Deleted superhero {} for {}", superhero.id, user.id);

    Ok(ApiResponse::no_content())
}
