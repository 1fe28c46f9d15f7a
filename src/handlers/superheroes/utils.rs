use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::Superhero;
use crate::state::AppState;

/// Load a superhero or fail with 404. An id that is not a UUID cannot name
/// a stored record, so it is reported the same way.
pub async fn find_or_404(state: &AppState, id: &str) -> Result<Superhero, ApiError> {
    let not_found = || ApiError::not_found(format!("superhero {} not found", id));

    let id = Uuid::parse_str(id).map_err(|_| not_found())?;
    state.store.find_by_id(id).await?.ok_or_else(not_found)
}

/// Only the owner may modify or remove a superhero
pub fn require_ownership(user: &AuthUser, hero: &Superhero) -> Result<(), ApiError> {
    if hero.is_owned_by(user.id) {
        return Ok(());
    }

    tracing::warn!(
        "Principal {} attempted to modify superhero {} owned by {}",
        user.id,
        hero.id,
        hero.owner
    );
    Err(ApiError::forbidden("You do not own this superhero"))
}
