use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewSuperhero, Superhero, SuperheroPatch};

/// Errors surfaced by a superhero store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field_errors: HashMap<String, String>,
    },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(id: Uuid) -> Self {
        StoreError::NotFound(format!("superhero {} not found", id))
    }
}

/// Document store for the `superheroes` collection.
///
/// Every method is a single-document operation; callers get no atomicity
/// across calls.
#[async_trait]
pub trait SuperheroStore: Send + Sync {
    /// All records in the backend's natural order
    async fn find_all(&self) -> Result<Vec<Superhero>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Superhero>, StoreError>;

    /// Validate and insert; the store assigns `id` and timestamps
    async fn create(&self, new: NewSuperhero) -> Result<Superhero, StoreError>;

    /// Apply a partial update. Returns `NotFound` if the record is gone.
    async fn update_by_id(&self, id: Uuid, patch: SuperheroPatch) -> Result<(), StoreError>;

    /// Remove a record. Returns `NotFound` if the record is gone.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
