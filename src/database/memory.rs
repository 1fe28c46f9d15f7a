use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::schema;
use crate::database::store::{StoreError, SuperheroStore};
use crate::models::{NewSuperhero, Superhero, SuperheroPatch};

/// In-process store that keeps documents in insertion order.
/// Used for local development and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Superhero>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SuperheroStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Superhero>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Superhero>, StoreError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|hero| hero.id == id).cloned())
    }

    async fn create(&self, new: NewSuperhero) -> Result<Superhero, StoreError> {
        schema::validate_new(&new)?;

        let now = Utc::now();
        let hero = Superhero {
            id: Uuid::new_v4(),
            name: new.name,
            alias: new.alias,
            owner: new.owner,
            created_at: now,
            updated_at: now,
        };

        self.records.write().await.push(hero.clone());
        Ok(hero)
    }

    async fn update_by_id(&self, id: Uuid, patch: SuperheroPatch) -> Result<(), StoreError> {
        schema::validate_patch(&patch)?;

        let mut records = self.records.write().await;
        let hero = records
            .iter_mut()
            .find(|hero| hero.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;

        if !patch.is_empty() {
            patch.apply_to(hero);
            hero.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|hero| hero.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        records.remove(index);
        Ok(())
    }
}
