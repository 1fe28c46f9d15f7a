use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::database::schema;
use crate::database::store::{StoreError, SuperheroStore};
use crate::models::{NewSuperhero, Superhero, SuperheroPatch};

const SELECT_COLUMNS: &str = r#"id, name, alias, "owner", created_at, updated_at"#;

/// PostgreSQL-backed superhero collection
#[derive(Debug, Clone)]
pub struct PgSuperheroStore {
    pool: PgPool,
}

impl PgSuperheroStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the backing table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(schema::CREATE_TABLE_SQL).execute(&self.pool).await?;
        info!("Ensured table '{}' exists", schema::COLLECTION);
        Ok(())
    }
}

#[async_trait]
impl SuperheroStore for PgSuperheroStore {
    async fn find_all(&self) -> Result<Vec<Superhero>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY created_at, id",
            SELECT_COLUMNS,
            schema::COLLECTION
        );
        let rows = sqlx::query_as::<_, Superhero>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Superhero>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1",
            SELECT_COLUMNS,
            schema::COLLECTION
        );
        let row = sqlx::query_as::<_, Superhero>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, new: NewSuperhero) -> Result<Superhero, StoreError> {
        schema::validate_new(&new)?;

        let sql = format!(
            r#"INSERT INTO {} (id, name, alias, "owner") VALUES ($1, $2, $3, $4) RETURNING {}"#,
            schema::COLLECTION,
            SELECT_COLUMNS
        );
        let hero = sqlx::query_as::<_, Superhero>(&sql)
            .bind(Uuid::new_v4())
            .bind(&new.name)
            .bind(&new.alias)
            .bind(new.owner)
            .fetch_one(&self.pool)
            .await?;
        Ok(hero)
    }

    async fn update_by_id(&self, id: Uuid, patch: SuperheroPatch) -> Result<(), StoreError> {
        schema::validate_patch(&patch)?;

        // An empty patch still has to tell a missing row apart from a present one
        let sql = if patch.is_empty() {
            format!("UPDATE {} SET id = id WHERE id = $1", schema::COLLECTION)
        } else {
            format!(
                "UPDATE {} SET name = COALESCE($2, name), alias = COALESCE($3, alias), updated_at = now() WHERE id = $1",
                schema::COLLECTION
            )
        };

        let mut query = sqlx::query(&sql).bind(id);
        if !patch.is_empty() {
            query = query.bind(patch.name).bind(patch.alias);
        }

        let result = query.execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", schema::COLLECTION);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(id));
        }
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
