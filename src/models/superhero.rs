use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A stored superhero document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Superhero {
    pub id: Uuid,
    pub name: String,
    pub alias: String,
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Superhero {
    pub fn is_owned_by(&self, principal: Uuid) -> bool {
        self.owner == principal
    }
}

/// Fields a client may send when creating a superhero.
///
/// `owner` is accepted so that stale clients echoing a record back do not get
/// rejected, but it is never read: ownership always comes from the token.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuperheroInput {
    pub name: Option<String>,
    pub alias: Option<String>,
    #[serde(default, rename = "owner")]
    _owner: Option<Value>,
}

impl SuperheroInput {
    /// Stamp the authenticated caller as owner. Missing fields become empty
    /// strings and are rejected by the store's schema validation.
    pub fn into_new(self, owner: Uuid) -> NewSuperhero {
        NewSuperhero {
            name: self.name.unwrap_or_default(),
            alias: self.alias.unwrap_or_default(),
            owner,
        }
    }
}

/// A superhero ready to be handed to the store
#[derive(Debug, Clone, PartialEq)]
pub struct NewSuperhero {
    pub name: String,
    pub alias: String,
    pub owner: Uuid,
}

/// Partial update. Absent fields are left untouched; `owner` is not a member
/// and can never be changed through this type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuperheroPatch {
    pub name: Option<String>,
    pub alias: Option<String>,
}

impl SuperheroPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.alias.is_none()
    }

    /// Apply the present fields to a record in place
    pub fn apply_to(&self, hero: &mut Superhero) {
        if let Some(name) = &self.name {
            hero.name = name.clone();
        }
        if let Some(alias) = &self.alias {
            hero.alias = alias.clone();
        }
    }
}
