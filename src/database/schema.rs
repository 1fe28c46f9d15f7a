// Collection schema shared by every store backend
use std::collections::HashMap;

use crate::database::store::StoreError;
use crate::models::{NewSuperhero, SuperheroPatch};

pub const COLLECTION: &str = "superheroes";

const MAX_FIELD_LEN: usize = 255;

/// Idempotent DDL for the PostgreSQL backend
pub const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS superheroes (
        id          UUID PRIMARY KEY,
        name        TEXT NOT NULL,
        alias       TEXT NOT NULL,
        "owner"     UUID NOT NULL,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

pub fn validate_new(new: &NewSuperhero) -> Result<(), StoreError> {
    let mut field_errors = HashMap::new();
    check_required("name", &new.name, &mut field_errors);
    check_required("alias", &new.alias, &mut field_errors);
    finish(field_errors)
}

pub fn validate_patch(patch: &SuperheroPatch) -> Result<(), StoreError> {
    let mut field_errors = HashMap::new();
    if let Some(name) = &patch.name {
        check_required("name", name, &mut field_errors);
    }
    if let Some(alias) = &patch.alias {
        check_required("alias", alias, &mut field_errors);
    }
    finish(field_errors)
}

fn check_required(field: &str, value: &str, field_errors: &mut HashMap<String, String>) {
    if value.is_empty() {
        field_errors.insert(field.to_string(), "This field is required".to_string());
    } else if value.chars().count() > MAX_FIELD_LEN {
        field_errors.insert(
            field.to_string(),
            format!("Must be at most {} characters", MAX_FIELD_LEN),
        );
    }
}

fn finish(field_errors: HashMap<String, String>) -> Result<(), StoreError> {
    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Validation {
            message: format!("{} validation failed", COLLECTION),
            field_errors,
        })
    }
}
