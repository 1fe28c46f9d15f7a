// Request body stages for superhero writes.
//
// Each stage takes the previous stage's output and either passes it on or
// rejects the request with an ApiError:
//
//   JSON body -> [strip blank fields] -> unwrap `superhero` -> drop `owner` -> typed decode
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::ApiError;
use crate::middleware::remove_blank_fields;
use crate::models::{SuperheroInput, SuperheroPatch};

/// Top-level key every superhero request body is wrapped in
pub const RESOURCE_KEY: &str = "superhero";

/// Body of `POST /superheroes`
#[derive(Debug)]
pub struct CreatePayload(pub SuperheroInput);

/// Body of `PATCH /superheroes/:id`, already stripped of blanks and owner
#[derive(Debug)]
pub struct UpdatePayload(pub SuperheroPatch);

#[async_trait]
impl<S> FromRequest<S> for CreatePayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await?;
        let fields = unwrap_resource(body)?;
        Ok(CreatePayload(decode(fields)?))
    }
}

#[async_trait]
impl<S> FromRequest<S> for UpdatePayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state).await?;
        let body = remove_blank_fields(body);
        let fields = drop_owner(unwrap_resource(body)?);
        Ok(UpdatePayload(decode(fields)?))
    }
}

fn unwrap_resource(body: Value) -> Result<Map<String, Value>, ApiError> {
    let problem = match body {
        Value::Object(mut map) => match map.remove(RESOURCE_KEY) {
            Some(Value::Object(fields)) => return Ok(fields),
            Some(_) => "Must be an object",
            None => "This field is required",
        },
        _ => "Request body must be an object",
    };

    Err(ApiError::unprocessable_entity(
        format!("Request body must wrap fields in '{}'", RESOURCE_KEY),
        HashMap::from([(RESOURCE_KEY.to_string(), problem.to_string())]),
    ))
}

fn drop_owner(mut fields: Map<String, Value>) -> Map<String, Value> {
    if fields.remove("owner").is_some() {
        tracing::debug!("Discarded client-supplied owner from update payload");
    }
    fields
}

fn decode<T: DeserializeOwned>(fields: Map<String, Value>) -> Result<T, ApiError> {
    serde_json::from_value(Value::Object(fields))
        .map_err(|e| ApiError::unprocessable_entity(e.to_string(), HashMap::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{self, header::CONTENT_TYPE, StatusCode};
    use serde_json::json;

    fn json_request(body: Value) -> Request {
        http::Request::builder()
            .method("PATCH")
            .uri("/superheroes/x")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn update_strips_blanks_and_owner() {
        let req = json_request(json!({
            "superhero": { "name": "", "alias": "NewAlias", "owner": "attacker" }
        }));

        let UpdatePayload(patch) = UpdatePayload::from_request(req, &()).await.unwrap();
        assert_eq!(
            patch,
            SuperheroPatch {
                name: None,
                alias: Some("NewAlias".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn empty_update_object_is_a_noop_patch() {
        let req = json_request(json!({ "superhero": {} }));
        let UpdatePayload(patch) = UpdatePayload::from_request(req, &()).await.unwrap();
        assert!(patch.is_empty());
    }

    #[tokio::test]
    async fn missing_wrapper_is_a_validation_error() {
        let req = json_request(json!({ "name": "Nova" }));
        let err = UpdatePayload::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = json_request(json!({ "superhero": "Nova" }));
        let err = CreatePayload::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unknown_fields_are_rejected() {
        let req = json_request(json!({ "superhero": { "name": "Nova", "weakness": "kryptonite" } }));
        let err = CreatePayload::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn malformed_json_is_a_bad_request() {
        let req = http::Request::builder()
            .method("POST")
            .uri("/superheroes")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let err = CreatePayload::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_content_type_keeps_unsupported_media_type() {
        let req = http::Request::builder()
            .method("POST")
            .uri("/superheroes")
            .body(Body::from(r#"{"superhero":{"name":"Nova","alias":"N"}}"#))
            .unwrap();

        let err = CreatePayload::from_request(req, &()).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(err.error_code(), "REQUEST_REJECTED");
    }
}
