//! Validated JSON extractor for automatic request validation.
//!
//! Deserializes the body and validates it with the `validator` crate before
//! the handler runs. Malformed JSON and failed validation are both rejected
//! with 400 and an `INVALID_INPUT` error body.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use strata_core::{field_errors, validation_errors_to_strata_error, ErrorResponse, StrataError};
use validator::{Validate, ValidationErrors};

/// JSON extractor that automatically validates the deserialized value.
///
/// # Example
///
/// ```ignore
/// use strata_rest::extractors::ValidatedJson;
///
/// async fn add(ValidatedJson(profile): ValidatedJson<Profile>) {
///     // profile.id is guaranteed non-empty here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection type for validated JSON extraction.
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// JSON parsing/deserialization error.
    JsonError(JsonRejection),
    /// Validation error with field-level details.
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let error_response = match self {
            Self::JsonError(rejection) => ErrorResponse::from_error(&StrataError::invalid_input(
                format!("Malformed JSON body: {}", rejection.body_text()),
            )),
            Self::ValidationError(errors) => {
                let details = field_errors(&errors);
                ErrorResponse::from_error(&validation_errors_to_strata_error(errors))
                    .with_details(details)
            }
        };
        (StatusCode::BAD_REQUEST, Json(error_response)).into_response()
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // First, extract as regular JSON
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        // Then validate
        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http_body_util::BodyExt;
    use strata_core::Profile;

    async fn extract(body: &'static str) -> Result<Profile, Response> {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        ValidatedJson::<Profile>::from_request(request, &())
            .await
            .map(|v| v.0)
            .map_err(IntoResponse::into_response)
    }

    async fn error_body(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let profile = extract(r#"{"id":"u1","name":"Ann"}"#).await.unwrap();
        assert_eq!(profile, Profile::new("u1", "Ann", "", 0));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let response = extract("{not json").await.unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_body(response).await["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn test_missing_id_is_bad_request_with_details() {
        let response = extract(r#"{"name":"Ann"}"#).await.unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = error_body(response).await;
        assert_eq!(body["code"], "INVALID_INPUT");
        assert_eq!(body["details"][0]["field"], "id");
    }
}
