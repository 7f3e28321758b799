//! JSON body extractor with `validator` checks.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use common::AppError;

/// JSON extractor that validates the payload before the handler runs.
pub struct ValidatedJson<T>(pub T);

/// Message of the first failing field, by field name.
fn first_message(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .flat_map(|(_, errors)| errors.iter())
        .find_map(|error| error.message.as_ref())
        .map(|msg| msg.to_string())
        .unwrap_or_else(|| "Validation failed".to_string())
}

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(first_message(&e)))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header::CONTENT_TYPE};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "Title is required"))]
        title: String,
        #[validate(email(message = "Invalid email format"))]
        email: String,
    }

    fn request(body: &str) -> Request {
        Request::builder()
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_payload_passes() {
        let ValidatedJson(payload) = ValidatedJson::<Payload>::from_request(
            request(r#"{"title":"Rappel","email":"agent@agence.com"}"#),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(payload.title, "Rappel");
    }

    #[tokio::test]
    async fn test_first_failing_field_is_reported() {
        let err = ValidatedJson::<Payload>::from_request(
            request(r#"{"title":"","email":"not-an-email"}"#),
            &(),
        )
        .await
        .err()
        .unwrap();

        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.user_message(), "Invalid email format");
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_validation_error() {
        let err = ValidatedJson::<Payload>::from_request(request("{"), &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }
}
