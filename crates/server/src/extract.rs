//! JSON body extractor whose rejections use the failure envelope.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::ServerError;

/// Request body decoded as JSON.
///
/// Unlike `axum::Json`, a body that cannot be read or decoded answers with
/// a 400 `{"success": false, "error": ...}` instead of a plain-text 4xx.
#[derive(Debug, Clone, Copy, Default)]
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Payload(value))
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
            JsonRejection::JsonSyntaxError(err) => {
                format!("Invalid JSON syntax: {}", err.body_text())
            }
            JsonRejection::MissingJsonContentType(_) => {
                "Missing Content-Type header. Expected 'application/json'.".to_string()
            }
            JsonRejection::BytesRejection(err) => {
                format!("Failed to read request body: {}", err.body_text())
            }
            _ => "Invalid JSON request".to_string(),
        };
        tracing::debug!("rejected request body: {message}");
        ServerError::Generic(message)
    }
}
