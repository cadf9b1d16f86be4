use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Uniform `{status, message, data}` body returned by every endpoint.
///
/// `status` mirrors the HTTP status code of the response carrying it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data,
        }
    }

    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, message, data)
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_envelope_mirrors_status_code() {
        let envelope = Envelope::ok("Product found", json!({ "id": 1 }));

        assert_eq!(envelope.status, 200);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "status": 200, "message": "Product found", "data": { "id": 1 } })
        );
    }

    #[test]
    fn response_uses_envelope_status() {
        let response = Envelope::new(StatusCode::NOT_FOUND, "Not found", "gone").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
