use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, PartialEq)]
pub enum Envelope<T> {
    Success(T),
    Failure { message: String, status: StatusCode },
}

// Wire shape: exactly one of `data` / `error` is present
#[derive(Serialize)]
struct Body<'a, T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Envelope::Success(data)
    }

    pub fn failure(message: impl Into<String>, status: StatusCode) -> Self {
        Envelope::Failure {
            message: message.into(),
            status,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Envelope::Success(_) => StatusCode::OK,
            Envelope::Failure { status, .. } => *status,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Envelope::Success(data) => Body {
                success: true,
                data: Some(data),
                error: None,
            },
            Envelope::Failure { message, .. } => Body {
                success: false,
                data: None,
                error: Some(message.as_str()),
            },
        };
        (status, Json(body)).into_response()
    }
}
