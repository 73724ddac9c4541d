use axum::{Json, http::StatusCode};
use db::error::DomainError;
use serde::Serialize;

/// Distinguishes expected business-rule rejections from unexpected server
/// failures in the response envelope.
///
/// - `None`: the request was understood and rejected by a domain rule
///   (missing resource, permission, validation, deadline).
/// - `Unknown`: something failed server-side; the message is generic and the
///   detail is only in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCode {
    None,
    Unknown,
}

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message",
///   "error_code": "none"
/// }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
    pub error_code: ErrorCode,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
            error_code: ErrorCode::None,
        }
    }

    /// Constructs an error response for an expected rejection, with default
    /// `data`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
            error_code: ErrorCode::None,
        }
    }

    /// Constructs an error response for an unexpected server-side failure.
    pub fn error_unknown(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
            error_code: ErrorCode::Unknown,
        }
    }
}

/// Maps a `DomainError` to a status code and envelope. Business-rule
/// rejections carry their own message; database failures are logged and
/// replaced by a generic message.
pub fn domain_error_response<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    match err {
        DomainError::NotFound(_) => (StatusCode::NOT_FOUND, Json(ApiResponse::error(err.to_string()))),
        DomainError::Permission(_) => (StatusCode::FORBIDDEN, Json(ApiResponse::error(err.to_string()))),
        DomainError::Validation(_) | DomainError::DeadlinePassed => {
            (StatusCode::BAD_REQUEST, Json(ApiResponse::error(err.to_string())))
        }
        DomainError::Db(e) => {
            tracing::error!(error = %e, "database error while handling request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error_unknown(
                    "Something went wrong. Please try again later.",
                )),
            )
        }
    }
}
