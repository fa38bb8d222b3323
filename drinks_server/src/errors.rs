use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use drinks_engine::traits::DrinkStoreError;
use log::error;
use thiserror::Error;

use crate::data_objects::ErrorResponse;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("Invalid server configuration. {0}")]
    ConfigurationError(String),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("The resource was not found. {0}")]
    NoRecordFound(String),
    #[error("Method not allowed.")]
    MethodNotAllowed,
    #[error("Unprocessable entity.")]
    Unprocessable,
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationError(e) => e.status_code(),
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // Internal failures are logged in full, but the caller only ever sees a generic message.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("💥️ {self}");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        let code = match self {
            Self::AuthenticationError(e) => Some(e.code().to_string()),
            _ => None,
        };
        let body = ErrorResponse { success: false, error: status.as_u16(), message, code };
        HttpResponse::build(status).insert_header(ContentType::json()).json(body)
    }
}

impl From<DrinkStoreError> for ServerError {
    fn from(e: DrinkStoreError) -> Self {
        ServerError::BackendError(e.to_string())
    }
}

/// Failures in the bearer-token pipeline. Each variant carries its own HTTP status and a short
/// error code that clients can match on.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Authorization header is expected.")]
    MissingHeader,
    #[error("{0}")]
    InvalidHeader(String),
    #[error("Unable to find the appropriate key.")]
    UnknownKeyId,
    #[error("Token is expired.")]
    TokenExpired,
    #[error("{0}")]
    InvalidClaims(String),
    #[error("Unable to parse authentication token. {0}")]
    MalformedToken(String),
    #[error("Permissions not included in JWT.")]
    PermissionsMissing,
    #[error("Permission '{0}' not found in token.")]
    InsufficientPermissions(String),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingHeader | Self::InvalidHeader(_) | Self::UnknownKeyId | Self::MalformedToken(_) => {
                "invalid_header"
            },
            Self::TokenExpired => "token_expired",
            Self::InvalidClaims(_) | Self::PermissionsMissing => "invalid_claims",
            Self::InsufficientPermissions(_) => "unauthorized",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingHeader | Self::InvalidHeader(_) | Self::UnknownKeyId => StatusCode::UNAUTHORIZED,
            Self::TokenExpired | Self::InvalidClaims(_) => StatusCode::UNAUTHORIZED,
            Self::MalformedToken(_) | Self::PermissionsMissing => StatusCode::BAD_REQUEST,
            Self::InsufficientPermissions(_) => StatusCode::FORBIDDEN,
        }
    }
}
