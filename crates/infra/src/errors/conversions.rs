//! Conversions from external infrastructure errors into domain errors.

use std::io::{Error as IoError, ErrorKind};

use postdeck_domain::PostdeckError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PostdeckError);

impl From<InfraError> for PostdeckError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PostdeckError> for InfraError {
    fn from(value: PostdeckError) -> Self {
        InfraError(value)
    }
}

trait IntoPostdeckError {
    fn into_postdeck(self) -> PostdeckError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PostdeckError */
/* -------------------------------------------------------------------------- */

/// Domain error for a non-success HTTP status.
pub(crate) fn status_to_error(status: reqwest::StatusCode, detail: &str) -> PostdeckError {
    let code = status.as_u16();
    let mut message =
        format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));
    if !detail.trim().is_empty() {
        message.push_str(": ");
        message.push_str(detail.trim());
    }

    match code {
        401 | 403 => PostdeckError::Auth(message),
        404 => PostdeckError::NotFound(message),
        429 => PostdeckError::Network(message),
        400..=499 => PostdeckError::InvalidInput(message),
        _ => PostdeckError::Network(message),
    }
}

impl IntoPostdeckError for HttpError {
    fn into_postdeck(self) -> PostdeckError {
        if self.is_timeout() {
            return PostdeckError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return PostdeckError::Network("HTTP connection failure".into());
        }

        if self.is_body() {
            return PostdeckError::Network(format!("HTTP response body interrupted: {self}"));
        }

        if self.is_decode() {
            return PostdeckError::Internal(format!("malformed HTTP response body: {self}"));
        }

        if let Some(status) = self.status() {
            return status_to_error(status, "");
        }

        PostdeckError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_postdeck())
    }
}

/* -------------------------------------------------------------------------- */
/* std::io::Error → PostdeckError */
/* -------------------------------------------------------------------------- */

impl IntoPostdeckError for IoError {
    fn into_postdeck(self) -> PostdeckError {
        match self.kind() {
            ErrorKind::NotFound => PostdeckError::NotFound(format!("file not found: {self}")),
            ErrorKind::PermissionDenied => {
                PostdeckError::Auth(format!("storage permission denied: {self}"))
            }
            ErrorKind::InvalidInput | ErrorKind::InvalidData => {
                PostdeckError::InvalidInput(self.to_string())
            }
            _ => PostdeckError::Store(format!("storage I/O failure: {self}")),
        }
    }
}

impl From<IoError> for InfraError {
    fn from(value: IoError) -> Self {
        InfraError(value.into_postdeck())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → PostdeckError */
/* -------------------------------------------------------------------------- */

impl IntoPostdeckError for JsonError {
    fn into_postdeck(self) -> PostdeckError {
        if self.is_io() {
            return PostdeckError::Store(format!("failed to read document: {self}"));
        }
        PostdeckError::InvalidInput(format!("malformed document: {self}"))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_postdeck())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
