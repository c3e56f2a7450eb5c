use crate::entries::EntryError;
use crate::transfer::ImportError;
use axum::http::StatusCode;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn confirmation_required(action: &str) -> Self {
        Self {
            status: StatusCode::PRECONDITION_REQUIRED,
            message: format!("confirmation required to {action}; repeat with ?confirm=true"),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<EntryError> for AppError {
    fn from(err: EntryError) -> Self {
        match err {
            EntryError::UnknownExercise(_)
            | EntryError::UnknownLevel(_)
            | EntryError::UnknownStrengthEntry { .. } => Self::not_found(err.to_string()),
            EntryError::CubeOutOfRange { .. }
            | EntryError::InvalidDistance
            | EntryError::InvalidWeight
            | EntryError::IncompleteStrength => Self::bad_request(err.to_string()),
        }
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        Self::bad_request(format!("import failed: {err}"))
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
