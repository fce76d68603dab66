use crate::{error::HttpError, models::ticketmodel::TicketStatus};
use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Ticket {0} not found")]
    TicketNotFound(Uuid),

    #[error("Artisan {0} not found")]
    ArtisanNotFound(Uuid),

    #[error("Provider {0} not found")]
    ProviderNotFound(Uuid),

    #[error("cannot assign a cancelled ticket")]
    CannotAssignCancelled,

    #[error("Ticket {0} cannot be {1} while {2:?}")]
    InvalidTransition(Uuid, &'static str, TicketStatus),

    #[error("Ticket {0} has no before photo on record")]
    MissingBeforePhoto(Uuid),

    #[error("Rating must be between 1 and 5, got {0}")]
    InvalidRating(i32),

    #[error("User {0} is not authorized to perform this action on ticket {1}")]
    UnauthorizedTicketAccess(Uuid, Uuid),

    #[error("Ticket {0} was modified concurrently, retry the operation")]
    ConcurrentUpdate(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Notification error: {0}")]
    Notification(String),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::TicketNotFound(_)
            | ServiceError::ArtisanNotFound(_)
            | ServiceError::ProviderNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::CannotAssignCancelled
            | ServiceError::InvalidTransition(_, _, _)
            | ServiceError::MissingBeforePhoto(_)
            | ServiceError::InvalidRating(_)
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::UnauthorizedTicketAccess(_, _) => StatusCode::UNAUTHORIZED,

            ServiceError::ConcurrentUpdate(_) => StatusCode::CONFLICT,

            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,

            ServiceError::Notification(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        HttpError::new(error.to_string(), error.status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_per_variant() {
        let id = Uuid::new_v4();
        let cases = [
            (ServiceError::TicketNotFound(id), StatusCode::NOT_FOUND),
            (ServiceError::CannotAssignCancelled, StatusCode::BAD_REQUEST),
            (ServiceError::InvalidRating(9), StatusCode::BAD_REQUEST),
            (
                ServiceError::UnauthorizedTicketAccess(id, id),
                StatusCode::UNAUTHORIZED,
            ),
            (ServiceError::ConcurrentUpdate(id), StatusCode::CONFLICT),
            (
                ServiceError::Notification("push delivery failed".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let message = error.to_string();
            let http: HttpError = error.into();
            assert_eq!(http.status, expected);
            assert_eq!(http.message, message);
        }
    }
}
