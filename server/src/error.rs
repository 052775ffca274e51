use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_stack::Report;

use kernel::KernelError;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl ErrorStatus {
    pub fn status(&self) -> StatusCode {
        match self.0.current_context() {
            KernelError::InvalidProgress | KernelError::InvalidInput => StatusCode::BAD_REQUEST,
            KernelError::InsufficientCredits => StatusCode::PAYMENT_REQUIRED,
            KernelError::Forbidden | KernelError::ReviewNotAllowed => StatusCode::FORBIDDEN,
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::AlreadyRented | KernelError::AlreadyExists | KernelError::Concurrency => {
                StatusCode::CONFLICT
            }
            KernelError::RentalExpired => StatusCode::GONE,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!(%status, "{}", self.0.current_context());
        }
        // client errors carry the domain error name, server errors stay opaque
        let body = if status.is_server_error() {
            status.canonical_reason().unwrap_or_default().to_string()
        } else {
            self.0.current_context().to_string()
        };
        (status, body).into_response()
    }
}
