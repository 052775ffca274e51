use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    InsufficientCredits,
    AlreadyRented,
    RentalExpired,
    InvalidProgress,
    InvalidInput,
    NotFound,
    AlreadyExists,
    ReviewNotAllowed,
    Forbidden,
    Concurrency,
    Timeout,
    StoreUnavailable,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::InsufficientCredits => write!(f, "Not enough credits to rent"),
            KernelError::AlreadyRented => write!(f, "Film is already rented"),
            KernelError::RentalExpired => write!(f, "Rental has expired"),
            KernelError::InvalidProgress => write!(f, "Invalid playback progress"),
            KernelError::InvalidInput => write!(f, "Invalid input"),
            KernelError::NotFound => write!(f, "Resource not found"),
            KernelError::AlreadyExists => write!(f, "Resource already exists"),
            KernelError::ReviewNotAllowed => write!(f, "Review is not allowed"),
            KernelError::Forbidden => write!(f, "Operation is forbidden"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::StoreUnavailable => write!(f, "Store is unavailable"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
