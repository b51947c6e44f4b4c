pub mod annuity;
pub mod config;
pub mod engine;
pub mod error;
pub mod offers;
pub mod psk;
pub mod scoring;
pub mod types;
pub mod validation;

pub use error::{PreloanError, ValidationCause, ValidationError};
pub use types::*;

/// Standard result type for all preloan operations
pub type PreloanResult<T> = Result<T, PreloanError>;
