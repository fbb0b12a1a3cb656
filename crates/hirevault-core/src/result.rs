//! Convenience result type alias for HireVault.

use crate::error::AppError;

/// A specialized `Result` type for HireVault operations.
pub type AppResult<T> = Result<T, AppError>;
