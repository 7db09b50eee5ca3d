//! Error handling for the Spinfour backend.

pub mod domain;
pub mod error_code;

pub use domain::{DependencyKind, DomainError, InvalidMoveKind, NotFoundKind};
pub use error_code::ErrorCode;
