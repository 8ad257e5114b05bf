use thiserror::Error;

use crate::unit::Unit;

/// Errors raised by unit, unit id and range operations
#[derive(Error, Debug)]
pub enum UnitError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unit out of range: {0}")]
    Range(String),

    #[error("Unit mismatch: expected {expected}, got {found}")]
    UnitMismatch { expected: Unit, found: Unit },

    #[error("Century is unbounded above and has no parent")]
    NoParent,

    #[error("Second is the finest unit and has no children")]
    NoChildren,

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error(transparent)]
    Core(#[from] unitid_core::error::CoreError),
}

pub type UnitResult<T> = std::result::Result<T, UnitError>;
