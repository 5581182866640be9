//! Error types for mesh operations.

use core::fmt;

/// Errors surfaced by [`Model`](crate::Model) entry points.
///
/// Out-of-range view indices are not reported here; they panic like slice
/// indexing.
#[derive(Debug, Clone, PartialEq)]
pub enum WobblyError {
    /// The mesh has no points to grab or connect to.
    NoPointsAvailable,
    /// The nearest point is already pinned by another anchor.
    AlreadyAnchored { index: usize },
    /// An anchor position has a NaN or infinite coordinate.
    NonFinitePosition,
    /// A settings value is out of range.
    InvalidSettings(&'static str),
}

impl fmt::Display for WobblyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WobblyError::NoPointsAvailable => write!(f, "mesh has no points available"),
            WobblyError::AlreadyAnchored { index } => {
                write!(f, "mesh point {} is already anchored", index)
            }
            WobblyError::NonFinitePosition => write!(f, "anchor position is not finite"),
            WobblyError::InvalidSettings(reason) => write!(f, "invalid settings: {}", reason),
        }
    }
}

impl core::error::Error for WobblyError {}

/// Convenience alias for `Result<T, WobblyError>`.
pub type Result<T> = core::result::Result<T, WobblyError>;
