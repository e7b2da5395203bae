//! Error type for the few fallible constructors and parsers.
//!
//! Queries never fail: degenerate inputs map to "no hit" / "not inside".
//! Only explicit validation and name parsing report errors.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum GeomError {
    TooFewVertices { got: usize },
    UnknownName { what: &'static str, name: String },
    InvalidFov { reason: String },
}

impl GeomError {
    pub(crate) fn unknown(what: &'static str, name: impl Into<String>) -> Self {
        Self::UnknownName {
            what,
            name: name.into(),
        }
    }

    pub(crate) fn invalid_fov(reason: impl Into<String>) -> Self {
        Self::InvalidFov {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewVertices { got } => {
                write!(f, "polygon needs at least 3 vertices, got {got}")
            }
            Self::UnknownName { what, name } => write!(f, "unknown {what}: {name:?}"),
            Self::InvalidFov { reason } => write!(f, "invalid fov parameters: {reason}"),
        }
    }
}

impl std::error::Error for GeomError {}
