use std::error::Error;
use std::fmt;

use crate::domain::store::StoreError;

/// Error type for event projection.
///
/// `MissingEntity` is a data-integrity failure: a handler loaded an entity
/// the prior event history must have created and it was absent. There is no
/// safe recovery without that history, so the event fails instead of
/// guessing a default.
#[derive(Debug)]
pub enum ProjectionError {
    Store(StoreError),
    MissingEntity { kind: &'static str, id: String },
}

impl ProjectionError {
    pub fn missing(kind: &'static str, id: impl Into<String>) -> Self {
        ProjectionError::MissingEntity {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::Store(e) => write!(f, "Store error: {}", e),
            ProjectionError::MissingEntity { kind, id } => {
                write!(f, "Missing required {}: {}", kind, id)
            }
        }
    }
}

impl Error for ProjectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProjectionError::Store(e) => Some(e),
            ProjectionError::MissingEntity { .. } => None,
        }
    }
}

impl From<StoreError> for ProjectionError {
    fn from(error: StoreError) -> Self {
        ProjectionError::Store(error)
    }
}
