//! Error types for the plate element evaluator

use thiserror::Error;

/// Main error type for element-level operations
///
/// Every variant carries the caller-supplied element name so that a mesh
/// assembler can report which element was rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlateError {
    /// The quadrilateral is self-intersecting, wound clockwise, or collapsed:
    /// the Jacobian determinant is non-positive (or below tolerance) somewhere
    /// on the natural-coordinate domain.
    #[error("Element '{element}' has degenerate geometry: {detail}")]
    DegenerateGeometry { element: String, detail: String },

    /// Out-of-range material or section constants, rejected before any
    /// integration starts.
    #[error("Element '{element}' has invalid material properties: {detail}")]
    InvalidMaterial { element: String, detail: String },

    /// The per-edge rotation-constraint operator is not invertible. Cannot
    /// happen for geometry that passed the Jacobian checks.
    #[error("Element '{element}' produced a singular edge constraint: {detail}")]
    SingularConstraint { element: String, detail: String },
}

impl PlateError {
    pub(crate) fn degenerate(element: &str, detail: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            element: element.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn material(element: &str, detail: impl Into<String>) -> Self {
        Self::InvalidMaterial {
            element: element.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn singular(element: &str, detail: impl Into<String>) -> Self {
        Self::SingularConstraint {
            element: element.to_string(),
            detail: detail.into(),
        }
    }
}

/// Result type for element-level operations
pub type PlateResult<T> = Result<T, PlateError>;
