use serde::{Deserialize, Serialize};

pub use net_types::{BoundingBox, ClosedCurve, Point3d, Polyline, Vec3, WorkingPlane};

/// Opaque handle to a solid held by a boundary-query service.
/// Valid only for the kernel session that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolidHandle(pub(crate) u64);

impl SolidHandle {
    /// Raw id, for services implemented outside this crate.
    pub fn from_raw(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// How a slice curve is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    /// Straight segments between the listed points.
    Polyline,
    /// A curved section; the points are only a sampled approximation.
    Curved,
}

/// One curve returned by a planar slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionCurve {
    pub kind: SectionKind,
    pub points: Vec<Point3d>,
    pub closed: bool,
}

impl SectionCurve {
    pub fn closed_polygon(points: Vec<Point3d>) -> Self {
        Self {
            kind: SectionKind::Polyline,
            points,
            closed: true,
        }
    }
}

/// A curve as received by an output sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EmittedCurve {
    Polyline { points: Vec<Point3d> },
    Closed { curve: ClosedCurve },
}

/// Errors from boundary-query operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("solid not found: {handle:?}")]
    SolidNotFound { handle: SolidHandle },

    #[error("operation not supported: {operation}")]
    NotSupported { operation: String },

    #[error("degenerate geometry: {reason}")]
    Degenerate { reason: String },

    #[error("kernel error: {message}")]
    Other { message: String },
}
