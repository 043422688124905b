use net_kernel::KernelError;
use net_types::{ClosedCurve, CrossSection, Extent, Panel, Point3d, Polyline};
use serde::{Deserialize, Serialize};

/// A complete fabrication net for one solid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Net {
    /// What the net was derived from.
    pub source: NetSource,
    /// Side panels, left to right.
    pub panels: Vec<Panel>,
    /// Right-most bottom corner of the side-panel strip.
    pub bottom_origin: Point3d,
    /// Every curve to cut, in emission order.
    pub curves: Vec<NetCurve>,
}

impl Net {
    pub fn seam_count(&self) -> usize {
        self.curves
            .iter()
            .filter(|c| matches!(c, NetCurve::Seam { .. }))
            .count()
    }

    pub fn outline_count(&self) -> usize {
        self.curves
            .iter()
            .filter(|c| matches!(c, NetCurve::PanelOutline { .. }))
            .count()
    }

    pub fn bottom(&self) -> Option<&ClosedCurve> {
        self.curves.iter().find_map(|c| match c {
            NetCurve::Bottom { curve } => Some(curve),
            _ => None,
        })
    }
}

/// The solid description a net was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NetSource {
    Box { extent: Extent },
    Prism { cross_section: CrossSection, depth: f64 },
}

/// One cut curve of a net.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NetCurve {
    /// Rectangle of side panel `index`.
    PanelOutline { index: usize, outline: Polyline },
    /// Finger joint along strip seam `index` (seam `i` leads panel `i`).
    Seam { index: usize, joint: Polyline },
    /// Closing base panel.
    Bottom { curve: ClosedCurve },
}

/// Errors from net generation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum NetError {
    #[error("no usable solid: {reason}")]
    Selection { reason: String },

    #[error("geometry error: {reason}")]
    Geometry { reason: String },

    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },
}

impl NetError {
    pub(crate) fn geometry(reason: impl Into<String>) -> Self {
        Self::Geometry {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }
}

impl From<KernelError> for NetError {
    fn from(err: KernelError) -> Self {
        match err {
            KernelError::SolidNotFound { .. } => Self::Selection {
                reason: err.to_string(),
            },
            other => Self::Geometry {
                reason: other.to_string(),
            },
        }
    }
}
