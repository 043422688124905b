use serde::{Deserialize, Serialize};

use crate::curve::ClosedCurve;
use crate::point::Point3d;

/// Width/height/depth of an axis-aligned box.
///
/// `width` is the X extent, `depth` the Y extent and `height` the Z extent,
/// so the four vertical faces unfold into panels of height `height`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Extent {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0 && self.depth > 0.0)
            || !(self.width.is_finite() && self.height.is_finite() && self.depth.is_finite())
    }
}

/// A closed slice polygon with its ordered segment lengths.
///
/// Holds at least three segments, each strictly positive. Deserialized
/// values are rebuilt from the polygon so the invariant always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CrossSectionData")]
pub struct CrossSection {
    polygon: ClosedCurve,
    lengths: Vec<f64>,
}

/// Wire form of a `CrossSection`. Stored lengths are ignored and
/// recomputed from the polygon.
#[derive(Deserialize)]
struct CrossSectionData {
    polygon: ClosedCurve,
}

impl TryFrom<CrossSectionData> for CrossSection {
    type Error = String;

    fn try_from(data: CrossSectionData) -> Result<Self, Self::Error> {
        CrossSection::from_polygon(data.polygon, 0.0).ok_or_else(|| {
            "cross-section needs at least 3 segments of positive length".to_string()
        })
    }
}

impl CrossSection {
    /// Returns `None` for fewer than three segments or any zero-length segment.
    pub fn from_polygon(polygon: ClosedCurve, min_segment: f64) -> Option<Self> {
        let lengths = polygon.segment_lengths();
        if lengths.len() < 3 || lengths.iter().any(|l| !(*l > min_segment)) {
            return None;
        }
        Some(Self { polygon, lengths })
    }

    pub fn polygon(&self) -> &ClosedCurve {
        &self.polygon
    }

    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    pub fn segment_count(&self) -> usize {
        self.lengths.len()
    }
}

/// One rectangular face of the net on the working plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    /// Nominal bottom-left corner of the panel material.
    pub origin: Point3d,
    pub width: f64,
    pub height: f64,
    /// Signed clearance reserved on the leading (left) edge.
    pub margin: f64,
}

impl Panel {
    pub fn right_edge(&self) -> f64 {
        self.origin.x + self.width
    }

    /// X of the seam running along the leading edge.
    pub fn leading_seam_x(&self) -> f64 {
        self.origin.x - self.margin / 2.0
    }

    /// X of the seam running along the trailing edge when nothing follows.
    pub fn trailing_seam_x(&self) -> f64 {
        self.right_edge() + self.margin / 2.0
    }

    pub fn outline(&self) -> ClosedCurve {
        ClosedCurve::rectangle(self.origin, self.width, self.height)
    }
}

/// A straight vertical segment along which a finger joint is cut.
/// Traversed from `from` to `to`; either direction is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seam {
    pub from: Point3d,
    pub to: Point3d,
}

impl Seam {
    pub fn new(from: Point3d, to: Point3d) -> Self {
        Self { from, to }
    }

    /// Upward seam at `x` from `y_start` to `y_end`.
    pub fn vertical(x: f64, y_start: f64, y_end: f64) -> Self {
        Self::new(Point3d::xy(x, y_start), Point3d::xy(x, y_end))
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.to, self.from)
    }

    /// Signed run along Y.
    pub fn rise(&self) -> f64 {
        self.to.y - self.from.y
    }

    pub fn is_vertical(&self, tolerance: f64) -> bool {
        (self.to.x - self.from.x).abs() <= tolerance && (self.to.z - self.from.z).abs() <= tolerance
    }
}
