use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::point::Point3d;
use crate::vector::Vec3;

/// An open, ordered sequence of points joined by straight segments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point3d>,
}

impl Polyline {
    pub fn new(points: Vec<Point3d>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point3d> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point3d> {
        self.points.last()
    }

    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.points)
    }
}

/// A closed straight-edge curve. The closing segment from the last vertex
/// back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClosedCurve {
    pub vertices: Vec<Point3d>,
}

impl ClosedCurve {
    pub fn new(vertices: Vec<Point3d>) -> Self {
        Self { vertices }
    }

    /// Axis-aligned rectangle on the working plane, counter-clockwise from `min`.
    pub fn rectangle(min: Point3d, width: f64, height: f64) -> Self {
        Self::new(vec![
            min,
            Point3d::new(min.x + width, min.y, min.z),
            Point3d::new(min.x + width, min.y + height, min.z),
            Point3d::new(min.x, min.y + height, min.z),
        ])
    }

    pub fn segment_count(&self) -> usize {
        if self.vertices.len() < 2 {
            0
        } else {
            self.vertices.len()
        }
    }

    /// Segment lengths in traversal order, including the closing segment.
    pub fn segment_lengths(&self) -> Vec<f64> {
        let n = self.segment_count();
        (0..n)
            .map(|i| self.vertices[i].distance_to(&self.vertices[(i + 1) % n]))
            .collect()
    }

    pub fn perimeter(&self) -> f64 {
        self.segment_lengths().iter().sum()
    }

    /// Shoelace area in the XY plane: positive for counter-clockwise winding.
    pub fn signed_area_xy(&self) -> f64 {
        let n = self.vertices.len();
        if n < 3 {
            return 0.0;
        }
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice * 0.5
    }

    /// True when every turn in the XY plane has the same sign (collinear
    /// vertices are tolerated).
    pub fn is_convex_xy(&self) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut sign = 0.0_f64;
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let c = self.vertices[(i + 2) % n];
            let turn = (b - a).cross(&(c - b)).z;
            if turn.abs() < 1e-12 {
                continue;
            }
            if sign == 0.0 {
                sign = turn.signum();
            } else if turn.signum() != sign {
                return false;
            }
        }
        sign != 0.0
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.vertices)
    }

    pub fn translated(&self, offset: Vec3) -> Self {
        Self::new(self.vertices.iter().map(|v| *v + offset).collect())
    }

    /// Open polyline tracing the curve, with the first vertex repeated at the end.
    pub fn to_polyline(&self) -> Polyline {
        let mut points = self.vertices.clone();
        if let Some(first) = self.vertices.first() {
            points.push(*first);
        }
        Polyline::new(points)
    }
}

/// A plane given by a point on it and its normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkingPlane {
    pub origin: Point3d,
    pub normal: Vec3,
}

impl WorkingPlane {
    pub fn new(origin: Point3d, normal: Vec3) -> Self {
        Self { origin, normal }
    }

    /// The world XY plane through `z`.
    pub fn xy_at(z: f64) -> Self {
        Self::new(Point3d::new(0.0, 0.0, z), Vec3::Z)
    }
}
