//! Offset of convex planar polygons in the XY plane.
//!
//! Each edge is shifted along its outward normal and consecutive shifted
//! edge lines are intersected to give the new vertices. An inward offset
//! that flips any edge has collapsed the polygon and yields no curve.

use crate::types::*;

/// Turns smaller than this (cross product of unit edge directions) are
/// treated as collinear vertices and dropped before offsetting.
const COLLINEAR_TOL: f64 = 1e-10;

/// Offset a convex polygon by `distance` (positive grows the polygon).
///
/// Returns an empty vector when an inward offset collapses the polygon, and
/// `KernelError::NotSupported` for non-convex input.
pub fn offset_convex_polygon(
    polygon: &ClosedCurve,
    distance: f64,
) -> Result<Vec<ClosedCurve>, KernelError> {
    if !distance.is_finite() {
        return Err(KernelError::Degenerate {
            reason: format!("offset distance {distance} is not finite"),
        });
    }

    let vertices = drop_collinear(&polygon.vertices);
    let cleaned = ClosedCurve::new(vertices);
    if cleaned.vertices.len() < 3 || !cleaned.is_convex_xy() {
        return Err(KernelError::NotSupported {
            operation: "offset of a non-convex or degenerate polygon".to_string(),
        });
    }

    if distance == 0.0 {
        return Ok(vec![cleaned]);
    }

    let orientation = cleaned.signed_area_xy().signum();
    let n = cleaned.vertices.len();
    let z = cleaned.vertices[0].z;

    // Shifted edge lines as (point, direction).
    let lines: Vec<(Point3d, Vec3)> = (0..n)
        .map(|i| {
            let a = cleaned.vertices[i];
            let b = cleaned.vertices[(i + 1) % n];
            let dir = b - a;
            let len = dir.length();
            let outward = Vec3::new(dir.y / len, -dir.x / len, 0.0) * orientation;
            (a + outward * distance, dir)
        })
        .collect();

    let mut result = Vec::with_capacity(n);
    for i in 0..n {
        let (p_prev, d_prev) = lines[(i + n - 1) % n];
        let (p_next, d_next) = lines[i];
        match intersect_lines(p_prev, d_prev, p_next, d_next) {
            Some(p) => result.push(Point3d::new(p.x, p.y, z)),
            None => return Ok(Vec::new()),
        }
    }

    // A collapsed inward offset reverses at least one edge.
    for i in 0..n {
        let before = cleaned.vertices[(i + 1) % n] - cleaned.vertices[i];
        let after = result[(i + 1) % n] - result[i];
        if before.dot(&after) <= 0.0 {
            return Ok(Vec::new());
        }
    }

    Ok(vec![ClosedCurve::new(result)])
}

fn drop_collinear(vertices: &[Point3d]) -> Vec<Point3d> {
    let n = vertices.len();
    if n < 3 {
        return vertices.to_vec();
    }
    (0..n)
        .filter(|&i| {
            let prev = vertices[(i + n - 1) % n];
            let cur = vertices[i];
            let next = vertices[(i + 1) % n];
            match ((cur - prev).normalized(), (next - cur).normalized()) {
                (Some(a), Some(b)) => a.cross(&b).z.abs() > COLLINEAR_TOL,
                _ => false,
            }
        })
        .map(|i| vertices[i])
        .collect()
}

/// Intersection of two XY lines given as point + direction.
fn intersect_lines(p1: Point3d, d1: Vec3, p2: Point3d, d2: Vec3) -> Option<Point3d> {
    let denom = d1.x * d2.y - d1.y * d2.x;
    if denom.abs() < 1e-15 {
        return None;
    }
    let w = p2 - p1;
    let t = (w.x * d2.y - w.y * d2.x) / denom;
    Some(p1 + d1 * t)
}
