//! PrismKernel: in-process boundary-query service for right prisms.
//!
//! Holds boxes and extruded polygons (base in a plane of constant Z, swept
//! along +Z) plus cylinders, whose slices are curved. Deterministic handle
//! allocation, so tests can rely on ids.

use std::collections::HashMap;

use crate::offset::offset_convex_polygon;
use crate::traits::BoundaryQuery;
use crate::types::*;

/// Sample count used to approximate a cylinder slice.
const CYLINDER_SAMPLES: usize = 32;

/// Angular tolerance for "plane normal is parallel to the prism axis".
const AXIS_TOL: f64 = 1e-9;

#[derive(Debug, Clone)]
enum Shape {
    /// Base polygon at its own Z, extruded by `height` along +Z.
    Prism { base: ClosedCurve, height: f64 },
    /// Circular base centred at `center`, extruded by `height` along +Z.
    Cylinder {
        center: Point3d,
        radius: f64,
        height: f64,
    },
}

impl Shape {
    fn base_z(&self) -> f64 {
        match self {
            Shape::Prism { base, .. } => base.vertices.first().map(|v| v.z).unwrap_or(0.0),
            Shape::Cylinder { center, .. } => center.z,
        }
    }

    fn height(&self) -> f64 {
        match self {
            Shape::Prism { height, .. } | Shape::Cylinder { height, .. } => *height,
        }
    }

    fn bounding_box(&self) -> BoundingBox {
        let up = Vec3::Z * self.height();
        match self {
            Shape::Prism { base, .. } => {
                let mut bb = base.bounding_box();
                for v in &base.vertices {
                    bb.expand_to_include(&(*v + up));
                }
                bb
            }
            Shape::Cylinder { center, radius, .. } => BoundingBox::new(
                Point3d::new(center.x - radius, center.y - radius, center.z),
                Point3d::new(center.x + radius, center.y + radius, center.z) + up,
            ),
        }
    }

    fn scaled(&self, center: &Point3d, factor: f64) -> Self {
        match self {
            Shape::Prism { base, height } => Shape::Prism {
                base: ClosedCurve::new(
                    base.vertices
                        .iter()
                        .map(|v| v.scaled_about(center, factor))
                        .collect(),
                ),
                height: height * factor,
            },
            Shape::Cylinder {
                center: c,
                radius,
                height,
            } => Shape::Cylinder {
                center: c.scaled_about(center, factor),
                radius: radius * factor,
                height: height * factor,
            },
        }
    }

    fn section_at(&self, z: f64) -> SectionCurve {
        match self {
            Shape::Prism { base, .. } => SectionCurve::closed_polygon(
                base.vertices
                    .iter()
                    .map(|v| Point3d::new(v.x, v.y, z))
                    .collect(),
            ),
            Shape::Cylinder { center, radius, .. } => SectionCurve {
                kind: SectionKind::Curved,
                points: (0..CYLINDER_SAMPLES)
                    .map(|i| {
                        let a = i as f64 * std::f64::consts::TAU / CYLINDER_SAMPLES as f64;
                        Point3d::new(center.x + radius * a.cos(), center.y + radius * a.sin(), z)
                    })
                    .collect(),
                closed: true,
            },
        }
    }
}

/// In-process boundary-query service over boxes, right prisms and cylinders.
#[derive(Debug, Clone)]
pub struct PrismKernel {
    next_handle: u64,
    solids: HashMap<u64, Shape>,
}

impl PrismKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            solids: HashMap::new(),
        }
    }

    fn alloc_handle(&mut self) -> SolidHandle {
        let h = SolidHandle(self.next_handle);
        self.next_handle += 1;
        h
    }

    fn insert(&mut self, shape: Shape) -> SolidHandle {
        let handle = self.alloc_handle();
        self.solids.insert(handle.id(), shape);
        handle
    }

    fn shape(&self, solid: SolidHandle) -> Result<&Shape, KernelError> {
        self.solids
            .get(&solid.id())
            .ok_or(KernelError::SolidNotFound { handle: solid })
    }

    /// Axis-aligned box between two opposite corners (in any order).
    pub fn add_box(&mut self, a: Point3d, b: Point3d) -> SolidHandle {
        let min = Point3d::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z));
        let max = Point3d::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z));
        self.insert(Shape::Prism {
            base: ClosedCurve::rectangle(min, max.x - min.x, max.y - min.y),
            height: max.z - min.z,
        })
    }

    /// Right prism: `base` must lie in a plane of constant Z.
    pub fn add_prism(&mut self, base: ClosedCurve, height: f64) -> Result<SolidHandle, KernelError> {
        if base.vertices.len() < 3 {
            return Err(KernelError::Degenerate {
                reason: format!("prism base has {} vertices, need at least 3", base.vertices.len()),
            });
        }
        if !(height > 0.0) {
            return Err(KernelError::Degenerate {
                reason: format!("prism height must be positive, got {height}"),
            });
        }
        let z = base.vertices[0].z;
        if base.vertices.iter().any(|v| (v.z - z).abs() > 1e-9) {
            return Err(KernelError::NotSupported {
                operation: "prism base outside a plane of constant Z".to_string(),
            });
        }
        Ok(self.insert(Shape::Prism { base, height }))
    }

    pub fn add_cylinder(
        &mut self,
        center: Point3d,
        radius: f64,
        height: f64,
    ) -> Result<SolidHandle, KernelError> {
        if !(radius > 0.0) || !(height > 0.0) {
            return Err(KernelError::Degenerate {
                reason: format!("cylinder radius {radius} and height {height} must be positive"),
            });
        }
        Ok(self.insert(Shape::Cylinder {
            center,
            radius,
            height,
        }))
    }

    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }
}

impl Default for PrismKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundaryQuery for PrismKernel {
    fn bounding_box(&self, solid: SolidHandle) -> Result<BoundingBox, KernelError> {
        Ok(self.shape(solid)?.bounding_box())
    }

    fn slice_to_polygon(
        &self,
        solid: SolidHandle,
        plane: &WorkingPlane,
    ) -> Result<Vec<SectionCurve>, KernelError> {
        let shape = self.shape(solid)?;
        if !plane.normal.is_parallel_to(&Vec3::Z, AXIS_TOL) {
            return Err(KernelError::NotSupported {
                operation: "slice with a plane not normal to the prism axis".to_string(),
            });
        }
        let z = plane.origin.z;
        let z0 = shape.base_z();
        if z < z0 || z > z0 + shape.height() {
            return Ok(Vec::new());
        }
        Ok(vec![shape.section_at(z)])
    }

    fn offset_polygon(
        &self,
        polygon: &ClosedCurve,
        distance: f64,
    ) -> Result<Vec<ClosedCurve>, KernelError> {
        offset_convex_polygon(polygon, distance)
    }

    fn scale_about_point(
        &mut self,
        solid: SolidHandle,
        center: Point3d,
        factor: f64,
    ) -> Result<SolidHandle, KernelError> {
        if !(factor > 0.0) || !factor.is_finite() {
            return Err(KernelError::Degenerate {
                reason: format!("scale factor must be positive, got {factor}"),
            });
        }
        let scaled = self.shape(solid)?.scaled(&center, factor);
        Ok(self.insert(scaled))
    }
}
