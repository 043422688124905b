use crate::types::*;

/// Geometry queries the net generator needs from a solid-modelling host.
/// Implemented in-process by `PrismKernel`; a CAD host binding implements
/// the same four calls.
pub trait BoundaryQuery {
    /// Axis-aligned bounding box of a solid.
    fn bounding_box(&self, solid: SolidHandle) -> Result<BoundingBox, KernelError>;

    /// Intersect a solid with a plane. Returns the raw section curves; the
    /// caller decides whether they form a usable polygon.
    fn slice_to_polygon(
        &self,
        solid: SolidHandle,
        plane: &WorkingPlane,
    ) -> Result<Vec<SectionCurve>, KernelError>;

    /// Offset a closed planar polygon by `distance` (positive = outward).
    /// Returns every curve the offset produced.
    fn offset_polygon(
        &self,
        polygon: &ClosedCurve,
        distance: f64,
    ) -> Result<Vec<ClosedCurve>, KernelError>;

    /// Scale a solid uniformly about `center`, returning a handle to the result.
    fn scale_about_point(
        &mut self,
        solid: SolidHandle,
        center: Point3d,
        factor: f64,
    ) -> Result<SolidHandle, KernelError>;
}

/// Destination for the curves of a finished net (the host document).
pub trait OutputSink {
    /// Add an open polyline.
    fn emit_polyline(&mut self, points: &[Point3d]);

    /// Add a closed curve.
    fn emit_curve(&mut self, curve: &ClosedCurve);

    /// Signal that a complete batch of curves has been emitted.
    fn flush(&mut self);
}
