//! Extent extraction: turn a solid into a box extent or a cross-section.

use net_kernel::{BoundaryQuery, SectionCurve, SectionKind, SolidHandle};
use net_types::{ClosedCurve, CrossSection, Extent, WorkingPlane};
use tracing::{debug, instrument, warn};

use crate::types::NetError;

/// Segments shorter than this are reported as a degenerate slice.
const MIN_SEGMENT: f64 = 1e-9;

/// Width/height/depth of the solid's axis-aligned bounding box.
#[instrument(skip(query))]
pub fn extract_box_extent(
    query: &dyn BoundaryQuery,
    solid: SolidHandle,
) -> Result<Extent, NetError> {
    let bb = query.bounding_box(solid)?;
    if bb.is_empty() {
        return Err(NetError::Selection {
            reason: "solid has an empty bounding box".to_string(),
        });
    }
    let size = bb.size();
    let extent = Extent::new(size.x, size.z, size.y);
    debug!(?extent, "box extent");
    Ok(extent)
}

/// Slice the solid with `plane` and return the cross-section polygon with the
/// solid's extent along the plane normal.
///
/// The slice must be exactly one closed straight-edge polygon with at least
/// three non-degenerate segments.
#[instrument(skip(query))]
pub fn extract_cross_section(
    query: &dyn BoundaryQuery,
    solid: SolidHandle,
    plane: &WorkingPlane,
) -> Result<(CrossSection, f64), NetError> {
    let curves = query.slice_to_polygon(solid, plane)?;
    let polygon = single_polygon(curves)?;

    let cross_section = CrossSection::from_polygon(polygon, MIN_SEGMENT).ok_or_else(|| {
        warn!("slice polygon has fewer than 3 usable segments");
        NetError::geometry("slice polygon has fewer than 3 non-degenerate segments")
    })?;

    let depth = query.bounding_box(solid)?.extent_along(&plane.normal);
    debug!(
        segments = cross_section.segment_count(),
        depth, "cross-section"
    );
    Ok((cross_section, depth))
}

fn single_polygon(mut curves: Vec<SectionCurve>) -> Result<ClosedCurve, NetError> {
    if curves.len() != 1 {
        warn!(count = curves.len(), "slice did not produce a single curve");
        return Err(NetError::geometry(format!(
            "slice produced {} curves, expected exactly 1",
            curves.len()
        )));
    }
    let curve = curves.remove(0);
    if curve.kind != SectionKind::Polyline {
        return Err(NetError::geometry("slice is curved, not a straight-edge polygon"));
    }
    if !curve.closed {
        return Err(NetError::geometry("slice curve is not closed"));
    }

    let mut points = curve.points;
    // Some services repeat the start point to close the loop.
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    Ok(ClosedCurve::new(points))
}
