//! The closing base panel of a net.
//!
//! Both variants are placed the same way: the panel's bounding-box centre
//! goes to `bottom_origin + half extents + (t, t)`, which puts its lower-left
//! corner one thickness to the right of and above the end of the strip.

use net_kernel::BoundaryQuery;
use net_types::{ClosedCurve, CrossSection, Extent, NetParameters, Point3d};
use tracing::{instrument, warn};

use crate::types::NetError;

/// Rectangular bottom for the box variant: `(width + 2t) x (depth + 2t)`,
/// or the nominal `width x depth` in shrink-to-dimensions mode.
pub fn box_bottom_panel(
    extent: &Extent,
    params: &NetParameters,
    bottom_origin: Point3d,
) -> ClosedCurve {
    let grow = if params.shrink_to_dimensions {
        0.0
    } else {
        2.0 * params.thickness
    };
    let rect = ClosedCurve::rectangle(
        Point3d::ORIGIN,
        extent.width + grow,
        extent.depth + grow,
    );
    place(&rect, bottom_origin, params.thickness)
}

/// Cross-section polygon as the bottom for the prism variant, offset outward
/// by one thickness unless shrink-to-dimensions is set.
///
/// The offset must produce exactly one closed curve.
#[instrument(skip(query, cross_section, params))]
pub fn polygon_bottom_panel(
    query: &dyn BoundaryQuery,
    cross_section: &CrossSection,
    params: &NetParameters,
    bottom_origin: Point3d,
) -> Result<ClosedCurve, NetError> {
    let outline = if params.shrink_to_dimensions {
        cross_section.polygon().clone()
    } else {
        let mut curves = query.offset_polygon(cross_section.polygon(), params.thickness)?;
        if curves.len() != 1 {
            warn!(count = curves.len(), "offset did not produce a single curve");
            return Err(NetError::geometry(format!(
                "offset produced {} curves, expected exactly 1",
                curves.len()
            )));
        }
        curves.remove(0)
    };
    Ok(place(&outline, bottom_origin, params.thickness))
}

fn place(curve: &ClosedCurve, bottom_origin: Point3d, clearance: f64) -> ClosedCurve {
    let bb = curve.bounding_box();
    let half = bb.size() * 0.5;
    let target = Point3d::new(
        bottom_origin.x + half.x + clearance,
        bottom_origin.y + half.y + clearance,
        bottom_origin.z,
    );
    curve.translated(target - bb.center())
}

#[cfg(test)]
mod tests {
    use super::*;
    use net_kernel::PrismKernel;

    fn square_section(size: f64, z: f64) -> CrossSection {
        CrossSection::from_polygon(
            ClosedCurve::rectangle(Point3d::new(-5.0, -5.0, z), size, size),
            1e-9,
        )
        .unwrap()
    }

    #[test]
    fn test_box_bottom_size_and_placement() {
        let params = NetParameters::new(1.0);
        let rect = box_bottom_panel(&Extent::new(10.0, 5.0, 4.0), &params, Point3d::xy(31.0, 0.0));
        let bb = rect.bounding_box();
        // Chosen convention: the box bottom uses the same anchoring as the
        // polygon bottom (centre at origin + half extents + (t, t)) rather
        // than centring on the strip end, so it never overlaps the last panel.
        assert!(bb.min.x > 31.0);
        assert!((bb.center().x - (31.0 + 6.0 + 1.0)).abs() < 1e-12);
        assert!((bb.center().y - (3.0 + 1.0)).abs() < 1e-12);
        assert!((bb.size().x - 12.0).abs() < 1e-12);
        assert!((bb.size().y - 6.0).abs() < 1e-12);
        assert!((bb.min.x - 32.0).abs() < 1e-12);
        assert!((bb.min.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_box_bottom_shrink_is_nominal() {
        let params = NetParameters::new(1.0).with_shrink_to_dimensions(true);
        let rect = box_bottom_panel(&Extent::new(10.0, 5.0, 4.0), &params, Point3d::ORIGIN);
        let size = rect.bounding_box().size();
        assert!((size.x - 10.0).abs() < 1e-12);
        assert!((size.y - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_polygon_bottom_offset_and_moved_to_working_plane() {
        let kernel = PrismKernel::new();
        let params = NetParameters::new(0.5);
        let bottom =
            polygon_bottom_panel(&kernel, &square_section(4.0, 3.0), &params, Point3d::xy(20.0, 0.0))
                .unwrap();
        let bb = bottom.bounding_box();
        assert!((bb.size().x - 5.0).abs() < 1e-9);
        assert!((bb.min.x - 20.5).abs() < 1e-9);
        assert!((bb.min.y - 0.5).abs() < 1e-9);
        assert!(bottom.vertices.iter().all(|v| v.z.abs() < 1e-12));
    }

    #[test]
    fn test_polygon_bottom_shrink_skips_offset() {
        let kernel = PrismKernel::new();
        let params = NetParameters::new(0.5).with_shrink_to_dimensions(true);
        let bottom =
            polygon_bottom_panel(&kernel, &square_section(4.0, 0.0), &params, Point3d::ORIGIN)
                .unwrap();
        assert!((bottom.bounding_box().size().x - 4.0).abs() < 1e-12);
    }
}
