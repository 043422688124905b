use approx::assert_abs_diff_eq;

use net_kernel::{
    BoundaryQuery, ClosedCurve, EmittedCurve, KernelError, Point3d, PrismKernel, RecordingSink,
    SectionCurve, SolidHandle, Vec3, WorkingPlane,
};
use net_ops::{
    assemble_box_net, assemble_prism_net, create_net, generate_finger_joint, NetCurve, NetError,
    NetRequest, NetSource, SeamMode, ToothDepth,
};
use net_types::{BoundingBox, NetParameters, Seam};

/// Boundary query that forwards to a `PrismKernel` but returns a fixed
/// number of copies from `offset_polygon`.
struct SplittingOffset {
    inner: PrismKernel,
    copies: usize,
}

impl BoundaryQuery for SplittingOffset {
    fn bounding_box(&self, solid: SolidHandle) -> Result<BoundingBox, KernelError> {
        self.inner.bounding_box(solid)
    }

    fn slice_to_polygon(
        &self,
        solid: SolidHandle,
        plane: &WorkingPlane,
    ) -> Result<Vec<SectionCurve>, KernelError> {
        self.inner.slice_to_polygon(solid, plane)
    }

    fn offset_polygon(
        &self,
        polygon: &ClosedCurve,
        _distance: f64,
    ) -> Result<Vec<ClosedCurve>, KernelError> {
        Ok(vec![polygon.clone(); self.copies])
    }

    fn scale_about_point(
        &mut self,
        solid: SolidHandle,
        center: Point3d,
        factor: f64,
    ) -> Result<SolidHandle, KernelError> {
        self.inner.scale_about_point(solid, center, factor)
    }
}

fn box_10_5_4(kernel: &mut PrismKernel) -> SolidHandle {
    // width 10 (X), depth 4 (Y), height 5 (Z)
    kernel.add_box(Point3d::ORIGIN, Point3d::new(10.0, 4.0, 5.0))
}

fn hexagon(side: f64) -> ClosedCurve {
    let vertices = (0..6)
        .map(|i| {
            let a = i as f64 * std::f64::consts::PI / 3.0;
            Point3d::xy(side * a.cos(), side * a.sin())
        })
        .collect();
    ClosedCurve::new(vertices)
}

fn panel_outlines(net: &net_ops::Net) -> Vec<&net_types::Polyline> {
    net.curves
        .iter()
        .filter_map(|c| match c {
            NetCurve::PanelOutline { outline, .. } => Some(outline),
            _ => None,
        })
        .collect()
}

// ── Box variant ────────────────────────────────────────────────────────────

#[test]
fn box_net_end_to_end() {
    let mut kernel = PrismKernel::new();
    let solid = box_10_5_4(&mut kernel);
    let mut sink = RecordingSink::new();
    let params = NetParameters::new(0.317);

    let net = create_net(&mut kernel, &mut sink, &NetRequest::Box { solid }, &params).unwrap();

    let widths: Vec<f64> = net.panels.iter().map(|p| p.width).collect();
    assert_eq!(widths, vec![10.0, 4.0, 10.0, 4.0]);
    assert!(net.panels.iter().all(|p| p.height == 5.0));

    for pair in net.panels.windows(2) {
        assert_abs_diff_eq!(pair[1].origin.x - pair[0].right_edge(), 0.317, epsilon = 1e-12);
    }

    let bottom = net.bottom().unwrap().bounding_box().size();
    assert_abs_diff_eq!(bottom.x, 10.634, epsilon = 1e-9);
    assert_abs_diff_eq!(bottom.y, 4.634, epsilon = 1e-9);

    assert_eq!(net.curves.len(), 10);
    assert_eq!(net.seam_count(), 5);
    assert_eq!(net.outline_count(), 4);

    assert_eq!(sink.curves.len(), 10);
    assert_eq!(sink.polyline_count(), 9);
    assert_eq!(sink.closed_count(), 1);
    assert_eq!(sink.flushes, 1);
    assert!(matches!(sink.curves.last(), Some(EmittedCurve::Closed { .. })));
}

#[test]
fn box_net_curve_order_interleaves_seams_and_outlines() {
    let mut kernel = PrismKernel::new();
    let solid = box_10_5_4(&mut kernel);
    let net = assemble_box_net(&mut kernel, solid, &NetParameters::new(1.0)).unwrap();

    let order: Vec<(&str, usize)> = net
        .curves
        .iter()
        .map(|c| match c {
            NetCurve::Seam { index, .. } => ("seam", *index),
            NetCurve::PanelOutline { index, .. } => ("outline", *index),
            NetCurve::Bottom { .. } => ("bottom", 0),
        })
        .collect();
    assert_eq!(
        order,
        vec![
            ("seam", 0),
            ("outline", 0),
            ("seam", 1),
            ("outline", 1),
            ("seam", 2),
            ("outline", 2),
            ("seam", 3),
            ("outline", 3),
            ("seam", 4),
            ("bottom", 0),
        ]
    );
}

#[test]
fn box_net_outlines_are_closed_rectangles() {
    let mut kernel = PrismKernel::new();
    let solid = box_10_5_4(&mut kernel);
    let net = assemble_box_net(&mut kernel, solid, &NetParameters::new(1.0)).unwrap();

    for outline in panel_outlines(&net) {
        assert_eq!(outline.len(), 5);
        assert_eq!(outline.first(), outline.last());
    }
}

#[test]
fn box_net_seams_end_exactly_on_panel_top() {
    let mut kernel = PrismKernel::new();
    let solid = box_10_5_4(&mut kernel);
    let net = assemble_box_net(&mut kernel, solid, &NetParameters::new(0.317)).unwrap();

    for curve in &net.curves {
        if let NetCurve::Seam { joint, .. } = curve {
            assert_eq!(joint.first().unwrap().y, 0.0);
            assert_eq!(joint.last().unwrap().y, 5.0);
        }
    }
}

#[test]
fn box_net_uses_full_depth_teeth() {
    let mut kernel = PrismKernel::new();
    let solid = box_10_5_4(&mut kernel);
    let net = assemble_box_net(&mut kernel, solid, &NetParameters::new(1.0)).unwrap();

    let NetCurve::Seam { joint, .. } = &net.curves[2] else {
        panic!("expected seam 1 at position 2");
    };
    let seam_x = joint.first().unwrap().x;
    let max_dx = joint
        .points
        .iter()
        .map(|p| (p.x - seam_x).abs())
        .fold(0.0, f64::max);
    assert_abs_diff_eq!(max_dx, 1.0, epsilon = 1e-12);
}

#[test]
fn box_net_shrink_to_dimensions() {
    let mut kernel = PrismKernel::new();
    let solid = box_10_5_4(&mut kernel);
    let params = NetParameters::new(1.0).with_shrink_to_dimensions(true);
    let net = assemble_box_net(&mut kernel, solid, &params).unwrap();

    let bottom = net.bottom().unwrap().bounding_box().size();
    assert_abs_diff_eq!(bottom.x, 10.0, epsilon = 1e-12);
    assert_abs_diff_eq!(bottom.y, 4.0, epsilon = 1e-12);

    // Margin is negative, so the leading seam sits inside panel 0.
    assert_eq!(net.panels[0].margin, -1.0);
    let NetCurve::Seam { joint, .. } = &net.curves[0] else {
        panic!("expected leading seam first");
    };
    assert_eq!(joint.first().unwrap().x, 0.5);
}

#[test]
fn box_net_pre_shrink_scales_extent() {
    let mut kernel = PrismKernel::new();
    let solid = box_10_5_4(&mut kernel);
    let params = NetParameters::new(0.1).with_pre_shrink(0.5);
    let net = assemble_box_net(&mut kernel, solid, &params).unwrap();

    let NetSource::Box { extent } = net.source else {
        panic!("expected box source");
    };
    assert_abs_diff_eq!(extent.width, 5.0, epsilon = 1e-12);
    assert_abs_diff_eq!(extent.height, 2.5, epsilon = 1e-12);
    assert_abs_diff_eq!(extent.depth, 2.0, epsilon = 1e-12);
    // The scaled copy is a new solid; the original is untouched.
    assert_eq!(kernel.solid_count(), 2);
}

#[test]
fn pre_shrink_zero_leaves_solid_alone() {
    let mut kernel = PrismKernel::new();
    let solid = box_10_5_4(&mut kernel);
    assemble_box_net(&mut kernel, solid, &NetParameters::new(0.5)).unwrap();
    assert_eq!(kernel.solid_count(), 1);
}

// ── Prism variant ──────────────────────────────────────────────────────────

#[test]
fn hexagon_prism_net() {
    let mut kernel = PrismKernel::new();
    let solid = kernel.add_prism(hexagon(2.0), 3.0).unwrap();
    let mut sink = RecordingSink::new();
    let request = NetRequest::Prism {
        solid,
        plane: WorkingPlane::xy_at(1.5),
    };
    let net = create_net(&mut kernel, &mut sink, &request, &NetParameters::new(0.25)).unwrap();

    assert_eq!(net.panels.len(), 6);
    for panel in &net.panels {
        assert_abs_diff_eq!(panel.width, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(panel.height, 3.0, epsilon = 1e-12);
    }
    assert_eq!(net.curves.len(), 6 + 7 + 1);
    assert_eq!(sink.polyline_count(), 13);
    assert_eq!(sink.closed_count(), 1);

    let bottom = net.bottom().unwrap();
    assert_eq!(bottom.vertices.len(), 6);
    assert!(bottom.is_convex_xy());
    // Offset outward by the thickness.
    assert!(bottom.perimeter() > 12.0);
    let bb = bottom.bounding_box();
    let strip_end = net.bottom_origin.x;
    assert_abs_diff_eq!(bb.min.x, strip_end + 0.25, epsilon = 1e-9);
    assert_abs_diff_eq!(bb.min.y, 0.25, epsilon = 1e-9);
}

#[test]
fn prism_net_uses_half_depth_teeth() {
    let mut kernel = PrismKernel::new();
    let solid = kernel.add_prism(hexagon(2.0), 3.0).unwrap();
    let net = assemble_prism_net(
        &mut kernel,
        solid,
        &WorkingPlane::xy_at(1.0),
        &NetParameters::new(0.5),
    )
    .unwrap();

    let NetCurve::Seam { joint, .. } = &net.curves[2] else {
        panic!("expected seam 1 at position 2");
    };
    let seam_x = joint.first().unwrap().x;
    let max_dx = joint
        .points
        .iter()
        .map(|p| (p.x - seam_x).abs())
        .fold(0.0, f64::max);
    assert_abs_diff_eq!(max_dx, 0.25, epsilon = 1e-12);
}

#[test]
fn prism_shrink_keeps_nominal_bottom() {
    let mut kernel = PrismKernel::new();
    let solid = kernel.add_prism(hexagon(2.0), 3.0).unwrap();
    let params = NetParameters::new(0.25).with_shrink_to_dimensions(true);
    let net =
        assemble_prism_net(&mut kernel, solid, &WorkingPlane::xy_at(1.0), &params).unwrap();
    assert_abs_diff_eq!(net.bottom().unwrap().perimeter(), 12.0, epsilon = 1e-9);
}

#[test]
fn offset_without_exactly_one_curve_is_geometry_error() {
    for copies in [0, 2] {
        let mut inner = PrismKernel::new();
        let solid = inner.add_prism(hexagon(2.0), 3.0).unwrap();
        let mut query = SplittingOffset { inner, copies };
        let mut sink = RecordingSink::new();
        let request = NetRequest::Prism {
            solid,
            plane: WorkingPlane::xy_at(1.0),
        };

        let result = create_net(&mut query, &mut sink, &request, &NetParameters::new(0.25));
        assert!(
            matches!(result, Err(NetError::Geometry { .. })),
            "copies = {copies}: {result:?}"
        );
        assert!(sink.is_empty());
        assert_eq!(sink.flushes, 0);
    }
}

#[test]
fn curved_slice_is_geometry_error_and_emits_nothing() {
    let mut kernel = PrismKernel::new();
    let solid = kernel.add_cylinder(Point3d::ORIGIN, 2.0, 3.0).unwrap();
    let mut sink = RecordingSink::new();
    let request = NetRequest::Prism {
        solid,
        plane: WorkingPlane::xy_at(1.0),
    };
    let result = create_net(&mut kernel, &mut sink, &request, &NetParameters::new(0.25));
    assert!(matches!(result, Err(NetError::Geometry { .. })));
    assert!(sink.is_empty());
}

#[test]
fn plane_missing_the_solid_is_geometry_error() {
    let mut kernel = PrismKernel::new();
    let solid = kernel.add_prism(hexagon(2.0), 3.0).unwrap();
    let result = assemble_prism_net(
        &mut kernel,
        solid,
        &WorkingPlane::xy_at(10.0),
        &NetParameters::new(0.25),
    );
    assert!(matches!(result, Err(NetError::Geometry { .. })));
}

#[test]
fn tilted_plane_is_geometry_error() {
    let mut kernel = PrismKernel::new();
    let solid = kernel.add_prism(hexagon(2.0), 3.0).unwrap();
    let plane = WorkingPlane::new(Point3d::new(0.0, 0.0, 1.0), Vec3::X);
    let result = assemble_prism_net(&mut kernel, solid, &plane, &NetParameters::new(0.25));
    assert!(matches!(result, Err(NetError::Geometry { .. })));
}

// ── Selection and parameters ───────────────────────────────────────────────

#[test]
fn unknown_solid_is_selection_error() {
    let mut kernel = PrismKernel::new();
    let mut sink = RecordingSink::new();
    let ghost = SolidHandle::from_raw(99);

    for request in [
        NetRequest::Box { solid: ghost },
        NetRequest::Prism {
            solid: ghost,
            plane: WorkingPlane::xy_at(0.0),
        },
    ] {
        let result = create_net(&mut kernel, &mut sink, &request, &NetParameters::new(1.0));
        assert!(matches!(result, Err(NetError::Selection { .. })));
    }
    assert!(sink.is_empty());
}

#[test]
fn invalid_parameters_are_rejected_before_any_output() {
    let mut kernel = PrismKernel::new();
    let solid = box_10_5_4(&mut kernel);
    let mut sink = RecordingSink::new();

    for params in [
        NetParameters::new(0.0),
        NetParameters::new(-1.0),
        NetParameters::new(f64::INFINITY),
        NetParameters::new(1.0).with_pre_shrink(1.5),
        NetParameters::new(1.0).with_pre_shrink(-0.5),
    ] {
        let result = create_net(&mut kernel, &mut sink, &NetRequest::Box { solid }, &params);
        assert!(
            matches!(result, Err(NetError::InvalidParameter { .. })),
            "{params:?}"
        );
    }
    assert!(sink.is_empty());
    assert_eq!(kernel.solid_count(), 1);
}

#[test]
fn too_fine_thickness_fails_without_output() {
    let mut kernel = PrismKernel::new();
    let solid = box_10_5_4(&mut kernel);
    let mut sink = RecordingSink::new();

    for t in [1e-320, 1e-6] {
        let result = create_net(
            &mut kernel,
            &mut sink,
            &NetRequest::Box { solid },
            &NetParameters::new(t),
        );
        assert!(matches!(result, Err(NetError::InvalidParameter { .. })), "t = {t}");
    }
    assert!(sink.is_empty());
}

// ── Finger joint seam direction ────────────────────────────────────────────

#[test]
fn reversed_seam_gives_point_mirrored_pattern() {
    let up = Seam::vertical(3.0, 1.0, 8.0);
    let down = up.reversed();
    let a = generate_finger_joint(&up, 2.0, ToothDepth::Full, SeamMode::Both).unwrap();
    let b = generate_finger_joint(&down, 2.0, ToothDepth::Full, SeamMode::Both).unwrap();

    assert_eq!(a.len(), b.len());
    let mid = up.from.midpoint(&up.to);
    for (p, q) in a.points.iter().zip(&b.points) {
        assert_abs_diff_eq!(q.x, 2.0 * mid.x - p.x, epsilon = 1e-12);
        assert_abs_diff_eq!(q.y, 2.0 * mid.y - p.y, epsilon = 1e-12);
    }
    assert_eq!(b.last().unwrap().y, 1.0);
}
