use net_kernel::{BoundaryQuery, OutputSink, SolidHandle};
use net_types::{NetParameters, WorkingPlane};
use tracing::{debug, info, instrument};

use crate::bottom::{box_bottom_panel, polygon_bottom_panel};
use crate::extent::{extract_box_extent, extract_cross_section};
use crate::finger::{generate_finger_joint, ToothDepth};
use crate::layout::{layout_box_panels, layout_polygon_panels, PanelStrip};
use crate::types::{Net, NetCurve, NetError, NetSource};

/// Which kind of net to build for a solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NetRequest {
    /// Four side panels from the axis-aligned bounding box.
    Box { solid: SolidHandle },
    /// One side panel per edge of the slice through `plane`.
    Prism {
        solid: SolidHandle,
        plane: WorkingPlane,
    },
}

/// Reject parameters the pipeline cannot work with.
pub fn validate_parameters(params: &NetParameters) -> Result<(), NetError> {
    if !(params.thickness > 0.0) || !params.thickness.is_finite() {
        return Err(NetError::invalid(format!(
            "thickness must be positive, got {}",
            params.thickness
        )));
    }
    if !(0.0..=1.0).contains(&params.pre_shrink) {
        return Err(NetError::invalid(format!(
            "pre-shrink must be within [0, 1], got {}",
            params.pre_shrink
        )));
    }
    Ok(())
}

/// Apply pre-shrink, returning the solid to extract from.
fn prepare_solid(
    query: &mut dyn BoundaryQuery,
    solid: SolidHandle,
    params: &NetParameters,
) -> Result<SolidHandle, NetError> {
    if !params.pre_shrink_enabled() {
        return Ok(solid);
    }
    let center = query.bounding_box(solid)?.center();
    let scaled = query.scale_about_point(solid, center, params.pre_shrink)?;
    debug!(factor = params.pre_shrink, "pre-shrink applied");
    Ok(scaled)
}

/// Build the box net: four full-depth-fingered side panels and a
/// rectangular bottom.
#[instrument(skip(query))]
pub fn assemble_box_net(
    query: &mut dyn BoundaryQuery,
    solid: SolidHandle,
    params: &NetParameters,
) -> Result<Net, NetError> {
    validate_parameters(params)?;
    let solid = prepare_solid(query, solid, params)?;
    let extent = extract_box_extent(&*query, solid)?;

    let strip = layout_box_panels(&extent, params.signed_thickness())?;
    let mut curves = strip_curves(&strip, params.thickness, ToothDepth::Full)?;
    let bottom = box_bottom_panel(&extent, params, strip.bottom_origin);
    curves.push(NetCurve::Bottom { curve: bottom });

    info!(
        width = extent.width,
        height = extent.height,
        depth = extent.depth,
        curves = curves.len(),
        "box net assembled"
    );
    Ok(Net {
        source: NetSource::Box { extent },
        panels: strip.panels,
        bottom_origin: strip.bottom_origin,
        curves,
    })
}

/// Build the prism net: one half-depth-fingered side panel per cross-section
/// edge and the (offset) cross-section as bottom.
#[instrument(skip(query))]
pub fn assemble_prism_net(
    query: &mut dyn BoundaryQuery,
    solid: SolidHandle,
    plane: &WorkingPlane,
    params: &NetParameters,
) -> Result<Net, NetError> {
    validate_parameters(params)?;
    let solid = prepare_solid(query, solid, params)?;
    let (cross_section, depth) = extract_cross_section(&*query, solid, plane)?;

    let strip = layout_polygon_panels(&cross_section, depth, params.signed_thickness())?;
    let mut curves = strip_curves(&strip, params.thickness, ToothDepth::Half)?;
    let bottom = polygon_bottom_panel(&*query, &cross_section, params, strip.bottom_origin)?;
    curves.push(NetCurve::Bottom { curve: bottom });

    info!(
        panels = strip.panels.len(),
        depth,
        curves = curves.len(),
        "prism net assembled"
    );
    Ok(Net {
        source: NetSource::Prism {
            cross_section,
            depth,
        },
        panels: strip.panels,
        bottom_origin: strip.bottom_origin,
        curves,
    })
}

/// Dispatch on the request kind.
pub fn assemble_net(
    query: &mut dyn BoundaryQuery,
    request: &NetRequest,
    params: &NetParameters,
) -> Result<Net, NetError> {
    match request {
        NetRequest::Box { solid } => assemble_box_net(query, *solid, params),
        NetRequest::Prism { solid, plane } => assemble_prism_net(query, *solid, plane, params),
    }
}

/// Seam and outline curves of a strip in left-to-right order: each panel's
/// leading seam then its outline, then the trailing seam.
fn strip_curves(
    strip: &PanelStrip,
    thickness: f64,
    depth: ToothDepth,
) -> Result<Vec<NetCurve>, NetError> {
    let seams = strip.seams();
    let mut curves = Vec::with_capacity(seams.len() + strip.panels.len() + 1);
    for strip_seam in seams {
        let joint = generate_finger_joint(&strip_seam.seam, thickness, depth, strip_seam.mode)?;
        curves.push(NetCurve::Seam {
            index: strip_seam.index,
            joint,
        });
        if let Some(panel) = strip.panels.get(strip_seam.index) {
            curves.push(NetCurve::PanelOutline {
                index: strip_seam.index,
                outline: panel.outline().to_polyline(),
            });
        }
    }
    Ok(curves)
}

/// Write every curve of `net` to `sink`, then flush.
pub fn emit_net(net: &Net, sink: &mut dyn OutputSink) {
    for curve in &net.curves {
        match curve {
            NetCurve::PanelOutline { outline, .. } => sink.emit_polyline(&outline.points),
            NetCurve::Seam { joint, .. } => sink.emit_polyline(&joint.points),
            NetCurve::Bottom { curve } => sink.emit_curve(curve),
        }
    }
    sink.flush();
}

/// Assemble and emit a net. Nothing reaches the sink unless assembly
/// succeeds as a whole.
pub fn create_net(
    query: &mut dyn BoundaryQuery,
    sink: &mut dyn OutputSink,
    request: &NetRequest,
    params: &NetParameters,
) -> Result<Net, NetError> {
    let net = assemble_net(query, request, params)?;
    emit_net(&net, sink);
    Ok(net)
}
