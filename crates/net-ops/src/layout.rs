//! Side-panel layout along the X axis of the working plane.
//!
//! Panels are placed left to right with a gap of `|thickness|` between
//! neighbours. Each panel records the signed thickness as its margin; the
//! seam on its leading edge sits at `origin.x - margin / 2`, so by default
//! the seam runs down the middle of the gap, and in shrink-to-dimensions
//! mode it moves half a thickness into the panel.

use net_types::{CrossSection, Extent, Panel, Point3d, Seam};
use tracing::{debug, instrument};

use crate::finger::SeamMode;
use crate::types::NetError;

/// Panels of one net laid out as an open strip.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelStrip {
    pub panels: Vec<Panel>,
    /// Right-most bottom corner reached by the strip.
    pub bottom_origin: Point3d,
}

/// A seam of the strip together with how its teeth are drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripSeam {
    /// Seam `i` leads panel `i`; the last one trails the last panel.
    pub index: usize,
    pub seam: Seam,
    pub mode: SeamMode,
}

impl PanelStrip {
    /// Seams of the strip: a free leading seam, one per gap, and a free
    /// trailing seam. The two free seams together stand in for the seam that
    /// closes the loop from the last panel back to the first, so each is
    /// single-sided with its teeth toward the panel it finishes.
    pub fn seams(&self) -> Vec<StripSeam> {
        let Some(last) = self.panels.last() else {
            return Vec::new();
        };
        let count = self.panels.len();

        let mut seams: Vec<StripSeam> = self
            .panels
            .iter()
            .enumerate()
            .map(|(index, panel)| StripSeam {
                index,
                seam: Seam::vertical(
                    panel.leading_seam_x(),
                    panel.origin.y,
                    panel.origin.y + panel.height,
                ),
                mode: if index == 0 {
                    SeamMode::RightOnly
                } else {
                    SeamMode::Both
                },
            })
            .collect();

        seams.push(StripSeam {
            index: count,
            seam: Seam::vertical(
                last.trailing_seam_x(),
                last.origin.y,
                last.origin.y + last.height,
            ),
            mode: SeamMode::LeftOnly,
        });
        seams
    }
}

/// Lay out the four vertical faces of a box: widths `width, depth, width,
/// depth`, all `height` tall, first panel at X = 0.
#[instrument]
pub fn layout_box_panels(extent: &Extent, thickness: f64) -> Result<PanelStrip, NetError> {
    if extent.is_degenerate() {
        return Err(NetError::invalid(format!(
            "box extent must be positive in every direction, got {} x {} x {}",
            extent.width, extent.height, extent.depth
        )));
    }
    let widths = [extent.width, extent.depth, extent.width, extent.depth];
    lay_out_strip(&widths, extent.height, thickness)
}

/// Lay out one panel per cross-section segment, in traversal order, each
/// `depth` tall. `thickness` may be negative for shrink-to-dimensions.
#[instrument(skip(cross_section), fields(segments = cross_section.segment_count()))]
pub fn layout_polygon_panels(
    cross_section: &CrossSection,
    depth: f64,
    thickness: f64,
) -> Result<PanelStrip, NetError> {
    if !(depth > 0.0) || !depth.is_finite() {
        return Err(NetError::invalid(format!(
            "prism depth must be positive, got {depth}"
        )));
    }
    lay_out_strip(cross_section.lengths(), depth, thickness)
}

fn lay_out_strip(widths: &[f64], height: f64, thickness: f64) -> Result<PanelStrip, NetError> {
    if thickness == 0.0 || !thickness.is_finite() {
        return Err(NetError::invalid(format!(
            "panel margin must be non-zero, got {thickness}"
        )));
    }
    if widths.is_empty() {
        return Err(NetError::invalid("no panels to lay out"));
    }

    let gap = thickness.abs();
    let mut cursor = 0.0;
    let panels: Vec<Panel> = widths
        .iter()
        .enumerate()
        .map(|(i, &width)| {
            if i > 0 {
                cursor += gap;
            }
            let panel = Panel {
                origin: Point3d::xy(cursor, 0.0),
                width,
                height,
                margin: thickness,
            };
            cursor += width;
            panel
        })
        .collect();

    let bottom_origin = Point3d::xy(cursor, 0.0);
    debug!(panels = panels.len(), right = cursor, "strip laid out");
    Ok(PanelStrip {
        panels,
        bottom_origin,
    })
}
