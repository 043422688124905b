//! SVG output sink for cut sheets.

use std::fmt::Write as _;

use net_kernel::OutputSink;
use net_types::{BoundingBox, ClosedCurve, Point3d};

/// Margin around the drawing, in drawing units.
const PADDING: f64 = 1.0;

/// Collects emitted curves as SVG paths.
///
/// Coordinates are written in drawing units with Y negated, so the net
/// reads upright in a viewer.
#[derive(Debug, Clone)]
pub struct SvgSink {
    title: String,
    paths: Vec<String>,
    bounds: BoundingBox,
    flushes: usize,
}

impl SvgSink {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            paths: Vec::new(),
            bounds: BoundingBox::empty(),
            flushes: 0,
        }
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Number of completed batches received.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    fn push_path(&mut self, points: &[Point3d], closed: bool) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut d = format!("M{:.4},{:.4}", first.x, flip(first.y));
        for p in rest {
            let _ = write!(d, " L{:.4},{:.4}", p.x, flip(p.y));
        }
        if closed {
            d.push_str(" Z");
        }
        for p in points {
            self.bounds.expand_to_include(p);
        }
        self.paths.push(d);
    }

    /// Render the collected paths as a standalone SVG document.
    pub fn finish(&self) -> String {
        let (x, y, w, h) = if self.bounds.is_empty() {
            (0.0, 0.0, 1.0, 1.0)
        } else {
            let size = self.bounds.size();
            (
                self.bounds.min.x - PADDING,
                -self.bounds.max.y - PADDING,
                size.x + 2.0 * PADDING,
                size.y + 2.0 * PADDING,
            )
        };

        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{x:.4} {y:.4} {w:.4} {h:.4}\" \
             width=\"{w:.4}mm\" height=\"{h:.4}mm\">\n  <title>{}</title>\n",
            escape(&self.title)
        );
        svg.push_str(
            "  <g fill=\"none\" stroke=\"#ff0000\" stroke-width=\"0.1\" \
             stroke-linejoin=\"round\">\n",
        );
        for d in &self.paths {
            let _ = writeln!(svg, "    <path d=\"{d}\"/>");
        }
        svg.push_str("  </g>\n</svg>\n");
        svg
    }
}

impl OutputSink for SvgSink {
    fn emit_polyline(&mut self, points: &[Point3d]) {
        self.push_path(points, false);
    }

    fn emit_curve(&mut self, curve: &ClosedCurve) {
        self.push_path(&curve.vertices, true);
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}

/// Negate Y without producing `-0`.
fn flip(y: f64) -> f64 {
    0.0 - y
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
