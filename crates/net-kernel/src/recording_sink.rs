use crate::traits::OutputSink;
use crate::types::*;

/// Output sink that keeps every emitted curve in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub curves: Vec<EmittedCurve>,
    pub flushes: usize,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn polyline_count(&self) -> usize {
        self.curves
            .iter()
            .filter(|c| matches!(c, EmittedCurve::Polyline { .. }))
            .count()
    }

    pub fn closed_count(&self) -> usize {
        self.curves
            .iter()
            .filter(|c| matches!(c, EmittedCurve::Closed { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty() && self.flushes == 0
    }
}

impl OutputSink for RecordingSink {
    fn emit_polyline(&mut self, points: &[Point3d]) {
        self.curves.push(EmittedCurve::Polyline {
            points: points.to_vec(),
        });
    }

    fn emit_curve(&mut self, curve: &ClosedCurve) {
        self.curves.push(EmittedCurve::Closed {
            curve: curve.clone(),
        });
    }

    fn flush(&mut self) {
        self.flushes += 1;
    }
}
