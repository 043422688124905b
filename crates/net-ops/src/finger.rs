//! Finger-joint generation along a vertical seam.
//!
//! A seam is walked from `from` to `to` in steps of one pitch. Every step is
//! a tooth: a lateral excursion away from the seam line, a run along it and
//! a return. Tooth `n` goes to the right of the travel direction when `n` is
//! even and to the left when it is odd. When a full tooth no longer fits,
//! one truncated tooth covers the remaining slack so the polyline ends
//! exactly on `to`.

use net_types::{Point3d, Polyline, Seam};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::types::NetError;

/// Relative slack (in pitches) below which a seam counts as an exact
/// multiple of the pitch.
const FIT_TOL: f64 = 1e-9;

/// Upper bound on teeth per seam. Finer pitches are rejected rather than
/// walked.
pub const MAX_TEETH: f64 = 100_000.0;

/// Seams must be vertical to within this many units.
const VERTICAL_TOL: f64 = 1e-9;

/// Lateral size of a tooth relative to the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToothDepth {
    /// `pitch / 2` each side.
    Half,
    /// `pitch` each side.
    Full,
}

impl ToothDepth {
    pub fn excursion(self, pitch: f64) -> f64 {
        match self {
            ToothDepth::Half => pitch / 2.0,
            ToothDepth::Full => pitch,
        }
    }
}

/// Which excursions are drawn. Single-sided modes finish free panel edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeamMode {
    Both,
    /// Keep excursions to the left of travel only.
    LeftOnly,
    /// Keep excursions to the right of travel only.
    RightOnly,
}

impl SeamMode {
    fn keeps(self, direction: f64) -> bool {
        match self {
            SeamMode::Both => true,
            SeamMode::LeftOnly => direction < 0.0,
            SeamMode::RightOnly => direction > 0.0,
        }
    }
}

/// One tooth, measured as distance along the seam from its start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tooth {
    pub index: usize,
    /// `+1.0` to the right of travel, `-1.0` to the left.
    pub direction: f64,
    pub start: f64,
    pub end: f64,
    pub truncated: bool,
}

impl Tooth {
    pub fn run(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToothState {
    /// Emitting full teeth while the next one fits.
    Advancing { index: usize },
    /// Slack remains after the last full tooth.
    Finishing { index: usize },
    Done,
}

/// Restartable sequence of the teeth covering a seam of a given length.
#[derive(Debug, Clone)]
pub struct Teeth {
    length: f64,
    pitch: f64,
    full_teeth: usize,
    truncated: bool,
    state: ToothState,
}

impl Teeth {
    pub fn new(length: f64, pitch: f64) -> Result<Self, NetError> {
        if !(pitch > 0.0) || !pitch.is_finite() {
            return Err(NetError::invalid(format!(
                "finger thickness must be positive, got {pitch}"
            )));
        }
        if !(length > 0.0) || !length.is_finite() {
            return Err(NetError::invalid(format!(
                "seam length must be positive, got {length}"
            )));
        }

        let ratio = length / pitch;
        if !ratio.is_finite() || ratio > MAX_TEETH {
            return Err(NetError::invalid(format!(
                "finger thickness {pitch} is too fine for a seam of length {length} \
                 (more than {MAX_TEETH} teeth)"
            )));
        }
        let mut full = ratio.floor();
        if ratio - full > 1.0 - FIT_TOL {
            full += 1.0;
        }
        let slack = length - full * pitch;
        let truncated = full == 0.0 || slack > pitch * FIT_TOL;

        Ok(Self {
            length,
            pitch,
            full_teeth: full as usize,
            truncated,
            state: ToothState::Advancing { index: 0 },
        })
    }

    fn direction(index: usize) -> f64 {
        if index % 2 == 0 {
            1.0
        } else {
            -1.0
        }
    }

    fn full_tooth(&self, index: usize) -> Tooth {
        let last = index + 1 == self.full_teeth && !self.truncated;
        Tooth {
            index,
            direction: Self::direction(index),
            start: index as f64 * self.pitch,
            end: if last {
                self.length
            } else {
                (index + 1) as f64 * self.pitch
            },
            truncated: false,
        }
    }

    fn truncated_tooth(&self, index: usize) -> Tooth {
        Tooth {
            index,
            direction: Self::direction(index),
            start: index as f64 * self.pitch,
            end: self.length,
            truncated: true,
        }
    }
}

impl Iterator for Teeth {
    type Item = Tooth;

    fn next(&mut self) -> Option<Tooth> {
        loop {
            match self.state {
                ToothState::Advancing { index } => {
                    // Fit predicate: start + pitch <= length.
                    if index < self.full_teeth {
                        self.state = ToothState::Advancing { index: index + 1 };
                        return Some(self.full_tooth(index));
                    }
                    self.state = if self.truncated {
                        ToothState::Finishing { index }
                    } else {
                        ToothState::Done
                    };
                }
                ToothState::Finishing { index } => {
                    self.state = ToothState::Done;
                    return Some(self.truncated_tooth(index));
                }
                ToothState::Done => return None,
            }
        }
    }
}

/// Build the finger-joint polyline for `seam` with tooth pitch `thickness`.
///
/// The first point is `seam.from` and the last is exactly `seam.to`. With
/// `SeamMode::Both` the polyline has `1 + 3 * teeth` vertices. Reversing the
/// seam gives the point-mirrored pattern.
#[instrument(skip(seam), fields(x = seam.from.x, from = seam.from.y, to = seam.to.y))]
pub fn generate_finger_joint(
    seam: &Seam,
    thickness: f64,
    depth: ToothDepth,
    mode: SeamMode,
) -> Result<Polyline, NetError> {
    if !seam.from.is_finite() || !seam.to.is_finite() {
        return Err(NetError::invalid("seam endpoints must be finite"));
    }
    if !seam.is_vertical(VERTICAL_TOL) {
        return Err(NetError::invalid(format!(
            "seam must be vertical, got x {} -> {}",
            seam.from.x, seam.to.x
        )));
    }

    let rise = seam.rise();
    let length = rise.abs();
    let teeth = Teeth::new(length, thickness)?;
    let travel = rise.signum();
    let excursion = depth.excursion(thickness);
    let x0 = seam.from.x;
    let z = seam.from.z;

    // The last tooth ends at exactly `length`; pin it to `to` so no
    // accumulated error leaks into the final vertex.
    let y_at = |dist: f64| -> f64 {
        if dist == length {
            seam.to.y
        } else {
            seam.from.y + travel * dist
        }
    };

    let mut points = vec![seam.from];
    let mut count = 0usize;
    for tooth in teeth {
        let lateral = if mode.keeps(tooth.direction) {
            travel * tooth.direction * excursion
        } else {
            0.0
        };
        let x = x0 + lateral;
        let y_start = y_at(tooth.start);
        let y_end = y_at(tooth.end);

        push_unique(&mut points, Point3d::new(x, y_start, z));
        push_unique(&mut points, Point3d::new(x, y_end, z));
        push_unique(&mut points, Point3d::new(x0, y_end, z));
        count += 1;
    }

    debug!(teeth = count, vertices = points.len(), "finger joint");
    Ok(Polyline::new(points))
}

fn push_unique(points: &mut Vec<Point3d>, point: Point3d) {
    if points.last() != Some(&point) {
        points.push(point);
    }
}
