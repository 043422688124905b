//! Batch job files: a parameter set plus the solids to build nets for.

use std::collections::HashSet;

use net_kernel::PrismKernel;
use net_ops::{assemble_net, NetError, NetRequest};
use net_types::{ClosedCurve, NetParameters, Point3d, WorkingPlane};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::errors::{ExportError, LoadError};
use crate::load::check_header;
use crate::save::NamedNet;

/// Format identifier of job files.
pub const JOB_FORMAT: &str = "finger-net-job";

/// Current job file format version.
pub const JOB_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetJob {
    pub format: String,
    pub version: u32,
    pub parameters: NetParameters,
    pub solids: Vec<SolidSpec>,
}

/// One named solid of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolidSpec {
    pub name: String,
    pub shape: ShapeSpec,
    /// Height of the slicing plane for prisms. Defaults to mid-height.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice_z: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeSpec {
    /// Axis-aligned box between two corners; netted as a box.
    Box { min: [f64; 3], max: [f64; 3] },
    /// Polygon at `base_z` extruded up by `height`; netted from its slice.
    Prism {
        polygon: Vec<[f64; 2]>,
        base_z: f64,
        height: f64,
    },
}

impl NetJob {
    pub fn new(parameters: NetParameters, solids: Vec<SolidSpec>) -> Self {
        Self {
            format: JOB_FORMAT.to_string(),
            version: JOB_VERSION,
            parameters,
            solids,
        }
    }
}

impl SolidSpec {
    fn invalid(&self, reason: impl Into<String>) -> LoadError {
        LoadError::InvalidSolid {
            name: self.name.clone(),
            reason: reason.into(),
        }
    }

    fn validate(&self) -> Result<(), LoadError> {
        if self.name.trim().is_empty() {
            return Err(self.invalid("name must not be empty"));
        }
        // Names become output file stems.
        if self.name.contains(|c: char| c == '/' || c == '\\') || self.name.contains("..") {
            return Err(self.invalid("name must not contain path separators or '..'"));
        }
        match &self.shape {
            ShapeSpec::Box { min, max } => {
                if min.iter().chain(max).any(|v| !v.is_finite()) {
                    return Err(self.invalid("box corners must be finite"));
                }
            }
            ShapeSpec::Prism {
                polygon,
                base_z,
                height,
            } => {
                if polygon.len() < 3 {
                    return Err(self.invalid(format!(
                        "prism polygon has {} points, need at least 3",
                        polygon.len()
                    )));
                }
                if polygon.iter().flatten().any(|v| !v.is_finite()) || !base_z.is_finite() {
                    return Err(self.invalid("prism coordinates must be finite"));
                }
                if !(*height > 0.0) {
                    return Err(self.invalid(format!("prism height must be positive, got {height}")));
                }
            }
        }
        Ok(())
    }

    /// Add this solid to `kernel` and describe the net to build for it.
    pub fn add_to(&self, kernel: &mut PrismKernel) -> Result<NetRequest, NetError> {
        match &self.shape {
            ShapeSpec::Box { min, max } => {
                let solid = kernel.add_box(Point3d::from_array(*min), Point3d::from_array(*max));
                Ok(NetRequest::Box { solid })
            }
            ShapeSpec::Prism {
                polygon,
                base_z,
                height,
            } => {
                let base = ClosedCurve::new(
                    polygon
                        .iter()
                        .map(|[x, y]| Point3d::new(*x, *y, *base_z))
                        .collect(),
                );
                let solid = kernel.add_prism(base, *height)?;
                let z = self.slice_z.unwrap_or(base_z + height / 2.0);
                Ok(NetRequest::Prism {
                    solid,
                    plane: WorkingPlane::xy_at(z),
                })
            }
        }
    }
}

/// Deserialize and validate a job from a JSON string.
pub fn load_job(json: &str) -> Result<NetJob, LoadError> {
    check_header(json, JOB_FORMAT, JOB_VERSION)?;
    let job: NetJob =
        serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;

    let mut seen = HashSet::new();
    for solid in &job.solids {
        solid.validate()?;
        if !seen.insert(solid.name.as_str()) {
            return Err(solid.invalid("duplicate solid name"));
        }
    }
    Ok(job)
}

/// Build a net for every solid of `job`. Fails on the first solid that
/// cannot be netted, so a caller emits either all nets or none.
#[instrument(skip(job, kernel), fields(solids = job.solids.len()))]
pub fn run_job(job: &NetJob, kernel: &mut PrismKernel) -> Result<Vec<NamedNet>, ExportError> {
    if job.solids.is_empty() {
        return Err(ExportError::NoSolids);
    }

    let mut nets = Vec::with_capacity(job.solids.len());
    for spec in &job.solids {
        let wrap = |source: NetError| ExportError::Net {
            name: spec.name.clone(),
            source,
        };
        let request = spec.add_to(kernel).map_err(wrap)?;
        let net = assemble_net(kernel, &request, &job.parameters).map_err(wrap)?;
        nets.push(NamedNet {
            name: spec.name.clone(),
            net,
        });
    }
    info!(nets = nets.len(), "job complete");
    Ok(nets)
}
