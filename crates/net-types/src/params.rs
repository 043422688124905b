use serde::{Deserialize, Serialize};

/// Options for one net-generation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetParameters {
    /// Sheet thickness. Used as finger pitch, inter-panel gap and panel margin.
    pub thickness: f64,
    /// Uniform scale applied to the solid before netting. 0 disables it.
    #[serde(default)]
    pub pre_shrink: f64,
    /// Match the inner void to nominal dimensions instead of the outer envelope.
    #[serde(default)]
    pub shrink_to_dimensions: bool,
}

impl NetParameters {
    pub fn new(thickness: f64) -> Self {
        Self {
            thickness,
            pre_shrink: 0.0,
            shrink_to_dimensions: false,
        }
    }

    pub fn with_pre_shrink(mut self, factor: f64) -> Self {
        self.pre_shrink = factor;
        self
    }

    pub fn with_shrink_to_dimensions(mut self, enabled: bool) -> Self {
        self.shrink_to_dimensions = enabled;
        self
    }

    /// Thickness with the shrink-to-dimensions sign applied.
    pub fn signed_thickness(&self) -> f64 {
        if self.shrink_to_dimensions {
            -self.thickness
        } else {
            self.thickness
        }
    }

    pub fn pre_shrink_enabled(&self) -> bool {
        self.pre_shrink != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_thickness_flips_in_shrink_mode() {
        let params = NetParameters::new(0.317);
        assert_eq!(params.signed_thickness(), 0.317);
        assert_eq!(
            params.with_shrink_to_dimensions(true).signed_thickness(),
            -0.317
        );
    }

    #[test]
    fn test_optional_fields_default_when_missing() {
        let params: NetParameters = serde_json::from_str(r#"{"thickness": 3.0}"#).unwrap();
        assert_eq!(params, NetParameters::new(3.0));
        assert!(!params.pre_shrink_enabled());
    }
}
