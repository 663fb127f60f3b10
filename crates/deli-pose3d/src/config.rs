use crate::error::DecodeError;
use crate::skeleton::BODY_PART_COUNT;
use serde::{Deserialize, Serialize};

/// Depth bins per joint in the lightweight baseline 3D model.
pub const DEFAULT_DEPTH: usize = 32;

/// Configuration for heatmap decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// Depth bins per keypoint, used to split the `K·D` channel axis of a
    /// rank-4 output.
    depth: usize,
    /// Keypoint count the skeleton expects. `None` skips the check.
    expected_keypoints: Option<usize>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            expected_keypoints: Some(BODY_PART_COUNT),
        }
    }
}

impl DecoderConfig {
    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, DecodeError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DecodeError::InvalidConfig(e.to_string()))?;
        if config.depth == 0 {
            return Err(DecodeError::InvalidConfig(
                "depth must be positive".to_string(),
            ));
        }
        Ok(config)
    }

    /// Set the number of depth bins per keypoint.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Set the keypoint count the skeleton expects (`None` to accept any).
    pub fn with_expected_keypoints(mut self, expected: Option<usize>) -> Self {
        self.expected_keypoints = expected;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn expected_keypoints(&self) -> Option<usize> {
        self.expected_keypoints
    }
}
