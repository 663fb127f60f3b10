use crate::config::DecoderConfig;
use crate::decoder::decode_tensor;
use crate::skeleton::BodyPart;
use crate::types::Human3D;
use crate::{InferError, Session};
use deli_base::Tensor;

/// Model input width in pixels
pub const INPUT_WIDTH: usize = 256;
/// Model input height in pixels
pub const INPUT_HEIGHT: usize = 256;
/// Width, height and depth of each joint's output heatmap
pub const HEATMAP_SIZE: usize = 32;

/// Single-person 3D pose estimation on top of the lightweight baseline model
///
/// Runs the session on a preprocessed `[1, 3, 256, 256]` crop and decodes
/// its `[1, 21·32, 32, 32]` heatmap output into a [`Human3D`]. Cropping,
/// resizing and normalization of the input are the caller's job.
pub struct Baseline3dPoseEstimator {
    session: Box<dyn Session>,
    config: DecoderConfig,
    last_output: Option<Tensor<f32>>,
}

impl Baseline3dPoseEstimator {
    /// Create an estimator around a loaded model session
    pub fn new(session: Box<dyn Session>) -> Self {
        Self {
            session,
            config: DecoderConfig::default().with_depth(HEATMAP_SIZE),
            last_output: None,
        }
    }

    /// Replace the decoder configuration (builder pattern)
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Run the model and decode its output
    ///
    /// # Arguments
    /// * `input` - Preprocessed image tensor, shape [1, 3, 256, 256] (BCHW)
    pub fn estimate(&mut self, input: Tensor<f32>) -> Result<Human3D, InferError> {
        let expected = [1, 3, INPUT_HEIGHT, INPUT_WIDTH];
        if input.shape != expected {
            return Err(InferError::ShapeMismatch {
                expected: format!("{:?}", expected),
                got: format!("{:?}", input.shape),
            });
        }

        self.last_output = None;

        let input_name = self
            .session
            .input_names()
            .first()
            .ok_or_else(|| InferError::Session("model has no inputs".to_string()))?
            .clone();

        let mut outputs = self.session.run(&[(input_name.as_str(), input)])?;

        // Prefer the first declared output; fall back to whatever came back.
        let output = self
            .session
            .output_names()
            .first()
            .and_then(|name| outputs.remove(name))
            .or_else(|| outputs.into_values().next())
            .ok_or(InferError::MissingOutput)?;

        self.last_output = Some(output.clone());

        decode_tensor(output, &self.config).map_err(|err| {
            log::warn!("heatmap decode failed: {}", err);
            InferError::from(err)
        })
    }

    /// Decode the raw output of the last successful model run again
    ///
    /// Returns `None` if no model run has completed yet.
    pub fn decode_last_output(&self) -> Option<Result<Human3D, InferError>> {
        let output = self.last_output.clone()?;
        Some(decode_tensor(output, &self.config).map_err(InferError::from))
    }

    /// Joint labels in keypoint order
    pub fn part_names(&self) -> Vec<&'static str> {
        BodyPart::ALL.iter().map(|part| part.name()).collect()
    }

    /// Named part-affinity pairs; this model has none
    pub fn pair_names(&self) -> Option<Vec<&'static str>> {
        None
    }
}
