pub mod config;
pub mod decoder;
pub mod error;
pub mod estimator;
pub mod expectation;
pub mod marginal;
pub mod session;
pub mod skeleton;
pub mod softmax;
pub mod types;
pub mod volume;

pub use config::DecoderConfig;
pub use decoder::{decode_human3d, decode_tensor, soft_argmax_3d};
pub use error::{DecodeError, InferError};
pub use estimator::Baseline3dPoseEstimator;
pub use marginal::Axis;
pub use session::Session;
pub use skeleton::{BodyPart, BASELINE_PAIR, BODY_PART_COUNT, SKELETON_EDGES};
pub use types::{Human3D, Keypoint3D, Line3D};
pub use volume::HeatmapVolume;
