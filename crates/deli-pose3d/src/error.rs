use deli_base::TensorError;
use std::fmt;

/// Failure of a heatmap decode. No partial result is produced on any of these.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Shape does not factor consistently with the buffer, an axis is zero,
    /// or the channel count is not divisible by the depth.
    ShapeMismatch(String),
    /// NaN or infinite value in a keypoint's sub-volume before softmax.
    NonFiniteValue { keypoint: usize, index: usize, value: f32 },
    /// Zero-length tensor or zero keypoints.
    EmptyInput(String),
    /// Decoder configuration could not be parsed or is out of range.
    InvalidConfig(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::ShapeMismatch(msg) => write!(f, "shape mismatch: {msg}"),
            DecodeError::NonFiniteValue { keypoint, index, value } => write!(
                f,
                "non-finite value {value} at index {index} of keypoint {keypoint}"
            ),
            DecodeError::EmptyInput(msg) => write!(f, "empty input: {msg}"),
            DecodeError::InvalidConfig(msg) => write!(f, "invalid decoder config: {msg}"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<TensorError> for DecodeError {
    fn from(err: TensorError) -> Self {
        match err {
            TensorError::ShapeMismatch { got: 0, .. } => {
                DecodeError::EmptyInput("tensor has no elements".to_string())
            }
            other => DecodeError::ShapeMismatch(other.to_string()),
        }
    }
}

/// Failure of a full estimate: model execution or decoding.
#[derive(Debug)]
pub enum InferError {
    ShapeMismatch { expected: String, got: String },
    Session(String),
    MissingOutput,
    Decode(DecodeError),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "input shape mismatch: expected {expected}, got {got}")
            }
            InferError::Session(msg) => write!(f, "session error: {msg}"),
            InferError::MissingOutput => write!(f, "model produced no outputs"),
            InferError::Decode(err) => write!(f, "decode error: {err}"),
        }
    }
}

impl std::error::Error for InferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InferError::Decode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DecodeError> for InferError {
    fn from(err: DecodeError) -> Self {
        InferError::Decode(err)
    }
}
