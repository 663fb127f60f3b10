use crate::config::DecoderConfig;
use crate::error::DecodeError;
use crate::expectation::decode_axis;
use crate::marginal::{marginalize, Axis};
use crate::skeleton::build_human;
use crate::softmax::softmax_channels;
use crate::types::{Human3D, Keypoint3D};
use crate::volume::HeatmapVolume;
use deli_base::Tensor;

/// Soft-argmax over every keypoint of a heatmap volume.
///
/// Normalizes each keypoint's sub-volume in place, reduces it to width,
/// height and depth marginals, and returns the normalized expectation along
/// each as `(x, y, z)`. The volume holds probabilities afterwards.
pub fn soft_argmax_3d(volume: &mut HeatmapVolume) -> Result<Vec<Keypoint3D>, DecodeError> {
    softmax_channels(volume)?;

    let xs = decode_axis(&marginalize(volume, Axis::Width), volume.width())?;
    let ys = decode_axis(&marginalize(volume, Axis::Height), volume.height())?;
    let zs = decode_axis(&marginalize(volume, Axis::Depth), volume.depth())?;

    Ok(xs
        .into_iter()
        .zip(ys)
        .zip(zs)
        .map(|((x, y), z)| Keypoint3D::new(x, y, z))
        .collect())
}

/// Decode a raw `[1, K·D, H, W]` network output into a [`Human3D`].
///
/// `data` is consumed in place: on return (success or failure) it holds
/// partially or fully normalized heatmaps and should be discarded.
pub fn decode_human3d(
    data: &mut [f32],
    shape: &[usize],
    config: &DecoderConfig,
) -> Result<Human3D, DecodeError> {
    let mut volume = HeatmapVolume::new(data, shape, config.depth())?;

    if let Some(expected) = config.expected_keypoints() {
        if volume.keypoints() != expected {
            return Err(DecodeError::ShapeMismatch(format!(
                "expected {expected} keypoints, volume has {}",
                volume.keypoints()
            )));
        }
    }

    log::debug!(
        "decoding heatmap volume {:?} (declared {:?})",
        volume.shape(),
        shape
    );

    let keypoints = soft_argmax_3d(&mut volume)?;
    let human = build_human(keypoints);

    log::debug!(
        "decoded {} keypoints, {} skeleton lines",
        human.keypoints.len(),
        human.lines.len()
    );
    Ok(human)
}

/// Owning variant of [`decode_human3d`].
pub fn decode_tensor(mut tensor: Tensor<f32>, config: &DecoderConfig) -> Result<Human3D, DecodeError> {
    decode_human3d(&mut tensor.data, &tensor.shape, config)
}
