use crate::error::DecodeError;
use crate::volume::HeatmapVolume;

/// Position and value of the first non-finite element found by [`softmax_in_place`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NonFinite {
    pub index: usize,
    pub value: f32,
}

/// Numerically stable softmax, written back into `values`.
///
/// Shifts by the maximum before exponentiating. Exponentials are summed in
/// f64 in index order so results are reproducible for large volumes. A
/// constant input becomes the uniform distribution `1/N`; an empty slice is
/// left untouched. Any NaN or infinity rejects the whole slice unmodified.
pub fn softmax_in_place(values: &mut [f32]) -> Result<(), NonFinite> {
    if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(NonFinite { index, value });
    }
    if values.is_empty() {
        return Ok(());
    }

    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);

    let mut sum = 0.0f64;
    for v in values.iter_mut() {
        *v = (*v - max).exp();
        sum += *v as f64;
    }

    // The max element contributes exp(0) = 1, so sum >= 1.
    for v in values.iter_mut() {
        *v = (*v as f64 / sum) as f32;
    }
    Ok(())
}

/// Apply [`softmax_in_place`] to every keypoint's `D·H·W` sub-volume.
///
/// Keypoints are processed in ordinal order; the first non-finite input
/// aborts with `NonFiniteValue` naming the keypoint and the flat index
/// into the whole buffer.
pub fn softmax_channels(volume: &mut HeatmapVolume) -> Result<(), DecodeError> {
    for k in 0..volume.keypoints() {
        let start = volume.channel_range(k)?.start;
        softmax_in_place(volume.channel_mut(k)?).map_err(|bad| DecodeError::NonFiniteValue {
            keypoint: k,
            index: start + bad.index,
            value: bad.value,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_softmax_empty_is_noop() {
        let mut values: [f32; 0] = [];
        assert!(softmax_in_place(&mut values).is_ok());
    }

    #[test]
    fn test_softmax_single_element_is_one() {
        let mut values = [-123.0f32];
        softmax_in_place(&mut values).unwrap();
        assert_eq!(values, [1.0]);
    }

    #[test]
    fn test_softmax_rejects_infinity_untouched() {
        let mut values = [0.0f32, f32::INFINITY, 1.0];
        let err = softmax_in_place(&mut values).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(values[0], 0.0);
        assert_eq!(values[2], 1.0);
    }
}
