use crate::error::DecodeError;

/// Probability-weighted mean index `Σ marginal[i] · i`.
pub fn expectation(marginal: &[f32]) -> f32 {
    marginal
        .iter()
        .enumerate()
        .map(|(i, &p)| p as f64 * i as f64)
        .sum::<f64>() as f32
}

/// Map an expected index on an axis of `size` bins to `(e - 0.5) / size`.
pub fn normalize_coordinate(expected: f32, size: usize) -> f32 {
    (expected - 0.5) / size as f32
}

/// Decode one normalized coordinate per keypoint from concatenated marginals.
///
/// `marginals` holds one run of `size` values per keypoint, as produced by
/// [`crate::marginal::marginalize`].
pub fn decode_axis(marginals: &[f32], size: usize) -> Result<Vec<f32>, DecodeError> {
    if size == 0 {
        return Err(DecodeError::ShapeMismatch("axis size must be positive".to_string()));
    }
    if marginals.len() % size != 0 {
        return Err(DecodeError::ShapeMismatch(format!(
            "{} marginal values do not split into runs of {size}",
            marginals.len()
        )));
    }

    Ok(marginals
        .chunks_exact(size)
        .map(|run| normalize_coordinate(expectation(run), size))
        .collect())
}
