use crate::error::DecodeError;
use deli_base::{element_count, flat_index};
use std::ops::Range;

/// Mutable view of a `[1, K, D, H, W]` heatmap volume over a flat buffer.
///
/// The network emits `[1, K·D, H, W]`; the channel axis is split into
/// `K` keypoints of `D` depth bins each. The view borrows the buffer
/// exclusively, so the in-place softmax can't be observed half-done.
#[derive(Debug)]
pub struct HeatmapVolume<'a> {
    data: &'a mut [f32],
    keypoints: usize,
    depth: usize,
    height: usize,
    width: usize,
}

impl<'a> HeatmapVolume<'a> {
    /// Wrap `data` with a declared shape.
    ///
    /// Accepts the rank-4 network layout `[1, K·D, H, W]`, split using
    /// `depth`, or an already split rank-5 `[1, K, D, H, W]` (whose own depth
    /// is used and `depth` ignored).
    pub fn new(data: &'a mut [f32], shape: &[usize], depth: usize) -> Result<Self, DecodeError> {
        if data.is_empty() {
            return Err(DecodeError::EmptyInput("tensor has no elements".to_string()));
        }

        let (batch, keypoints, depth, height, width) = match *shape {
            [batch, channels, height, width] => {
                if depth == 0 {
                    return Err(DecodeError::ShapeMismatch(
                        "declared depth must be positive".to_string(),
                    ));
                }
                if channels % depth != 0 {
                    return Err(DecodeError::ShapeMismatch(format!(
                        "channel count {channels} is not divisible by depth {depth}"
                    )));
                }
                (batch, channels / depth, depth, height, width)
            }
            [batch, keypoints, depth, height, width] => (batch, keypoints, depth, height, width),
            _ => {
                return Err(DecodeError::ShapeMismatch(format!(
                    "expected [1, K*D, H, W] or [1, K, D, H, W], got {:?}",
                    shape
                )));
            }
        };

        if batch != 1 {
            return Err(DecodeError::ShapeMismatch(format!(
                "batch size must be 1, got {batch}"
            )));
        }
        if keypoints == 0 {
            return Err(DecodeError::EmptyInput("zero keypoints declared".to_string()));
        }
        if depth == 0 || height == 0 || width == 0 {
            return Err(DecodeError::ShapeMismatch(format!(
                "zero-size axis in {:?}",
                shape
            )));
        }

        let expected = element_count(shape)?;
        if expected != data.len() {
            return Err(DecodeError::ShapeMismatch(format!(
                "shape {:?} needs {expected} elements, buffer has {}",
                shape,
                data.len()
            )));
        }

        Ok(Self {
            data,
            keypoints,
            depth,
            height,
            width,
        })
    }

    pub fn keypoints(&self) -> usize {
        self.keypoints
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The split shape `[1, K, D, H, W]`.
    pub fn shape(&self) -> [usize; 5] {
        [1, self.keypoints, self.depth, self.height, self.width]
    }

    /// Elements in one keypoint's sub-volume (`D·H·W`).
    pub fn voxels_per_keypoint(&self) -> usize {
        self.depth * self.height * self.width
    }

    /// Flat offset of voxel `(d, h, w)` of keypoint `k`.
    pub fn offset(&self, k: usize, d: usize, h: usize, w: usize) -> Result<usize, DecodeError> {
        Ok(flat_index(&self.shape(), &[0, k, d, h, w])?)
    }

    /// Half-open flat range of keypoint `k`'s whole sub-volume.
    pub fn channel_range(&self, k: usize) -> Result<Range<usize>, DecodeError> {
        let start = self.offset(k, 0, 0, 0)?;
        Ok(start..start + self.voxels_per_keypoint())
    }

    pub fn channel(&self, k: usize) -> Result<&[f32], DecodeError> {
        let range = self.channel_range(k)?;
        Ok(&self.data[range])
    }

    pub fn channel_mut(&mut self, k: usize) -> Result<&mut [f32], DecodeError> {
        let range = self.channel_range(k)?;
        Ok(&mut self.data[range])
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data[..]
    }
}
