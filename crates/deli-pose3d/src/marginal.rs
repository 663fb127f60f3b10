use crate::volume::HeatmapVolume;

/// Spatial axis of a heatmap volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Width,
    Height,
    Depth,
}

impl Axis {
    /// Axes in output coordinate order (x, y, z).
    pub const ALL: [Axis; 3] = [Axis::Width, Axis::Height, Axis::Depth];

    /// Number of bins along this axis.
    pub fn size(self, volume: &HeatmapVolume) -> usize {
        match self {
            Axis::Width => volume.width(),
            Axis::Height => volume.height(),
            Axis::Depth => volume.depth(),
        }
    }
}

/// Marginal distribution of every keypoint along `axis`.
///
/// Sums each keypoint's sub-volume over the two other axes. The result holds
/// `K` runs of `axis.size()` values, concatenated in keypoint order. Each run
/// sums to ~1 when the volume has been through the channel softmax.
///
/// Voxels are visited in storage order (depth, height, width) and accumulated
/// in f64, so repeated calls give identical results.
pub fn marginalize(volume: &HeatmapVolume, axis: Axis) -> Vec<f32> {
    let (depth, height, width) = (volume.depth(), volume.height(), volume.width());
    let size = axis.size(volume);
    let per_keypoint = volume.voxels_per_keypoint();
    let data = volume.as_slice();

    let mut out = Vec::with_capacity(volume.keypoints() * size);
    let mut bins = vec![0.0f64; size];

    for channel in data.chunks_exact(per_keypoint) {
        bins.iter_mut().for_each(|b| *b = 0.0);
        for d in 0..depth {
            for h in 0..height {
                let row = &channel[(d * height + h) * width..][..width];
                for (w, &v) in row.iter().enumerate() {
                    let bin = match axis {
                        Axis::Width => w,
                        Axis::Height => h,
                        Axis::Depth => d,
                    };
                    bins[bin] += v as f64;
                }
            }
        }
        out.extend(bins.iter().map(|&b| b as f32));
    }

    log::trace!(
        "marginalized {} keypoints along {:?} into {} bins each",
        volume.keypoints(),
        axis,
        size
    );
    out
}
