use deli_base::Tensor;
use deli_pose3d::{
    decode_human3d, decode_tensor, soft_argmax_3d, BodyPart, DecodeError, DecoderConfig,
    HeatmapVolume, BASELINE_PAIR, BODY_PART_COUNT, SKELETON_EDGES,
};

const PEAK: f32 = 60.0;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

/// Config for hand-built volumes that aren't the 21-joint model
fn any_keypoints(depth: usize) -> DecoderConfig {
    DecoderConfig::default()
        .with_depth(depth)
        .with_expected_keypoints(None)
}

/// Voxel of keypoint `k` that carries its peak in `full_volume`
fn peak_of(k: usize, size: usize) -> (usize, usize, usize) {
    (k % size, (k / size) % size, (k * 7 + 1) % size)
}

/// A `[1, 21·S, S, S]` volume with one dominant logit per keypoint
fn full_volume(size: usize) -> (Vec<f32>, Vec<usize>) {
    let per_keypoint = size * size * size;
    let mut data = vec![0.0f32; BODY_PART_COUNT * per_keypoint];
    for k in 0..BODY_PART_COUNT {
        let (d, h, w) = peak_of(k, size);
        data[k * per_keypoint + (d * size + h) * size + w] = PEAK;
    }
    (data, vec![1, BODY_PART_COUNT * size, size, size])
}

#[test]
fn test_single_keypoint_peak_scenario() {
    // K=1, D=H=W=2; peak at depth=1, height=0, width=1
    let mut data = vec![0.0f32; 8];
    data[4 + 1] = PEAK;
    let human = decode_human3d(&mut data, &[1, 2, 2, 2], &any_keypoints(2)).unwrap();

    assert_eq!(human.keypoints.len(), 1);
    let kp = human.keypoints[0];
    assert!(approx(kp.x(), 0.25), "x = {}", kp.x());
    assert!(approx(kp.y(), -0.25), "y = {}", kp.y());
    assert!(approx(kp.z(), 0.25), "z = {}", kp.z());
}

#[test]
fn test_single_keypoint_unit_logit_is_soft() {
    // Same voxel with logit 1.0: softmax spreads mass over all 8 voxels
    let mut data = vec![0.0f32; 8];
    data[5] = 1.0;
    let human = decode_human3d(&mut data, &[1, 2, 2, 2], &any_keypoints(2)).unwrap();

    let e = std::f32::consts::E;
    let heavy = (e + 3.0) / (e + 7.0);
    let light = 4.0 / (e + 7.0);
    let kp = human.keypoints[0];
    assert!(approx(kp.x(), (heavy - 0.5) / 2.0));
    assert!(approx(kp.y(), (light - 0.5) / 2.0));
    assert!(approx(kp.z(), (heavy - 0.5) / 2.0));
}

#[test]
fn test_uniform_volume_decodes_to_center() {
    let mut data = vec![3.0f32; 2 * 4 * 4 * 4];
    let human = decode_human3d(&mut data, &[1, 8, 4, 4], &any_keypoints(4)).unwrap();
    // Uniform over 4 bins: E = 1.5 -> (1.5 - 0.5) / 4
    for kp in &human.keypoints {
        assert!(approx(kp.x(), 0.25));
        assert!(approx(kp.y(), 0.25));
        assert!(approx(kp.z(), 0.25));
    }
}

#[test]
fn test_full_skeleton_decode() {
    let size = 4;
    let (mut data, shape) = full_volume(size);
    let config = DecoderConfig::default().with_depth(size);
    let human = decode_human3d(&mut data, &shape, &config).unwrap();

    assert_eq!(human.keypoints.len(), BODY_PART_COUNT);
    for (k, kp) in human.keypoints.iter().enumerate() {
        let (d, h, w) = peak_of(k, size);
        let expect = |i: usize| (i as f32 - 0.5) / size as f32;
        assert!(approx(kp.x(), expect(w)), "keypoint {} x", k);
        assert!(approx(kp.y(), expect(h)), "keypoint {} y", k);
        assert!(approx(kp.z(), expect(d)), "keypoint {} z", k);
    }

    assert_eq!(human.lines.len(), SKELETON_EDGES.len());
    for (line, &(from, to)) in human.lines.iter().zip(SKELETON_EDGES.iter()) {
        assert_eq!((line.from_part, line.to_part), (from, to));
        assert_eq!(line.from, *human.keypoint(from).unwrap());
        assert_eq!(line.to, *human.keypoint(to).unwrap());
    }
    assert_eq!(human.baseline, BASELINE_PAIR);
    assert!(human.baseline_length().unwrap() > 0.0);
}

#[test]
fn test_decode_is_deterministic() {
    let (data, shape) = full_volume(4);
    let config = DecoderConfig::default().with_depth(4);
    let mut first = data.clone();
    let mut second = data;
    let a = decode_human3d(&mut first, &shape, &config).unwrap();
    let b = decode_human3d(&mut second, &shape, &config).unwrap();
    assert_eq!(a, b);
    assert_eq!(first, second);
}

#[test]
fn test_decode_leaves_normalized_volume() {
    let mut data: Vec<f32> = (0..16).map(|i| i as f32 * 0.1).collect();
    decode_human3d(&mut data, &[1, 4, 2, 2], &any_keypoints(2)).unwrap();
    for channel in data.chunks(8) {
        let total: f32 = channel.iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
    }
}

#[test]
fn test_shape_mismatch_fails() {
    let mut data = vec![0.0f32; 10];
    let result = decode_human3d(&mut data, &[1, 3, 2, 2], &any_keypoints(1));
    assert!(matches!(result, Err(DecodeError::ShapeMismatch(_))));
}

#[test]
fn test_non_finite_fails_without_result() {
    let mut data = vec![0.0f32; 16];
    data[3] = f32::NAN;
    let result = decode_human3d(&mut data, &[1, 4, 2, 2], &any_keypoints(2));
    assert!(matches!(
        result,
        Err(DecodeError::NonFiniteValue { keypoint: 0, index: 3, .. })
    ));
}

#[test]
fn test_empty_tensor_fails() {
    let mut data: Vec<f32> = Vec::new();
    let result = decode_human3d(&mut data, &[1, 0, 32, 32], &DecoderConfig::default());
    assert!(matches!(result, Err(DecodeError::EmptyInput(_))));
}

#[test]
fn test_unexpected_keypoint_count_fails() {
    let mut data = vec![0.0f32; 2 * 8];
    let config = DecoderConfig::default().with_depth(2);
    let result = decode_human3d(&mut data, &[1, 4, 2, 2], &config);
    assert!(matches!(result, Err(DecodeError::ShapeMismatch(_))));
}

#[test]
fn test_soft_argmax_without_topology() {
    let mut data = vec![0.0f32; 3 * 8];
    data[8 + 2] = PEAK; // keypoint 1, d=0, h=1, w=0
    let mut volume = HeatmapVolume::new(&mut data, &[1, 3, 2, 2, 2], 1).unwrap();
    let keypoints = soft_argmax_3d(&mut volume).unwrap();
    assert_eq!(keypoints.len(), 3);
    assert!(approx(keypoints[1].x(), -0.25));
    assert!(approx(keypoints[1].y(), 0.25));
    assert!(approx(keypoints[1].z(), -0.25));
}

#[test]
fn test_partial_skeleton_skips_missing_edges() {
    // Three keypoints: HeadTop, Thorax, RightShoulder
    let mut data = vec![0.0f32; 3 * 8];
    let human = decode_human3d(&mut data, &[1, 6, 2, 2], &any_keypoints(2)).unwrap();
    assert_eq!(human.keypoints.len(), 3);
    assert_eq!(human.lines.len(), 1);
    assert_eq!(
        (human.lines[0].from_part, human.lines[0].to_part),
        (BodyPart::Thorax, BodyPart::RightShoulder)
    );
    assert!(human.keypoint(BodyPart::LeftShoulder).is_none());
    assert!(human.baseline_length().is_none());
}

#[test]
fn test_decode_tensor_owns_buffer() {
    let (data, shape) = full_volume(4);
    let tensor = Tensor::new(shape, data).unwrap();
    let human = decode_tensor(tensor, &DecoderConfig::default().with_depth(4)).unwrap();
    assert_eq!(human.keypoints.len(), BODY_PART_COUNT);
}
