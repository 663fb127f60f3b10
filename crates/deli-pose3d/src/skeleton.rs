use crate::types::{Human3D, Keypoint3D, Line3D};
use std::collections::HashMap;

/// Number of joints emitted by the baseline 3D model
pub const BODY_PART_COUNT: usize = 21;

/// Joints of the baseline 3D model, in network channel order.
///
/// The ordinal of each variant is the keypoint index in the output volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum BodyPart {
    HeadTop = 0,
    Thorax = 1,
    RightShoulder = 2,
    RightElbow = 3,
    RightWrist = 4,
    LeftShoulder = 5,
    LeftElbow = 6,
    LeftWrist = 7,
    RightHip = 8,
    RightKnee = 9,
    RightAnkle = 10,
    LeftHip = 11,
    LeftKnee = 12,
    LeftAnkle = 13,
    Pelvis = 14,
    Spine = 15,
    Head = 16,
    RightHand = 17,
    LeftHand = 18,
    RightToe = 19,
    LeftToe = 20,
}

impl BodyPart {
    pub const ALL: [BodyPart; BODY_PART_COUNT] = [
        BodyPart::HeadTop,
        BodyPart::Thorax,
        BodyPart::RightShoulder,
        BodyPart::RightElbow,
        BodyPart::RightWrist,
        BodyPart::LeftShoulder,
        BodyPart::LeftElbow,
        BodyPart::LeftWrist,
        BodyPart::RightHip,
        BodyPart::RightKnee,
        BodyPart::RightAnkle,
        BodyPart::LeftHip,
        BodyPart::LeftKnee,
        BodyPart::LeftAnkle,
        BodyPart::Pelvis,
        BodyPart::Spine,
        BodyPart::Head,
        BodyPart::RightHand,
        BodyPart::LeftHand,
        BodyPart::RightToe,
        BodyPart::LeftToe,
    ];

    /// Part label used by the model.
    pub fn name(self) -> &'static str {
        match self {
            BodyPart::HeadTop => "Head_top",
            BodyPart::Thorax => "Thorax",
            BodyPart::RightShoulder => "R_Shoulder",
            BodyPart::RightElbow => "R_Elbow",
            BodyPart::RightWrist => "R_Wrist",
            BodyPart::LeftShoulder => "L_Shoulder",
            BodyPart::LeftElbow => "L_Elbow",
            BodyPart::LeftWrist => "L_Wrist",
            BodyPart::RightHip => "R_Hip",
            BodyPart::RightKnee => "R_Knee",
            BodyPart::RightAnkle => "R_Ankle",
            BodyPart::LeftHip => "L_Hip",
            BodyPart::LeftKnee => "L_Knee",
            BodyPart::LeftAnkle => "L_Ankle",
            BodyPart::Pelvis => "Pelvis",
            BodyPart::Spine => "Spine",
            BodyPart::Head => "Head",
            BodyPart::RightHand => "R_Hand",
            BodyPart::LeftHand => "L_Hand",
            BodyPart::RightToe => "R_Toe",
            BodyPart::LeftToe => "L_Toe",
        }
    }
}

impl From<BodyPart> for usize {
    fn from(part: BodyPart) -> usize {
        part as usize
    }
}

impl TryFrom<usize> for BodyPart {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        BodyPart::ALL.get(value).copied().ok_or_else(|| {
            format!(
                "Invalid body part index: {}. Must be in range 0-{}.",
                value,
                BODY_PART_COUNT - 1
            )
        })
    }
}

/// Reference joints for downstream scale and orientation normalization.
pub const BASELINE_PAIR: (BodyPart, BodyPart) = (BodyPart::RightShoulder, BodyPart::LeftShoulder);

/// Drawable connections between joints.
///
/// This is the model's own connector table, kept verbatim: it lists
/// `RightElbow -> RightWrist` twice.
pub const SKELETON_EDGES: [(BodyPart, BodyPart); 21] = [
    (BodyPart::HeadTop, BodyPart::Head),
    (BodyPart::Head, BodyPart::Thorax),
    (BodyPart::Thorax, BodyPart::Spine),
    (BodyPart::Spine, BodyPart::Pelvis),
    (BodyPart::Pelvis, BodyPart::RightHip),
    (BodyPart::Pelvis, BodyPart::LeftHip),
    (BodyPart::RightHip, BodyPart::RightKnee),
    (BodyPart::RightKnee, BodyPart::RightAnkle),
    (BodyPart::RightAnkle, BodyPart::RightToe),
    (BodyPart::RightElbow, BodyPart::RightWrist),
    (BodyPart::LeftHip, BodyPart::LeftKnee),
    (BodyPart::LeftKnee, BodyPart::LeftAnkle),
    (BodyPart::LeftAnkle, BodyPart::LeftToe),
    (BodyPart::Thorax, BodyPart::RightShoulder),
    (BodyPart::RightShoulder, BodyPart::RightElbow),
    (BodyPart::RightElbow, BodyPart::RightWrist),
    (BodyPart::RightWrist, BodyPart::RightHand),
    (BodyPart::Thorax, BodyPart::LeftShoulder),
    (BodyPart::LeftShoulder, BodyPart::LeftElbow),
    (BodyPart::LeftElbow, BodyPart::LeftWrist),
    (BodyPart::LeftWrist, BodyPart::LeftHand),
];

/// Resolve [`SKELETON_EDGES`] against decoded keypoints (indexed by ordinal).
///
/// Edges with a missing endpoint are skipped rather than failing the decode.
/// A full decode always yields every joint, so this only matters for short
/// keypoint lists handed in by callers.
pub fn resolve_lines(keypoints: &[Keypoint3D]) -> Vec<Line3D> {
    let by_part: HashMap<BodyPart, Keypoint3D> = BodyPart::ALL
        .iter()
        .copied()
        .zip(keypoints.iter().copied())
        .collect();

    SKELETON_EDGES
        .iter()
        .filter_map(|&(from_part, to_part)| {
            let from = by_part.get(&from_part)?;
            let to = by_part.get(&to_part)?;
            Some(Line3D {
                from_part,
                to_part,
                from: *from,
                to: *to,
            })
        })
        .collect()
}

/// Assemble a [`Human3D`] from keypoints in body-part order.
pub fn build_human(keypoints: Vec<Keypoint3D>) -> Human3D {
    let lines = resolve_lines(&keypoints);
    Human3D {
        keypoints,
        lines,
        baseline: BASELINE_PAIR,
    }
}
