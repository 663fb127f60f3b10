use crate::skeleton::BodyPart;
use deli_base::Vec3;

/// A joint position relative to the crop, each axis roughly in [-0.5, 0.5]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keypoint3D {
    pub position: Vec3<f32>,
}

impl Keypoint3D {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
        }
    }

    pub fn x(&self) -> f32 {
        self.position.x
    }

    pub fn y(&self) -> f32 {
        self.position.y
    }

    pub fn z(&self) -> f32 {
        self.position.z
    }
}

/// A resolved skeleton edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3D {
    pub from_part: BodyPart,
    pub to_part: BodyPart,
    pub from: Keypoint3D,
    pub to: Keypoint3D,
}

impl Line3D {
    pub fn length(&self) -> f32 {
        self.from.position.distance_to(self.to.position)
    }
}

/// A decoded 3D skeleton
#[derive(Debug, Clone, PartialEq)]
pub struct Human3D {
    /// Keypoints indexed by [`BodyPart`] ordinal
    pub keypoints: Vec<Keypoint3D>,
    pub lines: Vec<Line3D>,
    /// Joints used downstream for scale and orientation normalization
    pub baseline: (BodyPart, BodyPart),
}

impl Human3D {
    /// Get a keypoint by its body part, if it was decoded
    pub fn keypoint(&self, part: BodyPart) -> Option<&Keypoint3D> {
        self.keypoints.get(usize::from(part))
    }

    pub fn baseline_keypoints(&self) -> Option<(Keypoint3D, Keypoint3D)> {
        let (a, b) = self.baseline;
        Some((*self.keypoint(a)?, *self.keypoint(b)?))
    }

    /// Distance between the baseline joints.
    pub fn baseline_length(&self) -> Option<f32> {
        self.baseline_keypoints()
            .map(|(a, b)| a.position.distance_to(b.position))
    }
}
