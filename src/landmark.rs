// src/landmark.rs - Named views over MediaPipe pose landmark sequences
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of pose landmarks the detector emits per frame.
pub const POSE_LANDMARK_COUNT: usize = 33;

/// A single tracked body point in normalized image coordinates.
///
/// `x` and `y` are in [0, 1] with `y` growing downward; `z` is relative
/// depth and `visibility` the detector's confidence in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub visibility: f64,
}

impl LandmarkPoint {
    pub fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self { x, y, z, visibility }
    }
}

/// The 33 pose landmark names, in detector index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum LandmarkName {
    Nose = 0,
    LeftEyeInner,
    LeftEye,
    LeftEyeOuter,
    RightEyeInner,
    RightEye,
    RightEyeOuter,
    LeftEar,
    RightEar,
    MouthLeft,
    MouthRight,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftPinky,
    RightPinky,
    LeftIndex,
    RightIndex,
    LeftThumb,
    RightThumb,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftHeel,
    RightHeel,
    LeftFootIndex,
    RightFootIndex,
}

impl LandmarkName {
    /// All names, ordered by detector index.
    pub const ALL: [LandmarkName; POSE_LANDMARK_COUNT] = [
        LandmarkName::Nose,
        LandmarkName::LeftEyeInner,
        LandmarkName::LeftEye,
        LandmarkName::LeftEyeOuter,
        LandmarkName::RightEyeInner,
        LandmarkName::RightEye,
        LandmarkName::RightEyeOuter,
        LandmarkName::LeftEar,
        LandmarkName::RightEar,
        LandmarkName::MouthLeft,
        LandmarkName::MouthRight,
        LandmarkName::LeftShoulder,
        LandmarkName::RightShoulder,
        LandmarkName::LeftElbow,
        LandmarkName::RightElbow,
        LandmarkName::LeftWrist,
        LandmarkName::RightWrist,
        LandmarkName::LeftPinky,
        LandmarkName::RightPinky,
        LandmarkName::LeftIndex,
        LandmarkName::RightIndex,
        LandmarkName::LeftThumb,
        LandmarkName::RightThumb,
        LandmarkName::LeftHip,
        LandmarkName::RightHip,
        LandmarkName::LeftKnee,
        LandmarkName::RightKnee,
        LandmarkName::LeftAnkle,
        LandmarkName::RightAnkle,
        LandmarkName::LeftHeel,
        LandmarkName::RightHeel,
        LandmarkName::LeftFootIndex,
        LandmarkName::RightFootIndex,
    ];

    /// Position of this landmark in the detector output sequence.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<LandmarkName> {
        Self::ALL.get(index).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LandmarkName::Nose => "nose",
            LandmarkName::LeftEyeInner => "left_eye_inner",
            LandmarkName::LeftEye => "left_eye",
            LandmarkName::LeftEyeOuter => "left_eye_outer",
            LandmarkName::RightEyeInner => "right_eye_inner",
            LandmarkName::RightEye => "right_eye",
            LandmarkName::RightEyeOuter => "right_eye_outer",
            LandmarkName::LeftEar => "left_ear",
            LandmarkName::RightEar => "right_ear",
            LandmarkName::MouthLeft => "mouth_left",
            LandmarkName::MouthRight => "mouth_right",
            LandmarkName::LeftShoulder => "left_shoulder",
            LandmarkName::RightShoulder => "right_shoulder",
            LandmarkName::LeftElbow => "left_elbow",
            LandmarkName::RightElbow => "right_elbow",
            LandmarkName::LeftWrist => "left_wrist",
            LandmarkName::RightWrist => "right_wrist",
            LandmarkName::LeftPinky => "left_pinky",
            LandmarkName::RightPinky => "right_pinky",
            LandmarkName::LeftIndex => "left_index",
            LandmarkName::RightIndex => "right_index",
            LandmarkName::LeftThumb => "left_thumb",
            LandmarkName::RightThumb => "right_thumb",
            LandmarkName::LeftHip => "left_hip",
            LandmarkName::RightHip => "right_hip",
            LandmarkName::LeftKnee => "left_knee",
            LandmarkName::RightKnee => "right_knee",
            LandmarkName::LeftAnkle => "left_ankle",
            LandmarkName::RightAnkle => "right_ankle",
            LandmarkName::LeftHeel => "left_heel",
            LandmarkName::RightHeel => "right_heel",
            LandmarkName::LeftFootIndex => "left_foot_index",
            LandmarkName::RightFootIndex => "right_foot_index",
        }
    }
}

impl std::fmt::Display for LandmarkName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One frame of named landmarks, built once per analysis call.
///
/// A name is present only if the corresponding index existed in the source
/// sequence; evaluators must tolerate absence.
#[derive(Debug, Clone, Default)]
pub struct LandmarkFrame {
    points: HashMap<LandmarkName, LandmarkPoint>,
}

impl LandmarkFrame {
    /// Maps an ordered point sequence to named landmarks. Entries beyond
    /// the fixed 33 are ignored; shorter sequences yield a partial frame.
    pub fn from_points(points: &[LandmarkPoint]) -> Self {
        let mut frame = HashMap::with_capacity(POSE_LANDMARK_COUNT.min(points.len()));
        for (index, point) in points.iter().take(POSE_LANDMARK_COUNT).enumerate() {
            if let Some(name) = LandmarkName::from_index(index) {
                frame.insert(name, *point);
            }
        }
        Self { points: frame }
    }

    pub fn get(&self, name: LandmarkName) -> Option<&LandmarkPoint> {
        self.points.get(&name)
    }

    pub fn contains(&self, name: LandmarkName) -> bool {
        self.points.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
