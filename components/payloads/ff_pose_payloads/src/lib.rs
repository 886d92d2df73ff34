//! Pose frames in, rep counts and pose verdicts out: the payloads exchanged by the fitfreak components.

mod exercise;
mod feedback;

pub use exercise::{ExerciseKind, Phase};
pub use feedback::{RepCount, Verdict};

use bincode::{Decode, Encode};
use fitfreak_traits::{FfError, FfResult};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Number of keypoints in the COCO body vocabulary.
pub const NUM_KEYPOINTS: usize = 17;

/// Canonical anatomical landmarks, in COCO order.
///
/// The canonical spelling is snake_case (`left_shoulder`). The camelCase
/// spelling (`leftShoulder`) emitted by some pose estimators is accepted
/// when parsing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BodyPart {
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl BodyPart {
    pub const ALL: [BodyPart; NUM_KEYPOINTS] = [
        BodyPart::Nose,
        BodyPart::LeftEye,
        BodyPart::RightEye,
        BodyPart::LeftEar,
        BodyPart::RightEar,
        BodyPart::LeftShoulder,
        BodyPart::RightShoulder,
        BodyPart::LeftElbow,
        BodyPart::RightElbow,
        BodyPart::LeftWrist,
        BodyPart::RightWrist,
        BodyPart::LeftHip,
        BodyPart::RightHip,
        BodyPart::LeftKnee,
        BodyPart::RightKnee,
        BodyPart::LeftAnkle,
        BodyPart::RightAnkle,
    ];

    /// Slot of this part in a [`PoseFrame`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            BodyPart::Nose => "nose",
            BodyPart::LeftEye => "left_eye",
            BodyPart::RightEye => "right_eye",
            BodyPart::LeftEar => "left_ear",
            BodyPart::RightEar => "right_ear",
            BodyPart::LeftShoulder => "left_shoulder",
            BodyPart::RightShoulder => "right_shoulder",
            BodyPart::LeftElbow => "left_elbow",
            BodyPart::RightElbow => "right_elbow",
            BodyPart::LeftWrist => "left_wrist",
            BodyPart::RightWrist => "right_wrist",
            BodyPart::LeftHip => "left_hip",
            BodyPart::RightHip => "right_hip",
            BodyPart::LeftKnee => "left_knee",
            BodyPart::RightKnee => "right_knee",
            BodyPart::LeftAnkle => "left_ankle",
            BodyPart::RightAnkle => "right_ankle",
        }
    }

    /// Resolve a keypoint name, spelled exactly as [`BodyPart::name`]
    /// (`left_shoulder`) or in its camelCase form (`leftShoulder`).
    pub fn from_name(name: &str) -> Option<BodyPart> {
        BodyPart::ALL
            .into_iter()
            .find(|part| part.name() == name || camel_case(part.name()) == name)
    }
}

fn camel_case(snake: &str) -> String {
    let mut words = snake.split('_');
    let mut camel = words.next().unwrap_or_default().to_string();
    for word in words {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            camel.push(first.to_ascii_uppercase());
            camel.extend(chars);
        }
    }
    camel
}

impl Display for BodyPart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single keypoint with x, y coordinates and confidence score
#[derive(Debug, Clone, Copy, Default, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self { x, y, confidence }
    }

    /// Check if keypoint is visible (confidence above threshold)
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.confidence >= threshold
    }
}

/// A keypoint as emitted by a pose estimator: identified by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedKeypoint {
    #[serde(alias = "part")]
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(alias = "confidence", default = "full_confidence")]
    pub score: f32,
}

fn full_confidence() -> f32 {
    1.0
}

/// Serialized shape of a pose frame: the list of named keypoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseFrameRecord {
    #[serde(default)]
    pub keypoints: Vec<NamedKeypoint>,
}

/// All the keypoints detected for one person at one instant.
///
/// There is one slot per [`BodyPart`] so a name can only appear once.
/// Occluded parts are simply absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Encode, Decode, Serialize, Deserialize)]
#[serde(try_from = "PoseFrameRecord", into = "PoseFrameRecord")]
pub struct PoseFrame {
    keypoints: [Option<Keypoint>; NUM_KEYPOINTS],
}

impl PoseFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder flavor of [`PoseFrame::insert`].
    pub fn with(mut self, part: BodyPart, keypoint: Keypoint) -> Self {
        self.insert(part, keypoint);
        self
    }

    /// Set a keypoint, returning the one it replaces.
    pub fn insert(&mut self, part: BodyPart, keypoint: Keypoint) -> Option<Keypoint> {
        self.keypoints[part.index()].replace(keypoint)
    }

    pub fn remove(&mut self, part: BodyPart) -> Option<Keypoint> {
        self.keypoints[part.index()].take()
    }

    pub fn get(&self, part: BodyPart) -> Option<&Keypoint> {
        self.keypoints[part.index()].as_ref()
    }

    /// All the requested keypoints, or `None` as soon as one is missing.
    pub fn require<const N: usize>(&self, parts: [BodyPart; N]) -> Option<[Keypoint; N]> {
        let mut found = [Keypoint::default(); N];
        for (slot, part) in found.iter_mut().zip(parts) {
            *slot = *self.get(part)?;
        }
        Some(found)
    }

    pub fn len(&self) -> usize {
        self.keypoints.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.iter().all(Option::is_none)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyPart, &Keypoint)> {
        BodyPart::ALL
            .into_iter()
            .zip(self.keypoints.iter())
            .filter_map(|(part, kp)| kp.as_ref().map(|kp| (part, kp)))
    }

    /// Copy of this frame without the keypoints under `min_confidence`.
    pub fn visible(&self, min_confidence: f32) -> PoseFrame {
        let mut filtered = *self;
        for slot in filtered.keypoints.iter_mut() {
            if slot.is_some_and(|kp| !kp.is_visible(min_confidence)) {
                *slot = None;
            }
        }
        filtered
    }

    /// Build a frame from estimator output.
    /// Names outside the vocabulary are skipped, a repeated name is an error.
    pub fn from_named(named: Vec<NamedKeypoint>) -> FfResult<Self> {
        let mut frame = PoseFrame::new();
        for kp in named {
            let Some(part) = BodyPart::from_name(&kp.name) else {
                warn!("Skipping unknown keypoint '{}'", kp.name);
                continue;
            };
            if frame
                .insert(part, Keypoint::new(kp.x, kp.y, kp.score))
                .is_some()
            {
                return Err(FfError::from(format!(
                    "Keypoint '{}' appears more than once in the frame",
                    kp.name
                )));
            }
        }
        Ok(frame)
    }
}

impl TryFrom<PoseFrameRecord> for PoseFrame {
    type Error = FfError;

    fn try_from(record: PoseFrameRecord) -> FfResult<Self> {
        PoseFrame::from_named(record.keypoints)
    }
}

impl From<PoseFrame> for PoseFrameRecord {
    fn from(frame: PoseFrame) -> Self {
        PoseFrameRecord {
            keypoints: frame
                .iter()
                .map(|(part, kp)| NamedKeypoint {
                    name: part.name().to_string(),
                    x: kp.x,
                    y: kp.y,
                    score: kp.confidence,
                })
                .collect(),
        }
    }
}
