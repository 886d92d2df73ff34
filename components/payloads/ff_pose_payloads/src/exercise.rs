use bincode::{Decode, Encode};
use fitfreak_traits::FfError;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The closed set of exercises the engine knows about.
///
/// Serialized as its label (`"Push-Ups"`). Any spelling accepted by
/// [`FromStr`] deserializes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum ExerciseKind {
    PushUps,
    Squats,
    JumpingJacks,
    Lunges,
    HighKnees,
    TreePose,
    WarriorII,
    DownwardDog,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 8] = [
        ExerciseKind::PushUps,
        ExerciseKind::Squats,
        ExerciseKind::JumpingJacks,
        ExerciseKind::Lunges,
        ExerciseKind::HighKnees,
        ExerciseKind::TreePose,
        ExerciseKind::WarriorII,
        ExerciseKind::DownwardDog,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExerciseKind::PushUps => "Push-Ups",
            ExerciseKind::Squats => "Squats",
            ExerciseKind::JumpingJacks => "Jumping Jacks",
            ExerciseKind::Lunges => "Lunges",
            ExerciseKind::HighKnees => "High Knees",
            ExerciseKind::TreePose => "Tree Pose",
            ExerciseKind::WarriorII => "Warrior II",
            ExerciseKind::DownwardDog => "Downward Dog",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExerciseKind::PushUps => "Track your push-up form and count",
            ExerciseKind::Squats => "Perfect your squat technique",
            ExerciseKind::JumpingJacks => "Monitor your jumping jack movements",
            ExerciseKind::Lunges => "Track your lunge repetitions",
            ExerciseKind::HighKnees => "Count your high knee exercises",
            ExerciseKind::TreePose => "Balance on one leg with the other foot on your thigh",
            ExerciseKind::WarriorII => "Front knee bent at 90°, arms extended parallel to ground",
            ExerciseKind::DownwardDog => "Arms and legs straight, hips higher than shoulders",
        }
    }

    /// Yoga poses are held and scored, everything else is counted.
    pub fn is_pose_hold(self) -> bool {
        matches!(
            self,
            ExerciseKind::TreePose | ExerciseKind::WarriorII | ExerciseKind::DownwardDog
        )
    }
}

impl Display for ExerciseKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExerciseKind {
    type Err = FfError;

    /// Case and punctuation insensitive: "Push-ups", "push ups" and "PushUp" all match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let kind = match folded.as_str() {
            "pushups" | "pushup" => ExerciseKind::PushUps,
            "squats" | "squat" => ExerciseKind::Squats,
            "jumpingjacks" | "jumpingjack" => ExerciseKind::JumpingJacks,
            "lunges" | "lunge" => ExerciseKind::Lunges,
            "highknees" | "highknee" => ExerciseKind::HighKnees,
            "treepose" | "tree" => ExerciseKind::TreePose,
            "warriorii" | "warrior2" => ExerciseKind::WarriorII,
            "downwarddog" => ExerciseKind::DownwardDog,
            _ => return Err(format!("Unknown exercise '{}'", s).into()),
        };
        Ok(kind)
    }
}

impl TryFrom<String> for ExerciseKind {
    type Error = FfError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<ExerciseKind> for String {
    fn from(kind: ExerciseKind) -> Self {
        kind.label().to_string()
    }
}

/// Half-cycle a repetition counter is in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Up,
    Down,
    Open,
    Closed,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::Up => "up",
            Phase::Down => "down",
            Phase::Open => "open",
            Phase::Closed => "closed",
        };
        f.write_str(name)
    }
}
