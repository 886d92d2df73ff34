use crate::{ExerciseKind, Phase};
use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Output of a repetition counter after one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct RepCount {
    pub kind: ExerciseKind,
    pub count: u32,
    pub phase: Phase,
}

impl Display for RepCount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.kind, self.count, self.phase)
    }
}

/// Structured verdict on a held pose. Computed fresh for every frame.
#[derive(Debug, Clone, Default, PartialEq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub is_valid: bool,
    pub message: String,
    pub corrections: Vec<String>,
    /// 0 to 100.
    pub progress: u8,
    /// Seconds left to hold the pose.
    pub remaining_time: f32,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}%, {}s left]",
            self.message, self.progress, self.remaining_time
        )?;
        if !self.corrections.is_empty() {
            write!(f, " {}", self.corrections.join("; "))?;
        }
        Ok(())
    }
}
