use ff_pose_payloads::PoseFrame;
use fitfreak_traits::{FfError, FfResult};
use std::collections::VecDeque;
use std::fs::read_to_string;
use std::path::Path;

/// Anything that produces pose frames one at a time, in capture order.
pub trait PoseSource {
    /// `Ok(None)` once the source is exhausted.
    fn next_frame(&mut self) -> FfResult<Option<PoseFrame>>;
}

/// A recorded sequence of pose frames.
///
/// On disk it is a RON list of frames:
/// `[(keypoints: [(name: "left_hip", x: 0.4, y: 0.5, score: 0.9), ...]), ...]`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoseLog {
    frames: VecDeque<PoseFrame>,
}

impl PoseLog {
    pub fn new(frames: impl IntoIterator<Item = PoseFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn from_ron(ron: &str) -> FfResult<Self> {
        let frames: Vec<PoseFrame> = ron::from_str(ron)
            .map_err(|e| FfError::new_with_cause("Malformed pose log", e))?;
        Ok(Self::new(frames))
    }

    pub fn from_file(path: &Path) -> FfResult<Self> {
        let content = read_to_string(path).map_err(|e| {
            FfError::from(format!("Failed to read pose log: {:?}", path))
                .add_cause(e.to_string().as_str())
        })?;
        Self::from_ron(&content)
    }

    /// Frames not consumed yet.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn to_ron(&self) -> FfResult<String> {
        let frames: Vec<&PoseFrame> = self.frames.iter().collect();
        ron::ser::to_string_pretty(&frames, ron::ser::PrettyConfig::default())
            .map_err(|e| FfError::new_with_cause("Failed to serialize pose log", e))
    }
}

impl PoseSource for PoseLog {
    fn next_frame(&mut self) -> FfResult<Option<PoseFrame>> {
        Ok(self.frames.pop_front())
    }
}
