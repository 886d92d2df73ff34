use crate::rules::CounterRule;
use bincode::{Decode, Encode};
use ff_pose_payloads::{ExerciseKind, Phase, PoseFrame, RepCount};
use log::{debug, info};

/// Live state of one exercise counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode)]
pub struct CounterState {
    count: u32,
    phase: Phase,
}

impl CounterState {
    pub fn new(rule: &CounterRule) -> Self {
        Self {
            count: 0,
            phase: rule.initial,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True when the phase is one `rule` can move out of.
    /// A state restored from elsewhere must pass this before use.
    pub fn fits(&self, rule: &CounterRule) -> bool {
        self.phase == rule.flexed || self.phase == rule.extended
    }

    pub fn rep_count(&self, kind: ExerciseKind) -> RepCount {
        RepCount {
            kind,
            count: self.count,
            phase: self.phase,
        }
    }
}

/// Feed one frame to a counter and return the updated count.
///
/// A frame missing any keypoint the rule needs leaves the state untouched.
/// At most one phase change happens per frame and the count only grows.
pub fn update(rule: &CounterRule, state: &mut CounterState, frame: &PoseFrame) -> u32 {
    let Some(reading) = rule.signal.read(frame) else {
        debug!("{}: incomplete observation, frame ignored", rule.kind);
        return state.count;
    };

    if state.phase == rule.extended && reading.flexed {
        state.phase = rule.flexed;
        debug!("{}: {} -> {}", rule.kind, rule.extended, rule.flexed);
    } else if state.phase == rule.flexed && reading.extended {
        state.phase = rule.extended;
        state.count = state.count.saturating_add(1);
        info!("{}: rep {}", rule.kind, state.count);
    }
    state.count
}
