//! Repetition counters for the fitfreak exercises.
//!
//! Every counted exercise is the same two-phase state machine. What changes
//! from one exercise to the next (keypoints, thresholds, which phase counts)
//! lives in a static [`CounterRule`] table, and the state itself is a small
//! [`CounterState`] record owned by the caller.
//!
//! ```
//! use ff_pose_payloads::{ExerciseKind, PoseFrame};
//! use ff_repcount::{rule_for, update, CounterState};
//!
//! let rule = rule_for(ExerciseKind::Squats).unwrap();
//! let mut state = CounterState::new(rule);
//! assert_eq!(update(rule, &mut state, &PoseFrame::new()), 0);
//! ```

mod counter;
mod rules;

pub use counter::{update, CounterState};
pub use ff_geometry::joint_angle;
pub use rules::{
    rule_for, CounterRule, Joint, Quorum, Reading, Signal, EXTENDED_ABOVE_DEGREES,
    FLEXED_BELOW_DEGREES, MIN_HIP_SPREAD,
};
