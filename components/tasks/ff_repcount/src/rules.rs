use ff_geometry::joint_angle;
use ff_pose_payloads::{BodyPart, ExerciseKind, Phase, PoseFrame};
use uom::si::angle::degree;
use uom::si::f32::Angle;

/// A joint angle under this is a flexed joint.
pub const FLEXED_BELOW_DEGREES: f32 = 90.0;
/// A joint angle over this is an extended joint.
pub const EXTENDED_ABOVE_DEGREES: f32 = 160.0;
/// Horizontal hip separation (normalized units) for a jumping jack to be "open".
pub const MIN_HIP_SPREAD: f32 = 0.2;

/// First point, vertex, last point.
pub type Joint = [BodyPart; 3];

/// How many sides must agree before a joint counts as flexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quorum {
    Both,
    Either,
}

impl Quorum {
    fn holds(self, left: bool, right: bool) -> bool {
        match self {
            Quorum::Both => left && right,
            Quorum::Either => left || right,
        }
    }
}

/// What a counter looks at in a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    /// The same joint angle on both sides of the body.
    JointAngle {
        left: Joint,
        right: Joint,
        flexed_when: Quorum,
    },
    /// Both wrists above the shoulders and hips spread apart.
    ArmsAndStance,
    /// A knee higher in the image than its hip.
    KneeLift,
}

/// The two conditions a frame can satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub flexed: bool,
    pub extended: bool,
}

impl Signal {
    /// `None` when a keypoint the signal needs is absent from the frame.
    pub fn read(&self, frame: &PoseFrame) -> Option<Reading> {
        match *self {
            Signal::JointAngle {
                left,
                right,
                flexed_when,
            } => {
                let [la, lb, lc, ra, rb, rc] =
                    frame.require([left[0], left[1], left[2], right[0], right[1], right[2]])?;
                let left_angle = joint_angle(&la, &lb, &lc);
                let right_angle = joint_angle(&ra, &rb, &rc);
                let flexed_below = Angle::new::<degree>(FLEXED_BELOW_DEGREES);
                let extended_above = Angle::new::<degree>(EXTENDED_ABOVE_DEGREES);
                Some(Reading {
                    flexed: flexed_when.holds(left_angle < flexed_below, right_angle < flexed_below),
                    extended: left_angle > extended_above && right_angle > extended_above,
                })
            }
            Signal::ArmsAndStance => {
                let [left_shoulder, left_wrist, right_shoulder, right_wrist, left_hip, right_hip] =
                    frame.require([
                        BodyPart::LeftShoulder,
                        BodyPart::LeftWrist,
                        BodyPart::RightShoulder,
                        BodyPart::RightWrist,
                        BodyPart::LeftHip,
                        BodyPart::RightHip,
                    ])?;
                let hands_up = left_wrist.y < left_shoulder.y && right_wrist.y < right_shoulder.y;
                let feet_apart = (left_hip.x - right_hip.x).abs() > MIN_HIP_SPREAD;
                Some(Reading {
                    flexed: !hands_up && !feet_apart,
                    extended: hands_up && feet_apart,
                })
            }
            Signal::KneeLift => {
                let [left_hip, left_knee, right_hip, right_knee] = frame.require([
                    BodyPart::LeftHip,
                    BodyPart::LeftKnee,
                    BodyPart::RightHip,
                    BodyPart::RightKnee,
                ])?;
                let left_up = left_knee.y < left_hip.y;
                let right_up = right_knee.y < right_hip.y;
                Some(Reading {
                    flexed: !left_up && !right_up,
                    extended: left_up || right_up,
                })
            }
        }
    }
}

/// Everything that differs between two counted exercises.
///
/// A rep is counted on the move from the `flexed` phase to the `extended` one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterRule {
    pub kind: ExerciseKind,
    pub signal: Signal,
    pub flexed: Phase,
    pub extended: Phase,
    pub initial: Phase,
}

const ELBOWS: (Joint, Joint) = (
    [BodyPart::LeftShoulder, BodyPart::LeftElbow, BodyPart::LeftWrist],
    [BodyPart::RightShoulder, BodyPart::RightElbow, BodyPart::RightWrist],
);

const KNEES: (Joint, Joint) = (
    [BodyPart::LeftHip, BodyPart::LeftKnee, BodyPart::LeftAnkle],
    [BodyPart::RightHip, BodyPart::RightKnee, BodyPart::RightAnkle],
);

static RULES: [CounterRule; 5] = [
    CounterRule {
        kind: ExerciseKind::PushUps,
        signal: Signal::JointAngle {
            left: ELBOWS.0,
            right: ELBOWS.1,
            flexed_when: Quorum::Both,
        },
        flexed: Phase::Down,
        extended: Phase::Up,
        initial: Phase::Up,
    },
    CounterRule {
        kind: ExerciseKind::Squats,
        signal: Signal::JointAngle {
            left: KNEES.0,
            right: KNEES.1,
            flexed_when: Quorum::Both,
        },
        flexed: Phase::Down,
        extended: Phase::Up,
        initial: Phase::Up,
    },
    CounterRule {
        kind: ExerciseKind::JumpingJacks,
        signal: Signal::ArmsAndStance,
        flexed: Phase::Closed,
        extended: Phase::Open,
        initial: Phase::Closed,
    },
    CounterRule {
        kind: ExerciseKind::Lunges,
        signal: Signal::JointAngle {
            left: KNEES.0,
            right: KNEES.1,
            flexed_when: Quorum::Either,
        },
        flexed: Phase::Down,
        extended: Phase::Up,
        initial: Phase::Up,
    },
    CounterRule {
        kind: ExerciseKind::HighKnees,
        signal: Signal::KneeLift,
        flexed: Phase::Down,
        extended: Phase::Up,
        initial: Phase::Down,
    },
];

/// The counting rule of an exercise, `None` for held poses.
pub fn rule_for(kind: ExerciseKind) -> Option<&'static CounterRule> {
    RULES.iter().find(|rule| rule.kind == kind)
}
