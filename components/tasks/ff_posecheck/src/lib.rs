//! Form checks for held yoga poses.
//!
//! Validation is a pure function of one frame: nothing is remembered from a
//! call to the next, and every input yields a well formed [`Verdict`].

use ff_geometry::joint_angle;
use ff_pose_payloads::{BodyPart, ExerciseKind, PoseFrame, Verdict};
use log::debug;
use uom::si::angle::degree;
use uom::si::f32::Angle;

/// How long a pose is meant to be held.
pub const HOLD_SECONDS: f32 = 30.0;
/// Under this the standing leg is bent.
pub const STANDING_LEG_MIN_DEGREES: f32 = 160.0;
/// The raised leg knee angle must stay in this range.
pub const RAISED_LEG_MIN_DEGREES: f32 = 50.0;
pub const RAISED_LEG_MAX_DEGREES: f32 = 130.0;

/// Form rule attached to a held pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseRule {
    TreePose,
    /// No form rule is defined for this pose yet.
    /// Validation returns a placeholder verdict naming the pose.
    Unspecified,
}

pub fn pose_rule(kind: ExerciseKind) -> Option<PoseRule> {
    match kind {
        ExerciseKind::TreePose => Some(PoseRule::TreePose),
        ExerciseKind::WarriorII | ExerciseKind::DownwardDog => Some(PoseRule::Unspecified),
        _ => None,
    }
}

/// Score one frame against the target pose.
pub fn validate(frame: &PoseFrame, kind: ExerciseKind) -> Verdict {
    if frame.is_empty() {
        return no_pose();
    }
    match pose_rule(kind) {
        Some(PoseRule::TreePose) => tree_pose(frame),
        Some(PoseRule::Unspecified) => verdict(
            true,
            &format!("{} validation not implemented yet", kind),
            &[],
            0,
        ),
        None => unknown_pose(),
    }
}

/// [`validate`] for a pose name coming straight from the presentation layer.
pub fn validate_named(frame: &PoseFrame, name: &str) -> Verdict {
    match name.parse::<ExerciseKind>() {
        Ok(kind) => validate(frame, kind),
        Err(_) if frame.is_empty() => no_pose(),
        Err(e) => {
            debug!("{}", e.message());
            unknown_pose()
        }
    }
}

fn tree_pose(frame: &PoseFrame) -> Verdict {
    let Some([left_hip, left_knee, left_ankle, right_hip, right_knee, right_ankle]) = frame
        .require([
            BodyPart::LeftHip,
            BodyPart::LeftKnee,
            BodyPart::LeftAnkle,
            BodyPart::RightHip,
            BodyPart::RightKnee,
            BodyPart::RightAnkle,
        ])
    else {
        return verdict(
            false,
            "Cannot see all required body parts",
            &["Make sure your full lower body is visible"],
            0,
        );
    };

    let standing_leg = joint_angle(&left_hip, &left_knee, &left_ankle);
    let raised_leg = joint_angle(&right_hip, &right_knee, &right_ankle);

    let mut corrections = Vec::new();
    if standing_leg < Angle::new::<degree>(STANDING_LEG_MIN_DEGREES) {
        corrections.push("Straighten your standing leg");
    }
    if raised_leg > Angle::new::<degree>(RAISED_LEG_MAX_DEGREES)
        || raised_leg < Angle::new::<degree>(RAISED_LEG_MIN_DEGREES)
    {
        corrections.push("Position your raised foot against your inner thigh or calf");
    }

    if corrections.is_empty() {
        verdict(true, "Good form!", &[], 100)
    } else {
        verdict(false, "Adjust your pose", &corrections, 0)
    }
}

fn no_pose() -> Verdict {
    verdict(
        false,
        "No pose detected",
        &["Make sure your full body is visible"],
        0,
    )
}

fn unknown_pose() -> Verdict {
    verdict(false, "Unknown pose type", &[], 0)
}

fn verdict(is_valid: bool, message: &str, corrections: &[&str], progress: u8) -> Verdict {
    Verdict {
        is_valid,
        message: message.to_string(),
        corrections: corrections.iter().map(|c| c.to_string()).collect(),
        progress,
        remaining_time: HOLD_SECONDS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff_pose_payloads::Keypoint;

    const STRAIGHTEN: &str = "Straighten your standing leg";
    const RAISED_FOOT: &str = "Position your raised foot against your inner thigh or calf";

    fn place_joint(frame: &mut PoseFrame, parts: [BodyPart; 3], vertex: (f32, f32), degrees: f32) {
        let (vx, vy) = vertex;
        let theta = degrees.to_radians();
        frame.insert(parts[0], Keypoint::new(vx, vy - 0.2, 0.9));
        frame.insert(parts[1], Keypoint::new(vx, vy, 0.9));
        frame.insert(
            parts[2],
            Keypoint::new(vx + 0.2 * theta.sin(), vy - 0.2 * theta.cos(), 0.9),
        );
    }

    fn tree(standing: f32, raised: f32) -> PoseFrame {
        let mut frame = PoseFrame::new();
        place_joint(
            &mut frame,
            [BodyPart::LeftHip, BodyPart::LeftKnee, BodyPart::LeftAnkle],
            (0.45, 0.7),
            standing,
        );
        place_joint(
            &mut frame,
            [BodyPart::RightHip, BodyPart::RightKnee, BodyPart::RightAnkle],
            (0.6, 0.65),
            raised,
        );
        frame
    }

    #[test]
    fn test_empty_frame() {
        for kind in ExerciseKind::ALL {
            let verdict = validate(&PoseFrame::new(), kind);
            assert!(!verdict.is_valid);
            assert_eq!(verdict.progress, 0);
            assert_eq!(verdict.message, "No pose detected");
            assert_eq!(verdict.corrections, vec!["Make sure your full body is visible"]);
            assert_eq!(verdict.remaining_time, 30.0);
        }
        assert_eq!(
            validate_named(&PoseFrame::new(), "Crow Pose").message,
            "No pose detected"
        );
    }

    #[test]
    fn test_unknown_pose() {
        let frame = tree(175.0, 90.0);
        for verdict in [
            validate(&frame, ExerciseKind::Squats),
            validate_named(&frame, "Crow Pose"),
        ] {
            assert!(!verdict.is_valid);
            assert_eq!(verdict.message, "Unknown pose type");
            assert!(verdict.corrections.is_empty());
            assert_eq!(verdict.progress, 0);
            assert_eq!(verdict.remaining_time, 30.0);
        }
    }

    #[test]
    fn test_tree_pose_good_form() {
        let verdict = validate_named(&tree(175.0, 90.0), "Tree Pose");
        assert!(verdict.is_valid);
        assert_eq!(verdict.message, "Good form!");
        assert!(verdict.corrections.is_empty());
        assert_eq!(verdict.progress, 100);
        assert_eq!(verdict.remaining_time, 30.0);
    }

    #[test]
    fn test_tree_pose_standing_leg_boundary() {
        let bent = validate(&tree(159.0, 90.0), ExerciseKind::TreePose);
        assert!(!bent.is_valid);
        assert_eq!(bent.message, "Adjust your pose");
        assert_eq!(bent.corrections, vec![STRAIGHTEN]);
        assert_eq!(bent.progress, 0);

        let straight = validate(&tree(161.0, 90.0), ExerciseKind::TreePose);
        assert!(straight.is_valid);
        assert!(straight.corrections.is_empty());
    }

    #[test]
    fn test_tree_pose_raised_leg_range() {
        for (raised, flagged) in [(45.0, true), (51.0, false), (129.0, false), (135.0, true)] {
            let verdict = validate(&tree(175.0, raised), ExerciseKind::TreePose);
            assert_eq!(verdict.corrections.contains(&RAISED_FOOT.to_string()), flagged, "{raised}");
            assert_eq!(verdict.is_valid, !flagged);
        }
    }

    #[test]
    fn test_tree_pose_corrections_are_ordered() {
        let verdict = validate(&tree(120.0, 170.0), ExerciseKind::TreePose);
        assert_eq!(verdict.corrections, vec![STRAIGHTEN, RAISED_FOOT]);
    }

    #[test]
    fn test_tree_pose_needs_lower_body() {
        let mut frame = tree(175.0, 90.0);
        frame.remove(BodyPart::RightAnkle);
        frame.insert(BodyPart::Nose, Keypoint::new(0.5, 0.1, 0.9));
        let verdict = validate(&frame, ExerciseKind::TreePose);
        assert!(!verdict.is_valid);
        assert_eq!(verdict.message, "Cannot see all required body parts");
        assert_eq!(
            verdict.corrections,
            vec!["Make sure your full lower body is visible"]
        );
        assert_eq!(verdict.progress, 0);
    }

    #[test]
    fn test_unspecified_poses_placeholder() {
        let frame = tree(175.0, 90.0);
        for (kind, message) in [
            (
                ExerciseKind::WarriorII,
                "Warrior II validation not implemented yet",
            ),
            (
                ExerciseKind::DownwardDog,
                "Downward Dog validation not implemented yet",
            ),
        ] {
            assert_eq!(pose_rule(kind), Some(PoseRule::Unspecified));
            let verdict = validate(&frame, kind);
            assert!(verdict.is_valid);
            assert_eq!(verdict.message, message);
            assert!(verdict.corrections.is_empty());
            assert_eq!(verdict.progress, 0);
            assert_eq!(verdict.remaining_time, 30.0);
        }
    }
}
