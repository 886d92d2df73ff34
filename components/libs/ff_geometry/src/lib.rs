//! Geometry utilities on body keypoints.

use ff_pose_payloads::Keypoint;
use std::f32::consts::PI;
use uom::si::angle::degree;
use uom::si::f32::Angle;

/// Angle at the vertex `b` between the segments `b->a` and `b->c`.
///
/// The raw difference of the two headings is folded back into [0°, 180°], so
/// `joint_angle(a, b, c) == joint_angle(c, b, a)`.
/// Every angle based counter and validator goes through this function.
///
/// # Examples
///
/// ```
/// use ff_geometry::joint_angle;
/// use ff_pose_payloads::Keypoint;
/// use uom::si::angle::degree;
///
/// let hip = Keypoint::new(0.5, 0.5, 1.0);
/// let knee = Keypoint::new(0.5, 0.7, 1.0);
/// let ankle = Keypoint::new(0.7, 0.7, 1.0);
/// let angle = joint_angle(&hip, &knee, &ankle).get::<degree>();
/// assert!((angle - 90.0).abs() < 1e-3);
/// ```
pub fn joint_angle(a: &Keypoint, b: &Keypoint, c: &Keypoint) -> Angle {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let mut angle = (radians * 180.0 / PI).abs();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }
    Angle::new::<degree>(angle)
}
