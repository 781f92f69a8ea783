//! World-delta rotation offset computation.

use std::f32::consts::FRAC_PI_2;

use nalgebra::Isometry3;

use marionette_core::types::EulerAngles;

/// Compute the rotation offset between an owner bone and a target bone.
///
/// Each bone's world transform is its armature's world matrix composed with
/// the bone's pose matrix. The delta is the rotation that carries the
/// target's world orientation onto the owner's:
///
/// ```text
/// delta = inverse(target_world * target_pose) * (owner_world * owner_pose)
/// ```
///
/// decomposed as intrinsic-XYZ Euler angles. With `snap_orthogonal`, each
/// axis is rounded independently to the nearest multiple of π/2, so that
/// rigs modelled in axis-aligned rest poses produce clean quarter-turn
/// offsets from imprecise pose data.
///
/// Returns `None` when the triple is exactly zero: no offset is needed and
/// the caller leaves the offset feature unset. Rotations near ±90° pitch are
/// decomposed without disambiguation; the canonical decomposition's answer
/// stands.
#[must_use]
pub fn rotation_offset(
    owner_world: &Isometry3<f32>,
    owner_pose: &Isometry3<f32>,
    target_world: &Isometry3<f32>,
    target_pose: &Isometry3<f32>,
    snap_orthogonal: bool,
) -> Option<EulerAngles> {
    let delta = (target_world * target_pose).inverse() * (owner_world * owner_pose);
    let (x, y, z) = delta.rotation.euler_angles();

    let angles = if snap_orthogonal {
        EulerAngles::new(snap(x), snap(y), snap(z))
    } else {
        EulerAngles::new(x, y, z)
    };

    if angles.is_zero() { None } else { Some(angles) }
}

/// Round to the nearest multiple of π/2.
fn snap(angle: f32) -> f32 {
    (angle / FRAC_PI_2).round() * FRAC_PI_2
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Translation3, UnitQuaternion, Vector3};
    use std::f32::consts::{FRAC_PI_2, PI};

    fn rotated(axis: Vector3<f32>, angle: f32) -> Isometry3<f32> {
        Isometry3::from_parts(
            Translation3::identity(),
            UnitQuaternion::from_scaled_axis(axis.normalize() * angle),
        )
    }

    fn translated(x: f32, y: f32, z: f32) -> Isometry3<f32> {
        Isometry3::translation(x, y, z)
    }

    #[test]
    fn identity_transforms_need_no_offset() {
        let id = Isometry3::identity();
        assert_eq!(rotation_offset(&id, &id, &id, &id, false), None);
        assert_eq!(rotation_offset(&id, &id, &id, &id, true), None);
    }

    #[test]
    fn identical_transforms_need_no_offset() {
        // Same world and pose on both sides, rotation nowhere near zero.
        let world = rotated(Vector3::new(1.0, 2.0, 3.0), 1.1);
        let pose = rotated(Vector3::new(-1.0, 0.5, 0.25), -0.7)
            * translated(0.3, 0.0, 1.2);
        assert_eq!(rotation_offset(&world, &pose, &world, &pose, false), None);
    }

    #[test]
    fn translation_only_difference_needs_no_offset() {
        let id = Isometry3::identity();
        let moved = translated(0.0, 3.0, 0.0);
        assert_eq!(rotation_offset(&moved, &id, &id, &id, false), None);
    }

    #[test]
    fn owner_rotation_shows_up_in_delta() {
        let id = Isometry3::identity();
        let owner_world = rotated(Vector3::x(), 0.4);
        let offset = rotation_offset(&owner_world, &id, &id, &id, false).unwrap();
        assert_relative_eq!(offset.x, 0.4, epsilon = 1e-6);
        assert_relative_eq!(offset.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(offset.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn delta_composes_world_and_pose() {
        // Armature yawed 90°, bone pose identity on the owner side.
        let id = Isometry3::identity();
        let owner_world = rotated(Vector3::z(), FRAC_PI_2);
        let offset = rotation_offset(&owner_world, &id, &id, &id, false).unwrap();
        assert_relative_eq!(offset.z, FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn target_rotation_is_inverted() {
        let id = Isometry3::identity();
        let target_world = rotated(Vector3::x(), 0.4);
        let offset = rotation_offset(&id, &id, &target_world, &id, false).unwrap();
        assert_relative_eq!(offset.x, -0.4, epsilon = 1e-6);
    }

    #[test]
    fn ninety_one_degrees_snaps_to_quarter_turn() {
        let id = Isometry3::identity();
        let owner_world = rotated(Vector3::x(), 91.0_f32.to_radians());

        let raw = rotation_offset(&owner_world, &id, &id, &id, false).unwrap();
        assert_relative_eq!(raw.x, 91.0_f32.to_radians(), epsilon = 1e-5);

        let snapped = rotation_offset(&owner_world, &id, &id, &id, true).unwrap();
        assert_relative_eq!(snapped.x, FRAC_PI_2, epsilon = 1e-6);
        assert_relative_eq!(snapped.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(snapped.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn snapped_components_are_quarter_turn_multiples() {
        let id = Isometry3::identity();
        let cases = [
            rotated(Vector3::new(1.0, 1.0, 0.0), 0.9),
            rotated(Vector3::new(0.2, -1.0, 0.5), 2.4),
            rotated(Vector3::y(), -1.3) * rotated(Vector3::x(), 0.8),
            rotated(Vector3::z(), PI - 0.05),
        ];
        for owner_world in &cases {
            let Some(offset) = rotation_offset(owner_world, &id, &id, &id, true) else {
                continue;
            };
            for component in offset.to_array() {
                let steps = component / FRAC_PI_2;
                assert_relative_eq!(steps, steps.round(), epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn snap_rounds_jitter_down_to_no_offset() {
        let id = Isometry3::identity();
        let owner_world = rotated(Vector3::x(), 0.01);
        assert!(rotation_offset(&owner_world, &id, &id, &id, false).is_some());
        assert_eq!(rotation_offset(&owner_world, &id, &id, &id, true), None);
    }

    #[test]
    fn gimbal_adjacent_pitch_still_decomposes() {
        // ±90° pitch is the ambiguous band for XYZ Euler extraction; the
        // solver returns the canonical decomposition without erroring.
        let id = Isometry3::identity();
        for angle in [FRAC_PI_2, -FRAC_PI_2, FRAC_PI_2 - 1e-4] {
            let owner_world = rotated(Vector3::y(), angle);
            let offset = rotation_offset(&owner_world, &id, &id, &id, false).unwrap();
            assert_relative_eq!(offset.y, angle, epsilon = 1e-3);
        }
    }

    #[test]
    fn components_stay_in_principal_range() {
        // Euler extraction yields values in [-π, π], so stored offsets never
        // need re-clamping after the solver.
        let id = Isometry3::identity();
        let owner_world = rotated(Vector3::z(), 3.0) * rotated(Vector3::x(), -2.5);
        let offset = rotation_offset(&owner_world, &id, &id, &id, false).unwrap();
        for component in offset.to_array() {
            assert!((-PI..=PI).contains(&component));
        }
    }

    #[test]
    fn equal_world_rotations_through_different_factors() {
        // Owner: rotation carried by the armature object. Target: the same
        // rotation carried by the bone pose. The world deltas cancel.
        let id = Isometry3::identity();
        let spin = rotated(Vector3::z(), 0.9);
        let offset = rotation_offset(&spin, &id, &id, &spin, true);
        assert_eq!(offset, None);
    }
}
