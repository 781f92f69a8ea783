//! Armature and session fixtures.

use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

use marionette_armature::{Armature, PoseBone};
use marionette_retarget::Session;

/// Bones of the owner-side fixture rig.
pub const OWNER_BONES: [&str; 4] = ["hand.L", "forearm.L", "foot.L", "spine"];

/// Bones of the target-side fixture rig.
pub const TARGET_BONES: [&str; 4] = ["Hand_L", "Forearm_L", "Foot_L", "Spine"];

/// An isometry from a translation plus roll-pitch-yaw angles.
#[must_use]
pub fn posed(position: [f32; 3], rotation: [f32; 3]) -> Isometry3<f32> {
    Isometry3::from_parts(
        Translation3::new(position[0], position[1], position[2]),
        UnitQuaternion::from_euler_angles(rotation[0], rotation[1], rotation[2]),
    )
}

/// A pure rotation of `angle` radians about `axis`.
#[must_use]
pub fn rotated_about(axis: Vector3<f32>, angle: f32) -> Isometry3<f32> {
    Isometry3::from_parts(
        Translation3::identity(),
        UnitQuaternion::from_scaled_axis(axis.normalize() * angle),
    )
}

/// The owner-side rig, all bones at identity pose.
#[must_use]
pub fn owner_rig() -> Armature {
    OWNER_BONES
        .iter()
        .fold(Armature::new("rig_dst"), |armature, name| {
            armature.with_bone(PoseBone::new(*name))
        })
}

/// The target-side rig, all bones at identity pose.
#[must_use]
pub fn target_rig() -> Armature {
    TARGET_BONES
        .iter()
        .fold(Armature::new("rig_src"), |armature, name| {
            armature.with_bone(PoseBone::new(*name))
        })
}

/// A session over the two fixture rigs with default flags.
#[must_use]
pub fn humanoid_session() -> Session {
    Session::new(owner_rig(), target_rig())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
