//! Armature and pose-bone types.

use nalgebra::{Isometry3, Translation3, UnitQuaternion};

use marionette_core::config::{ArmatureConfig, BoneConfig};

use crate::constraint::ConstraintStack;

/// Build an isometry from a translation plus roll-pitch-yaw angles.
fn pose_to_isometry(position: [f32; 3], rotation: [f32; 3]) -> Isometry3<f32> {
    Isometry3::from_parts(
        Translation3::new(position[0], position[1], position[2]),
        UnitQuaternion::from_euler_angles(rotation[0], rotation[1], rotation[2]),
    )
}

// ---------------------------------------------------------------------------
// PoseBone
// ---------------------------------------------------------------------------

/// A bone in an armature's current pose.
#[derive(Debug, Clone)]
pub struct PoseBone {
    pub name: String,
    /// Pose transform in armature space.
    pub pose_matrix: Isometry3<f32>,
    pub constraints: ConstraintStack,
}

impl PoseBone {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pose_matrix: Isometry3::identity(),
            constraints: ConstraintStack::new(),
        }
    }

    #[must_use]
    pub fn with_pose(mut self, pose_matrix: Isometry3<f32>) -> Self {
        self.pose_matrix = pose_matrix;
        self
    }

    fn from_config(config: &BoneConfig) -> Self {
        Self::new(config.name.clone()).with_pose(pose_to_isometry(config.position, config.rotation))
    }
}

// ---------------------------------------------------------------------------
// Armature
// ---------------------------------------------------------------------------

/// A skeleton instance: object-level world transform plus pose bones.
///
/// Lookup is by bone name; an unknown name yields `None` rather than an
/// error, matching how the retargeting engine treats unresolved references.
#[derive(Debug, Clone)]
pub struct Armature {
    pub name: String,
    pub matrix_world: Isometry3<f32>,
    bones: Vec<PoseBone>,
}

impl Armature {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            matrix_world: Isometry3::identity(),
            bones: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_world(mut self, matrix_world: Isometry3<f32>) -> Self {
        self.matrix_world = matrix_world;
        self
    }

    #[must_use]
    pub fn with_bone(mut self, bone: PoseBone) -> Self {
        self.bones.push(bone);
        self
    }

    /// Build an armature from its configuration.
    #[must_use]
    pub fn from_config(config: &ArmatureConfig) -> Self {
        let mut armature = Armature::new(config.name.clone())
            .with_world(pose_to_isometry(config.position, config.rotation));
        for bone in &config.bones {
            armature = armature.with_bone(PoseBone::from_config(bone));
        }
        armature
    }

    #[must_use]
    pub fn bone(&self, name: &str) -> Option<&PoseBone> {
        self.bones.iter().find(|b| b.name == name)
    }

    pub fn bone_mut(&mut self, name: &str) -> Option<&mut PoseBone> {
        self.bones.iter_mut().find(|b| b.name == name)
    }

    /// The bone's world transform: armature world times bone pose.
    #[must_use]
    pub fn bone_world(&self, name: &str) -> Option<Isometry3<f32>> {
        self.bone(name).map(|b| self.matrix_world * b.pose_matrix)
    }

    pub fn bones(&self) -> impl Iterator<Item = &PoseBone> {
        self.bones.iter()
    }

    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
