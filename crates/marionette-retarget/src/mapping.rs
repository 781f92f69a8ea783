//! One bone-pair mapping and its constraint-sync state machine.

use log::warn;

use marionette_armature::{ConstraintKind, ConstraintParams, ConstraintTarget};
use marionette_core::types::{AxisMask, EulerAngles};
use marionette_solver::rotation_offset;

use crate::session::Session;

/// Maps one owner bone onto one target bone.
///
/// Every setter synchronously updates the generated constraints on the owner
/// bone. An entry is *valid* once both bone names resolve in their armatures;
/// operations that need an unresolved owner bone are no-ops, so flags can be
/// toggled freely before bones are chosen.
#[derive(Debug, Clone, PartialEq)]
pub struct BoneMapping {
    owner: String,
    target: String,
    has_rot_offset: bool,
    has_loc_copy: bool,
    has_ik: bool,
    offset: EulerAngles,
    loc_axis: AxisMask,
    ik_influence: f32,
    selected: bool,
}

impl BoneMapping {
    /// An unbound entry: no bones, all optional features off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            owner: String::new(),
            target: String::new(),
            has_rot_offset: false,
            has_loc_copy: false,
            has_ik: false,
            offset: EulerAngles::ZERO,
            loc_axis: AxisMask::ALL,
            ik_influence: 1.0,
            selected: false,
        }
    }

    // -- accessors --

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub const fn offset(&self) -> EulerAngles {
        self.offset
    }

    #[must_use]
    pub const fn loc_axis(&self) -> AxisMask {
        self.loc_axis
    }

    #[must_use]
    pub const fn ik_influence(&self) -> f32 {
        self.ik_influence
    }

    #[must_use]
    pub const fn has_rot_offset(&self) -> bool {
        self.has_rot_offset
    }

    #[must_use]
    pub const fn has_loc_copy(&self) -> bool {
        self.has_loc_copy
    }

    #[must_use]
    pub const fn has_ik(&self) -> bool {
        self.has_ik
    }

    #[must_use]
    pub const fn selected(&self) -> bool {
        self.selected
    }

    /// Both bone names resolve in their armatures.
    #[must_use]
    pub fn is_valid(&self, session: &Session) -> bool {
        session.owner.bone(&self.owner).is_some() && session.target.bone(&self.target).is_some()
    }

    // -- state machine --

    /// Commit a new owner bone.
    ///
    /// The existing constraints were authored for the previous owner bone,
    /// so they are removed from it before the name changes hands; clearing
    /// after the commit would strand them there.
    pub fn set_owner(&mut self, session: &mut Session, name: impl Into<String>) {
        Self::clear_bone(session, &self.owner);
        self.owner = name.into();

        if let Some(bone) = session.owner.bone(&self.owner) {
            let foreign = bone.constraints.foreign_count();
            if foreign > 0 {
                warn!(
                    "marionette-retarget: bone '{}' carries {foreign} foreign constraint(s); \
                     mixing them with generated constraints can corrupt baked results",
                    self.owner
                );
            }
        }

        self.apply(session);
    }

    /// Commit a new target bone.
    ///
    /// When the session asks for it and the entry is valid, the rotation
    /// offset is derived from the bones' current world transforms; a
    /// non-zero result is stored and enables the offset feature.
    pub fn set_target(&mut self, session: &mut Session, name: impl Into<String>) {
        self.target = name.into();

        if session.calc_offset {
            let bones = (
                session.owner.bone(&self.owner),
                session.target.bone(&self.target),
            );
            if let (Some(owner_bone), Some(target_bone)) = bones {
                let computed = rotation_offset(
                    &session.owner.matrix_world,
                    &owner_bone.pose_matrix,
                    &session.target.matrix_world,
                    &target_bone.pose_matrix,
                    session.ortho_offset,
                );
                if let Some(angles) = computed {
                    self.offset = angles;
                    self.has_rot_offset = true;
                }
            }
        }

        self.apply(session);
    }

    /// Toggle the rotation-offset feature.
    pub fn set_rotation_offset(&mut self, session: &mut Session, enabled: bool) {
        self.has_rot_offset = enabled;
        self.sync_rot_offset(session);
    }

    /// Write new offset angles, clamped to [-π, π] per component.
    pub fn set_offset(&mut self, session: &mut Session, angles: EulerAngles) {
        self.offset = angles.clamped();
        self.sync_rot_offset(session);
    }

    /// Toggle the location-copy feature.
    pub fn set_location_copy(&mut self, session: &mut Session, enabled: bool) {
        self.has_loc_copy = enabled;
        self.sync_loc_copy(session);
    }

    /// Write the per-axis location mask.
    pub fn set_location_axes(&mut self, session: &mut Session, axes: AxisMask) {
        self.loc_axis = axes;
        self.sync_loc_copy(session);
    }

    /// Toggle the IK feature.
    pub fn set_ik(&mut self, session: &mut Session, enabled: bool) {
        self.has_ik = enabled;
        self.sync_ik(session);
    }

    /// Write the IK influence, clamped to [0, 1].
    pub fn set_ik_influence(&mut self, session: &mut Session, influence: f32) {
        self.ik_influence = influence.clamp(0.0, 1.0);
        self.sync_ik(session);
    }

    /// Flip the selection flag, keeping the session's running count exact.
    pub fn set_selected(&mut self, session: &mut Session, selected: bool) {
        if self.selected != selected {
            self.selected = selected;
            session.selected_count += if selected { 1 } else { -1 };
        }
    }

    /// Full re-sync: rotation copy, rotation offset, location copy, IK, in
    /// that fixed order. No-op while the owner bone is unresolved.
    pub fn apply(&self, session: &mut Session) {
        if session.owner.bone(&self.owner).is_none() {
            return;
        }
        self.sync_rot_copy(session);
        self.sync_rot_offset(session);
        self.sync_loc_copy(session);
        self.sync_ik(session);
    }

    /// Remove all four generated constraint kinds from the owner bone.
    pub fn clear(&self, session: &mut Session) {
        Self::clear_bone(session, &self.owner);
    }

    /// Remove all four generated constraint kinds from an explicit bone.
    fn clear_bone(session: &mut Session, bone_name: &str) {
        if let Some(bone) = session.owner.bone_mut(bone_name) {
            for kind in ConstraintKind::ALL {
                bone.constraints.remove_kind(kind);
            }
        }
    }

    // -- per-constraint sync --

    fn constraint_target(&self, session: &Session) -> ConstraintTarget {
        ConstraintTarget::new(session.target.name.clone(), self.target.clone())
    }

    /// The base rotation copy always exists on a resolved owner bone; it is
    /// disabled, never removed, while the entry is invalid or preview is off.
    fn sync_rot_copy(&self, session: &mut Session) {
        let enabled = self.is_valid(session) && session.preview;
        let target = self.constraint_target(session);
        let Some(bone) = session.owner.bone_mut(&self.owner) else {
            return;
        };
        let constraint = bone.constraints.ensure(ConstraintKind::CopyRotation);
        constraint.target = Some(target);
        constraint.enabled = enabled;
    }

    fn sync_rot_offset(&self, session: &mut Session) {
        let enabled = self.is_valid(session) && session.preview;
        let target = self.constraint_target(session);
        let Some(bone) = session.owner.bone_mut(&self.owner) else {
            return;
        };
        if self.has_rot_offset {
            let constraint = bone.constraints.ensure(ConstraintKind::RotationOffset);
            if let ConstraintParams::RotationOffset { angles } = &mut constraint.params {
                *angles = self.offset;
            }
            constraint.target = Some(target);
            constraint.enabled = enabled;
        } else {
            bone.constraints.remove_kind(ConstraintKind::RotationOffset);
        }
    }

    fn sync_loc_copy(&self, session: &mut Session) {
        let enabled = self.is_valid(session) && session.preview;
        let target = self.constraint_target(session);
        let Some(bone) = session.owner.bone_mut(&self.owner) else {
            return;
        };
        if self.has_loc_copy {
            let constraint = bone.constraints.ensure(ConstraintKind::CopyLocation);
            if let ConstraintParams::CopyLocation { axes } = &mut constraint.params {
                *axes = self.loc_axis;
            }
            constraint.target = Some(target);
            constraint.enabled = enabled;
        } else {
            bone.constraints.remove_kind(ConstraintKind::CopyLocation);
        }
    }

    fn sync_ik(&self, session: &mut Session) {
        let enabled = self.is_valid(session) && session.preview;
        let target = self.constraint_target(session);
        let Some(bone) = session.owner.bone_mut(&self.owner) else {
            return;
        };
        if self.has_ik {
            let constraint = bone.constraints.ensure(ConstraintKind::Ik);
            // Chain length and tail mode keep their creation defaults; only
            // the influence tracks the mapping.
            if let ConstraintParams::Ik { influence, .. } = &mut constraint.params {
                *influence = self.ik_influence;
            }
            constraint.target = Some(target);
            constraint.enabled = enabled;
        } else {
            bone.constraints.remove_kind(ConstraintKind::Ik);
        }
    }
}

impl Default for BoneMapping {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
