//! Integration test: full retargeting flow over posed rigs.
//!
//! Builds a source/target armature pair, maps bones with automatic offset
//! calculation, and checks that:
//! 1. Assigning a target with differing world orientation stores a snapped
//!    offset and enables the offset constraint
//! 2. Reassigning the owner bone migrates the whole stack, leaving the old
//!    bone clean
//! 3. Preview gating disables every generated constraint without removing any
//! 4. Removing an entry from the list leaves no constraints behind

use std::f32::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use nalgebra::Vector3;

use marionette_armature::ConstraintKind;
use marionette_retarget::{MappingList, Session};
use marionette_test_utils::{humanoid_session, rotated_about};

fn generated_kinds(session: &Session, bone: &str) -> Vec<ConstraintKind> {
    session
        .owner
        .bone(bone)
        .unwrap()
        .constraints
        .iter()
        .filter_map(|c| ConstraintKind::from_name(&c.name))
        .collect()
}

#[test]
fn full_retarget_flow() {
    let mut session = humanoid_session();
    session.calc_offset = true;
    session.ortho_offset = true;

    // The owner-side hand is posed at 91° about X; the target bone is at
    // rest. Snapping turns the imprecise pose into a quarter turn.
    session.owner.bone_mut("hand.L").unwrap().pose_matrix =
        rotated_about(Vector3::x(), 91.0_f32.to_radians());

    let mut list = MappingList::new();
    {
        let entry = list.add(&mut session, "hand.L").unwrap();
        entry.set_target(&mut session, "Hand_L");
        assert!(entry.has_rot_offset());
        assert_relative_eq!(entry.offset().x, FRAC_PI_2, epsilon = 1e-6);

        entry.set_ik(&mut session, true);
        entry.set_ik_influence(&mut session, 0.5);
        entry.set_location_copy(&mut session, true);
    }

    assert_eq!(
        generated_kinds(&session, "hand.L"),
        vec![
            ConstraintKind::CopyRotation,
            ConstraintKind::RotationOffset,
            ConstraintKind::Ik,
            ConstraintKind::CopyLocation,
        ]
    );

    // Preview off: everything stays, nothing is active.
    list.set_preview(&mut session, false);
    for constraint in session.owner.bone("hand.L").unwrap().constraints.iter() {
        assert!(!constraint.enabled);
    }
    list.set_preview(&mut session, true);

    // Re-aim the entry at a different owner bone.
    list.get_mut(0)
        .unwrap()
        .set_owner(&mut session, "forearm.L");
    assert!(generated_kinds(&session, "hand.L").is_empty());
    assert_eq!(generated_kinds(&session, "forearm.L").len(), 4);

    // Dropping the entry cleans the armature completely.
    list.remove(&mut session, 0).unwrap();
    assert!(generated_kinds(&session, "forearm.L").is_empty());
    assert!(list.is_empty());
}

#[test]
fn selection_counter_across_entries() {
    let mut session = humanoid_session();
    let mut list = MappingList::new();
    for owner in ["hand.L", "forearm.L", "foot.L"] {
        list.add(&mut session, owner).unwrap();
    }

    for index in 0..3 {
        list.get_mut(index)
            .unwrap()
            .set_selected(&mut session, true);
    }
    list.get_mut(1).unwrap().set_selected(&mut session, false);
    assert_eq!(session.selected_count, 2);
}

#[test]
fn identical_pose_needs_no_offset() {
    let mut session = humanoid_session();
    session.calc_offset = true;

    let mut list = MappingList::new();
    {
        let entry = list.add(&mut session, "hand.L").unwrap();
        entry.set_target(&mut session, "Hand_L");
        assert!(!entry.has_rot_offset());
    }
    assert_eq!(
        generated_kinds(&session, "hand.L"),
        vec![ConstraintKind::CopyRotation]
    );
}
