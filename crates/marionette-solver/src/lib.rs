//! Rotation-offset solver.
//!
//! Given the current world-space pose of an owner bone and a target bone,
//! derives the rotational delta the offset constraint must apply so that the
//! owner's resulting world orientation matches the target's after the
//! rotation copy.

pub mod offset;

pub use offset::rotation_offset;
