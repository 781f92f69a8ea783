//! In-memory armature model for Marionette retargeting.
//!
//! Mirrors the scene-graph surface a host animation package exposes to the
//! retargeting engine: pose-bone lookup by name, world/pose transforms, and
//! a per-bone constraint stack with add/remove/lookup-by-name. A bridge to a
//! real host translates its property events into calls on these types.

pub mod constraint;
pub mod types;

pub use constraint::{
    Constraint, ConstraintKind, ConstraintParams, ConstraintStack, ConstraintTarget,
};
pub use types::{Armature, PoseBone};
