//! Shared test fixtures for Marionette crates.
//!
//! Provides reusable helpers for building armature pairs, posed bones, and
//! retargeting sessions.

pub mod rigs;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use rigs::{humanoid_session, owner_rig, posed, rotated_about, target_rig};
