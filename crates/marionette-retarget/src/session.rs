//! Session context shared by all mapping entries.

use marionette_armature::Armature;
use marionette_core::config::{RetargetConfig, SessionConfig};

/// The two armatures being mapped plus session-wide flags.
///
/// Passed explicitly to every mapping operation; there is no global state.
#[derive(Debug, Clone)]
pub struct Session {
    /// Armature whose bones carry the generated constraints.
    pub owner: Armature,
    /// Armature the constraints aim at.
    pub target: Armature,
    /// Compute a rotation offset automatically when a target bone is assigned.
    pub calc_offset: bool,
    /// Snap computed offsets to 90-degree increments.
    pub ortho_offset: bool,
    /// Whether generated constraints are active, or merely configured.
    pub preview: bool,
    /// Running count of selected entries. Maintained by
    /// [`BoneMapping::set_selected`](crate::BoneMapping::set_selected); the
    /// session never clamps it.
    pub selected_count: i32,
}

impl Session {
    /// A session over the given armatures with default flags.
    #[must_use]
    pub fn new(owner: Armature, target: Armature) -> Self {
        Self::with_flags(owner, target, SessionConfig::default())
    }

    #[must_use]
    pub fn with_flags(owner: Armature, target: Armature, flags: SessionConfig) -> Self {
        Self {
            owner,
            target,
            calc_offset: flags.calc_offset,
            ortho_offset: flags.ortho_offset,
            preview: flags.preview,
            selected_count: 0,
        }
    }

    /// Build both armatures and the flags from a configuration.
    #[must_use]
    pub fn from_config(config: &RetargetConfig) -> Self {
        Self::with_flags(
            Armature::from_config(&config.owner),
            Armature::from_config(&config.target),
            config.session,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
