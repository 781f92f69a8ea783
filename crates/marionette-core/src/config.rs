use std::collections::HashSet;
use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Session-wide retargeting flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Compute a rotation offset automatically when a target bone is assigned.
    #[serde(default)]
    pub calc_offset: bool,

    /// Snap computed offsets to 90-degree increments.
    #[serde(default)]
    pub ortho_offset: bool,

    /// Whether generated constraints are active, or merely configured.
    #[serde(default = "default_true")]
    pub preview: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            calc_offset: false,
            ortho_offset: false,
            preview: true,
        }
    }
}

// ---------------------------------------------------------------------------
// BoneConfig / ArmatureConfig
// ---------------------------------------------------------------------------

/// One pose bone: name plus its current pose transform within the armature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneConfig {
    pub name: String,
    /// Translation `[x, y, z]`.
    #[serde(default)]
    pub position: [f32; 3],
    /// Rotation `[roll, pitch, yaw]` in radians.
    #[serde(default)]
    pub rotation: [f32; 3],
}

/// An armature: object-level world transform plus its pose bones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmatureConfig {
    pub name: String,
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default)]
    pub bones: Vec<BoneConfig>,
}

// ---------------------------------------------------------------------------
// MappingConfig
// ---------------------------------------------------------------------------

/// One bone-pair mapping row.
///
/// Optional fields enable the corresponding constraint feature; absence
/// leaves the feature off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Bone on the owner armature that carries the generated constraints.
    pub owner: String,
    /// Bone on the target armature the constraints aim at. May be empty for
    /// a not-yet-bound row.
    #[serde(default)]
    pub target: String,
    /// Extra rotation applied after the world-space rotation copy.
    #[serde(default)]
    pub rotation_offset: Option<[f32; 3]>,
    /// Per-axis world-location copy.
    #[serde(default)]
    pub location_axes: Option<[bool; 3]>,
    /// IK correction influence in [0, 1].
    #[serde(default)]
    pub ik_influence: Option<f32>,
}

// ---------------------------------------------------------------------------
// RetargetConfig
// ---------------------------------------------------------------------------

/// Complete retargeting setup loaded from TOML: two armatures, session
/// flags, and the bone mappings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetargetConfig {
    #[serde(default)]
    pub session: SessionConfig,
    pub owner: ArmatureConfig,
    pub target: ArmatureConfig,
    #[serde(default)]
    pub mappings: Vec<MappingConfig>,
}

impl RetargetConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (armature, label) in [(&self.owner, "owner"), (&self.target, "target")] {
            if armature.name.is_empty() {
                return Err(ConfigError::EmptyBoneName {
                    context: format!("{label}.name"),
                });
            }
            for (i, bone) in armature.bones.iter().enumerate() {
                if bone.name.is_empty() {
                    return Err(ConfigError::EmptyBoneName {
                        context: format!("{label}.bones[{i}]"),
                    });
                }
            }
        }

        let mut owners = HashSet::new();
        for (i, mapping) in self.mappings.iter().enumerate() {
            if mapping.owner.is_empty() {
                return Err(ConfigError::EmptyBoneName {
                    context: format!("mappings[{i}].owner"),
                });
            }
            if !owners.insert(mapping.owner.as_str()) {
                return Err(ConfigError::DuplicateOwner(mapping.owner.clone()));
            }
            if let Some(offset) = mapping.rotation_offset {
                for value in offset {
                    if !(-PI..=PI).contains(&value) {
                        return Err(ConfigError::OffsetOutOfRange {
                            owner: mapping.owner.clone(),
                            value,
                        });
                    }
                }
            }
            if let Some(influence) = mapping.ik_influence {
                if !(0.0..=1.0).contains(&influence) {
                    return Err(ConfigError::InfluenceOutOfRange {
                        owner: mapping.owner.clone(),
                        value: influence,
                    });
                }
            }
        }
        Ok(())
    }

    /// Parse from a TOML string and validate.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file and validate.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
