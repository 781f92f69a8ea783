//! Bone constraints with enum-keyed identity.
//!
//! Each generated constraint kind has exactly one fixed name, so a bone can
//! carry at most one constraint per kind and re-configuration updates the
//! existing constraint in place instead of duplicating it.

use marionette_core::types::{AxisMask, EulerAngles};

// ---------------------------------------------------------------------------
// ConstraintKind
// ---------------------------------------------------------------------------

/// The four constraint kinds the retargeting engine generates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// World-space rotation copy from the target bone. Always present on a
    /// mapped bone; disabled rather than removed when preview is off.
    CopyRotation,
    /// Extra rotation applied on top of the copied result.
    RotationOffset,
    /// World-space location copy, per-axis.
    CopyLocation,
    /// IK correction toward the target bone.
    Ik,
}

impl ConstraintKind {
    /// All kinds, in the fixed sync order.
    pub const ALL: [Self; 4] = [
        Self::CopyRotation,
        Self::RotationOffset,
        Self::CopyLocation,
        Self::Ik,
    ];

    /// The fixed constraint name for this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CopyRotation => "MARI_ROT_COPY",
            Self::RotationOffset => "MARI_ROT_OFFSET",
            Self::CopyLocation => "MARI_LOC_COPY",
            Self::Ik => "MARI_IK",
        }
    }

    /// Reverse lookup from a fixed constraint name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

// ---------------------------------------------------------------------------
// ConstraintTarget
// ---------------------------------------------------------------------------

/// The bone a constraint aims at: armature object plus bone name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintTarget {
    pub armature: String,
    pub bone: String,
}

impl ConstraintTarget {
    #[must_use]
    pub fn new(armature: impl Into<String>, bone: impl Into<String>) -> Self {
        Self {
            armature: armature.into(),
            bone: bone.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// ConstraintParams
// ---------------------------------------------------------------------------

/// Kind-specific constraint parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintParams {
    CopyRotation,
    /// Rotation channel only; evaluated in the target armature's space.
    RotationOffset { angles: EulerAngles },
    CopyLocation { axes: AxisMask },
    Ik {
        influence: f32,
        chain_length: u32,
        use_tail: bool,
    },
}

impl ConstraintParams {
    /// Creation defaults for a kind: IK solves a two-bone chain from the
    /// bone's head, the other kinds start neutral.
    #[must_use]
    pub const fn defaults_for(kind: ConstraintKind) -> Self {
        match kind {
            ConstraintKind::CopyRotation => Self::CopyRotation,
            ConstraintKind::RotationOffset => Self::RotationOffset {
                angles: EulerAngles::ZERO,
            },
            ConstraintKind::CopyLocation => Self::CopyLocation {
                axes: AxisMask::ALL,
            },
            ConstraintKind::Ik => Self::Ik {
                influence: 1.0,
                chain_length: 2,
                use_tail: false,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Constraint
// ---------------------------------------------------------------------------

/// A single constraint instance on a pose bone.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub name: String,
    pub enabled: bool,
    /// Host-UI expansion flag; generated constraints start collapsed.
    pub show_expanded: bool,
    pub target: Option<ConstraintTarget>,
    pub params: ConstraintParams,
}

impl Constraint {
    /// A new constraint with the kind's fixed name and creation defaults.
    #[must_use]
    pub fn new(kind: ConstraintKind) -> Self {
        Self::named(kind, kind.name())
    }

    /// A new constraint with an explicit name (foreign constraints in tests,
    /// host-authored constraints in bridged scenes).
    #[must_use]
    pub fn named(kind: ConstraintKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            enabled: true,
            show_expanded: false,
            target: None,
            params: ConstraintParams::defaults_for(kind),
        }
    }

    /// Whether this constraint carries one of the fixed generated names.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        ConstraintKind::from_name(&self.name).is_some()
    }
}

// ---------------------------------------------------------------------------
// ConstraintStack
// ---------------------------------------------------------------------------

/// The ordered constraint list of one pose bone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintStack {
    items: Vec<Constraint>,
}

impl ConstraintStack {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Constraint> {
        self.items.iter()
    }

    /// Append a constraint as-is. The generated kinds should go through
    /// [`ensure`](Self::ensure) instead to keep the one-per-kind invariant.
    pub fn push(&mut self, constraint: Constraint) {
        self.items.push(constraint);
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Constraint> {
        self.items.iter().find(|c| c.name == name)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Constraint> {
        self.items.iter_mut().find(|c| c.name == name)
    }

    /// The generated constraint of `kind`, if present.
    #[must_use]
    pub fn find_kind(&self, kind: ConstraintKind) -> Option<&Constraint> {
        self.find(kind.name())
    }

    /// The generated constraint of `kind`, created with defaults on first
    /// access. Lookup is by the kind's fixed name, so repeated calls update
    /// the same constraint.
    pub fn ensure(&mut self, kind: ConstraintKind) -> &mut Constraint {
        let index = match self.items.iter().position(|c| c.name == kind.name()) {
            Some(index) => index,
            None => {
                self.items.push(Constraint::new(kind));
                self.items.len() - 1
            }
        };
        &mut self.items[index]
    }

    /// Remove the generated constraint of `kind`. Absence is not an error.
    pub fn remove_kind(&mut self, kind: ConstraintKind) -> bool {
        let before = self.items.len();
        self.items.retain(|c| c.name != kind.name());
        self.items.len() != before
    }

    /// Number of constraints not named by the generated-kind table.
    #[must_use]
    pub fn foreign_count(&self) -> usize {
        self.items.iter().filter(|c| !c.is_generated()).count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_are_distinct() {
        for a in ConstraintKind::ALL {
            for b in ConstraintKind::ALL {
                if a != b {
                    assert_ne!(a.name(), b.name());
                }
            }
        }
    }

    #[test]
    fn kind_from_name_roundtrip() {
        for kind in ConstraintKind::ALL {
            assert_eq!(ConstraintKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ConstraintKind::from_name("SomethingElse"), None);
    }

    #[test]
    fn new_constraint_defaults() {
        let c = Constraint::new(ConstraintKind::Ik);
        assert_eq!(c.name, "MARI_IK");
        assert!(c.enabled);
        assert!(!c.show_expanded);
        assert!(c.target.is_none());
        assert_eq!(
            c.params,
            ConstraintParams::Ik {
                influence: 1.0,
                chain_length: 2,
                use_tail: false
            }
        );
    }

    #[test]
    fn location_defaults_copy_all_axes() {
        let c = Constraint::new(ConstraintKind::CopyLocation);
        assert_eq!(
            c.params,
            ConstraintParams::CopyLocation {
                axes: AxisMask::ALL
            }
        );
    }

    #[test]
    fn offset_defaults_zero_angles() {
        let c = Constraint::new(ConstraintKind::RotationOffset);
        assert_eq!(
            c.params,
            ConstraintParams::RotationOffset {
                angles: EulerAngles::ZERO
            }
        );
    }

    #[test]
    fn ensure_creates_once() {
        let mut stack = ConstraintStack::new();
        assert!(stack.is_empty());

        stack.ensure(ConstraintKind::CopyRotation).enabled = false;
        assert_eq!(stack.len(), 1);

        // Second ensure finds the same constraint, state intact.
        let c = stack.ensure(ConstraintKind::CopyRotation);
        assert!(!c.enabled);
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn ensure_distinct_kinds_coexist() {
        let mut stack = ConstraintStack::new();
        for kind in ConstraintKind::ALL {
            stack.ensure(kind);
        }
        assert_eq!(stack.len(), 4);
    }

    #[test]
    fn remove_kind_present_and_absent() {
        let mut stack = ConstraintStack::new();
        stack.ensure(ConstraintKind::Ik);
        assert!(stack.remove_kind(ConstraintKind::Ik));
        assert!(!stack.remove_kind(ConstraintKind::Ik));
        assert!(stack.find_kind(ConstraintKind::Ik).is_none());
    }

    #[test]
    fn find_by_name() {
        let mut stack = ConstraintStack::new();
        stack.ensure(ConstraintKind::CopyLocation);
        assert!(stack.find("MARI_LOC_COPY").is_some());
        assert!(stack.find("MARI_IK").is_none());
    }

    #[test]
    fn foreign_count_ignores_generated() {
        let mut stack = ConstraintStack::new();
        stack.ensure(ConstraintKind::CopyRotation);
        assert_eq!(stack.foreign_count(), 0);

        stack.push(Constraint::named(
            ConstraintKind::CopyRotation,
            "SomeOtherTool",
        ));
        assert_eq!(stack.foreign_count(), 1);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn foreign_constraint_survives_remove_kind() {
        let mut stack = ConstraintStack::new();
        stack.push(Constraint::named(ConstraintKind::Ik, "LegacyIK"));
        stack.ensure(ConstraintKind::Ik);
        assert!(stack.remove_kind(ConstraintKind::Ik));
        assert_eq!(stack.len(), 1);
        assert!(stack.find("LegacyIK").is_some());
    }

    #[test]
    fn target_construction() {
        let t = ConstraintTarget::new("rig_src", "Hand_L");
        assert_eq!(t.armature, "rig_src");
        assert_eq!(t.bone, "Hand_L");
    }
}
