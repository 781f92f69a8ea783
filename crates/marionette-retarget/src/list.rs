//! Owning container for mapping entries.

use marionette_core::config::RetargetConfig;
use marionette_core::error::MappingError;

use crate::mapping::BoneMapping;
use crate::session::Session;

/// All mapping entries of a session.
///
/// The list, not the entries, enforces that every owner bone is governed by
/// at most one entry, and that an entry's constraints are cleared from the
/// live armature before the entry is dropped.
#[derive(Debug, Clone, Default)]
pub struct MappingList {
    entries: Vec<BoneMapping>,
}

impl MappingList {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BoneMapping> {
        self.entries.iter()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&BoneMapping> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut BoneMapping> {
        self.entries.get_mut(index)
    }

    /// Add an entry for `owner` and run its initial sync.
    ///
    /// # Errors
    ///
    /// `OwnerAlreadyMapped` if another entry already governs that bone name.
    pub fn add(
        &mut self,
        session: &mut Session,
        owner: impl Into<String>,
    ) -> Result<&mut BoneMapping, MappingError> {
        let owner = owner.into();
        if self.entries.iter().any(|entry| entry.owner() == owner) {
            return Err(MappingError::OwnerAlreadyMapped(owner));
        }

        let mut entry = BoneMapping::new();
        entry.set_owner(session, owner);
        self.entries.push(entry);
        let index = self.entries.len() - 1;
        Ok(&mut self.entries[index])
    }

    /// Drop the entry at `index`, clearing its constraints from the armature
    /// first so nothing is left behind outside the list's tracking. The
    /// selection counter is adjusted through the entry's own setter.
    pub fn remove(&mut self, session: &mut Session, index: usize) -> Option<BoneMapping> {
        if index >= self.entries.len() {
            return None;
        }
        let mut entry = self.entries.remove(index);
        entry.set_selected(session, false);
        entry.clear(session);
        Some(entry)
    }

    /// Re-sync every entry, in list order.
    pub fn apply_all(&self, session: &mut Session) {
        for entry in &self.entries {
            entry.apply(session);
        }
    }

    /// Remove every entry's constraints, keeping the entries.
    pub fn clear_all(&self, session: &mut Session) {
        for entry in &self.entries {
            entry.clear(session);
        }
    }

    /// Flip the session-wide preview flag and re-sync all entries so the
    /// enabled state of every generated constraint follows it.
    pub fn set_preview(&self, session: &mut Session, preview: bool) {
        session.preview = preview;
        self.apply_all(session);
    }

    /// Build the list from a validated configuration.
    ///
    /// Feature fields are committed before the target bone so that
    /// assign-time offset calculation (when the session asks for it) sees
    /// the final flags.
    ///
    /// # Errors
    ///
    /// `OwnerAlreadyMapped` on duplicate owner bones; a config that passed
    /// [`RetargetConfig::validate`] cannot trigger this.
    pub fn from_config(
        session: &mut Session,
        config: &RetargetConfig,
    ) -> Result<Self, MappingError> {
        let mut list = Self::new();
        for mapping in &config.mappings {
            let entry = list.add(session, mapping.owner.clone())?;
            if let Some(angles) = mapping.rotation_offset {
                entry.set_offset(session, angles.into());
                entry.set_rotation_offset(session, true);
            }
            if let Some(axes) = mapping.location_axes {
                entry.set_location_axes(session, axes.into());
                entry.set_location_copy(session, true);
            }
            if let Some(influence) = mapping.ik_influence {
                entry.set_ik_influence(session, influence);
                entry.set_ik(session, true);
            }
            entry.set_target(session, mapping.target.clone());
        }
        Ok(list)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
