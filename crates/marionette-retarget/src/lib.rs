//! Bone-mapping engine for Marionette.
//!
//! # Architecture
//!
//! ```text
//! RetargetConfig ──► Session + MappingList ──► BoneMapping ──► constraint stacks
//! ```
//!
//! A [`Session`] holds the two armatures being mapped and the session-wide
//! flags. Each [`BoneMapping`] governs one owner bone: its setters run the
//! configuration state machine synchronously, keeping the owner bone's
//! generated constraint stack in step with the mapping's fields. The
//! [`MappingList`] owns the entries and enforces that each owner bone is
//! mapped at most once.

pub mod list;
pub mod mapping;
pub mod session;

pub use list::MappingList;
pub use mapping::BoneMapping;
pub use session::Session;
