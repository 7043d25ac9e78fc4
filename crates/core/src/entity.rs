//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Entities that have not been persisted yet have no identity, so the
/// identifier is optional.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier, if one has been assigned.
    fn id(&self) -> Option<&Self::Id>;

    /// Whether storage has assigned an identity to this entity.
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
