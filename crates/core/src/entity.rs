//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Records that only *reference* an entity (an order pointing at an item, for
/// instance) hold its `Id`, never the entity itself.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
