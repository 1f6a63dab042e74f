//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// A pollution report keeps its identity while its verification status moves
/// between `Pending`, `Verified` and `Rejected`.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
