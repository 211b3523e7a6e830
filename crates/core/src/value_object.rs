//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**: two of them holding the same values are
//! the same value. A prefecture selection is a value object; users and items
//! are entities.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
