//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity; two instances holding the same values are
/// the same value. They are immutable: to "change" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct DocumentNumber(i32);
///
/// impl ValueObject for DocumentNumber {}
///
/// assert_eq!(DocumentNumber(109999), DocumentNumber(109999));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
