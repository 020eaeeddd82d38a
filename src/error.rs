//! Errors reported by type-erased set operations.
//!
//! Typed sets reject mismatched two-set operations at compile time. Once a
//! set is boxed as a [`DynSet`](crate::dynamic::DynSet), the concrete kinds
//! are only known at runtime and a mismatch surfaces as a [`SetError`].

use thiserror::Error;

/// Error returned when a two-set operation cannot be carried out.
///
/// # Examples
///
/// ```rust
/// use setwise::error::SetError;
///
/// let error = SetError::KindMismatch {
///     expected: "ordered",
///     found: "unordered",
/// };
/// assert!(error.is_kind_mismatch());
/// assert_eq!(
///     error.to_string(),
///     "cannot combine a set of kind `ordered` with a set of kind `unordered`"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SetError {
    /// The two sets differ in ordering, equality strategy or synchronization.
    #[error("cannot combine a set of kind `{expected}` with a set of kind `{found}`")]
    KindMismatch {
        /// Kind of the receiving set
        expected: &'static str,
        /// Kind of the argument set
        found: &'static str,
    },
}

impl SetError {
    /// Returns whether this is the `KindMismatch` variant.
    #[must_use]
    pub const fn is_kind_mismatch(&self) -> bool {
        matches!(self, Self::KindMismatch { .. })
    }
}
