//! Type-erased sets.
//!
//! [`DynSet`] is an object-safe view of the set contract, implemented for
//! every [`Set`] whose element type is `Clone`. It lets sets of different
//! orderings, strategies and synchronization live behind one
//! `Box<dyn DynSet<T>>`, at the cost of checking two-set operations at
//! runtime: combining sets of different concrete kinds yields
//! [`SetError::KindMismatch`] instead of a compile error.
//!
//! # Examples
//!
//! ```rust
//! use setwise::dynamic::DynSet;
//! use setwise::store::{OrderedStore, UnorderedStore};
//!
//! let mut ordered: Box<dyn DynSet<i32>> = Box::new(OrderedStore::<i32>::new());
//! let unordered: Box<dyn DynSet<i32>> = Box::new(UnorderedStore::<i32>::new());
//!
//! ordered.add(1);
//! assert!(ordered.add_from(unordered.as_ref()).is_err());
//! ```

use std::any::{Any, type_name};
use std::borrow::Borrow;
use std::fmt;

use crate::error::SetError;
use crate::store::Set;

/// Object-safe set contract.
///
/// Elements are handed out by value; iteration clones them.
pub trait DynSet<T>: Send + Sync {
    /// Adds `element`, returning `false` if an equal element is present.
    fn add(&mut self, element: T) -> bool;

    /// Removes the element equal to `element`, returning `false` if absent.
    fn remove(&mut self, element: &T) -> bool;

    /// Returns `true` if an element equal to `element` is present.
    fn contains(&self, element: &T) -> bool;

    /// Returns `true` if every element of `elements` is present.
    fn contains_all(&self, elements: &[T]) -> bool;

    /// Returns `true` if at least one element of `elements` is present.
    fn contains_any(&self, elements: &[T]) -> bool;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the set holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every element.
    fn clear(&mut self);

    /// Returns an iterator over copies of the elements.
    fn iter(&self) -> Box<dyn Iterator<Item = T> + '_>;

    /// Copies the elements into a `Vec`.
    fn to_vec(&self) -> Vec<T>;

    /// Deep-copies the set behind a new box.
    fn clone_box(&self) -> Box<dyn DynSet<T>>;

    /// Name of the concrete set type.
    fn kind(&self) -> &'static str;

    /// Upcast used to recover the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Returns whether both sets hold the same elements.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::KindMismatch`] if `other` is a different kind of set.
    fn equal(&self, other: &dyn DynSet<T>) -> Result<bool, SetError>;

    /// Union: adds every element of `other` not already present.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::KindMismatch`] if `other` is a different kind of set.
    fn add_from(&mut self, other: &dyn DynSet<T>) -> Result<(), SetError>;

    /// Difference: removes every element also present in `other`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::KindMismatch`] if `other` is a different kind of set.
    fn remove_from(&mut self, other: &dyn DynSet<T>) -> Result<(), SetError>;

    /// Intersection: removes every element not present in `other`.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::KindMismatch`] if `other` is a different kind of set.
    fn retain_from(&mut self, other: &dyn DynSet<T>) -> Result<(), SetError>;
}

fn same_kind<'a, S: 'static, T>(
    receiver: &S,
    other: &'a dyn DynSet<T>,
) -> Result<&'a S, SetError>
where
    S: DynSet<T>,
{
    other.as_any().downcast_ref::<S>().ok_or_else(|| {
        let error = SetError::KindMismatch {
            expected: receiver.kind(),
            found: other.kind(),
        };
        tracing::debug!(%error, "rejected two-set operation");
        error
    })
}

impl<S, T> DynSet<T> for S
where
    S: Set<Element = T> + Send + Sync + 'static,
    T: Clone + 'static,
{
    fn add(&mut self, element: T) -> bool {
        Set::add(self, element)
    }

    fn remove(&mut self, element: &T) -> bool {
        Set::remove(self, element)
    }

    fn contains(&self, element: &T) -> bool {
        Set::contains(self, element)
    }

    fn contains_all(&self, elements: &[T]) -> bool {
        Set::contains_all(self, elements)
    }

    fn contains_any(&self, elements: &[T]) -> bool {
        Set::contains_any(self, elements)
    }

    fn len(&self) -> usize {
        Set::len(self)
    }

    fn clear(&mut self) {
        Set::clear(self);
    }

    fn iter(&self) -> Box<dyn Iterator<Item = T> + '_> {
        Box::new(Set::iter(self).map(|element| Borrow::<T>::borrow(&element).clone()))
    }

    fn to_vec(&self) -> Vec<T> {
        Set::to_vec(self)
    }

    fn clone_box(&self) -> Box<dyn DynSet<T>> {
        Box::new(self.clone())
    }

    fn kind(&self) -> &'static str {
        type_name::<S>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn equal(&self, other: &dyn DynSet<T>) -> Result<bool, SetError> {
        let other = same_kind(self, other)?;
        Ok(Set::equal(self, other))
    }

    fn add_from(&mut self, other: &dyn DynSet<T>) -> Result<(), SetError> {
        let other = same_kind(self, other)?;
        Set::add_from(self, other);
        Ok(())
    }

    fn remove_from(&mut self, other: &dyn DynSet<T>) -> Result<(), SetError> {
        let other = same_kind(self, other)?;
        Set::remove_from(self, other);
        Ok(())
    }

    fn retain_from(&mut self, other: &dyn DynSet<T>) -> Result<(), SetError> {
        let other = same_kind(self, other)?;
        Set::retain_from(self, other);
        Ok(())
    }
}

impl<T> Clone for Box<dyn DynSet<T>> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl<T: fmt::Debug> fmt::Debug for dyn DynSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for dyn DynSet<T> {
    /// Sets of different kinds are never equal.
    fn eq(&self, other: &Self) -> bool {
        self.equal(other).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equality::Structural;
    use crate::store::{OrderedStore, UnorderedStore};
    use rstest::rstest;

    fn ordered(elements: &[i32]) -> Box<dyn DynSet<i32>> {
        Box::new(elements.iter().copied().collect::<OrderedStore<i32>>())
    }

    fn unordered(elements: &[i32]) -> Box<dyn DynSet<i32>> {
        Box::new(elements.iter().copied().collect::<UnorderedStore<i32>>())
    }

    #[rstest]
    fn same_kind_operations_succeed() {
        let mut left = ordered(&[1, 2, 3]);
        let right = ordered(&[3, 4]);

        left.add_from(right.as_ref()).unwrap();
        assert_eq!(left.to_vec(), vec![1, 2, 3, 4]);

        left.retain_from(right.as_ref()).unwrap();
        assert_eq!(left.to_vec(), vec![3, 4]);

        assert!(left.equal(right.as_ref()).unwrap());

        left.remove_from(right.as_ref()).unwrap();
        assert!(left.is_empty());
    }

    #[rstest]
    fn mismatched_kinds_are_rejected() {
        let mut left = ordered(&[1]);
        let right = unordered(&[1]);

        let error = left.add_from(right.as_ref()).unwrap_err();
        assert!(error.is_kind_mismatch());
        assert_eq!(
            error,
            SetError::KindMismatch {
                expected: left.kind(),
                found: right.kind(),
            }
        );
        assert_eq!(left.to_vec(), vec![1]);
    }

    #[rstest]
    fn strategies_are_part_of_the_kind() {
        let intrinsic = ordered(&[1]);
        let structural: Box<dyn DynSet<i32>> =
            Box::new([1].into_iter().collect::<OrderedStore<i32, Structural>>());

        assert!(intrinsic.equal(structural.as_ref()).is_err());
        assert!(*intrinsic != *structural);
    }

    #[rstest]
    fn boxed_sets_clone_deeply() {
        let original = unordered(&[1, 2]);
        let mut cloned = original.clone();
        cloned.remove(&1);

        assert_eq!(original.len(), 2);
        assert_eq!(cloned.len(), 1);
        assert_eq!(original.kind(), cloned.kind());
    }

    #[rstest]
    #[case::all_present(&[1, 2], true, true)]
    #[case::some_present(&[1, 9], false, true)]
    #[case::none_present(&[8, 9], false, false)]
    #[case::empty(&[], true, false)]
    fn contains_queries(#[case] probe: &[i32], #[case] all: bool, #[case] any: bool) {
        let set = ordered(&[1, 2, 3]);
        assert_eq!(set.contains_all(probe), all);
        assert_eq!(set.contains_any(probe), any);
    }

    #[rstest]
    fn debug_lists_elements() {
        let set = ordered(&[2, 1]);
        assert_eq!(format!("{set:?}"), "{2, 1}");
    }
}
