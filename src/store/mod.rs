//! Unsynchronized set stores and the contract every set implements.
//!
//! - [`UnorderedStore`]: a bare uniqueness index; iteration order is unspecified
//! - [`OrderedStore`]: a uniqueness index that also remembers insertion order
//!
//! Both are parameterized over an [`EqualityStrategy`](crate::equality::EqualityStrategy)
//! and implement the [`Set`] contract, as do the lock-guarded wrappers in
//! [`concurrent`](crate::concurrent).
//!
//! # Examples
//!
//! ```rust
//! use setwise::store::{OrderedStore, Set};
//!
//! fn union_size<S: Set>(left: &S, right: &S) -> usize {
//!     let mut union = left.clone();
//!     union.add_from(right);
//!     union.len()
//! }
//!
//! let left: OrderedStore<i32> = [1, 2, 3].into_iter().collect();
//! let right: OrderedStore<i32> = [3, 4].into_iter().collect();
//! assert_eq!(union_size(&left, &right), 4);
//! ```

mod ordered;
mod unordered;

pub use ordered::OrderedStore;
pub use ordered::OrderedStoreIntoIterator;
pub use ordered::OrderedStoreIterator;
pub use unordered::UnorderedStore;
pub use unordered::UnorderedStoreIntoIterator;
pub use unordered::UnorderedStoreIterator;

use std::borrow::Borrow;

static_assertions::assert_impl_all!(UnorderedStore<String>: Send, Sync);
static_assertions::assert_impl_all!(OrderedStore<String>: Send, Sync);
static_assertions::assert_not_impl_any!(UnorderedStore<std::rc::Rc<i32>>: Send, Sync);
static_assertions::assert_not_impl_any!(OrderedStore<std::rc::Rc<i32>>: Send, Sync);
static_assertions::assert_impl_all!(UnorderedStore<String>: Eq);
static_assertions::assert_impl_all!(OrderedStore<String>: Eq);
static_assertions::assert_not_impl_any!(UnorderedStore<i32, crate::equality::Structural>: Eq);
static_assertions::assert_not_impl_any!(OrderedStore<i32, crate::equality::Structural>: Eq);

/// The set contract shared by every set variant in this crate.
///
/// Mutating methods take `&mut self`. The concurrent wrappers also offer
/// the same operations through `&self`, taking their lock internally.
///
/// Two-set operations take `&Self`: sets of different orderings or
/// equality strategies cannot be combined, which the compiler enforces.
/// See [`DynSet`](crate::dynamic::DynSet) for the type-erased equivalent.
pub trait Set: Clone {
    /// The element type.
    type Element;

    /// Iterator returned by [`iter`](Self::iter). Items are either borrowed
    /// from the set or owned snapshot copies.
    type Iter<'a>: Iterator<Item: Borrow<Self::Element>>
    where
        Self: 'a;

    /// Adds `element` unless an equal element is present.
    ///
    /// Returns `true` if the element was added. Adding a present element is
    /// a no-op.
    fn add(&mut self, element: Self::Element) -> bool;

    /// Adds every element of `elements`, returning how many were new.
    fn add_all<I>(&mut self, elements: I) -> usize
    where
        I: IntoIterator<Item = Self::Element>,
        Self: Sized,
    {
        elements
            .into_iter()
            .fold(0, |added, element| added + usize::from(self.add(element)))
    }

    /// Removes the element equal to `element`, returning `true` if one was
    /// present. Removing an absent element is a no-op.
    fn remove(&mut self, element: &Self::Element) -> bool;

    /// Returns `true` if an element equal to `element` is present.
    fn contains(&self, element: &Self::Element) -> bool;

    /// Returns `true` if **every** given element is present.
    ///
    /// An empty argument list is vacuously contained.
    fn contains_all<'a, I>(&self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'a Self::Element>,
        Self::Element: 'a,
        Self: Sized,
    {
        elements.into_iter().all(|element| self.contains(element))
    }

    /// Returns `true` if **any** given element is present.
    fn contains_any<'a, I>(&self, elements: I) -> bool
    where
        I: IntoIterator<Item = &'a Self::Element>,
        Self::Element: 'a,
        Self: Sized,
    {
        elements.into_iter().any(|element| self.contains(element))
    }

    /// Returns the number of live elements.
    fn len(&self) -> usize;

    /// Returns `true` if the set holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every element and resets the set to its freshly created state.
    fn clear(&mut self);

    /// Returns `true` if both sets hold the same elements. Order is ignored.
    fn equal(&self, other: &Self) -> bool;

    /// Returns an iterator over the elements.
    fn iter(&self) -> Self::Iter<'_>;

    /// Copies the elements into a `Vec`, in iteration order.
    fn to_vec(&self) -> Vec<Self::Element>
    where
        Self::Element: Clone,
    {
        self.iter()
            .map(|element| Borrow::<Self::Element>::borrow(&element).clone())
            .collect()
    }

    /// Union: adds every element of `other` not already present.
    fn add_from(&mut self, other: &Self);

    /// Difference: removes every element that is also present in `other`.
    fn remove_from(&mut self, other: &Self);

    /// Intersection: removes every element that is not present in `other`.
    fn retain_from(&mut self, other: &Self);
}
