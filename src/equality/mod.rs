//! Equality strategies deciding when two elements are the same.
//!
//! Every store in this crate is parameterized over an [`EqualityStrategy`],
//! which doubles as the store's side index from element to storage slot.
//! Two strategies are provided:
//!
//! - [`Intrinsic`]: elements are `Hash + Eq` and are looked up directly
//!   through a hash table of slots. Membership is O(1) amortized.
//! - [`Structural`]: elements expose the [`Equality`] capability and nothing
//!   else. Without a hash, membership is a linear scan over the live slots.
//!
//! A store commits to one strategy for its whole lifetime. Because the
//! strategy is part of the store's type, two-set operations between stores
//! of different strategies do not type-check.
//!
//! # Examples
//!
//! ```rust
//! use setwise::equality::{Equality, Structural};
//! use setwise::store::OrderedStore;
//!
//! #[derive(Debug, Clone)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Equality for Point {
//!     fn equals(&self, other: &Self) -> bool {
//!         self.x == other.x && self.y == other.y
//!     }
//! }
//!
//! let mut points: OrderedStore<Point, Structural> = OrderedStore::new();
//! points.add(Point { x: 1, y: 2 });
//! points.add(Point { x: 1, y: 2 });
//! assert_eq!(points.len(), 1);
//! ```

mod intrinsic;
mod structural;

pub use intrinsic::Intrinsic;
pub use structural::Structural;

#[cfg(feature = "fxhash")]
pub use intrinsic::FxIntrinsic;

#[cfg(feature = "ahash")]
pub use intrinsic::AIntrinsic;

/// Structural equality capability.
///
/// Types implementing `Equality` can be stored under the [`Structural`]
/// strategy. The relation is expected to be reflexive; it does not need to
/// be symmetric, and stores compare in both directions where it matters.
pub trait Equality {
    /// Returns `true` if `self` is considered the same element as `other`.
    fn equals(&self, other: &Self) -> bool;
}

/// Implements [`Equality`] for types that already implement `PartialEq`.
///
/// # Examples
///
/// ```rust
/// use setwise::equality::Equality;
/// use setwise::impl_equality;
///
/// #[derive(PartialEq)]
/// struct Tag(&'static str);
///
/// impl_equality!(Tag);
///
/// assert!(Tag("a").equals(&Tag("a")));
/// ```
#[macro_export]
macro_rules! impl_equality {
    ($($element:ty),+ $(,)?) => {
        $(
            impl $crate::equality::Equality for $element {
                #[inline]
                fn equals(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )+
    };
}

impl_equality!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, String,
);

impl Equality for &str {
    #[inline]
    fn equals(&self, other: &Self) -> bool {
        self == other
    }
}

impl<T: Equality> Equality for Box<T> {
    #[inline]
    fn equals(&self, other: &Self) -> bool {
        T::equals(self, other)
    }
}

impl<T: Equality> Equality for std::sync::Arc<T> {
    #[inline]
    fn equals(&self, other: &Self) -> bool {
        T::equals(self, other)
    }
}

impl<T: Equality> Equality for std::rc::Rc<T> {
    #[inline]
    fn equals(&self, other: &Self) -> bool {
        T::equals(self, other)
    }
}

/// A side index mapping elements to the storage slots that hold them.
///
/// Stores keep their elements in a slot-addressed buffer and delegate every
/// membership decision to their strategy. The strategy never owns elements;
/// it reaches them through a `resolve` function handed in by the store,
/// which returns the element currently held in a slot (or `None` for an
/// empty slot).
///
/// The index must always hold exactly the slots of the live elements. Stores
/// uphold this by pairing every slot write with [`record`](Self::record),
/// [`forget`](Self::forget) or [`relocate`](Self::relocate).
pub trait EqualityStrategy<T> {
    /// Whether [`equivalent`](Self::equivalent) is known to be symmetric.
    ///
    /// When `false`, set equality checks containment in both directions.
    const SYMMETRIC: bool;

    /// Returns `true` if `candidate` is the same element as `element`.
    fn equivalent(element: &T, candidate: &T) -> bool;

    /// Returns the slot of the live element equivalent to `element`.
    fn find<'a, R>(&self, element: &T, resolve: R) -> Option<usize>
    where
        T: 'a,
        R: Fn(usize) -> Option<&'a T>;

    /// Adds `slot` to the index. `resolve(slot)` yields the new element.
    fn record<'a, R>(&mut self, slot: usize, resolve: R)
    where
        T: 'a,
        R: Fn(usize) -> Option<&'a T>;

    /// Removes `slot` from the index. `resolve(slot)` still yields the
    /// element being removed.
    fn forget<'a, R>(&mut self, slot: usize, resolve: R)
    where
        T: 'a,
        R: Fn(usize) -> Option<&'a T>;

    /// Moves an indexed element from slot `from` to slot `to`.
    /// `resolve(to)` already yields the moved element.
    fn relocate<'a, R>(&mut self, from: usize, to: usize, resolve: R)
    where
        T: 'a,
        R: Fn(usize) -> Option<&'a T>;

    /// Drops every slot from the index.
    fn reset(&mut self);

    /// Returns an empty index configured like `self` (same hasher).
    #[must_use]
    fn empty_like(&self) -> Self;

    /// Returns the number of indexed slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slot is indexed.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
