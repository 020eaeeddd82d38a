//! Hash-based equality strategy.

use std::fmt;
use std::hash::{BuildHasher, Hash, RandomState};

use hashbrown::HashTable;

use super::EqualityStrategy;

/// Intrinsic equality: elements are `Hash + Eq` and used directly as keys.
///
/// The index is a [`HashTable`] of slot numbers. Hashes are computed from
/// the elements themselves through `resolve`, so the table stores nothing
/// but `usize` slots and never clones an element.
///
/// # Type Parameters
///
/// * `S` - The hasher builder. Defaults to the standard library's
///   `RandomState`; see [`FxIntrinsic`] and [`AIntrinsic`] behind the
///   `fxhash` and `ahash` features.
///
/// # Examples
///
/// ```rust
/// use setwise::equality::Intrinsic;
/// use setwise::store::UnorderedStore;
///
/// let mut store: UnorderedStore<&str, Intrinsic> = UnorderedStore::new();
/// store.add("alpha");
/// assert!(store.contains(&"alpha"));
/// ```
#[derive(Clone)]
pub struct Intrinsic<S = RandomState> {
    table: HashTable<usize>,
    hasher: S,
}

/// [`Intrinsic`] using the `rustc-hash` Fx hasher.
///
/// Fx is fast but not resistant to adversarial keys; use it for trusted input.
#[cfg(feature = "fxhash")]
pub type FxIntrinsic = Intrinsic<rustc_hash::FxBuildHasher>;

/// [`Intrinsic`] using `ahash`.
#[cfg(feature = "ahash")]
pub type AIntrinsic = Intrinsic<ahash::RandomState>;

impl<S> Intrinsic<S> {
    /// Creates an empty index hashing with `hasher`.
    #[must_use]
    pub const fn with_hasher(hasher: S) -> Self {
        Self {
            table: HashTable::new(),
            hasher,
        }
    }

    /// Returns the hasher builder.
    #[must_use]
    pub const fn hasher(&self) -> &S {
        &self.hasher
    }
}

impl<S: Default> Default for Intrinsic<S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<S> fmt::Debug for Intrinsic<S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Intrinsic")
            .field("slots", &self.table.len())
            .finish_non_exhaustive()
    }
}

impl<T, S> EqualityStrategy<T> for Intrinsic<S>
where
    T: Hash + Eq,
    S: BuildHasher + Clone,
{
    const SYMMETRIC: bool = true;

    #[inline]
    fn equivalent(element: &T, candidate: &T) -> bool {
        element == candidate
    }

    #[inline]
    fn find<'a, R>(&self, element: &T, resolve: R) -> Option<usize>
    where
        T: 'a,
        R: Fn(usize) -> Option<&'a T>,
    {
        let hash = self.hasher.hash_one(element);
        self.table
            .find(hash, |&slot| resolve(slot).is_some_and(|candidate| candidate == element))
            .copied()
    }

    fn record<'a, R>(&mut self, slot: usize, resolve: R)
    where
        T: 'a,
        R: Fn(usize) -> Option<&'a T>,
    {
        let Some(element) = resolve(slot) else {
            return;
        };
        let hasher = &self.hasher;
        let hash = hasher.hash_one(element);
        self.table.insert_unique(hash, slot, |&existing| {
            resolve(existing).map_or(0, |candidate| hasher.hash_one(candidate))
        });
    }

    fn forget<'a, R>(&mut self, slot: usize, resolve: R)
    where
        T: 'a,
        R: Fn(usize) -> Option<&'a T>,
    {
        let Some(element) = resolve(slot) else {
            return;
        };
        let hash = self.hasher.hash_one(element);
        if let Ok(entry) = self.table.find_entry(hash, |&existing| existing == slot) {
            entry.remove();
        }
    }

    fn relocate<'a, R>(&mut self, from: usize, to: usize, resolve: R)
    where
        T: 'a,
        R: Fn(usize) -> Option<&'a T>,
    {
        let Some(element) = resolve(to) else {
            return;
        };
        let hash = self.hasher.hash_one(element);
        if let Some(existing) = self.table.find_mut(hash, |&existing| existing == from) {
            *existing = to;
        }
    }

    #[inline]
    fn reset(&mut self) {
        self.table.clear();
    }

    fn empty_like(&self) -> Self {
        Self::with_hasher(self.hasher.clone())
    }

    #[inline]
    fn len(&self) -> usize {
        self.table.len()
    }
}
