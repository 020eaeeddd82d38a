//! Comparator-based equality strategy.

use super::{Equality, EqualityStrategy};

/// Structural equality: elements are compared with [`Equality::equals`].
///
/// No hash is available, so the index is a plain list of live slots and
/// every lookup scans it. Membership is O(k) for a set of k elements.
///
/// Lookups call `equals` on the probed element with each stored element as
/// the argument. Since the relation need not be symmetric, set equality
/// under this strategy checks containment in both directions.
#[derive(Debug, Clone, Default)]
pub struct Structural {
    slots: Vec<usize>,
}

impl<T: Equality> EqualityStrategy<T> for Structural {
    const SYMMETRIC: bool = false;

    #[inline]
    fn equivalent(element: &T, candidate: &T) -> bool {
        element.equals(candidate)
    }

    fn find<'a, R>(&self, element: &T, resolve: R) -> Option<usize>
    where
        T: 'a,
        R: Fn(usize) -> Option<&'a T>,
    {
        self.slots
            .iter()
            .copied()
            .find(|&slot| resolve(slot).is_some_and(|candidate| element.equals(candidate)))
    }

    #[inline]
    fn record<'a, R>(&mut self, slot: usize, _resolve: R)
    where
        T: 'a,
        R: Fn(usize) -> Option<&'a T>,
    {
        self.slots.push(slot);
    }

    fn forget<'a, R>(&mut self, slot: usize, _resolve: R)
    where
        T: 'a,
        R: Fn(usize) -> Option<&'a T>,
    {
        if let Some(position) = self.slots.iter().position(|&existing| existing == slot) {
            self.slots.swap_remove(position);
        }
    }

    fn relocate<'a, R>(&mut self, from: usize, to: usize, _resolve: R)
    where
        T: 'a,
        R: Fn(usize) -> Option<&'a T>,
    {
        if let Some(existing) = self.slots.iter_mut().find(|existing| **existing == from) {
            *existing = to;
        }
    }

    #[inline]
    fn reset(&mut self) {
        self.slots.clear();
    }

    fn empty_like(&self) -> Self {
        Self::default()
    }

    #[inline]
    fn len(&self) -> usize {
        self.slots.len()
    }
}
