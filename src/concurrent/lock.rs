//! Reader-writer lock used by the concurrent wrappers.
//!
//! Normally a re-export of `parking_lot`'s non-poisoning lock. With the
//! `loom` feature the lock is swapped for loom's model-checked one behind the
//! same guard-returning interface, so the wrappers compile unchanged.

#[cfg(not(feature = "loom"))]
pub(crate) use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(feature = "loom")]
pub(crate) use self::model::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(feature = "loom")]
mod model {
    use std::sync::PoisonError;

    pub(crate) use loom::sync::{RwLockReadGuard, RwLockWriteGuard};

    /// Loom lock with poisoning ignored, matching `parking_lot`.
    pub(crate) struct RwLock<T>(loom::sync::RwLock<T>);

    impl<T> RwLock<T> {
        pub(crate) fn new(value: T) -> Self {
            Self(loom::sync::RwLock::new(value))
        }

        pub(crate) fn read(&self) -> RwLockReadGuard<'_, T> {
            self.0.read().unwrap_or_else(PoisonError::into_inner)
        }

        pub(crate) fn write(&self) -> RwLockWriteGuard<'_, T> {
            self.0.write().unwrap_or_else(PoisonError::into_inner)
        }

        pub(crate) fn into_inner(self) -> T {
            self.0.into_inner().unwrap_or_else(PoisonError::into_inner)
        }
    }
}
