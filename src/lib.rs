//! # setwise
//!
//! Unique-element sets with pluggable equality, optional insertion order and
//! optional lock-guarded sharing.
//!
//! ## Overview
//!
//! Every set is a *store* parameterized over an equality strategy, optionally
//! wrapped in a reader-writer lock:
//!
//! - **Equality strategies**: [`Intrinsic`](equality::Intrinsic) hashes
//!   `Hash + Eq` elements; [`Structural`](equality::Structural) only needs the
//!   [`Equality`](equality::Equality) capability
//! - **Stores**: [`UnorderedStore`](store::UnorderedStore) and
//!   [`OrderedStore`](store::OrderedStore), which iterates in first-insertion
//!   order
//! - **Concurrency**: [`Concurrent`](concurrent::Concurrent) shares any store
//!   across threads, with deadlock-free two-set operations and snapshot
//!   iteration
//! - **Dynamic sets**: [`DynSet`](dynamic::DynSet) erases the concrete set
//!   type and checks two-set operations at runtime
//!
//! All variants implement the same [`Set`](store::Set) contract: add,
//! remove, membership, length, clear, equality, clone, conversion to a
//! `Vec`, iteration, union, difference and intersection.
//!
//! ## Feature Flags
//!
//! - `concurrent`: Lock-guarded sets and the constructors in [`facade`]
//!   (enabled by default)
//! - `dynamic`: Type-erased sets and `SetBuilder` (enabled by default)
//! - `fxhash`: `FxIntrinsic` strategy using `rustc-hash`
//! - `ahash`: `AIntrinsic` strategy using `ahash`
//! - `loom`: Model-checked locks; only meaningful for the loom test target
//! - `full`: Enable all features except `loom`
//!
//! ## Example
//!
//! ```rust
//! use setwise::prelude::*;
//!
//! let required = new_ordered_set(["read", "write"]);
//! let granted = new_ordered_set(["write", "read", "admin"]);
//!
//! let missing = required.clone();
//! missing.remove_from(&granted);
//! assert!(missing.is_empty());
//!
//! granted.retain_from(&required);
//! assert_eq!(granted.to_vec(), vec!["write", "read"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the set types, the contract traits and the constructors.
///
/// # Usage
///
/// ```rust
/// use setwise::prelude::*;
/// ```
pub mod prelude {
    pub use crate::equality::*;

    pub use crate::store::*;

    pub use crate::error::SetError;

    #[cfg(feature = "concurrent")]
    pub use crate::concurrent::*;

    #[cfg(feature = "dynamic")]
    pub use crate::dynamic::DynSet;

    #[cfg(feature = "concurrent")]
    pub use crate::facade::{
        new_ordered_set, new_ordered_set_from_slice, new_set, new_set_from_slice,
        new_unsync_ordered_set, new_unsync_ordered_set_from_slice, new_unsync_set,
        new_unsync_set_from_slice,
    };

    #[cfg(all(feature = "concurrent", feature = "dynamic"))]
    pub use crate::facade::SetBuilder;
}

pub mod equality;

pub mod store;

pub mod error;

#[cfg(feature = "concurrent")]
pub mod concurrent;

#[cfg(feature = "dynamic")]
pub mod dynamic;

#[cfg(feature = "concurrent")]
pub mod facade;
