#![deny(missing_docs)]

//! This crate implements two low-level associative containers: [`CuckooHashMap`],
//! a fixed-capacity hash map using two-table cuckoo hashing with bounded
//! displacement, and [`TwoThreeMap`], an ordered map backed by a 2-3 tree whose
//! bidirectional [`Cursor`] steps through entries via parent back-references,
//! without an auxiliary stack.
//!
//! Most of the tree implementation is in the [ttree] module, the hash map is in
//! the [cuckoo] module.
//!
//! # Example
//!
//! ```
//!     use twomap::TwoThreeMap;
//!     let mut mymap = TwoThreeMap::new();
//!     mymap.insert("England", "London");
//!     mymap.insert("France", "Paris");
//!     println!("The capital of France is {}", mymap["France"]);
//! ```
//!
//!# Features
//!
//! This crate supports the following cargo features:
//! - `unsafe-optim` : uses unsafe code for extra optimisation.

/// Module with the two-table cuckoo hash map, see [`cuckoo::CuckooHashMap`].
pub mod cuckoo;

/// Module with the 2-3 tree map and its cursor, see [`ttree::TwoThreeMap`].
pub mod ttree;

mod vecs;

pub use cuckoo::{CuckooCycleError, CuckooHashMap};

pub use ttree::{
    Cursor, IntoIter, IntoKeys, IntoValues, Iter, Keys, TwoThreeMap, Values,
};

// Tests.

/* mimalloc cannot be used with miri */
#[cfg(all(test, not(miri)))]
use mimalloc::MiMalloc;

#[cfg(all(test, not(miri)))]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
