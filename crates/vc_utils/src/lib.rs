//! Small collection utilities shared by the `vc_wire` crates.
//!
//! - [`hash`]: `hashbrown` containers with a fixed, seed-stable `foldhash` state.
//! - [`index`]: `indexmap` containers over the same fixed hash state, for
//!   insertion-ordered sets and maps.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod hash;
pub mod index;
