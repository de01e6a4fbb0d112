//! Hash collections keyed by [`NodeId`].
//!
//! Ids are dense integers, so Fx hashing is the default; the `std-hash`
//! feature switches back to the standard SipHash tables.

use crate::NodeId;

#[cfg(not(feature = "std-hash"))]
pub type IdMap<V> = rustc_hash::FxHashMap<NodeId, V>;
#[cfg(not(feature = "std-hash"))]
pub type IdSet = rustc_hash::FxHashSet<NodeId>;

#[cfg(feature = "std-hash")]
pub type IdMap<V> = std::collections::HashMap<NodeId, V>;
#[cfg(feature = "std-hash")]
pub type IdSet = std::collections::HashSet<NodeId>;
