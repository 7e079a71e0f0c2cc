//! # Cycle Models Module
//!
//! Closed walks in a [`StructureGraph`](crate::core::models::graph::StructureGraph) and the
//! bases assembled from them.
//!
//! - [`cycle`] - `Cycle`, an immutable ordered closed walk with its total weight
//! - [`vector`] - `CycleVector`, the GF(2) edge-incidence form used for independence tests
//! - [`basis`] - `CycleBasis` and `BasisMode`, the result handed back to callers

pub mod basis;
pub mod cycle;
pub mod vector;
