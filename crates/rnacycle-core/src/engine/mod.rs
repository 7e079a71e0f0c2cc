//! # Engine Module
//!
//! The cycle-basis algorithms operating on a finished
//! [`StructureGraph`](crate::core::models::graph::StructureGraph).
//!
//! ## Overview
//!
//! A computation always starts from a breadth-first [`forest::SpanningForest`]. In
//! fundamental mode every non-tree edge is closed through the tree ([`fundamental`]). In
//! minimum mode a pool of short candidate cycles is sorted by weight and filtered through
//! Gaussian elimination over GF(2) ([`minimize`], [`independence`]). Either result can be
//! re-checked with [`verify::verify_basis`].
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Basis mode, verification and two-cycle policy, limits
//! - **Spanning Forest** ([`forest`]) - BFS trees, parent links, depths and tree paths
//! - **Fundamental Cycles** ([`fundamental`]) - One cycle per non-tree edge
//! - **Minimization** ([`minimize`]) - Greedy selection from Horton and per-edge candidates
//! - **Independence** ([`independence`]) - Incremental GF(2) row reduction
//! - **Verification** ([`verify`]) - Post-condition checks on a finished basis
//! - **Deadlines** ([`deadline`]) - Wall-clock limits polled between steps
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Basis and engine error types

pub(crate) mod candidates;
pub mod config;
pub mod deadline;
pub mod error;
pub mod forest;
pub mod fundamental;
pub mod independence;
pub mod minimize;
pub mod progress;
pub mod verify;
