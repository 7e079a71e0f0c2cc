//! # Workflows Module
//!
//! High-level entry points for computing cycle bases.
//!
//! ## Overview
//!
//! Workflows tie the engine together: they build the spanning forest, dispatch on the
//! configured [`BasisMode`](crate::core::cycles::basis::BasisMode), enforce the deadline,
//! run verification and report progress. Callers hand in a finished
//! [`StructureGraph`](crate::core::models::graph::StructureGraph) and receive a
//! [`CycleBasis`](crate::core::cycles::basis::CycleBasis) or an
//! [`EngineError`](crate::engine::error::EngineError).
//!
//! ## Architecture
//!
//! - **Basis Workflow** ([`basis`]) - One structure, one basis.
//! - **Batch Workflow** ([`batch`]) - Many independent structures across a worker pool, with
//!   failures isolated per structure.

pub mod basis;
pub mod batch;
