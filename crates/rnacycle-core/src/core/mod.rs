//! # Core Module
//!
//! Stateless data models shared by every layer of RNACYCLE.
//!
//! - **Structure Representation** ([`models`]) - Residues, interactions and the residue
//!   interaction graph, plus an all-or-nothing graph builder
//! - **Cycle Representation** ([`cycles`]) - Closed walks, their GF(2) incidence vectors and
//!   the ordered cycle basis returned to callers
//! - **Naming Tables** ([`utils`]) - Residue-name and base-pair notation lookups

pub mod cycles;
pub mod models;
pub mod utils;
