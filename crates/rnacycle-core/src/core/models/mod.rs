//! # Core Models Module
//!
//! Data structures describing a nucleic-acid structure as a graph.
//!
//! ## Key Components
//!
//! - [`ids`] - Arena keys for residues and interactions
//! - [`residue`] - Residue identity (`ResidueKey`) and nucleotide classification
//! - [`interaction`] - Typed, weighted, undirected interactions between residues
//! - [`graph`] - The `StructureGraph` itself, with adjacency and component queries
//! - [`builder`] - `GraphBuilder`, which assembles a graph from keyed records in one step
//!
//! ## Usage
//!
//! ```ignore
//! use rnacycle::core::models::builder::GraphBuilder;
//! use rnacycle::core::models::interaction::InteractionKind;
//! use rnacycle::core::models::residue::ResidueKey;
//!
//! let mut builder = GraphBuilder::new();
//! builder
//!     .add_residue(ResidueKey::new('A', 1), "G")
//!     .add_residue(ResidueKey::new('A', 2), "C")
//!     .add_interaction(
//!         ResidueKey::new('A', 1),
//!         ResidueKey::new('A', 2),
//!         InteractionKind::PhosphodiesterBond,
//!         None,
//!     );
//! let graph = builder.build()?;
//! ```

pub mod builder;
pub mod graph;
pub mod ids;
pub mod interaction;
pub mod residue;
