//! # RNACYCLE Core Library
//!
//! Cycle-basis extraction for nucleic-acid structures represented as residue interaction
//! graphs. Residues are vertices; base pairs, stacking contacts and phosphodiester bonds are
//! weighted, typed edges. The closed loops of such a graph (hairpins, internal loops,
//! junctions, pseudoknots) are captured by a basis of its cycle space.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Immutable data models: residues, interactions, the
//!   arena-backed `StructureGraph`, and the cycle types (`Cycle`, `CycleVector`,
//!   `CycleBasis`) handed back to callers.
//!
//! - **[`engine`]: The Logic Core.** The algorithms: breadth-first spanning forests,
//!   fundamental cycle generation, shortest-cycle candidate pools, Gaussian elimination
//!   over GF(2), basis minimization and post-condition verification.
//!
//! - **[`workflows`]: The Public API.** Entry points that tie the engine together for one
//!   structure ([`workflows::basis`]) or many structures in parallel ([`workflows::batch`]).
//!
//! The library performs no I/O and holds no process-wide state: every computation is a
//! function from a `StructureGraph` to a `CycleBasis` (or an error).

pub mod core;
pub mod engine;
pub mod workflows;
