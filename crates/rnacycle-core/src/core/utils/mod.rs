//! Lookup tables for residue names and base-pair notation.

pub mod identifiers;
