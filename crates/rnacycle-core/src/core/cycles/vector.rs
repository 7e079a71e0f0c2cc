use super::cycle::Cycle;
use crate::core::models::graph::StructureGraph;
use bitvec::prelude::*;

/// Edge-incidence vector of a cycle over GF(2).
///
/// Bit `i` is set when the interaction in column `i` of the graph's global edge order takes
/// part in the cycle. Addition is XOR, so the sum of two cycles is their symmetric difference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CycleVector {
    bits: BitVec<u64, Lsb0>,
}

impl CycleVector {
    pub fn zeros(len: usize) -> Self {
        Self {
            bits: bitvec![u64, Lsb0; 0; len],
        }
    }

    /// Encodes `cycle` against the edge columns of `graph`.
    ///
    /// Returns `None` if the cycle mentions an interaction the graph does not know.
    pub fn from_cycle(graph: &StructureGraph, cycle: &Cycle) -> Option<Self> {
        let mut vector = Self::zeros(graph.interaction_count());
        for &interaction_id in cycle.interactions() {
            vector.toggle(graph.edge_column(interaction_id)?)?;
        }
        Some(vector)
    }

    /// Builds a vector of length `len` from explicit column indices. Out-of-range columns
    /// yield `None`.
    pub fn from_columns(len: usize, columns: impl IntoIterator<Item = usize>) -> Option<Self> {
        let mut vector = Self::zeros(len);
        for column in columns {
            vector.toggle(column)?;
        }
        Some(vector)
    }

    fn toggle(&mut self, column: usize) -> Option<()> {
        let current = *self.bits.get(column)?;
        self.bits.set(column, !current);
        Some(())
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, column: usize) -> bool {
        self.bits.get(column).map(|bit| *bit).unwrap_or(false)
    }

    /// Adds `other` in place (bitwise XOR). Both vectors must have the same length.
    pub fn xor_assign(&mut self, other: &CycleVector) {
        debug_assert_eq!(self.bits.len(), other.bits.len());
        self.bits ^= other.bits.as_bitslice();
    }

    /// Lowest set column, the pivot position used during elimination.
    pub fn leading_one(&self) -> Option<usize> {
        self.bits.first_one()
    }

    pub fn is_zero(&self) -> bool {
        self.bits.not_any()
    }

    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }
}
