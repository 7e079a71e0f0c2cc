use crate::core::cycles::vector::CycleVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Independence {
    /// The vector raised the rank and is now a pivot row.
    Accepted,
    /// The vector reduced to zero against the existing rows.
    Dependent,
}

/// Incremental Gaussian elimination over GF(2).
///
/// Rows are stored by the column of their leading one, so each column holds at most one
/// pivot and every stored row is zero left of its pivot.
#[derive(Debug, Clone)]
pub struct Gf2Eliminator {
    columns: usize,
    pivots: Vec<Option<CycleVector>>,
    rank: usize,
}

impl Gf2Eliminator {
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            pivots: vec![None; columns],
            rank: 0,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Reduces `vector` against the pivot rows and keeps the remainder if it is nonzero.
    pub fn try_add(&mut self, vector: CycleVector) -> Independence {
        debug_assert_eq!(vector.len(), self.columns);
        let remainder = self.reduce(vector);
        match remainder.leading_one() {
            Some(column) => {
                self.pivots[column] = Some(remainder);
                self.rank += 1;
                Independence::Accepted
            }
            None => Independence::Dependent,
        }
    }

    /// Whether `vector` already lies in the span of the accepted rows.
    pub fn is_spanned(&self, vector: &CycleVector) -> bool {
        self.reduce(vector.clone()).is_zero()
    }

    fn reduce(&self, mut vector: CycleVector) -> CycleVector {
        // Each XOR clears the current leading one and only touches later columns.
        while let Some(column) = vector.leading_one() {
            match self.pivots.get(column).and_then(Option::as_ref) {
                Some(row) => vector.xor_assign(row),
                None => break,
            }
        }
        vector
    }
}
