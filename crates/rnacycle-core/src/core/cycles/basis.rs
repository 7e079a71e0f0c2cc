use super::cycle::Cycle;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Which kind of cycle basis to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasisMode {
    /// One cycle per non-tree edge of a breadth-first spanning forest.
    Fundamental,
    /// A basis of minimum total weight.
    #[default]
    Minimum,
}

impl fmt::Display for BasisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasisMode::Fundamental => f.write_str("fundamental"),
            BasisMode::Minimum => f.write_str("minimum"),
        }
    }
}

impl FromStr for BasisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fundamental" => Ok(BasisMode::Fundamental),
            "minimum" | "min" => Ok(BasisMode::Minimum),
            other => Err(format!(
                "Unknown basis mode '{}'. Expected 'fundamental' or 'minimum'",
                other
            )),
        }
    }
}

/// An ordered set of independent cycles spanning a graph's cycle space.
///
/// The basis owns its cycles but not the graph; cycles refer to residues and interactions by
/// id, so the originating `StructureGraph` is needed to resolve them.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleBasis {
    cycles: Vec<Cycle>,
    mode: BasisMode,
}

impl CycleBasis {
    pub fn new(cycles: Vec<Cycle>, mode: BasisMode) -> Self {
        Self { cycles, mode }
    }

    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cycle> {
        self.cycles.iter()
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    pub fn mode(&self) -> BasisMode {
        self.mode
    }

    pub fn total_weight(&self) -> f64 {
        self.cycles.iter().map(Cycle::weight).sum()
    }

    pub fn into_cycles(self) -> Vec<Cycle> {
        self.cycles
    }
}

impl<'a> IntoIterator for &'a CycleBasis {
    type Item = &'a Cycle;
    type IntoIter = std::slice::Iter<'a, Cycle>;

    fn into_iter(self) -> Self::IntoIter {
        self.cycles.iter()
    }
}
