use super::ids::ResidueId;
use crate::core::utils::identifiers::{base_pair_family_for_notation, is_canonical_pair_alias};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Leontis-Westhof geometric families of base pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BasePairFamily {
    CisWatsonWatson,
    TransWatsonWatson,
    CisWatsonHoogsteen,
    TransWatsonHoogsteen,
    CisWatsonSugar,
    TransWatsonSugar,
    CisHoogsteenHoogsteen,
    TransHoogsteenHoogsteen,
    CisHoogsteenSugar,
    TransHoogsteenSugar,
    CisSugarSugar,
    TransSugarSugar,
}

impl BasePairFamily {
    pub fn notation(&self) -> &'static str {
        match self {
            BasePairFamily::CisWatsonWatson => "cWW",
            BasePairFamily::TransWatsonWatson => "tWW",
            BasePairFamily::CisWatsonHoogsteen => "cWH",
            BasePairFamily::TransWatsonHoogsteen => "tWH",
            BasePairFamily::CisWatsonSugar => "cWS",
            BasePairFamily::TransWatsonSugar => "tWS",
            BasePairFamily::CisHoogsteenHoogsteen => "cHH",
            BasePairFamily::TransHoogsteenHoogsteen => "tHH",
            BasePairFamily::CisHoogsteenSugar => "cHS",
            BasePairFamily::TransHoogsteenSugar => "tHS",
            BasePairFamily::CisSugarSugar => "cSS",
            BasePairFamily::TransSugarSugar => "tSS",
        }
    }

    pub fn is_cis(&self) -> bool {
        self.notation().starts_with('c')
    }
}

impl fmt::Display for BasePairFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

/// The physical nature of an edge in the residue graph.
///
/// Two interactions are "of the same kind" when their `InteractionKind` values are equal,
/// so a `cWW` pair and a `tWH` pair between the same residues may coexist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InteractionKind {
    PhosphodiesterBond,
    BasePair(BasePairFamily),
    Stacking,
    Other(String),
}

impl InteractionKind {
    pub fn is_backbone(&self) -> bool {
        matches!(self, InteractionKind::PhosphodiesterBond)
    }

    pub fn is_base_pair(&self) -> bool {
        matches!(self, InteractionKind::BasePair(_))
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionKind::PhosphodiesterBond => f.write_str("phosphodiester"),
            InteractionKind::BasePair(family) => write!(f, "{}", family),
            InteractionKind::Stacking => f.write_str("stacking"),
            InteractionKind::Other(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Interaction kind cannot be empty")]
pub struct ParseInteractionKindError;

impl FromStr for InteractionKind {
    type Err = ParseInteractionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseInteractionKindError);
        }
        match trimmed.to_lowercase().as_str() {
            "phosphodiester" | "backbone" | "covalent" | "bb" => {
                return Ok(InteractionKind::PhosphodiesterBond);
            }
            "stacking" | "stack" => return Ok(InteractionKind::Stacking),
            _ => {}
        }
        if is_canonical_pair_alias(trimmed) {
            return Ok(InteractionKind::BasePair(BasePairFamily::CisWatsonWatson));
        }
        if let Some(family) = base_pair_family_for_notation(trimmed) {
            return Ok(InteractionKind::BasePair(family));
        }
        Ok(InteractionKind::Other(trimmed.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub kind: InteractionKind,           // Base pair family, backbone bond, stacking, ...
    pub weight: f64,                     // Non-negative edge weight, `DEFAULT_WEIGHT` if unspecified
    pub(crate) endpoints: (ResidueId, ResidueId),
}

impl Interaction {
    pub fn new(residue1: ResidueId, residue2: ResidueId, kind: InteractionKind) -> Self {
        Self {
            kind,
            weight: DEFAULT_WEIGHT,
            endpoints: (residue1, residue2),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn endpoints(&self) -> (ResidueId, ResidueId) {
        self.endpoints
    }

    pub fn contains(&self, residue_id: ResidueId) -> bool {
        self.endpoints.0 == residue_id || self.endpoints.1 == residue_id
    }

    /// Returns the endpoint across the interaction from `residue_id`.
    pub fn opposite(&self, residue_id: ResidueId) -> Option<ResidueId> {
        if self.endpoints.0 == residue_id {
            Some(self.endpoints.1)
        } else if self.endpoints.1 == residue_id {
            Some(self.endpoints.0)
        } else {
            None
        }
    }

    pub fn connects(&self, a: ResidueId, b: ResidueId) -> bool {
        (self.endpoints.0 == a && self.endpoints.1 == b)
            || (self.endpoints.0 == b && self.endpoints.1 == a)
    }

    /// Endpoints in ascending key order, so `(a, b)` and `(b, a)` compare equal.
    pub(crate) fn unordered_endpoints(&self) -> (ResidueId, ResidueId) {
        let (a, b) = self.endpoints;
        if a <= b { (a, b) } else { (b, a) }
    }
}
