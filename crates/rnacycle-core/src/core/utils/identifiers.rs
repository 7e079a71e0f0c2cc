use crate::core::models::interaction::BasePairFamily;
use crate::core::models::residue::NucleotideType;
use phf::{Map, Set, phf_map, phf_set};

static NUCLEOTIDE_NAMES: Map<&'static str, NucleotideType> = phf_map! {
    // --- Ribonucleotides ---
    "A" => NucleotideType::Adenine, "RA" => NucleotideType::Adenine, "ADE" => NucleotideType::Adenine,
    "C" => NucleotideType::Cytosine, "RC" => NucleotideType::Cytosine, "CYT" => NucleotideType::Cytosine,
    "G" => NucleotideType::Guanine, "RG" => NucleotideType::Guanine, "GUA" => NucleotideType::Guanine,
    "U" => NucleotideType::Uracil, "RU" => NucleotideType::Uracil, "URA" => NucleotideType::Uracil,
    "I" => NucleotideType::Inosine, "INO" => NucleotideType::Inosine,
    // --- Deoxyribonucleotides ---
    "DA" => NucleotideType::Adenine,
    "DC" => NucleotideType::Cytosine,
    "DG" => NucleotideType::Guanine,
    "DT" => NucleotideType::Thymine, "T" => NucleotideType::Thymine, "THY" => NucleotideType::Thymine,
    "DU" => NucleotideType::Uracil,
    "DI" => NucleotideType::Inosine,
};

static BASE_PAIR_NOTATIONS: Map<&'static str, BasePairFamily> = phf_map! {
    "cWW" => BasePairFamily::CisWatsonWatson,
    "tWW" => BasePairFamily::TransWatsonWatson,
    "cWH" => BasePairFamily::CisWatsonHoogsteen, "cHW" => BasePairFamily::CisWatsonHoogsteen,
    "tWH" => BasePairFamily::TransWatsonHoogsteen, "tHW" => BasePairFamily::TransWatsonHoogsteen,
    "cWS" => BasePairFamily::CisWatsonSugar, "cSW" => BasePairFamily::CisWatsonSugar,
    "tWS" => BasePairFamily::TransWatsonSugar, "tSW" => BasePairFamily::TransWatsonSugar,
    "cHH" => BasePairFamily::CisHoogsteenHoogsteen,
    "tHH" => BasePairFamily::TransHoogsteenHoogsteen,
    "cHS" => BasePairFamily::CisHoogsteenSugar, "cSH" => BasePairFamily::CisHoogsteenSugar,
    "tHS" => BasePairFamily::TransHoogsteenSugar, "tSH" => BasePairFamily::TransHoogsteenSugar,
    "cSS" => BasePairFamily::CisSugarSugar,
    "tSS" => BasePairFamily::TransSugarSugar,
};

// Shorthands used by annotators for Watson-Crick and G-U wobble pairs, both cis Watson/Watson.
static CANONICAL_PAIR_ALIASES: Set<&'static str> = phf_set! {
    "canonical", "wc", "watson-crick", "wobble", "gu", "base-pair", "basepair", "pair",
};

pub fn nucleotide_for_name(residue_name: &str) -> Option<NucleotideType> {
    NUCLEOTIDE_NAMES
        .get(residue_name.trim().to_ascii_uppercase().as_str())
        .copied()
}

/// Resolves Leontis-Westhof notation (`cWW`, `tHS`, ...) to a base-pair family.
///
/// The leading cis/trans marker is case-insensitive, as are the two edge letters. Reversed
/// edge orders (`cHW` for `cWH`) name the same family.
pub fn base_pair_family_for_notation(notation: &str) -> Option<BasePairFamily> {
    let trimmed = notation.trim();
    let mut chars = trimmed.chars();
    let orientation = chars.next()?.to_ascii_lowercase();
    let edges: String = chars.map(|c| c.to_ascii_uppercase()).collect();
    if edges.len() != 2 {
        return None;
    }
    BASE_PAIR_NOTATIONS
        .get(format!("{}{}", orientation, edges).as_str())
        .copied()
}

pub fn is_canonical_pair_alias(name: &str) -> bool {
    CANONICAL_PAIR_ALIASES.contains(name.trim().to_ascii_lowercase().as_str())
}
