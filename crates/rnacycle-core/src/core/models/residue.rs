use crate::core::utils::identifiers::nucleotide_for_name;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NucleotideType {
    Adenine,  // A / DA
    Cytosine, // C / DC
    Guanine,  // G / DG
    Uracil,   // U
    Thymine,  // DT
    Inosine,  // I
    Modified, // Anything else (PSU, 2MG, ligand-like residues, ...)
}

impl NucleotideType {
    pub fn from_residue_name(name: &str) -> Self {
        nucleotide_for_name(name).unwrap_or(NucleotideType::Modified)
    }

    pub fn one_letter_code(&self) -> char {
        match self {
            NucleotideType::Adenine => 'A',
            NucleotideType::Cytosine => 'C',
            NucleotideType::Guanine => 'G',
            NucleotideType::Uracil => 'U',
            NucleotideType::Thymine => 'T',
            NucleotideType::Inosine => 'I',
            NucleotideType::Modified => 'N',
        }
    }

    pub fn is_standard(&self) -> bool {
        !matches!(self, NucleotideType::Modified)
    }
}

impl fmt::Display for NucleotideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                NucleotideType::Adenine => "Adenine",
                NucleotideType::Cytosine => "Cytosine",
                NucleotideType::Guanine => "Guanine",
                NucleotideType::Uracil => "Uracil",
                NucleotideType::Thymine => "Thymine",
                NucleotideType::Inosine => "Inosine",
                NucleotideType::Modified => "Modified",
            }
        )
    }
}

/// Unique identity of a residue: chain, sequence position and optional insertion code.
///
/// Keys order by chain, then position, then insertion code (a residue without an insertion
/// code sorts before its lettered insertions). The textual form is `A:12` or `A:12b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub chain: char,
    pub position: isize,
    pub insertion_code: Option<char>,
}

impl ResidueKey {
    pub fn new(chain: char, position: isize) -> Self {
        Self {
            chain,
            position,
            insertion_code: None,
        }
    }

    pub fn with_insertion_code(mut self, code: char) -> Self {
        self.insertion_code = Some(code);
        self
    }
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.insertion_code {
            Some(code) => write!(f, "{}:{}{}", self.chain, self.position, code),
            None => write!(f, "{}:{}", self.chain, self.position),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid residue key '{0}'. Expected 'CHAIN:POSITION[INSERTION]' (e.g., 'A:12' or 'A:12b')")]
pub struct ParseResidueKeyError(pub String);

impl FromStr for ResidueKey {
    type Err = ParseResidueKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseResidueKeyError(s.to_string());
        let (chain_str, rest) = s.trim().split_once(':').ok_or_else(err)?;

        let mut chain_chars = chain_str.chars();
        let chain = chain_chars.next().ok_or_else(err)?;
        if chain_chars.next().is_some() {
            return Err(err());
        }

        let (number_str, insertion_code) = match rest.chars().last() {
            Some(c) if c.is_ascii_alphabetic() => (&rest[..rest.len() - c.len_utf8()], Some(c)),
            _ => (rest, None),
        };
        let position: isize = number_str.parse().map_err(|_| err())?;

        Ok(Self {
            chain,
            position,
            insertion_code,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub key: ResidueKey,              // Chain, position and insertion code
    pub name: String,                 // Residue name as given by the source (e.g., "G", "PSU")
    pub nucleotide: NucleotideType,   // Classification derived from `name`
}

impl Residue {
    pub fn new(key: ResidueKey, name: &str) -> Self {
        Self {
            key,
            name: name.trim().to_string(),
            nucleotide: NucleotideType::from_residue_name(name),
        }
    }

    pub fn chain(&self) -> char {
        self.key.chain
    }

    pub fn position(&self) -> isize {
        self.key.position
    }
}
