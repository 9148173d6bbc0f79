//! Reference tables
//!
//! Restriction enzymes and the genetic code. Both are plain values built
//! once at startup and shared by reference; nothing here is global or
//! mutable after construction.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use super::alphabet;
use super::sequence::{SequenceError, SequenceResult};
use crate::engines::core::io::FastReader;
use crate::engines::EngineError;

/// Marker appended for codons the genetic code does not define
pub const UNKNOWN_RESIDUE: u8 = b'X';

/// Residues tracked in reports, in column order, with display names
pub const AMINO_ACIDS: [(u8, &str); 21] = [
    (b'A', "Alanine"),
    (b'C', "Cysteine"),
    (b'D', "Aspartic Acid"),
    (b'E', "Glutamic Acid"),
    (b'F', "Phenylalanine"),
    (b'G', "Glycine"),
    (b'H', "Histidine"),
    (b'I', "Isoleucine"),
    (b'K', "Lysine"),
    (b'L', "Leucine"),
    (b'M', "Methionine"),
    (b'N', "Asparagine"),
    (b'P', "Proline"),
    (b'Q', "Glutamine"),
    (b'R', "Arginine"),
    (b'S', "Serine"),
    (b'T', "Threonine"),
    (b'V', "Valine"),
    (b'W', "Tryptophan"),
    (b'Y', "Tyrosine"),
    (UNKNOWN_RESIDUE, "Unknown"),
];

// NCBI translation table 1, codons enumerated in TCAG order
// (TTT, TTC, TTA, TTG, TCT, ... GGG).
const STANDARD_CODE: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";
const TCAG: [u8; 4] = [b'T', b'C', b'A', b'G'];

/// Restriction enzymes shipped by default
const DEFAULT_ENZYMES: [(&str, &str); 3] = [
    ("EcoRI", "GAATTC"),
    ("HindIII", "AAGCTT"),
    ("BamHI", "GGATCC"),
];

/// Enzyme name to recognition motif
///
/// Names are case-sensitive. Motifs are stored uppercase and always pass
/// alphabet validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct EnzymeTable {
    enzymes: BTreeMap<String, String>,
}

impl EnzymeTable {
    /// Create an empty table
    pub fn empty() -> Self {
        Self {
            enzymes: BTreeMap::new(),
        }
    }

    /// Register an enzyme, replacing any previous motif under that name
    pub fn insert(&mut self, name: &str, motif: &str) -> SequenceResult<()> {
        if motif.is_empty() {
            return Err(SequenceError::EmptyPattern);
        }
        let motif = alphabet::normalize_and_validate(motif.as_bytes())?;
        // Validated bytes are ASCII
        let motif = String::from_utf8_lossy(&motif).into_owned();
        self.enzymes.insert(name.to_string(), motif);
        Ok(())
    }

    /// Recognition motif for `name`
    pub fn motif(&self, name: &str) -> Option<&str> {
        self.enzymes.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.enzymes.contains_key(name)
    }

    /// Enzyme names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.enzymes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.enzymes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enzymes.is_empty()
    }

    /// Parse a JSON object of the form `{"EcoRI": "GAATTC", ...}`
    pub fn from_json_str(content: &str) -> SequenceResult<Self> {
        let table: EnzymeTable = serde_json::from_str(content).map_err(EngineError::from)?;
        Ok(table)
    }

    /// Load a JSON enzyme table from disk
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> SequenceResult<Self> {
        let mut reader = FastReader::new(path.as_ref(), None).map_err(EngineError::from)?;
        let content = reader.read_all().map_err(EngineError::from)?;
        let table: EnzymeTable = serde_json::from_slice(&content).map_err(EngineError::from)?;
        info!("Loaded {} enzymes from {}", table.len(), reader.path());
        Ok(table)
    }
}

impl Default for EnzymeTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for (name, motif) in DEFAULT_ENZYMES {
            table.enzymes.insert(name.to_string(), motif.to_string());
        }
        table
    }
}

impl TryFrom<BTreeMap<String, String>> for EnzymeTable {
    type Error = SequenceError;

    fn try_from(entries: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut table = Self::empty();
        for (name, motif) in &entries {
            table.insert(name, motif)?;
        }
        Ok(table)
    }
}

impl From<EnzymeTable> for BTreeMap<String, String> {
    fn from(table: EnzymeTable) -> Self {
        table.enzymes
    }
}

/// What a codon encodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodonMeaning {
    AminoAcid(u8),
    Stop,
}

/// Codon to amino acid mapping covering all 64 ACGT codons
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneticCode {
    table: HashMap<[u8; 3], CodonMeaning>,
}

impl GeneticCode {
    /// The standard code (NCBI table 1)
    pub fn standard() -> Self {
        let mut table = HashMap::with_capacity(64);
        for (idx, &aa) in STANDARD_CODE.iter().enumerate() {
            let codon = [TCAG[idx >> 4], TCAG[(idx >> 2) & 3], TCAG[idx & 3]];
            let meaning = match aa {
                b'*' => CodonMeaning::Stop,
                aa => CodonMeaning::AminoAcid(aa),
            };
            table.insert(codon, meaning);
        }
        Self { table }
    }

    /// Build a custom code; every ACGT codon must be present exactly once
    ///
    /// Residues are limited to `AMINO_ACIDS`, so every translated symbol
    /// has a report column.
    pub fn from_entries<I>(entries: I) -> SequenceResult<Self>
    where
        I: IntoIterator<Item = ([u8; 3], CodonMeaning)>,
    {
        let mut table = HashMap::with_capacity(64);
        for (codon, meaning) in entries {
            let codon = [
                codon[0].to_ascii_uppercase(),
                codon[1].to_ascii_uppercase(),
                codon[2].to_ascii_uppercase(),
            ];
            if !codon.iter().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T')) {
                return Err(SequenceError::InvalidCodon(
                    String::from_utf8_lossy(&codon).into_owned(),
                ));
            }
            if let CodonMeaning::AminoAcid(aa) = meaning {
                if !AMINO_ACIDS.iter().any(|&(symbol, _)| symbol == aa) {
                    return Err(SequenceError::InvalidResidue(aa as char));
                }
            }
            table.insert(codon, meaning);
        }

        if table.len() != 64 {
            return Err(SequenceError::IncompleteGeneticCode(table.len()));
        }

        Ok(Self { table })
    }

    /// Look up an uppercase codon; `None` for codons outside ACGT
    pub fn lookup(&self, codon: &[u8]) -> Option<CodonMeaning> {
        let key: [u8; 3] = codon.try_into().ok()?;
        self.table.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl Default for GeneticCode {
    fn default() -> Self {
        Self::standard()
    }
}

/// Every table an analysis needs, bundled for injection
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub enzymes: EnzymeTable,
    pub genetic_code: GeneticCode,
}

impl ReferenceTables {
    pub fn new(enzymes: EnzymeTable, genetic_code: GeneticCode) -> Self {
        Self {
            enzymes,
            genetic_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_enzymes() {
        let table = EnzymeTable::default();
        assert_eq!(table.len(), 3);
        assert_eq!(table.motif("EcoRI"), Some("GAATTC"));
        assert_eq!(table.motif("HindIII"), Some("AAGCTT"));
        assert_eq!(table.motif("BamHI"), Some("GGATCC"));
        assert_eq!(table.motif("ecori"), None);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["BamHI", "EcoRI", "HindIII"]);
    }

    #[test]
    fn test_enzyme_insert_normalizes_and_validates() {
        let mut table = EnzymeTable::empty();
        table.insert("NotI", "gcggccgc").unwrap();
        assert_eq!(table.motif("NotI"), Some("GCGGCCGC"));

        assert!(matches!(table.insert("Bad", "GAXTC"), Err(SequenceError::InvalidAlphabet { .. })));
        assert!(matches!(table.insert("Empty", ""), Err(SequenceError::EmptyPattern)));
        assert!(!table.contains("Bad"));
    }

    #[test]
    fn test_enzyme_json() {
        let table = EnzymeTable::from_json_str(r#"{"XhoI": "ctcgag", "SmaI": "CCCGGG"}"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.motif("XhoI"), Some("CTCGAG"));

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"SmaI":"CCCGGG","XhoI":"CTCGAG"}"#);

        assert!(EnzymeTable::from_json_str(r#"{"Bad": "GAQ"}"#).is_err());
        assert!(matches!(
            EnzymeTable::from_json_str("not json"),
            Err(SequenceError::Engine(EngineError::Json(_)))
        ));
    }

    #[test]
    fn test_enzyme_json_file() -> std::io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("enzymes.json");
        std::fs::write(&path, r#"{"PstI": "CTGCAG"}"#)?;

        let table = EnzymeTable::from_json_file(&path).unwrap();
        assert_eq!(table.motif("PstI"), Some("CTGCAG"));

        let missing = EnzymeTable::from_json_file(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(SequenceError::Engine(EngineError::Io(_)))));
        Ok(())
    }

    #[test]
    fn test_standard_code() {
        let code = GeneticCode::standard();
        assert_eq!(code.len(), 64);
        assert_eq!(code.lookup(b"ATG"), Some(CodonMeaning::AminoAcid(b'M')));
        assert_eq!(code.lookup(b"TTT"), Some(CodonMeaning::AminoAcid(b'F')));
        assert_eq!(code.lookup(b"TGG"), Some(CodonMeaning::AminoAcid(b'W')));
        assert_eq!(code.lookup(b"AGA"), Some(CodonMeaning::AminoAcid(b'R')));
        assert_eq!(code.lookup(b"GGG"), Some(CodonMeaning::AminoAcid(b'G')));
        for stop in [b"TAA", b"TAG", b"TGA"] {
            assert_eq!(code.lookup(stop), Some(CodonMeaning::Stop));
        }
        assert_eq!(code.lookup(b"NNN"), None);
        assert_eq!(code.lookup(b"ATGA"), None);
    }

    #[test]
    fn test_custom_code_must_be_complete() {
        let entries = vec![(*b"ATG", CodonMeaning::AminoAcid(b'M'))];
        assert!(matches!(
            GeneticCode::from_entries(entries),
            Err(SequenceError::IncompleteGeneticCode(1))
        ));

        let with_n = vec![(*b"ATN", CodonMeaning::Stop)];
        assert!(matches!(GeneticCode::from_entries(with_n), Err(SequenceError::InvalidCodon(_))));
    }

    #[test]
    fn test_custom_code_rejects_unreported_residue() {
        // Selenocysteine has no report column
        let standard = GeneticCode::standard();
        let entries = standard.table.iter().map(|(codon, meaning)| {
            if codon == b"TGA" {
                (*codon, CodonMeaning::AminoAcid(b'U'))
            } else {
                (*codon, *meaning)
            }
        });
        assert!(matches!(
            GeneticCode::from_entries(entries),
            Err(SequenceError::InvalidResidue('U'))
        ));

        let lower = vec![(*b"ATG", CodonMeaning::AminoAcid(b'm'))];
        assert!(matches!(GeneticCode::from_entries(lower), Err(SequenceError::InvalidResidue('m'))));
    }

    #[test]
    fn test_custom_code_from_standard() {
        // Reassign TGA to tryptophan, as in the mitochondrial code
        let standard = GeneticCode::standard();
        let entries = standard.table.iter().map(|(codon, meaning)| {
            if codon == b"TGA" {
                (*codon, CodonMeaning::AminoAcid(b'W'))
            } else {
                (*codon, *meaning)
            }
        });
        let code = GeneticCode::from_entries(entries).unwrap();
        assert_eq!(code.lookup(b"TGA"), Some(CodonMeaning::AminoAcid(b'W')));
    }

    #[test]
    fn test_tables_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReferenceTables>();
    }

    #[test]
    fn test_residue_order() {
        assert_eq!(AMINO_ACIDS[10], (b'M', "Methionine"));
        assert_eq!(AMINO_ACIDS[20], (UNKNOWN_RESIDUE, "Unknown"));
    }
}
