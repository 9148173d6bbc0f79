//! Nucleotide alphabet
//!
//! The only symbols a `DnaSequence` may hold are `A`, `C`, `G`, `T` and
//! the ambiguity code `N`. Input is uppercased before it is checked.

use super::sequence::{SequenceError, SequenceResult};

/// Accepted symbols, in reporting order
pub const DNA_ALPHABET: [u8; 5] = [b'A', b'C', b'G', b'T', b'N'];

/// Whether `base` (already uppercase) belongs to the alphabet
#[inline]
pub fn is_valid_base(base: u8) -> bool {
    DNA_ALPHABET.contains(&base)
}

/// Uppercase a raw sequence
pub fn normalize(raw: &[u8]) -> Vec<u8> {
    raw.to_ascii_uppercase()
}

/// Check every byte, failing on the first one outside the alphabet
pub fn validate(bases: &[u8]) -> SequenceResult<()> {
    match bases.iter().position(|&b| !is_valid_base(b)) {
        Some(position) => Err(invalid_symbol(bases[position], position)),
        None => Ok(()),
    }
}

/// Uppercase and validate in one step
pub fn normalize_and_validate(raw: &[u8]) -> SequenceResult<Vec<u8>> {
    let bases = normalize(raw);
    validate(&bases)?;
    Ok(bases)
}

/// Normalize a single query symbol such as the argument of `count_base`
pub fn normalize_symbol(symbol: char) -> SequenceResult<u8> {
    let upper = symbol.to_ascii_uppercase();
    if upper.is_ascii() && is_valid_base(upper as u8) {
        Ok(upper as u8)
    } else {
        Err(SequenceError::InvalidAlphabet { symbol, position: 0 })
    }
}

fn invalid_symbol(byte: u8, position: usize) -> SequenceError {
    let symbol = if byte.is_ascii() {
        byte as char
    } else {
        char::REPLACEMENT_CHARACTER
    };
    SequenceError::InvalidAlphabet { symbol, position }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_and_validate() {
        assert_eq!(normalize_and_validate(b"acgtn").unwrap(), b"ACGTN");
        assert_eq!(normalize_and_validate(b"").unwrap(), b"");
    }

    #[test]
    fn test_first_offending_symbol_is_reported() {
        match normalize_and_validate(b"ACGTXY") {
            Err(SequenceError::InvalidAlphabet { symbol, position }) => {
                assert_eq!(symbol, 'X');
                assert_eq!(position, 4);
            }
            other => panic!("Expected InvalidAlphabet, got {:?}", other),
        }
    }

    #[test]
    fn test_rna_and_iupac_codes_are_rejected() {
        assert!(validate(b"ACGU").is_err());
        assert!(validate(b"ACGR").is_err());
        assert!(validate(b"AC-G").is_err());
    }

    #[test]
    fn test_non_ascii_input() {
        let err = normalize_and_validate("ACÉ".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            SequenceError::InvalidAlphabet { symbol: '\u{FFFD}', position: 2 }
        ));
    }

    #[test]
    fn test_normalize_symbol() {
        assert_eq!(normalize_symbol('g').unwrap(), b'G');
        assert_eq!(normalize_symbol('N').unwrap(), b'N');
        assert!(normalize_symbol('U').is_err());
        assert!(normalize_symbol('é').is_err());
    }
}
