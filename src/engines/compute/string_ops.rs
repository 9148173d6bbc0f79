//! String kernels for nucleotide data
//!
//! Exact pattern search and the per-base transforms used by
//! `DnaSequence`. All functions work on uppercase ASCII bytes.

use super::{ComputeResult, ComputeError};
use rand::Rng;

/// Bases emitted by the random generator
pub const ACGT: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Perform a substring search with the Knuth-Morris-Pratt algorithm
///
/// Returns every start offset of `pattern` in `text`, ascending, including
/// overlapping occurrences. Runs in O(n + m) time with O(m) extra space.
pub fn kmp_search(text: &[u8], pattern: &[u8]) -> ComputeResult<Vec<usize>> {
    if pattern.is_empty() {
        return Err(ComputeError::InvalidInput("Pattern cannot be empty".to_string()));
    }

    if pattern.len() > text.len() {
        return Ok(Vec::new());
    }

    let failure_table = compute_kmp_failure_table(pattern);

    let mut matches = Vec::new();
    let mut j = 0; // matched prefix length

    for (i, &c) in text.iter().enumerate() {
        while j > 0 && pattern[j] != c {
            j = failure_table[j - 1];
        }

        if pattern[j] == c {
            j += 1;
        }

        if j == pattern.len() {
            matches.push(i + 1 - j);
            // Keep the border so overlapping hits are reported
            j = failure_table[j - 1];
        }
    }

    Ok(matches)
}

/// Compute the prefix function of `pattern`
///
/// `table[i]` is the length of the longest proper prefix of
/// `pattern[..=i]` that is also a suffix of it.
pub fn compute_kmp_failure_table(pattern: &[u8]) -> Vec<usize> {
    let m = pattern.len();
    let mut failure = vec![0; m];
    let mut j = 0;

    for i in 1..m {
        while j > 0 && pattern[j] != pattern[i] {
            j = failure[j - 1];
        }

        if pattern[j] == pattern[i] {
            j += 1;
        }

        failure[i] = j;
    }

    failure
}

/// Complement of a single base; anything outside ACGT becomes N
#[inline]
pub fn complement_base(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        _ => b'N',
    }
}

/// Complement a DNA sequence, returning a new vector
pub fn complement_dna(sequence: &[u8]) -> Vec<u8> {
    sequence.iter().map(|&b| complement_base(b)).collect()
}

/// Reverse-complement a DNA sequence, returning a new vector
pub fn reverse_complement_dna(sequence: &[u8]) -> Vec<u8> {
    sequence.iter().rev().map(|&b| complement_base(b)).collect()
}

/// Count occurrences of a byte
pub fn count_byte(sequence: &[u8], byte: u8) -> usize {
    sequence.iter().filter(|&&b| b == byte).count()
}

/// Count occurrences of each base in a single pass
///
/// Returns counts in the order A, C, G, T, N/other.
pub fn count_bases(sequence: &[u8]) -> [usize; 5] {
    let mut counts = [0usize; 5];

    for &base in sequence {
        match base {
            b'A' => counts[0] += 1,
            b'C' => counts[1] += 1,
            b'G' => counts[2] += 1,
            b'T' => counts[3] += 1,
            _ => counts[4] += 1,
        }
    }

    counts
}

/// GC content as a percentage of the full length
///
/// N counts toward the denominator. An empty sequence yields 0.0.
pub fn gc_content(sequence: &[u8]) -> f64 {
    if sequence.is_empty() {
        return 0.0;
    }

    let counts = count_bases(sequence);
    let gc_count = counts[1] + counts[2];

    (gc_count as f64) / (sequence.len() as f64) * 100.0
}

/// Generate a random ACGT sequence of the given length
pub fn random_dna<R: Rng + ?Sized>(rng: &mut R, length: usize) -> Vec<u8> {
    (0..length)
        .map(|_| ACGT[rng.gen_range(0..ACGT.len())])
        .collect()
}
