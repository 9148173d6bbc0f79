//! Synthetic input
//!
//! Produces random ACGT records labeled `sequence1..N`. Lengths and bases
//! are drawn uniformly from a seedable RNG, so a fixed seed reproduces the
//! same file.

use std::path::Path;

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engines::compute::string_ops;
use crate::engines::storage::SequenceRecord;
use crate::engines::{EngineError, EngineResult};

use super::fasta::write_fasta;

/// Settings for the random generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of records
    pub count: usize,
    /// Shortest sequence, inclusive
    pub min_length: usize,
    /// Longest sequence, inclusive
    pub max_length: usize,
    /// RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 600,
            min_length: 270,
            max_length: 450,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_lengths(mut self, min_length: usize, max_length: usize) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn validate(&self) -> EngineResult<()> {
        if self.min_length > self.max_length {
            return Err(EngineError::InvalidSequenceData(format!(
                "Minimum length {} exceeds maximum length {}",
                self.min_length, self.max_length
            )));
        }
        Ok(())
    }
}

/// Generate random records according to `config`
pub fn generate_records(config: &GeneratorConfig) -> EngineResult<Vec<SequenceRecord>> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let records = (1..=config.count)
        .map(|i| {
            let length = rng.gen_range(config.min_length..=config.max_length);
            SequenceRecord::new(format!("sequence{}", i), string_ops::random_dna(&mut rng, length))
        })
        .collect();

    Ok(records)
}

/// Generate records and write them as FASTA
pub fn write_synthetic_fasta<P: AsRef<Path>>(
    config: &GeneratorConfig,
    path: P,
    line_width: usize,
) -> EngineResult<usize> {
    let records = generate_records(config)?;
    write_fasta(&records, path.as_ref(), line_width)?;
    info!(
        "Generated {} sequences ({}-{} bp) in {}",
        records.len(),
        config.min_length,
        config.max_length,
        path.as_ref().display()
    );
    Ok(records.len())
}
