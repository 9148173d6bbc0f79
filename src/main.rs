use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use log::error;
use thiserror::Error;

use bioseq_analyzer::engines::EngineError;
use bioseq_analyzer::logger;
use bioseq_analyzer::modules::analysis::{analyze_file, AnalysisError, BatchConfig, BatchPolicy, ReportFormat};
use bioseq_analyzer::modules::io::{write_synthetic_fasta, GeneratorConfig};
use bioseq_analyzer::modules::seq::{EnzymeTable, GeneticCode, ReferenceTables, SequenceError};

#[derive(Parser, Debug)]
#[command(version, about = "DNA sequence analysis", long_about = None)]
struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze every record of a FASTA file and write a report
    Analyze {
        /// Input FASTA
        input: PathBuf,

        /// Report file, overwritten if present
        output: PathBuf,

        /// Motif counted in every record
        #[arg(long, default_value = "ATGC")]
        motif: String,

        /// Enzyme whose recognition sites are counted
        #[arg(long, default_value = "EcoRI")]
        enzyme: String,

        /// JSON object of enzyme name to recognition site, replacing the built-in table
        #[arg(long, value_name = "JSON")]
        enzymes: Option<PathBuf>,

        /// Skip records with invalid bases instead of aborting
        #[arg(long)]
        skip_invalid: bool,

        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
    },

    /// Write random DNA records as FASTA
    Generate {
        output: PathBuf,

        #[arg(long, default_value_t = 600)]
        count: usize,

        #[arg(long, default_value_t = 270)]
        min_length: usize,

        #[arg(long, default_value_t = 450)]
        max_length: usize,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Bases per line; 0 writes each sequence on one line
        #[arg(long, default_value_t = 0)]
        line_width: usize,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Csv,
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => ReportFormat::Csv,
            Format::Json => ReportFormat::Json,
        }
    }
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Failed to load enzyme table: {0}")]
    Enzymes(#[from] SequenceError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Failed to generate sequences: {0}")]
    Generate(#[from] EngineError),
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Analyze {
            input,
            output,
            motif,
            enzyme,
            enzymes,
            skip_invalid,
            format,
        } => {
            let enzymes = match enzymes {
                Some(path) => EnzymeTable::from_json_file(path)?,
                None => EnzymeTable::default(),
            };
            let tables = ReferenceTables::new(enzymes, GeneticCode::standard());
            let policy = if skip_invalid {
                BatchPolicy::SkipInvalid
            } else {
                BatchPolicy::FailFast
            };
            let config = BatchConfig::default()
                .with_motif(&motif)
                .with_enzyme(&enzyme)
                .with_policy(policy);

            analyze_file(&input, &output, &tables, config, format.into())?;
        }
        Command::Generate {
            output,
            count,
            min_length,
            max_length,
            seed,
            line_width,
        } => {
            let mut config = GeneratorConfig::default()
                .with_count(count)
                .with_lengths(min_length, max_length);
            config.seed = seed;

            write_synthetic_fasta(&config, &output, line_width)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = logger::init(logger::level_for(args.verbose, args.quiet)) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    Args::command().debug_assert()
}
