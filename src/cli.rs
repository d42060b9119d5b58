use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::writer::Format;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a training set from a list of peg IDs
    Pegs(PegsArgs),

    /// Build one training set per role from a role file
    Roles(RolesArgs),

    /// Build prediction sets from a protein FASTA file
    Fasta(FastaArgs),

    /// Build prediction sets for pegs selected by role
    Proteins(ProteinsArgs),

    /// Write one FASTA file per role from the organism directory
    Collate(CollateArgs),

    /// Write a FASTA file from a list of peg IDs and comments
    Features(FeaturesArgs),

    /// Extract role-matching proteins from a GTO genome directory
    Extract(ExtractArgs),
}

#[derive(clap::Args)]
pub struct PegsArgs {
    /// Organism directory containing SEED genomes
    #[arg(value_name = "orgDir")]
    pub org_dir: PathBuf,

    /// Input column name or index (1-based) for peg IDs
    #[arg(long = "col", short = 'c', default_value = "1")]
    pub column: String,

    /// Number of counter-examples per input feature
    #[arg(long = "other", short = 'x', default_value = "1")]
    pub other: usize,

    /// Number of input sequences expected per batch
    #[arg(long = "batch", short = 'b', default_value = "100")]
    pub batch_size: usize,

    /// Maximum data columns in columnar modes (0 to compute)
    #[arg(long = "fix", short = 'f', default_value = "0")]
    pub fix: usize,

    /// Format for output sequences
    #[arg(long, short = 'o', value_enum, default_value = "fasta")]
    pub format: Format,

    /// Input file (if not STDIN)
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Display progress on STDERR
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(clap::Args)]
pub struct RolesArgs {
    /// Organism directory containing SEED genomes
    #[arg(value_name = "orgDir")]
    pub org_dir: PathBuf,

    /// Output directory for training files
    #[arg(long = "outDir", default_value = ".")]
    pub out_dir: PathBuf,

    /// Number of counter-examples per input feature
    #[arg(long = "other", short = 'x', default_value = "1")]
    pub other: usize,

    /// Maximum data columns in columnar modes (0 to compute)
    #[arg(long = "fix", short = 'f', default_value = "0")]
    pub fix: usize,

    /// Format for output sequences
    #[arg(long, short = 'o', value_enum, default_value = "fasta")]
    pub format: Format,

    /// Input file (if not STDIN)
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Display progress on STDERR
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(clap::Args)]
pub struct FastaArgs {
    /// Output directory for prediction files
    #[arg(value_name = "outDir")]
    pub out_dir: PathBuf,

    /// Control file with model names and widths
    #[arg(value_name = "control.tbl")]
    pub control: PathBuf,

    /// Format for output sequences
    #[arg(long, short = 'o', value_enum, default_value = "tab")]
    pub format: Format,

    /// Input file (if not STDIN)
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Display progress on STDERR
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(clap::Args)]
pub struct ProteinsArgs {
    /// Output directory for prediction files
    #[arg(value_name = "outDir")]
    pub out_dir: PathBuf,

    /// Control file with model names and widths
    #[arg(value_name = "control.tbl")]
    pub control: PathBuf,

    /// Role name input column (1-based, 0 for the last column)
    #[arg(long = "col", short = 'c', default_value = "0")]
    pub column: String,

    /// CoreSEED organism directory
    #[arg(long = "core", default_value = "FIGdisk/FIG/Data/Organisms")]
    pub core: PathBuf,

    /// Exclude the input roles instead of selecting them
    #[arg(long, short = 'r')]
    pub reverse: bool,

    /// Only consider singly-functional proteins
    #[arg(long, short = 's')]
    pub single: bool,

    /// Format for output sequences
    #[arg(long, short = 'o', value_enum, default_value = "tab")]
    pub format: Format,

    /// Input file (if not STDIN)
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Display progress on STDERR
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(clap::Args)]
pub struct CollateArgs {
    /// Output directory for the per-role FASTA files
    #[arg(value_name = "outDir")]
    pub out_dir: PathBuf,

    /// CoreSEED organism directory
    #[arg(long = "core", default_value = "FIGdisk/FIG/Data/Organisms")]
    pub core: PathBuf,

    /// Input file (if not STDIN)
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Display progress on STDERR
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(clap::Args)]
pub struct FeaturesArgs {
    /// Organism directory containing SEED genomes
    #[arg(value_name = "orgDir")]
    pub org_dir: PathBuf,

    /// Input column name or index (1-based) for peg IDs
    #[arg(long = "col", short = 'c', default_value = "1")]
    pub column: String,

    /// Input column name or index (1-based) for comments
    #[arg(long = "comment", short = 'm', default_value = "2")]
    pub comment: String,

    /// Input file (if not STDIN)
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Display progress on STDERR
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Role input file (role ID, unused, role name)
    #[arg(value_name = "roles.tbl")]
    pub roles: PathBuf,

    /// Input GTO genome directory
    #[arg(value_name = "genomeDir")]
    pub genome_dir: PathBuf,

    /// Output protein FASTA file
    #[arg(value_name = "output.faa")]
    pub output: PathBuf,

    /// Display progress on STDERR
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
