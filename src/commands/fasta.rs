use anyhow::Result;

use super::support;
use crate::cli::FastaArgs;

pub fn run(args: FastaArgs) -> Result<()> {
    support::ensure_dir(&args.out_dir, args.verbose)?;
    if args.verbose {
        eprintln!("Reading input sequences.");
    }
    let sequences = support::read_fasta(support::open_input(args.input.as_deref())?)?;
    if args.verbose {
        eprintln!("{} input sequences found.", sequences.len());
    }
    support::write_prediction_files(
        &sequences,
        &args.control,
        &args.out_dir,
        args.format,
        args.verbose,
    )
}
