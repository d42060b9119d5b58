use anyhow::{ensure, Result};

use super::support;
use crate::batch::SequenceBatch;
use crate::cli::PegsArgs;
use crate::coreseed::CoreDir;
use crate::tabbed::TabbedReader;

pub fn run(args: PegsArgs) -> Result<()> {
    ensure!(
        args.org_dir.is_dir(),
        "Organism directory {} not found or invalid.",
        args.org_dir.display()
    );
    let mut core = CoreDir::new(args.verbose, &args.org_dir);
    let mut reader = TabbedReader::new(support::open_input(args.input.as_deref())?)?;
    let col = reader.find_field(&args.column)?;
    let mut batch = SequenceBatch::with_capacity(args.batch_size * (1 + args.other));

    if args.verbose {
        eprintln!("Reading pegs from input.");
    }
    while let Some(line) = reader.next_line()? {
        let peg_id = line.get(col)?;
        support::store_positive(&mut batch, &mut core, peg_id, args.verbose)?;
    }

    support::add_counter_examples(&mut batch, &mut core, args.other)?;
    support::write_training(
        batch,
        args.format,
        args.fix,
        std::io::stdout().lock(),
        args.verbose,
    )?;
    if args.verbose {
        eprintln!("All done.");
    }
    Ok(())
}
