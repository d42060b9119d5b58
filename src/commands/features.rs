use anyhow::{ensure, Result};
use bio::io::fasta;

use super::support;
use crate::cli::FeaturesArgs;
use crate::coreseed::CoreDir;
use crate::tabbed::TabbedReader;

pub fn run(args: FeaturesArgs) -> Result<()> {
    ensure!(
        args.org_dir.is_dir(),
        "Organism directory {} not found or invalid.",
        args.org_dir.display()
    );
    let mut core = CoreDir::new(args.verbose, &args.org_dir);
    let mut reader = TabbedReader::new(support::open_input(args.input.as_deref())?)?;
    let col = reader.find_field(&args.column)?;
    let comment_col = reader.find_field(&args.comment)?;

    let mut writer = fasta::Writer::new(std::io::stdout().lock());
    while let Some(line) = reader.next_line()? {
        let peg_id = line.get(col)?;
        let comment = line.get(comment_col)?;
        let pegs = match core.pegs_for_feature(peg_id)? {
            Some(pegs) => pegs,
            None => continue,
        };
        match pegs.get(peg_id) {
            Some(seq) => writer.write(&seq.id, Some(comment), seq.residues.as_bytes())?,
            None => {
                if args.verbose {
                    eprintln!("{} not found in genome.", peg_id);
                }
            }
        }
    }
    writer.flush()?;
    Ok(())
}
