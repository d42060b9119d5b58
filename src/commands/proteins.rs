use anyhow::{ensure, Result};

use super::support;
use crate::cli::ProteinsArgs;
use crate::coreseed::CoreDir;
use crate::roles::{roles_of_function, RoleMap};
use crate::sequence::Sequence;
use crate::tabbed::TabbedReader;

pub fn run(args: ProteinsArgs) -> Result<()> {
    ensure!(
        args.core.is_dir(),
        "{} is not a valid directory.",
        args.core.display()
    );
    support::ensure_dir(&args.out_dir, args.verbose)?;

    // Collect the roles of interest from the input.
    if args.verbose {
        eprintln!("Reading input roles.");
    }
    let mut reader = TabbedReader::new(support::open_input(args.input.as_deref())?)?;
    let col = reader.find_field(&args.column)?;
    let mut role_map = RoleMap::new();
    while let Some(line) = reader.next_line()? {
        role_map.register(line.get(col)?);
    }
    if args.verbose {
        eprintln!("{} roles found in input.", role_map.len());
    }

    // Scan the genomes for matching pegs.
    let mut core = CoreDir::new(args.verbose, &args.core);
    let mut selected: Vec<Sequence> = Vec::with_capacity(6000);
    let genomes = core.genomes()?;
    let bar = support::genome_progress(genomes.len());
    for genome_id in &genomes {
        bar.set_message(genome_id.clone());
        let functions = core.genome_functions(genome_id)?;
        let pegs = match core.genome_pegs(genome_id)? {
            Some(pegs) => pegs,
            None => {
                bar.inc(1);
                continue;
            }
        };
        for (peg_id, function) in &functions {
            let roles = roles_of_function(function);
            if roles.len() != 1 && args.single {
                continue;
            }
            let found = roles.iter().any(|role| role_map.id_of(role).is_some());
            if found != args.reverse {
                if let Some(seq) = pegs.get(peg_id) {
                    selected.push(seq.clone());
                }
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();
    if args.verbose {
        eprintln!("{} sequences selected.", selected.len());
    }

    support::write_prediction_files(
        &selected,
        &args.control,
        &args.out_dir,
        args.format,
        args.verbose,
    )
}
