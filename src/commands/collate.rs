use std::collections::HashMap;
use std::fs::File;

use anyhow::{ensure, Context, Result};
use bio::io::fasta;

use super::support;
use crate::cli::CollateArgs;
use crate::coreseed::CoreDir;
use crate::roles::{roles_of_function, RoleMap};
use crate::tabbed::TabbedReader;

pub fn run(args: CollateArgs) -> Result<()> {
    ensure!(
        args.core.is_dir(),
        "{} is not a valid directory.",
        args.core.display()
    );
    support::ensure_dir(&args.out_dir, args.verbose)?;

    if args.verbose {
        eprintln!("Reading roles.");
    }
    let mut reader = TabbedReader::new(support::open_input(args.input.as_deref())?)?;
    let mut role_map = RoleMap::new();
    while let Some(line) = reader.next_line()? {
        role_map.put(line.get(0)?, line.get(1)?);
    }
    if args.verbose {
        eprintln!("{} roles found.", role_map.len());
    }

    // One FASTA output stream per role.
    let mut streams: HashMap<String, fasta::Writer<File>> = HashMap::new();
    for role_id in role_map.ids() {
        let path = args.out_dir.join(format!("{}.fa", role_id));
        let file = File::create(&path)
            .with_context(|| format!("cannot create {}", path.display()))?;
        if args.verbose {
            eprintln!(
                "{} created for role \"{}\".",
                path.display(),
                role_map.name_of(role_id).unwrap_or(role_id)
            );
        }
        streams.insert(role_id.to_string(), fasta::Writer::new(file));
    }

    // Route every matching peg sequence to its role's file.
    let mut core = CoreDir::new(args.verbose, &args.core);
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
            for role_name in roles_of_function(function) {
                let writer = match role_map.id_of(&role_name).and_then(|id| streams.get_mut(id)) {
                    Some(writer) => writer,
                    None => continue,
                };
                if let Some(seq) = pegs.get(peg_id) {
                    let desc = if seq.comment.is_empty() {
                        None
                    } else {
                        Some(seq.comment.as_str())
                    };
                    writer.write(&seq.id, desc, seq.residues.as_bytes())?;
                }
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    if args.verbose {
        eprintln!("Closing output files.");
    }
    for writer in streams.values_mut() {
        writer.flush()?;
    }
    Ok(())
}
