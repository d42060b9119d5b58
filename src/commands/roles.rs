use std::collections::HashMap;
use std::fs::File;

use anyhow::{ensure, Context, Result};

use super::support;
use crate::batch::SequenceBatch;
use crate::cli::RolesArgs;
use crate::coreseed::CoreDir;
use crate::roles::{roles_of_function, RoleMap};
use crate::tabbed::TabbedReader;

pub fn run(args: RolesArgs) -> Result<()> {
    ensure!(
        args.org_dir.is_dir(),
        "Organism directory {} not found or invalid.",
        args.org_dir.display()
    );
    support::ensure_dir(&args.out_dir, args.verbose)?;
    let mut core = CoreDir::new(args.verbose, &args.org_dir);

    // One batch per target role, in input order.
    if args.verbose {
        eprintln!("Reading roles to process.");
    }
    let mut reader = TabbedReader::headerless(support::open_input(args.input.as_deref())?, 2);
    let mut role_map = RoleMap::new();
    let mut batches: Vec<(String, SequenceBatch)> = Vec::new();
    let mut batch_index: HashMap<String, usize> = HashMap::new();
    while let Some(line) = reader.next_line()? {
        let role_id = line.get(0)?;
        let role_name = line.get(1)?;
        role_map.put(role_id, role_name);
        if !batch_index.contains_key(role_id) {
            batch_index.insert(role_id.to_string(), batches.len());
            batches.push((role_id.to_string(), SequenceBatch::with_capacity(2000)));
        }
    }

    // Scan every genome's function assignments for the target roles.
    let genomes = core.genomes()?;
    let bar = support::genome_progress(genomes.len());
    for genome_id in &genomes {
        bar.set_message(genome_id.clone());
        let functions = core.genome_functions(genome_id)?;
        for (peg_id, function) in &functions {
            for role_name in roles_of_function(function) {
                let idx = match role_map.id_of(&role_name).and_then(|id| batch_index.get(id)) {
                    Some(&idx) => idx,
                    None => continue,
                };
                if let Some(pegs) = core.genome_pegs(genome_id)? {
                    if let Some(seq) = pegs.get(peg_id).cloned() {
                        batches[idx].1.store_sequence(&seq, pegs, "1");
                    }
                }
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    // Fill in the counter-examples and write one file per role.
    for (role_id, mut batch) in batches {
        support::add_counter_examples(&mut batch, &mut core, args.other)?;
        let out_file = args
            .out_dir
            .join(format!("{}{}", role_id, args.format.suffix()));
        if args.verbose {
            eprintln!("Creating {}.", out_file.display());
        }
        let sink = File::create(&out_file)
            .with_context(|| format!("cannot create {}", out_file.display()))?;
        support::write_training(batch, args.format, args.fix, sink, args.verbose)?;
    }
    if args.verbose {
        eprintln!("All done.");
    }
    Ok(())
}
