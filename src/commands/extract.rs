use std::collections::{BTreeMap, HashSet};
use std::fs::File;

use anyhow::{ensure, Context, Result};
use bio::io::fasta;

use crate::cli::ExtractArgs;
use crate::gto::GenomeDir;
use crate::roles::{roles_of_function, RoleMap};

pub fn run(args: ExtractArgs) -> Result<()> {
    ensure!(
        args.roles.is_file(),
        "Role input file {} not found or unreadable.",
        args.roles.display()
    );
    if args.verbose {
        eprintln!("Reading roles from {}.", args.roles.display());
    }
    let role_map = RoleMap::load(&args.roles)?;
    ensure!(
        args.genome_dir.is_dir(),
        "Genome directory {} not found or invalid.",
        args.genome_dir.display()
    );
    let genomes = GenomeDir::new(&args.genome_dir)?;
    if args.verbose {
        eprintln!("Genomes will be loaded from {}.", args.genome_dir.display());
    }
    let out = File::create(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;
    let mut fasta_out = fasta::Writer::new(out);

    // found/missing counters per role ID
    let mut counts: BTreeMap<String, (u32, u32)> = BTreeMap::new();
    for genome in genomes.genomes() {
        let genome = genome?;
        let mut missing: HashSet<&str> = role_map.ids().collect();
        for feature in &genome.features {
            if !feature.is_protein() {
                continue;
            }
            let mut matched: Vec<&str> = Vec::new();
            for role_name in roles_of_function(&feature.function) {
                if let Some(role_id) = role_map.id_of(&role_name) {
                    matched.push(role_id);
                }
            }
            if matched.is_empty() {
                continue;
            }
            for role_id in &matched {
                counts.entry(role_id.to_string()).or_insert((0, 0)).0 += 1;
                missing.remove(*role_id);
            }
            let translation = match feature.protein_translation.as_deref() {
                Some(translation) => translation,
                None => continue,
            };
            fasta_out.write(&feature.id, Some(&feature.function), translation.as_bytes())?;
        }
        if args.verbose {
            eprintln!("{} missing roles in {}.", missing.len(), genome.id);
        }
        for role_id in missing {
            counts.entry(role_id.to_string()).or_insert((0, 0)).1 += 1;
        }
    }
    fasta_out.flush()?;
    if args.verbose {
        eprintln!("{} genomes processed.", genomes.len());
    }

    // Role report on the standard output.
    println!("role\tname\tfound\tmissing");
    for (role_id, (found, missing)) in &counts {
        let name = role_map.name_of(role_id).unwrap_or("");
        println!("{}\t{}\t{}\t{}", role_id, name, found, missing);
    }
    Ok(())
}
