use clap::Parser;

use proteinset_tools::cli::{Args, Commands};
use proteinset_tools::commands;

fn main() {
    let args = Args::parse();

    let result = match args.command {
        Commands::Pegs(cmd) => commands::pegs::run(cmd),
        Commands::Roles(cmd) => commands::roles::run(cmd),
        Commands::Fasta(cmd) => commands::fasta::run(cmd),
        Commands::Proteins(cmd) => commands::proteins::run(cmd),
        Commands::Collate(cmd) => commands::collate::run(cmd),
        Commands::Features(cmd) => commands::features::run(cmd),
        Commands::Extract(cmd) => commands::extract::run(cmd),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
