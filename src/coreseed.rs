use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::peg_list::PegList;

/// Genome ID embedded in a peg ID: the text between `fig|` and `.peg`.
pub fn genome_of(peg_id: &str) -> Option<&str> {
    let rest = peg_id.strip_prefix("fig|")?;
    let end = rest.find(".peg")?;
    Some(&rest[..end])
}

/// Manager for a coreSEED-style organism directory.
///
/// Owns the per-run cache of genome peg lists: each genome's sequence
/// file is read at most once and the resulting [`PegList`] (with its
/// suppression state) lives until the manager is dropped at the end of
/// the run. Missing genomes are cached too, so a bad ID costs one
/// directory probe.
pub struct CoreDir {
    org_dir: PathBuf,
    verbose: bool,
    cache: HashMap<String, Option<PegList>>,
}

impl CoreDir {
    pub fn new(verbose: bool, org_dir: &Path) -> Self {
        CoreDir {
            org_dir: org_dir.to_path_buf(),
            verbose,
            cache: HashMap::new(),
        }
    }

    /// All genome IDs in the directory, sorted. A genome is a
    /// subdirectory whose name looks like `<digits>.<digits>`.
    pub fn genomes(&self) -> Result<Vec<String>> {
        let mut found = Vec::new();
        for entry in fs::read_dir(&self.org_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if is_genome_id(name) {
                    found.push(name.to_string());
                }
            }
        }
        found.sort();
        Ok(found)
    }

    /// The peg list for a genome, loading and caching it on first use.
    /// `None` if the genome or its peg file does not exist. A genome
    /// whose peg file is unreadable or malformed is reported on stderr
    /// once and then treated as absent, so one bad genome cannot sink
    /// a whole run.
    pub fn genome_pegs(&mut self, genome_id: &str) -> Result<Option<&mut PegList>> {
        if !self.cache.contains_key(genome_id) {
            let loaded = match self.load_genome(genome_id) {
                Ok(loaded) => loaded,
                Err(e @ Error::DataSource { .. }) => {
                    eprintln!("{}", e);
                    None
                }
                Err(e) => return Err(e),
            };
            self.cache.insert(genome_id.to_string(), loaded);
        }
        Ok(self.cache.get_mut(genome_id).and_then(Option::as_mut))
    }

    /// The peg list for the genome named inside a peg ID.
    pub fn pegs_for_feature(&mut self, peg_id: &str) -> Result<Option<&mut PegList>> {
        match genome_of(peg_id) {
            Some(genome_id) => {
                let genome_id = genome_id.to_string();
                self.genome_pegs(&genome_id)
            }
            None => {
                if self.verbose {
                    eprintln!("{} is not a valid peg ID.", peg_id);
                }
                Ok(None)
            }
        }
    }

    fn load_genome(&self, genome_id: &str) -> Result<Option<PegList>> {
        let peg_file = self.genome_dir(genome_id).join("Features/peg/fasta");
        if !peg_file.is_file() {
            if self.verbose {
                eprintln!("Genome {} not found.", genome_id);
            }
            return Ok(None);
        }
        if self.verbose {
            eprintln!("Reading genome {}.", genome_id);
        }
        let deleted = self.deleted_pegs(genome_id)?;
        let list = PegList::load(genome_id, &peg_file, &deleted)?;
        Ok(Some(list))
    }

    /// IDs listed in the genome's `deleted.features` file, if any.
    fn deleted_pegs(&self, genome_id: &str) -> Result<HashSet<String>> {
        let path = self
            .genome_dir(genome_id)
            .join("Features/peg/deleted.features");
        let mut deleted = HashSet::new();
        if path.is_file() {
            let file =
                File::open(&path).map_err(|e| Error::data_source(genome_id, &path, e))?;
            for line in BufReader::new(file).lines() {
                let line = line.map_err(|e| Error::data_source(genome_id, &path, e))?;
                let id = line.trim();
                if !id.is_empty() {
                    deleted.insert(id.to_string());
                }
            }
        }
        Ok(deleted)
    }

    /// Map from peg ID to assigned function for a genome. Later
    /// assignments override earlier ones; a genome without the file
    /// yields an empty map.
    pub fn genome_functions(&self, genome_id: &str) -> Result<HashMap<String, String>> {
        let path = self.genome_dir(genome_id).join("assigned_functions");
        let mut functions = HashMap::new();
        if !path.is_file() {
            if self.verbose {
                eprintln!("No function assignments for genome {}.", genome_id);
            }
            return Ok(functions);
        }
        for line in BufReader::new(File::open(&path)?).lines() {
            let line = line?;
            if let Some((peg_id, function)) = line.split_once('\t') {
                functions.insert(peg_id.to_string(), function.trim_end().to_string());
            }
        }
        Ok(functions)
    }

    fn genome_dir(&self, genome_id: &str) -> PathBuf {
        self.org_dir.join(genome_id)
    }
}

fn is_genome_id(name: &str) -> bool {
    match name.split_once('.') {
        Some((left, right)) => {
            !left.is_empty()
                && !right.is_empty()
                && left.bytes().all(|b| b.is_ascii_digit())
                && right.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
