use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Minimal model of a GTO (JSON genome object), just deep enough to
/// pull protein translations and functional assignments.
#[derive(Debug, Deserialize)]
pub struct Genome {
    pub id: String,
    #[serde(default)]
    pub scientific_name: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub id: String,
    #[serde(rename = "type", default)]
    pub feature_type: String,
    #[serde(default)]
    pub function: String,
    #[serde(default)]
    pub protein_translation: Option<String>,
}

impl Feature {
    /// True for protein-coding features carrying a translation.
    pub fn is_protein(&self) -> bool {
        (self.feature_type == "peg" || self.feature_type == "CDS")
            && self.protein_translation.is_some()
    }
}

/// A directory of `*.gto` files, iterated in name order.
pub struct GenomeDir {
    files: Vec<PathBuf>,
}

impl GenomeDir {
    pub fn new(dir: &Path) -> Result<Self> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "gto") {
                files.push(path);
            }
        }
        files.sort();
        Ok(GenomeDir { files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Parse and yield each genome in turn.
    pub fn genomes(&self) -> impl Iterator<Item = Result<Genome>> + '_ {
        self.files.iter().map(|path| load_genome(path))
    }
}

fn load_genome(path: &Path) -> Result<Genome> {
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("genome")
        .to_string();
    let file = File::open(path).map_err(|e| Error::data_source(&name, path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::data_source(&name, path, e))
}
