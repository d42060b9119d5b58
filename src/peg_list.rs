use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use bio::io::fasta;
use niffler::get_reader;

use crate::error::{Error, Result};
use crate::sequence::Sequence;

/// All protein sequences for one genome, with consumption tracking.
///
/// The list is built once from the genome's peg FASTA file and then
/// answers two questions for the dataset builders: "what sequence has
/// this identifier" and "what unconsumed sequences most resemble this
/// one". Sequences handed out as training examples are suppressed so
/// they are never selected again, but they stay visible to direct
/// lookup.
#[derive(Default)]
pub struct PegList {
    /// sequences in original read order
    sequences: Vec<Sequence>,
    /// identifier -> position in `sequences`
    index: HashMap<String, usize>,
    /// identifiers already used as training examples
    suppressed: HashSet<String>,
}

impl PegList {
    /// Load a peg list from a FASTA file, skipping any identifiers in
    /// `deleted`. The file may be gzip-compressed.
    pub fn load(genome: &str, path: &Path, deleted: &HashSet<String>) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::data_source(genome, path, e))?;
        let (input, _compression) =
            get_reader(Box::new(file)).map_err(|e| Error::data_source(genome, path, e))?;
        let reader = fasta::Reader::new(BufReader::new(input));
        let mut list = PegList::default();
        for record in reader.records() {
            let record = record.map_err(|e| Error::data_source(genome, path, e))?;
            if deleted.contains(record.id()) {
                continue;
            }
            let residues = std::str::from_utf8(record.seq())
                .map_err(|e| Error::data_source(genome, path, e))?;
            list.push(Sequence::new(
                record.id(),
                record.desc().unwrap_or(""),
                residues,
            ));
        }
        Ok(list)
    }

    /// Build a peg list from already-loaded sequences.
    pub fn from_sequences(sequences: impl IntoIterator<Item = Sequence>) -> Self {
        let mut list = PegList::default();
        for seq in sequences {
            list.push(seq);
        }
        list
    }

    fn push(&mut self, seq: Sequence) {
        if !self.index.contains_key(&seq.id) {
            self.index.insert(seq.id.clone(), self.sequences.len());
            self.sequences.push(seq);
        }
    }

    /// Look up a sequence by identifier. Suppression does not hide a
    /// sequence from this lookup.
    pub fn get(&self, id: &str) -> Option<&Sequence> {
        self.index.get(id).map(|&i| &self.sequences[i])
    }

    /// Mark a sequence as consumed so proximity searches never return
    /// it again. Suppressing an already-suppressed sequence is a no-op.
    pub fn suppress(&mut self, seq: &Sequence) {
        self.suppressed.insert(seq.id.clone());
    }

    /// True if the identifier has been suppressed.
    pub fn is_suppressed(&self, id: &str) -> bool {
        self.suppressed.contains(id)
    }

    /// Append up to `count` unconsumed sequences resembling `target` to
    /// `out`, never including the target itself or anything already in
    /// `out`. If fewer candidates remain, all of them are appended.
    ///
    /// Candidates are ranked by how close their residue length is to the
    /// target's, with ties broken by original read order, so results are
    /// reproducible for a given suppression history. No alignment is
    /// computed. This does not suppress the returned sequences; callers
    /// that commit them must do that explicitly.
    pub fn find_close(&self, target: &Sequence, count: usize, out: &mut Vec<Sequence>) {
        if count == 0 {
            return;
        }
        let taken: HashSet<&str> = out.iter().map(|seq| seq.id.as_str()).collect();
        let mut candidates: Vec<usize> = (0..self.sequences.len())
            .filter(|&i| {
                let seq = &self.sequences[i];
                seq.id != target.id
                    && !self.suppressed.contains(&seq.id)
                    && !taken.contains(seq.id.as_str())
            })
            .collect();
        candidates.sort_by_key(|&i| (self.sequences[i].len().abs_diff(target.len()), i));
        for &i in candidates.iter().take(count) {
            out.push(self.sequences[i].clone());
        }
    }

    /// Number of sequences in the genome, suppressed or not.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Iterate the sequences in original read order.
    pub fn iter(&self) -> impl Iterator<Item = &Sequence> {
        self.sequences.iter()
    }
}
