use rand::Rng;

use crate::peg_list::PegList;
use crate::sequence::Sequence;

/// An ordered accumulation of sequences destined for one output file.
///
/// A batch only grows; once it has been shuffled it is handed to the
/// dataset writer by value, so nothing can be appended afterwards. The
/// batch owns copies of its sequences and the class label is stamped on
/// the copy at store time, so two batches can never fight over one
/// sequence object.
pub struct SequenceBatch {
    sequences: Vec<Sequence>,
}

impl SequenceBatch {
    pub fn with_capacity(cap: usize) -> Self {
        SequenceBatch {
            sequences: Vec::with_capacity(cap),
        }
    }

    /// Append a sequence. Duplicate identifiers are legal; the batch is
    /// a multiset.
    pub fn add(&mut self, seq: Sequence) {
        self.sequences.push(seq);
    }

    /// Store a copy of `seq` with the given class label and suppress it
    /// in its genome's peg list, in one step. Using this for every
    /// selected example keeps "added to the output" and "no longer
    /// selectable" from drifting apart.
    pub fn store_sequence(&mut self, seq: &Sequence, pegs: &mut PegList, label: &str) {
        let mut copy = seq.clone();
        copy.comment = label.to_string();
        self.sequences.push(copy);
        pegs.suppress(seq);
    }

    /// Length of the longest sequence in the batch; 0 when empty.
    pub fn longest(&self) -> usize {
        self.sequences.iter().map(Sequence::len).max().unwrap_or(0)
    }

    /// Randomly permute the first `n` entries, swapping each with a
    /// uniformly chosen entry from the rest of the whole list.
    pub fn shuffle(&mut self, n: usize) {
        self.shuffle_with(n, &mut rand::rng());
    }

    /// As `shuffle`, with a caller-supplied random source.
    pub fn shuffle_with<R: Rng>(&mut self, n: usize, rng: &mut R) {
        let len = self.sequences.len();
        for i in 0..n.min(len) {
            let j = rng.random_range(i..len);
            self.sequences.swap(i, j);
        }
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Sequence> {
        self.sequences.get(i)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sequence> {
        self.sequences.iter()
    }
}

impl IntoIterator for SequenceBatch {
    type Item = Sequence;
    type IntoIter = std::vec::IntoIter<Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sequences.into_iter()
    }
}
