/// An owned protein sequence: identifier, comment, and residue letters.
///
/// The comment doubles as the class tag when a training set is being
/// built: `"1"` marks a positive example and `"0"` a counter-example.
/// For prediction and plain-FASTA output it carries free text (usually
/// the functional assignment). The id and residues never change after
/// construction; the comment is overwritten once, when the sequence is
/// stored into a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub id: String,
    pub comment: String,
    pub residues: String,
}

impl Sequence {
    pub fn new(
        id: impl Into<String>,
        comment: impl Into<String>,
        residues: impl Into<String>,
    ) -> Self {
        Sequence {
            id: id.into(),
            comment: comment.into(),
            residues: residues.into(),
        }
    }

    /// Number of residue letters.
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}
