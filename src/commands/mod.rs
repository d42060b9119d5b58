pub mod collate;
pub mod extract;
pub mod fasta;
pub mod features;
pub mod pegs;
pub mod proteins;
pub mod roles;

pub(crate) mod support;
