/// Result type for the core library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the core library.
///
/// A missing genome or peg is not an error; those lookups return `Option`
/// and the drivers decide whether to skip or complain. The variants here
/// are the genuinely broken cases: an unreadable or malformed sequence
/// source, or an output sink that cannot be written.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A genome's sequence source exists but cannot be read or parsed.
    #[error("cannot read sequence data for genome {genome} ({path}): {reason}")]
    DataSource {
        genome: String,
        path: std::path::PathBuf,
        reason: String,
    },

    /// Standard I/O errors, fatal to the run.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn data_source(
        genome: &str,
        path: &std::path::Path,
        reason: impl ToString,
    ) -> Self {
        Error::DataSource {
            genome: genome.to_string(),
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
