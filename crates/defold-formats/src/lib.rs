pub mod detect;
pub mod fasta;
pub mod header;

use std::path::Path;

use defold_core::SequenceRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),
    #[error("Sequence of record '{0}' starts with '>' and cannot be written as FASTA")]
    HeaderLikeSequence(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Fasta,
    Unknown,
}

/// Parse file content based on detected format
///
/// Blank content is accepted and yields no records.
pub fn parse_content(content: &str) -> Result<Vec<SequenceRecord>, FormatError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    match detect::detect_format(content) {
        FileFormat::Fasta => Ok(fasta::parse(content)),
        FileFormat::Unknown => Err(FormatError::UnsupportedFormat(
            "content does not start with a '>' header".to_string(),
        )),
    }
}

/// Read a file from disk and parse it as FASTA.
///
/// The extension is not checked; callers that accept only `.fasta`
/// selections use [`detect::detect_format_from_extension`] first.
pub fn read_fasta_file<P: AsRef<Path>>(path: P) -> Result<Vec<SequenceRecord>, FormatError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    log::debug!(
        "read {} bytes from {}",
        content.len(),
        path.as_ref().display()
    );
    Ok(fasta::parse(&content))
}
