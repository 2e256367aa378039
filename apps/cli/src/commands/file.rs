use std::path::Path;

use defold_core::SequenceRecord;
use defold_formats::detect::detect_format_from_extension;
use defold_formats::{FileFormat, FormatError};
use log::warn;

use crate::dto::RecordStatsDto;
use crate::errors::CliError;

/// Read and parse a FASTA file.
pub fn open_fasta_file(path: &Path) -> Result<Vec<SequenceRecord>, CliError> {
    let content = read_fasta_text(path)?;
    Ok(defold_formats::parse_content(&content)?)
}

/// Read a file's text. Only `.fasta`, `.fa`, `.fna` and `.fsa` files are
/// accepted.
pub fn read_fasta_text(path: &Path) -> Result<String, CliError> {
    let display = path.display().to_string();
    if detect_format_from_extension(&display) == FileFormat::Unknown {
        warn!("{} does not have a FASTA extension", display);
        return Err(FormatError::UnsupportedFormat(format!(
            "{} is not a .fasta/.fa/.fna/.fsa file",
            display
        ))
        .into());
    }
    Ok(std::fs::read_to_string(path)?)
}

pub fn record_stats(path: &Path) -> Result<Vec<RecordStatsDto>, CliError> {
    Ok(open_fasta_file(path)?
        .iter()
        .map(RecordStatsDto::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_temp(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("defold-cli-{}-{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_open_and_stats() {
        let path = write_temp("ok.fasta", ">AC1:1-4 Homo sapiens\nGGCC\n>AC2\nAATT\n");
        let records = open_fasta_file(&path).unwrap();
        assert_eq!(records.len(), 2);

        let stats = record_stats(&path).unwrap();
        assert_eq!(stats[0].gc_base_pairs, 4);
        assert_eq!(stats[1].accession, "AC2");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_rejects_non_fasta_content() {
        let path = write_temp("bad.fasta", "LOCUS pUC19\n");
        assert!(matches!(
            open_fasta_file(&path),
            Err(CliError::Format(FormatError::UnsupportedFormat(_)))
        ));
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_rejects_non_fasta_extension() {
        let path = write_temp("valid.txt", ">AC1:1-4 Homo sapiens\nGGCC\n");
        match read_fasta_text(&path) {
            Err(CliError::Format(FormatError::UnsupportedFormat(msg))) => {
                assert!(msg.ends_with("valid.txt is not a .fasta/.fa/.fna/.fsa file"));
            }
            other => panic!("expected an unsupported format error, got {:?}", other),
        }
        assert!(open_fasta_file(&path).is_err());
        std::fs::remove_file(&path).unwrap();
    }
}
