use crate::FileFormat;

/// Auto-detect file format from content
pub fn detect_format(content: &str) -> FileFormat {
    if content.trim_start().starts_with('>') {
        FileFormat::Fasta
    } else {
        FileFormat::Unknown
    }
}

/// Detect format from file extension
pub fn detect_format_from_extension(path: &str) -> FileFormat {
    let lower = path.to_lowercase();
    if lower.ends_with(".fa")
        || lower.ends_with(".fasta")
        || lower.ends_with(".fna")
        || lower.ends_with(".fsa")
    {
        FileFormat::Fasta
    } else {
        FileFormat::Unknown
    }
}
