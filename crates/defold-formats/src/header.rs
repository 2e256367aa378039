//! Positional decomposition of NCBI-style FASTA headers.
//!
//! The expected layout after the marker is
//! `ACCESSION:RANGE Genus species chromosome N ASSEMBLY Assembly Type`, e.g.
//! `>AC123456:1000-2000 Homo sapiens chromosome 11 GRCh38.p14 Primary Assembly`.
//! Fields are picked by token position only. Headers that do not follow this
//! layout still decompose, just into the wrong fields.

use defold_core::record::{ParsedHeader, NOT_AVAILABLE};

/// Decompose a header line (marker included) into its named fields.
pub fn decompose(header_line: &str) -> ParsedHeader {
    let cleaned = header_line.trim();
    let cleaned = cleaned.strip_prefix('>').unwrap_or(cleaned).trim();

    let mut tokens = cleaned.split_whitespace();
    let first = tokens.next().unwrap_or("");
    let rest: Vec<&str> = tokens.collect();

    let mut id_parts = first.split(':');
    let accession = id_parts.next().unwrap_or("");
    let range = id_parts.next().unwrap_or("");

    ParsedHeader {
        accession: or_not_available(accession),
        nucleotide_range: or_not_available(range),
        organism: join_tokens(&rest, 0, 2),
        chromosome: join_tokens(&rest, 2, 2),
        genome_assembly: join_tokens(&rest, 4, 1),
        assembly_type: join_tokens(&rest, 5, 2),
    }
}

fn or_not_available(value: &str) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

fn join_tokens(tokens: &[&str], start: usize, count: usize) -> String {
    let picked: Vec<&str> = tokens.iter().skip(start).take(count).copied().collect();
    or_not_available(&picked.join(" "))
}
