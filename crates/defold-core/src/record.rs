use nom::{
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res},
    sequence::separated_pair,
    IResult,
};
use serde::{Deserialize, Serialize};

/// Placeholder for header fields whose source tokens were missing.
pub const NOT_AVAILABLE: &str = "N/A";

/// Metadata recovered from a FASTA header line.
///
/// Every field is always populated; absent values hold [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedHeader {
    pub accession: String,
    pub nucleotide_range: String,
    pub organism: String,
    pub chromosome: String,
    pub genome_assembly: String,
    pub assembly_type: String,
}

impl Default for ParsedHeader {
    fn default() -> Self {
        Self {
            accession: NOT_AVAILABLE.to_string(),
            nucleotide_range: NOT_AVAILABLE.to_string(),
            organism: NOT_AVAILABLE.to_string(),
            chromosome: NOT_AVAILABLE.to_string(),
            genome_assembly: NOT_AVAILABLE.to_string(),
            assembly_type: NOT_AVAILABLE.to_string(),
        }
    }
}

impl ParsedHeader {
    /// Numeric bounds of the nucleotide range, if it reads `start-end`.
    pub fn range_bounds(&self) -> Option<(u64, u64)> {
        all_consuming(nucleotide_range)(self.nucleotide_range.as_str())
            .ok()
            .map(|(_, bounds)| bounds)
    }
}

fn nucleotide_range(input: &str) -> IResult<&str, (u64, u64)> {
    separated_pair(
        map_res(digit1, |s: &str| s.parse::<u64>()),
        char('-'),
        map_res(digit1, |s: &str| s.parse::<u64>()),
    )(input)
}

/// One record of a FASTA file: the raw header line, the joined sequence and
/// the decomposed header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceRecord {
    pub header: String,
    pub sequence: String,
    pub parsed_header: ParsedHeader,
}

impl SequenceRecord {
    pub fn new(header: impl Into<String>, parsed_header: ParsedHeader) -> Self {
        Self {
            header: header.into(),
            sequence: String::new(),
            parsed_header,
        }
    }

    /// Append one sequence line, trimmed, to the record.
    pub fn push_line(&mut self, line: &str) {
        self.sequence.push_str(line.trim());
    }

    pub fn has_header(&self) -> bool {
        !self.header.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
