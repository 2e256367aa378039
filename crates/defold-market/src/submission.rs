use defold_core::SequenceRecord;
use serde::{Deserialize, Serialize};

use crate::Wei;

/// Gene placeholder; FASTA headers in the expected layout carry no gene name.
pub const UNKNOWN_GENE: &str = "unknown";

/// Settings applied to every record submitted from the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionConfig {
    /// Researcher name recorded as the dataset owner's display name.
    pub researcher_name: String,
    /// Listing price for each submitted record.
    pub price: Wei,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            researcher_name: "ResearcherExample".to_string(),
            price: Wei(100_000_000_000_000_000),
        }
    }
}

/// Arguments of a `submitGenomicData` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenomicDataSubmission {
    pub name: String,
    pub chromosome: String,
    pub gene: String,
    pub organism: String,
    pub nucleotide_range: String,
    pub assembly_type: String,
    pub accession: String,
    pub sequence: String,
    pub title: String,
    pub price: Wei,
}

impl GenomicDataSubmission {
    /// Build the call arguments for one parsed record.
    ///
    /// Header fields are passed through as parsed, `"N/A"` included.
    pub fn from_record(record: &SequenceRecord, config: &SubmissionConfig, title: &str) -> Self {
        let header = &record.parsed_header;
        Self {
            name: config.researcher_name.clone(),
            chromosome: header.chromosome.clone(),
            gene: UNKNOWN_GENE.to_string(),
            organism: header.organism.clone(),
            nucleotide_range: header.nucleotide_range.clone(),
            assembly_type: header.assembly_type.clone(),
            accession: header.accession.clone(),
            sequence: record.sequence.clone(),
            title: title.to_string(),
            price: config.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use defold_core::record::{ParsedHeader, NOT_AVAILABLE};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_record() {
        let header = ParsedHeader {
            accession: "AC123456".to_string(),
            nucleotide_range: "1000-2000".to_string(),
            organism: "Homo sapiens".to_string(),
            chromosome: "chromosome 11".to_string(),
            ..ParsedHeader::default()
        };
        let mut record = SequenceRecord::new(">AC123456:1000-2000 Homo sapiens chromosome 11", header);
        record.push_line("ATGC");

        let submission =
            GenomicDataSubmission::from_record(&record, &SubmissionConfig::default(), "Insulin");
        assert_eq!(submission.name, "ResearcherExample");
        assert_eq!(submission.chromosome, "chromosome 11");
        assert_eq!(submission.gene, UNKNOWN_GENE);
        assert_eq!(submission.assembly_type, NOT_AVAILABLE);
        assert_eq!(submission.sequence, "ATGC");
        assert_eq!(submission.title, "Insulin");
        assert_eq!(submission.price, Wei::from_ether("0.1").unwrap());
    }
}
