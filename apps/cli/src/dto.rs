//! Flat, JSON-friendly DTOs for command output.

use defold_core::{operations, NucleotideCounts, SequenceRecord};
use defold_market::contract::{GenomicDataEntry, GenomicDataInfo};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordStatsDto {
    pub header: String,
    pub accession: String,
    pub length: usize,
    pub counts: NucleotideCounts,
    pub gc_base_pairs: u64,
    pub gc_content: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDto {
    pub id: u64,
    pub title: String,
    pub chromosome: String,
    pub gene: String,
    pub organism: String,
    pub nucleotide_range: String,
    pub assembly_type: String,
    pub accession: String,
    pub price_ether: String,
    pub owner: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoDto {
    pub title: String,
    pub price_ether: String,
    pub owner: String,
    pub owner_name: String,
    pub owner_rating: u64,
}

impl From<&SequenceRecord> for RecordStatsDto {
    fn from(record: &SequenceRecord) -> Self {
        let counts = operations::nucleotide_counts(&record.sequence);
        RecordStatsDto {
            header: record.header.clone(),
            accession: record.parsed_header.accession.clone(),
            length: record.len(),
            counts,
            gc_base_pairs: counts.gc(),
            gc_content: operations::gc_content(&record.sequence),
        }
    }
}

// Sequences stay out of listings; they are only revealed through statistics.
impl From<&GenomicDataEntry> for EntryDto {
    fn from(e: &GenomicDataEntry) -> Self {
        EntryDto {
            id: e.id,
            title: e.title.clone(),
            chromosome: e.chromosome.clone(),
            gene: e.gene.clone(),
            organism: e.organism.clone(),
            nucleotide_range: e.nucleotide_range.clone(),
            assembly_type: e.assembly_type.clone(),
            accession: e.accession.clone(),
            price_ether: e.price.to_ether_string(),
            owner: e.owner.to_string(),
        }
    }
}

impl From<&GenomicDataInfo> for InfoDto {
    fn from(i: &GenomicDataInfo) -> Self {
        InfoDto {
            title: i.title.clone(),
            price_ether: i.price.to_ether_string(),
            owner: i.owner.to_string(),
            owner_name: i.owner_name.clone(),
            owner_rating: i.owner_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use defold_core::ParsedHeader;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_stats() {
        let mut record = SequenceRecord::new(">AC1", ParsedHeader::default());
        record.push_line("GGCCAATT");
        let dto = RecordStatsDto::from(&record);
        assert_eq!(dto.length, 8);
        assert_eq!(dto.gc_base_pairs, 4);
        assert!((dto.gc_content - 0.5).abs() < f64::EPSILON);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["gcBasePairs"], 4);
        assert_eq!(json["counts"]["a"], 2);
    }
}
