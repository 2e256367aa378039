use chrono::{DateTime, Utc};
use defold_core::NucleotideCounts;
use serde::{Deserialize, Serialize};

use crate::{Address, GenomicDataSubmission, Result, Wei};

/// Registry index of a submitted dataset. The first submission gets 1.
pub type DataId = u64;

/// A dataset as stored in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenomicDataEntry {
    pub id: DataId,
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
    pub owner: Address,
}

/// Public listing data returned by `getGenomicDataInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenomicDataInfo {
    pub title: String,
    pub price: Wei,
    pub owner: Address,
    pub owner_name: String,
    pub owner_rating: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "PascalCase")]
pub enum ContractEvent {
    #[serde(rename_all = "camelCase")]
    GenomicDataSubmitted {
        data_id: DataId,
        title: String,
        price: Wei,
        owner: Address,
    },
    #[serde(rename_all = "camelCase")]
    GenomicDataSold {
        data_id: DataId,
        buyer: Address,
        price: Wei,
    },
    #[serde(rename_all = "camelCase")]
    ResearcherRated {
        researcher: Address,
        rater: Address,
        rating: u8,
    },
}

/// An emitted event with the time the ledger recorded it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: ContractEvent,
}

/// The genomic data marketplace contract.
///
/// Read accessors that reveal sequence statistics are restricted to the
/// dataset owner and accounts that purchased it.
pub trait GenomicDataContract {
    fn submit_genomic_data(
        &mut self,
        caller: &Address,
        submission: &GenomicDataSubmission,
    ) -> Result<DataId>;

    /// Buy access to a dataset. Returns its nucleotide counts.
    fn purchase_genomic_data(
        &mut self,
        caller: &Address,
        data_id: DataId,
        payment: Wei,
    ) -> Result<NucleotideCounts>;

    fn get_nucleotide_counts(&self, caller: &Address, data_id: DataId) -> Result<NucleotideCounts>;

    fn calculate_gc_base_pair(&self, caller: &Address, data_id: DataId) -> Result<u64>;

    fn calculate_homologous_base_pair(
        &self,
        caller: &Address,
        first: DataId,
        second: DataId,
    ) -> Result<u64>;

    /// Rate a researcher from 1 to 5. Rating again replaces the earlier score.
    fn rate_researcher(&mut self, caller: &Address, researcher: &Address, rating: u8) -> Result<()>;

    /// Integer average of all ratings, 0 if unrated.
    fn get_researcher_rating(&self, researcher: &Address) -> Result<u64>;

    fn get_genomic_data_info(&self, data_id: DataId) -> Result<GenomicDataInfo>;

    fn genomic_data_counter(&self) -> Result<u64>;

    fn genomic_data(&self, data_id: DataId) -> Result<GenomicDataEntry>;

    fn events(&self) -> Result<Vec<LoggedEvent>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let event = ContractEvent::GenomicDataSold {
            data_id: 3,
            buyer: "0x70997970c51812dc3a010c7d01b50e0d17dc79c8".parse().unwrap(),
            price: Wei(50),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "GenomicDataSold");
        assert_eq!(json["dataId"], 3);
        assert_eq!(json["price"], "50");
    }

    #[test]
    fn test_logged_event_roundtrip() {
        let logged = LoggedEvent {
            at: Utc::now(),
            event: ContractEvent::ResearcherRated {
                researcher: "0x70997970c51812dc3a010c7d01b50e0d17dc79c8".parse().unwrap(),
                rater: "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".parse().unwrap(),
                rating: 4,
            },
        };
        let json = serde_json::to_string(&logged).unwrap();
        let back: LoggedEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, logged);
    }
}
