use std::path::Path;

use chrono::Utc;
use defold_core::{operations, NucleotideCounts};
use log::{debug, info};
use rusqlite::Connection;

use crate::contract::{GenomicDataEntry, GenomicDataInfo, LoggedEvent};
use crate::{
    db, seed_data, Address, ContractEvent, DataId, GenomicDataContract, GenomicDataSubmission,
    MarketError, Result, Wei,
};

const MIN_RATING: u8 = 1;
const MAX_RATING: u8 = 5;

/// Local ledger that implements the marketplace contract over SQLite.
pub struct SqliteLedger {
    conn: Connection,
}

impl SqliteLedger {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        debug!("opening ledger at {}", path.as_ref().display());
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        db::init_db(&conn)?;
        Ok(Self { conn })
    }

    /// List the mock datasets once, emitting a submission event for each
    /// new one. Returns how many were newly inserted.
    pub fn seed_mock_data(&mut self) -> Result<usize> {
        let owner = seed_data::mock_owner()?;
        let submissions = seed_data::mock_submissions()?;

        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        for submission in &submissions {
            if let Some(data_id) = db::insert_mock_data(&tx, submission, &owner)? {
                emit(&tx, submitted_event(data_id, submission, &owner))?;
                inserted += 1;
            }
        }
        tx.commit()?;

        debug!("seeded {} mock datasets", inserted);
        Ok(inserted)
    }

    pub fn list_genomic_data(&self) -> Result<Vec<GenomicDataEntry>> {
        Ok(db::list_genomic_data(&self.conn)?)
    }

    fn entry(&self, data_id: DataId) -> Result<GenomicDataEntry> {
        db::get_genomic_data(&self.conn, data_id)?.ok_or(MarketError::UnknownData(data_id))
    }

    /// Fetch a dataset the caller owns or bought.
    fn accessible_entry(&self, caller: &Address, data_id: DataId) -> Result<GenomicDataEntry> {
        let entry = self.entry(data_id)?;
        if entry.owner == *caller || db::has_purchased(&self.conn, data_id, caller)? {
            Ok(entry)
        } else {
            Err(MarketError::AccessDenied(data_id))
        }
    }
}

/// Log an event on the connection or transaction carrying the state change.
fn emit(conn: &Connection, event: ContractEvent) -> Result<()> {
    db::append_event(
        conn,
        &LoggedEvent {
            at: Utc::now(),
            event,
        },
    )
}

fn submitted_event(
    data_id: DataId,
    submission: &GenomicDataSubmission,
    owner: &Address,
) -> ContractEvent {
    ContractEvent::GenomicDataSubmitted {
        data_id,
        title: submission.title.clone(),
        price: submission.price,
        owner: owner.clone(),
    }
}

impl GenomicDataContract for SqliteLedger {
    fn submit_genomic_data(
        &mut self,
        caller: &Address,
        submission: &GenomicDataSubmission,
    ) -> Result<DataId> {
        let tx = self.conn.transaction()?;
        let data_id = db::insert_genomic_data(&tx, submission, caller)?;
        emit(&tx, submitted_event(data_id, submission, caller))?;
        tx.commit()?;
        info!("submitted genomic data {} ({})", data_id, submission.title);
        Ok(data_id)
    }

    fn purchase_genomic_data(
        &mut self,
        caller: &Address,
        data_id: DataId,
        payment: Wei,
    ) -> Result<NucleotideCounts> {
        let entry = self.entry(data_id)?;
        if entry.owner == *caller {
            return Err(MarketError::OwnData(data_id));
        }
        if db::has_purchased(&self.conn, data_id, caller)? {
            return Err(MarketError::AlreadyPurchased(data_id));
        }
        if payment < entry.price {
            return Err(MarketError::InsufficientPayment {
                price: entry.price,
                paid: payment,
            });
        }

        let tx = self.conn.transaction()?;
        db::record_purchase(&tx, data_id, caller, payment)?;
        emit(
            &tx,
            ContractEvent::GenomicDataSold {
                data_id,
                buyer: caller.clone(),
                price: entry.price,
            },
        )?;
        tx.commit()?;
        info!("{} purchased genomic data {}", caller, data_id);
        Ok(operations::nucleotide_counts(&entry.sequence))
    }

    fn get_nucleotide_counts(&self, caller: &Address, data_id: DataId) -> Result<NucleotideCounts> {
        let entry = self.accessible_entry(caller, data_id)?;
        Ok(operations::nucleotide_counts(&entry.sequence))
    }

    fn calculate_gc_base_pair(&self, caller: &Address, data_id: DataId) -> Result<u64> {
        let entry = self.accessible_entry(caller, data_id)?;
        Ok(operations::gc_base_pairs(&entry.sequence))
    }

    fn calculate_homologous_base_pair(
        &self,
        caller: &Address,
        first: DataId,
        second: DataId,
    ) -> Result<u64> {
        let a = self.accessible_entry(caller, first)?;
        let b = self.accessible_entry(caller, second)?;
        Ok(operations::homologous_base_pairs(&a.sequence, &b.sequence))
    }

    fn rate_researcher(&mut self, caller: &Address, researcher: &Address, rating: u8) -> Result<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(MarketError::InvalidRating(rating));
        }
        if caller == researcher {
            return Err(MarketError::SelfRating);
        }
        let tx = self.conn.transaction()?;
        db::upsert_rating(&tx, researcher, caller, rating)?;
        emit(
            &tx,
            ContractEvent::ResearcherRated {
                researcher: researcher.clone(),
                rater: caller.clone(),
                rating,
            },
        )?;
        Ok(tx.commit()?)
    }

    fn get_researcher_rating(&self, researcher: &Address) -> Result<u64> {
        let (sum, count) = db::rating_totals(&self.conn, researcher)?;
        Ok(if count == 0 { 0 } else { sum / count })
    }

    fn get_genomic_data_info(&self, data_id: DataId) -> Result<GenomicDataInfo> {
        let entry = self.entry(data_id)?;
        let owner_rating = self.get_researcher_rating(&entry.owner)?;
        Ok(GenomicDataInfo {
            title: entry.title,
            price: entry.price,
            owner: entry.owner,
            owner_name: entry.name,
            owner_rating,
        })
    }

    fn genomic_data_counter(&self) -> Result<u64> {
        Ok(db::count_genomic_data(&self.conn)?)
    }

    fn genomic_data(&self, data_id: DataId) -> Result<GenomicDataEntry> {
        self.entry(data_id)
    }

    fn events(&self) -> Result<Vec<LoggedEvent>> {
        db::list_events(&self.conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(n: u8) -> Address {
        format!("0x{:040x}", n).parse().unwrap()
    }

    fn seeded() -> SqliteLedger {
        let mut ledger = SqliteLedger::open_in_memory().unwrap();
        ledger.seed_mock_data().unwrap();
        ledger
    }

    #[test]
    fn test_seed_is_idempotent() {
        let mut ledger = SqliteLedger::open_in_memory().unwrap();
        assert_eq!(ledger.seed_mock_data().unwrap(), 3);
        assert_eq!(ledger.seed_mock_data().unwrap(), 0);
        assert_eq!(ledger.genomic_data_counter().unwrap(), 3);

        let events = ledger.events().unwrap();
        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0].event,
            ContractEvent::GenomicDataSubmitted { data_id: 1, title, .. } if title == "BRCA1 Gene Data"
        ));
    }

    #[test]
    fn test_failed_event_write_rolls_back_purchase() {
        let mut ledger = seeded();
        let buyer = account(7);
        let price = Wei::from_ether("0.05").unwrap();

        ledger.conn.execute("DROP TABLE events", []).unwrap();
        assert!(ledger.purchase_genomic_data(&buyer, 1, price).is_err());
        assert!(!db::has_purchased(&ledger.conn, 1, &buyer).unwrap());

        db::init_db(&ledger.conn).unwrap();
        assert!(ledger.purchase_genomic_data(&buyer, 1, price).is_ok());
        assert_eq!(ledger.events().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_event_write_rolls_back_submit_and_rating() {
        let mut ledger = SqliteLedger::open_in_memory().unwrap();
        let submission = seed_data::mock_submissions().unwrap().remove(0);

        ledger.conn.execute("DROP TABLE events", []).unwrap();
        assert!(ledger.submit_genomic_data(&account(1), &submission).is_err());
        assert!(ledger.rate_researcher(&account(2), &account(1), 4).is_err());
        assert!(ledger.seed_mock_data().is_err());
        assert_eq!(ledger.genomic_data_counter().unwrap(), 0);
        assert_eq!(ledger.get_researcher_rating(&account(1)).unwrap(), 0);
    }

    #[test]
    fn test_purchase_returns_counts() {
        let mut ledger = seeded();
        let buyer = account(7);
        let counts = ledger
            .purchase_genomic_data(&buyer, 1, Wei::from_ether("0.05").unwrap())
            .unwrap();
        assert_eq!(counts, operations::nucleotide_counts("ATGCGTACGTAGCTAGCTAGC"));
        assert_eq!(ledger.get_nucleotide_counts(&buyer, 1).unwrap(), counts);
    }

    #[test]
    fn test_purchase_rules() {
        let mut ledger = seeded();
        let buyer = account(7);
        let owner = seed_data::mock_owner().unwrap();

        assert!(matches!(
            ledger.purchase_genomic_data(&buyer, 1, Wei(1)),
            Err(MarketError::InsufficientPayment { .. })
        ));
        assert!(matches!(
            ledger.purchase_genomic_data(&owner, 1, Wei::from_ether("1").unwrap()),
            Err(MarketError::OwnData(1))
        ));
        assert!(matches!(
            ledger.purchase_genomic_data(&buyer, 42, Wei(0)),
            Err(MarketError::UnknownData(42))
        ));

        let price = Wei::from_ether("0.05").unwrap();
        ledger.purchase_genomic_data(&buyer, 1, price).unwrap();
        assert!(matches!(
            ledger.purchase_genomic_data(&buyer, 1, price),
            Err(MarketError::AlreadyPurchased(1))
        ));
    }

    #[test]
    fn test_statistics_need_access() {
        let mut ledger = seeded();
        let buyer = account(7);
        assert!(matches!(
            ledger.calculate_gc_base_pair(&buyer, 2),
            Err(MarketError::AccessDenied(2))
        ));

        ledger
            .purchase_genomic_data(&buyer, 2, Wei::from_ether("0.07").unwrap())
            .unwrap();
        assert_eq!(
            ledger.calculate_gc_base_pair(&buyer, 2).unwrap(),
            operations::gc_base_pairs("CGTACGTAGCTAGCTAGCTAG")
        );

        // Owner always has access
        let owner = seed_data::mock_owner().unwrap();
        assert!(ledger.calculate_gc_base_pair(&owner, 3).is_ok());
    }

    #[test]
    fn test_homologous_base_pair() {
        let ledger = seeded();
        let owner = seed_data::mock_owner().unwrap();
        let expected =
            operations::homologous_base_pairs("CGTACGTAGCTAGCTAGCTAG", "TACGTAGCTAGCTAGCTAGC");
        assert_eq!(
            ledger.calculate_homologous_base_pair(&owner, 2, 3).unwrap(),
            expected
        );
        assert!(ledger
            .calculate_homologous_base_pair(&account(9), 2, 3)
            .is_err());
    }

    #[test]
    fn test_ratings() {
        let mut ledger = SqliteLedger::open_in_memory().unwrap();
        let researcher = account(1);

        assert_eq!(ledger.get_researcher_rating(&researcher).unwrap(), 0);
        ledger.rate_researcher(&account(2), &researcher, 5).unwrap();
        ledger.rate_researcher(&account(3), &researcher, 2).unwrap();
        assert_eq!(ledger.get_researcher_rating(&researcher).unwrap(), 3);

        // Re-rating replaces
        ledger.rate_researcher(&account(3), &researcher, 5).unwrap();
        assert_eq!(ledger.get_researcher_rating(&researcher).unwrap(), 5);

        assert!(matches!(
            ledger.rate_researcher(&account(2), &researcher, 0),
            Err(MarketError::InvalidRating(0))
        ));
        assert!(matches!(
            ledger.rate_researcher(&researcher, &researcher, 3),
            Err(MarketError::SelfRating)
        ));
    }

    #[test]
    fn test_info_and_events() {
        let mut ledger = seeded();
        let owner = seed_data::mock_owner().unwrap();
        ledger.rate_researcher(&account(5), &owner, 4).unwrap();

        let info = ledger.get_genomic_data_info(2).unwrap();
        assert_eq!(info.title, "TP53 Gene Data");
        assert_eq!(info.owner_name, "Researcher2");
        assert_eq!(info.owner_rating, 4);

        let submission = GenomicDataSubmission {
            title: "Fresh".to_string(),
            ..seed_data::mock_submissions().unwrap().remove(0)
        };
        let id = ledger.submit_genomic_data(&account(5), &submission).unwrap();
        assert_eq!(id, 4);

        // Three seeded submissions, the rating, then the fresh submission
        let events = ledger.events().unwrap();
        assert_eq!(events.len(), 5);
        assert!(matches!(
            &events[3].event,
            ContractEvent::ResearcherRated { rating: 4, .. }
        ));
        assert!(matches!(
            &events[4].event,
            ContractEvent::GenomicDataSubmitted { data_id: 4, title, .. } if title == "Fresh"
        ));
    }
}
