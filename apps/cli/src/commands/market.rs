use std::path::Path;

use defold_core::NucleotideCounts;
use defold_market::contract::LoggedEvent;
use defold_market::dashboard::{Command, Dashboard, Outcome};
use defold_market::{Address, DataId, GenomicDataContract, SqliteLedger, SubmissionConfig, Wei};

use crate::commands::file::read_fasta_text;
use crate::dto::{EntryDto, InfoDto};
use crate::errors::CliError;

/// Submit every record of a FASTA file under one title.
pub fn submit_file(
    ledger: &mut SqliteLedger,
    account: Address,
    config: SubmissionConfig,
    path: &Path,
    title: &str,
) -> Result<Outcome, CliError> {
    let content = read_fasta_text(path)?;
    // Reject non-FASTA content before anything reaches the ledger
    defold_formats::parse_content(&content)?;

    let mut dashboard = Dashboard::new(account, config);
    dashboard.dispatch(
        ledger,
        Command::LoadFile {
            file_name: path.display().to_string(),
            content,
        },
    )?;
    dashboard.dispatch(ledger, Command::SetTitle(title.to_string()))?;
    Ok(dashboard.dispatch(ledger, Command::Submit)?)
}

pub fn purchase(
    ledger: &mut SqliteLedger,
    buyer: &Address,
    data_id: DataId,
    payment: Wei,
) -> Result<NucleotideCounts, CliError> {
    Ok(ledger.purchase_genomic_data(buyer, data_id, payment)?)
}

pub fn nucleotide_counts(
    ledger: &SqliteLedger,
    caller: &Address,
    data_id: DataId,
) -> Result<NucleotideCounts, CliError> {
    Ok(ledger.get_nucleotide_counts(caller, data_id)?)
}

pub fn gc_base_pairs(ledger: &SqliteLedger, caller: &Address, data_id: DataId) -> Result<u64, CliError> {
    Ok(ledger.calculate_gc_base_pair(caller, data_id)?)
}

pub fn homologous_base_pairs(
    ledger: &SqliteLedger,
    caller: &Address,
    first: DataId,
    second: DataId,
) -> Result<u64, CliError> {
    Ok(ledger.calculate_homologous_base_pair(caller, first, second)?)
}

pub fn rate(
    ledger: &mut SqliteLedger,
    rater: &Address,
    researcher: &Address,
    rating: u8,
) -> Result<u64, CliError> {
    ledger.rate_researcher(rater, researcher, rating)?;
    Ok(ledger.get_researcher_rating(researcher)?)
}

pub fn researcher_rating(ledger: &SqliteLedger, researcher: &Address) -> Result<u64, CliError> {
    Ok(ledger.get_researcher_rating(researcher)?)
}

pub fn info(ledger: &SqliteLedger, data_id: DataId) -> Result<InfoDto, CliError> {
    Ok(InfoDto::from(&ledger.get_genomic_data_info(data_id)?))
}

pub fn list(ledger: &SqliteLedger) -> Result<Vec<EntryDto>, CliError> {
    Ok(ledger.list_genomic_data()?.iter().map(EntryDto::from).collect())
}

pub fn events(ledger: &SqliteLedger) -> Result<Vec<LoggedEvent>, CliError> {
    Ok(ledger.events()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use defold_market::MarketError;
    use pretty_assertions::assert_eq;

    fn account(n: u8) -> Address {
        format!("0x{:040x}", n).parse().unwrap()
    }

    #[test]
    fn test_submit_and_list() {
        let path = std::env::temp_dir().join(format!("defold-cli-submit-{}.fasta", std::process::id()));
        std::fs::write(&path, ">AC9:1-8 Danio rerio\nACGTACGT\n").unwrap();

        let mut ledger = SqliteLedger::open_in_memory().unwrap();
        let outcome = submit_file(
            &mut ledger,
            account(1),
            SubmissionConfig::default(),
            &path,
            "Zebrafish",
        )
        .unwrap();
        assert_eq!(outcome, Outcome::Submitted { data_ids: vec![1] });

        let listed = list(&ledger).unwrap();
        assert_eq!(listed[0].organism, "Danio rerio");
        assert_eq!(listed[0].price_ether, "0.1");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_market_round() {
        let mut ledger = SqliteLedger::open_in_memory().unwrap();
        ledger.seed_mock_data().unwrap();
        let buyer = account(2);

        assert!(matches!(
            gc_base_pairs(&ledger, &buyer, 3),
            Err(CliError::Market(MarketError::AccessDenied(3)))
        ));
        purchase(&mut ledger, &buyer, 3, Wei::from_ether("0.03").unwrap()).unwrap();
        assert_eq!(
            nucleotide_counts(&ledger, &buyer, 3).unwrap().total(),
            20
        );

        let owner: Address = defold_market::seed_data::MOCK_OWNER.parse().unwrap();
        assert_eq!(rate(&mut ledger, &buyer, &owner, 5).unwrap(), 5);
        assert_eq!(info(&ledger, 3).unwrap().owner_rating, 5);
        // Three seeded submissions, the purchase and the rating
        assert_eq!(events(&ledger).unwrap().len(), 5);
    }
}
