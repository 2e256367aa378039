use crate::{Address, GenomicDataSubmission, MarketError, Wei};

/// Mock datasets listed on a fresh ledger.
const MOCK_DATA_CSV: &str = include_str!("../data/mock_genomic_data.csv");

/// Account that owns the mock datasets.
pub const MOCK_OWNER: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";

pub fn mock_owner() -> Result<Address, MarketError> {
    MOCK_OWNER.parse()
}

/// Parse the embedded CSV into submissions.
///
/// CSV columns: name, chromosome, gene, organism, nucleotide_range,
/// assembly_type, accession, sequence, title, price_ether
pub fn mock_submissions() -> Result<Vec<GenomicDataSubmission>, MarketError> {
    let mut submissions = Vec::new();

    for line in MOCK_DATA_CSV.lines().skip(1) {
        // skip header
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<String> = parse_csv_line(line)
            .into_iter()
            .map(|f| f.trim().to_string())
            .collect();
        if fields.len() < 10 {
            continue;
        }

        submissions.push(GenomicDataSubmission {
            name: fields[0].clone(),
            chromosome: fields[1].clone(),
            gene: fields[2].clone(),
            organism: fields[3].clone(),
            nucleotide_range: fields[4].clone(),
            assembly_type: fields[5].clone(),
            accession: fields[6].clone(),
            sequence: fields[7].clone(),
            title: fields[8].clone(),
            price: Wei::from_ether(&fields[9])?,
        });
    }

    Ok(submissions)
}

/// CSV line parser that keeps commas inside quoted fields.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}
