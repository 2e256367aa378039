use rusqlite::{params, types::Type, Connection, OptionalExtension, Result as SqlResult};

use crate::contract::{GenomicDataEntry, LoggedEvent};
use crate::{Address, DataId, GenomicDataSubmission, MarketError, Wei};

/// Create the ledger tables if they do not exist.
pub fn init_db(conn: &Connection) -> SqlResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS genomic_data (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            name             TEXT NOT NULL,
            chromosome       TEXT NOT NULL,
            gene             TEXT NOT NULL,
            organism         TEXT NOT NULL,
            nucleotide_range TEXT NOT NULL,
            assembly_type    TEXT NOT NULL,
            accession        TEXT NOT NULL,
            sequence         TEXT NOT NULL,
            title            TEXT NOT NULL,
            price            TEXT NOT NULL,
            owner            TEXT NOT NULL,
            is_mock          INTEGER NOT NULL DEFAULT 0,
            created_at       TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE UNIQUE INDEX IF NOT EXISTS idx_genomic_data_mock
            ON genomic_data(title) WHERE is_mock = 1;
        CREATE INDEX IF NOT EXISTS idx_genomic_data_owner ON genomic_data(owner);
        CREATE TABLE IF NOT EXISTS purchases (
            data_id INTEGER NOT NULL REFERENCES genomic_data(id),
            buyer   TEXT NOT NULL,
            price   TEXT NOT NULL,
            PRIMARY KEY (data_id, buyer)
        );
        CREATE TABLE IF NOT EXISTS ratings (
            researcher TEXT NOT NULL,
            rater      TEXT NOT NULL,
            rating     INTEGER NOT NULL,
            PRIMARY KEY (researcher, rater)
        );
        CREATE TABLE IF NOT EXISTS events (
            id      INTEGER PRIMARY KEY AUTOINCREMENT,
            payload TEXT NOT NULL
        );",
    )
}

/// Insert a submitted dataset. Returns its registry id.
pub fn insert_genomic_data(
    conn: &Connection,
    submission: &GenomicDataSubmission,
    owner: &Address,
) -> SqlResult<DataId> {
    insert_row(conn, "INSERT", submission, owner, false)?;
    Ok(conn.last_insert_rowid() as DataId)
}

/// Insert a mock dataset unless one with the same title was seeded before.
/// Returns the new registry id, or `None` if the row already existed.
pub fn insert_mock_data(
    conn: &Connection,
    submission: &GenomicDataSubmission,
    owner: &Address,
) -> SqlResult<Option<DataId>> {
    let changed = insert_row(conn, "INSERT OR IGNORE", submission, owner, true)?;
    Ok((changed > 0).then(|| conn.last_insert_rowid() as DataId))
}

fn insert_row(
    conn: &Connection,
    verb: &str,
    s: &GenomicDataSubmission,
    owner: &Address,
    is_mock: bool,
) -> SqlResult<usize> {
    let sql = format!(
        "{} INTO genomic_data
            (name, chromosome, gene, organism, nucleotide_range, assembly_type,
             accession, sequence, title, price, owner, is_mock)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        verb
    );
    conn.execute(
        &sql,
        params![
            s.name,
            s.chromosome,
            s.gene,
            s.organism,
            s.nucleotide_range,
            s.assembly_type,
            s.accession,
            s.sequence,
            s.title,
            s.price.to_string(),
            owner.as_str(),
            is_mock as i32,
        ],
    )
}

const ENTRY_COLUMNS: &str = "id, name, chromosome, gene, organism, nucleotide_range, assembly_type,
                             accession, sequence, title, price, owner";

/// Get a single dataset by id.
pub fn get_genomic_data(conn: &Connection, id: DataId) -> SqlResult<Option<GenomicDataEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM genomic_data WHERE id = ?1",
        ENTRY_COLUMNS
    ))?;
    stmt.query_row(params![id as i64], row_to_entry).optional()
}

/// All datasets in registry order.
pub fn list_genomic_data(conn: &Connection) -> SqlResult<Vec<GenomicDataEntry>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM genomic_data ORDER BY id",
        ENTRY_COLUMNS
    ))?;
    let rows = stmt.query_map([], row_to_entry)?;
    let mut entries = Vec::new();
    for row in rows {
        entries.push(row?);
    }
    Ok(entries)
}

pub fn count_genomic_data(conn: &Connection) -> SqlResult<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM genomic_data", [], |row| row.get(0))?;
    Ok(count as u64)
}

pub fn record_purchase(conn: &Connection, id: DataId, buyer: &Address, price: Wei) -> SqlResult<()> {
    conn.execute(
        "INSERT INTO purchases (data_id, buyer, price) VALUES (?1, ?2, ?3)",
        params![id as i64, buyer.as_str(), price.to_string()],
    )?;
    Ok(())
}

pub fn has_purchased(conn: &Connection, id: DataId, buyer: &Address) -> SqlResult<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM purchases WHERE data_id = ?1 AND buyer = ?2",
            params![id as i64, buyer.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Store a rating, replacing an earlier one by the same rater.
pub fn upsert_rating(
    conn: &Connection,
    researcher: &Address,
    rater: &Address,
    rating: u8,
) -> SqlResult<()> {
    conn.execute(
        "INSERT INTO ratings (researcher, rater, rating) VALUES (?1, ?2, ?3)
         ON CONFLICT(researcher, rater) DO UPDATE SET rating = excluded.rating",
        params![researcher.as_str(), rater.as_str(), rating],
    )?;
    Ok(())
}

/// Sum and count of the ratings a researcher received.
pub fn rating_totals(conn: &Connection, researcher: &Address) -> SqlResult<(u64, u64)> {
    let (sum, count): (i64, i64) = conn.query_row(
        "SELECT COALESCE(SUM(rating), 0), COUNT(*) FROM ratings WHERE researcher = ?1",
        params![researcher.as_str()],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok((sum as u64, count as u64))
}

pub fn append_event(conn: &Connection, event: &LoggedEvent) -> Result<(), MarketError> {
    let payload = serde_json::to_string(event)?;
    conn.execute("INSERT INTO events (payload) VALUES (?1)", params![payload])?;
    Ok(())
}

/// All logged events in emission order.
pub fn list_events(conn: &Connection) -> Result<Vec<LoggedEvent>, MarketError> {
    let mut stmt = conn.prepare("SELECT payload FROM events ORDER BY id")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    let mut events = Vec::new();
    for row in rows {
        events.push(serde_json::from_str(&row?)?);
    }
    Ok(events)
}

fn row_to_entry(row: &rusqlite::Row) -> SqlResult<GenomicDataEntry> {
    let price: String = row.get(10)?;
    let owner: String = row.get(11)?;
    Ok(GenomicDataEntry {
        id: row.get::<_, i64>(0)? as DataId,
        name: row.get(1)?,
        chromosome: row.get(2)?,
        gene: row.get(3)?,
        organism: row.get(4)?,
        nucleotide_range: row.get(5)?,
        assembly_type: row.get(6)?,
        accession: row.get(7)?,
        sequence: row.get(8)?,
        title: row.get(9)?,
        price: price.parse().map_err(|e| conversion_error(10, e))?,
        owner: owner.parse().map_err(|e| conversion_error(11, e))?,
    })
}

fn conversion_error(column: usize, e: MarketError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e))
}
