//! Build the SQLite names store from the flat baby-names file
//!
//! The source file is a headerless CSV of `name,gender,births` rows
//! (`Emma,F,18688`).

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use rusqlite::Connection;

use crate::records::{sort_records, NameRecord};
use crate::DataError;

/// Read and sort the records of a names file
pub fn read_names(path: impl AsRef<Path>) -> Result<Vec<NameRecord>, DataError> {
    let file = std::fs::File::open(path.as_ref())?;
    let records = read_names_from_reader(file)?;
    tracing::info!(
        path = %path.as_ref().display(),
        records = records.len(),
        "Read names file"
    );
    Ok(records)
}

/// Read and sort the records of names data from any reader
pub fn read_names_from_reader<R: Read>(reader: R) -> Result<Vec<NameRecord>, DataError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.deserialize() {
        let record: NameRecord = result?;
        records.push(record);
    }

    sort_records(&mut records);
    Ok(records)
}

/// Replace the names table with `records` in one transaction
pub fn populate(conn: &mut Connection, records: &[NameRecord]) -> Result<(), DataError> {
    let tx = conn.transaction()?;
    tx.execute_batch(
        "DROP TABLE IF EXISTS names;
         CREATE TABLE names (name TEXT NOT NULL, gender TEXT NOT NULL, births INTEGER NOT NULL);",
    )?;
    {
        let mut stmt = tx.prepare("INSERT INTO names (name, gender, births) VALUES (?1, ?2, ?3)")?;
        for record in records {
            stmt.execute((&record.name, record.gender.code(), record.births))?;
        }
    }
    tx.commit()?;

    Ok(())
}

/// Build a names database at `db_path` from the names file at `txt_path`.
///
/// Returns the number of records inserted.
pub fn build_database(
    txt_path: impl AsRef<Path>,
    db_path: impl AsRef<Path>,
) -> Result<usize, DataError> {
    let records = read_names(txt_path)?;
    let mut conn = Connection::open(db_path.as_ref())?;
    populate(&mut conn, &records)?;

    tracing::info!(
        db = %db_path.as_ref().display(),
        records = records.len(),
        "Built names database"
    );
    Ok(records.len())
}

/// Build the database only if it does not exist yet. Returns whether it was built.
pub fn ensure_database(
    txt_path: impl AsRef<Path>,
    db_path: impl AsRef<Path>,
) -> Result<bool, DataError> {
    if db_path.as_ref().exists() {
        tracing::debug!(db = %db_path.as_ref().display(), "Names database already present");
        return Ok(false);
    }

    build_database(txt_path, db_path)?;
    Ok(true)
}
