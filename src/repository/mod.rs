use std::path::Path;
use std::time::Duration;

use rusqlite::{Connection, OpenFlags, Result};

pub mod document_repository;
pub mod flashcard_repository;
pub mod folder_repository;
pub mod graph_repository;
pub mod metadata_repository;
pub mod search_repository;
pub mod tag_repository;

#[cfg(test)]
mod tests;

/// writers wait this long for the database lock before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// opens a new connection to the database at `location`.
///
/// foreign keys are turned on for every connection, since deletes rely on cascades
pub fn open_connection(location: &Path) -> Result<Connection> {
    let con = Connection::open_with_flags(location, OpenFlags::default())?;
    con.busy_timeout(BUSY_TIMEOUT)?;
    con.pragma_update(None, "foreign_keys", "ON")?;
    let journal_mode: String =
        con.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    log::trace!("opened {location:?} in {journal_mode} mode");
    Ok(con)
}

/// runs init.sql on the database
fn create_db(con: &Connection) -> Result<()> {
    con.execute_batch(include_str!("../assets/init.sql"))
}

/// handles checking if the database exists and is up to the correct version.
/// If not, it creates the tables and seeds the lookup rows
pub fn initialize_db(con: &Connection) -> Result<()> {
    if !metadata_repository::metadata_table_exists(con)? {
        log::info!("no database found, creating tables");
        return create_db(con);
    }
    let version = metadata_repository::get_version(con)?;
    log::debug!("database is at version {version}");
    Ok(())
}
