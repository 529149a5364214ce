use rusqlite::Connection;

/// returns the current version of the database as a String
pub fn get_version(con: &Connection) -> Result<String, rusqlite::Error> {
    con.query_row(
        include_str!("../assets/queries/metadata/get_database_version.sql"),
        [],
        |row| row.get(0),
    )
}

/// whether the tables have been created yet
pub fn metadata_table_exists(con: &Connection) -> Result<bool, rusqlite::Error> {
    con.query_row(
        include_str!("../assets/queries/metadata/metadata_table_exists.sql"),
        [],
        |row| row.get(0),
    )
}
