use rusqlite::Row;

/// Maps a row selected by name into a model.
pub trait FromSqliteRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}
