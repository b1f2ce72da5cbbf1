use crate::libs::storage::storage_sqlite::{SqliteStore, SqliteTransaction};
use crate::libs::storage::storage_traits::{StoreError, Transactional};

/// Opens the store at `path` and creates the backing schema when absent.
///
/// The whole persisted state is one key-value table: each collection is a
/// JSON array stored under a fixed key, plus the singleton session record.
pub fn initialize_database(path: &str) -> Result<SqliteStore, StoreError> {
    let store = SqliteStore::new(path)?;
    let mut connection = store.new_connection()?;

    let tx = SqliteTransaction::new(&mut connection)?;
    tx.inner().execute(
        "CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
            );",
        [],
    )?;
    tx.commit()?;

    tracing::debug!(path, "local store initialised");
    Ok(store)
}
