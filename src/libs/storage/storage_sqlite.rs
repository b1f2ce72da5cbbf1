use crate::libs::storage::records::User;
use crate::libs::storage::storage_traits::{
    SkillShareStore, Storage, StoreError, Transactional,
};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, OptionalExtension, Transaction};
use serde::de::DeserializeOwned;
use serde::Serialize;

// Storage keys, unchanged from the original application's localStorage layout.
pub const USERS_KEY: &str = "users";
pub const LEARN_REQUESTS_KEY: &str = "learnRequests";
pub const RATINGS_KEY: &str = "ratings";
pub const SHARED_CONTACTS_KEY: &str = "sharedContacts";
pub const CURRENT_USER_KEY: &str = "currentUser";

#[derive(Debug)]
pub struct SqliteStore {
    conn_pool: Pool<SqliteConnectionManager>,
}

impl SqliteStore {
    pub fn new(db_path: &str) -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::new(manager)?;
        Ok(Self { conn_pool: pool })
    }

    pub fn new_connection(&self) -> Result<PooledConnection<SqliteConnectionManager>, StoreError> {
        Ok(self.conn_pool.get()?)
    }
}

impl Storage for SqliteStore {
    type Transaction<'s>
        = SqliteTransaction<'s>
    where
        Self: 's;
}

pub struct SqliteTransaction<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> SqliteTransaction<'conn> {
    pub fn new(
        conn: &'conn mut PooledConnection<SqliteConnectionManager>,
    ) -> Result<Self, StoreError> {
        let tx = conn.transaction()?;
        Ok(Self { tx })
    }

    pub fn inner(&self) -> &Transaction<'conn> {
        &self.tx
    }

    // --- storage primitives ---

    pub fn get_value(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .tx
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.tx
            .execute(
                "INSERT OR REPLACE INTO local_storage (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(map_write_error)?;
        Ok(())
    }

    pub fn remove_value(&mut self, key: &str) -> Result<(), StoreError> {
        self.tx
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// An absent key is the empty collection; a stored value that fails to
    /// deserialize is an error, never silently empty.
    pub fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        match self.get_value(key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn write_collection<T: Serialize>(
        &mut self,
        key: &str,
        records: &[T],
    ) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records)?;
        self.set_value(key, &raw)
    }

    // --- current session record ---

    pub fn read_session(&self) -> Result<Option<User>, StoreError> {
        match self.get_value(CURRENT_USER_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn write_session(&mut self, user: &User) -> Result<(), StoreError> {
        let raw = serde_json::to_string(user)?;
        self.set_value(CURRENT_USER_KEY, &raw)
    }

    pub fn clear_session(&mut self) -> Result<(), StoreError> {
        self.remove_value(CURRENT_USER_KEY)
    }
}

fn map_write_error(err: rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::DiskFull => {
            StoreError::StorageFull
        }
        other => StoreError::Sqlite(other),
    }
}

impl<'conn> Transactional for SqliteTransaction<'conn> {
    fn commit(self) -> Result<(), StoreError> {
        Ok(self.tx.commit()?)
    }

    fn rollback(self) -> Result<(), StoreError> {
        Ok(self.tx.rollback()?)
    }
}

impl<'conn> SkillShareStore for SqliteTransaction<'conn> {}
