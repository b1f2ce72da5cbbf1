pub mod contacts;
pub mod database;
pub mod directory;
pub mod ratings;
pub mod records;
pub mod requests;
pub mod storage_sqlite;
pub mod storage_traits;
