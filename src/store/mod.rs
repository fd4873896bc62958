pub mod keys;
pub mod migrate;
pub mod operations;

use serde::Serialize;
use sled::Db;
use thiserror::Error;

#[derive(Debug)]
pub struct Store {
    db: Db,
    pub entries: sled::Tree,
    pub settings: sled::Tree,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("empty input: both native and target text are required")]
    EmptyInput,
    #[error("duplicate entry: the pair already exists")]
    DuplicateEntry,
}

impl Store {
    pub fn open(sled_path: &str) -> Result<Self, StoreError> {
        let db = sled::open(sled_path)?;
        let entries = db.open_tree(keys::trees::ENTRIES)?;
        let settings = db.open_tree(keys::trees::SETTINGS)?;

        Ok(Self {
            db,
            entries,
            settings,
        })
    }

    pub fn flush(&self) -> Result<(), StoreError> {
        self.db.flush()?;
        Ok(())
    }

    pub(crate) fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec(value)?)
    }
}
