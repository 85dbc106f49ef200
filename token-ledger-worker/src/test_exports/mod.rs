//! Test fixtures: in-memory implementations of the store interfaces.

use std::collections::BTreeMap;
use token_ledger_exports::{BatchReadState, LedgerError, StateStore};

/// In-memory key-value store standing in for the engine-owned database
#[derive(Debug, Default)]
pub struct MemStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemStore {
    /// Whether a raw key is present, for canonical-absence assertions
    pub fn contains(&self, key: &[u8]) -> bool {
        self.data.contains_key(key)
    }
}

impl StateStore for MemStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<(), LedgerError> {
        self.data.insert(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), LedgerError> {
        self.data.remove(key);
        Ok(())
    }
}

impl BatchReadState for MemStore {
    fn read(&self, keys: &[Vec<u8>]) -> Vec<Result<Option<Vec<u8>>, LedgerError>> {
        keys.iter().map(|key| Ok(self.data.get(key).cloned())).collect()
    }
}

/// Store whose every access fails, for error propagation tests
#[derive(Debug, Default)]
pub struct BrokenStore;

impl StateStore for BrokenStore {
    fn get(&self, _key: &[u8]) -> Result<Option<Vec<u8>>, LedgerError> {
        Err(LedgerError::StorageError("disk unavailable".to_string()))
    }

    fn put(&mut self, _key: Vec<u8>, _value: Vec<u8>) -> Result<(), LedgerError> {
        Err(LedgerError::StorageError("disk unavailable".to_string()))
    }

    fn delete(&mut self, _key: &[u8]) -> Result<(), LedgerError> {
        Err(LedgerError::StorageError("disk unavailable".to_string()))
    }
}

impl BatchReadState for BrokenStore {
    fn read(&self, keys: &[Vec<u8>]) -> Vec<Result<Option<Vec<u8>>, LedgerError>> {
        keys.iter()
            .map(|_| Err(LedgerError::StorageError("disk unavailable".to_string())))
            .collect()
    }
}
