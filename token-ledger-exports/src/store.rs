//! Abstract store interfaces this core is invoked through.
//!
//! The backing database belongs to the execution engine; this workspace
//! only ever sees one of the two views below. Absence of a key is `Ok(None)`
//! on both views, never an error.

use crate::error::LedgerError;

/// Mutating key-value view, scoped to a single state transition.
///
/// The engine guarantees single-writer ordering over one of these views, so
/// read-modify-write spans need no internal locking. Committing or rolling
/// back the transition is the caller's responsibility.
pub trait StateStore {
    /// Gets the value stored under `key`
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, LedgerError>;

    /// Puts `value` under `key`, overwriting any previous value
    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Deletes the value stored under `key`, idempotent
    fn delete(&mut self, key: &[u8]) -> Result<(), LedgerError>;
}

/// Batched, point-in-time, read-only state view used by the query path.
///
/// May be shared across many query threads; reads never mutate.
pub trait BatchReadState: Send + Sync {
    /// Reads every key in `keys` in one batched call.
    ///
    /// # Returns
    /// One result per input key, in input order.
    fn read(&self, keys: &[Vec<u8>]) -> Vec<Result<Option<Vec<u8>>, LedgerError>>;
}
