use displaydoc::Display;
use thiserror::Error;
use token_models::{AssetId, PublicKey};
use token_serialization::SerializeError;

/// Ledger error
#[non_exhaustive]
#[derive(Display, Error, Debug)]
pub enum LedgerError {
    /// storage error: {0}
    StorageError(String),
    /// could not update balance (asset={asset}, balance={balance}, owner={owner}, amount={amount})
    InvalidBalance {
        /// asset whose balance record was being mutated
        asset: AssetId,
        /// balance recorded before the attempted mutation
        balance: u64,
        /// owner of the balance record
        owner: PublicKey,
        /// amount the caller tried to credit or debit
        amount: u64,
    },
    /// serialization error: {0}
    SerializationError(#[from] SerializeError),
    /// deserialization error: {0}
    DeserializationError(String),
}
