//! Mutating ledger operations, invoked by the execution engine while it
//! applies one state transition.
//!
//! Every read-modify-write span here relies on the engine's single-writer
//! guarantee over the supplied `StateStore`; there is no locking at this
//! layer. Arithmetic failures are reported before any write, so a failed
//! operation leaves the store untouched.

use token_ledger_exports::{
    asset_key, balance_key, receipt_key, AssetEntry, AssetEntryDeserializer,
    AssetEntrySerializer, LedgerConfig, LedgerError, StateStore, TxReceipt,
    TxReceiptDeserializer, TxReceiptSerializer,
};
use token_models::{AssetId, PublicKey, TxId};
use token_serialization::{
    DeserializeError, Deserializer, Serializer, U64BEDeserializer, U64BESerializer,
};
use tracing::debug;

/// Decodes a balance value, requiring the exact 8-byte layout
pub(crate) fn amount_from_bytes(
    deserializer: &U64BEDeserializer,
    bytes: &[u8],
) -> Result<u64, LedgerError> {
    let (rest, amount) = deserializer
        .deserialize::<DeserializeError>(bytes)
        .map_err(|err| LedgerError::DeserializationError(err.to_string()))?;
    if !rest.is_empty() {
        return Err(LedgerError::DeserializationError(format!(
            "{} trailing bytes after balance value",
            rest.len()
        )));
    }
    Ok(amount)
}

/// Decodes an asset value
pub(crate) fn asset_from_bytes(
    deserializer: &AssetEntryDeserializer,
    bytes: &[u8],
) -> Result<AssetEntry, LedgerError> {
    let (rest, entry) = deserializer
        .deserialize::<DeserializeError>(bytes)
        .map_err(|err| LedgerError::DeserializationError(err.to_string()))?;
    if !rest.is_empty() {
        return Err(LedgerError::DeserializationError(format!(
            "{} trailing bytes after asset value",
            rest.len()
        )));
    }
    Ok(entry)
}

/// Decodes a receipt value
pub(crate) fn receipt_from_bytes(
    deserializer: &TxReceiptDeserializer,
    bytes: &[u8],
) -> Result<TxReceipt, LedgerError> {
    let (rest, receipt) = deserializer
        .deserialize::<DeserializeError>(bytes)
        .map_err(|err| LedgerError::DeserializationError(err.to_string()))?;
    if !rest.is_empty() {
        return Err(LedgerError::DeserializationError(format!(
            "{} trailing bytes after receipt value",
            rest.len()
        )));
    }
    Ok(receipt)
}

/// Write side of the ledger state: balance arithmetic, asset records and
/// transaction receipts over a transition-scoped `StateStore`.
///
/// Holds no state of its own besides its codecs; all durable state lives in
/// the caller-supplied store.
pub struct StateLedger {
    amount_serializer: U64BESerializer,
    amount_deserializer: U64BEDeserializer,
    asset_serializer: AssetEntrySerializer,
    asset_deserializer: AssetEntryDeserializer,
    receipt_serializer: TxReceiptSerializer,
    receipt_deserializer: TxReceiptDeserializer,
}

impl StateLedger {
    /// Creates a new `StateLedger`
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            amount_serializer: U64BESerializer::new(),
            amount_deserializer: U64BEDeserializer::new(),
            asset_serializer: AssetEntrySerializer::new(),
            asset_deserializer: AssetEntryDeserializer::new(config.max_asset_metadata_length),
            receipt_serializer: TxReceiptSerializer::new(),
            receipt_deserializer: TxReceiptDeserializer::new(),
        }
    }

    /// Gets the balance of `(owner, asset)`.
    ///
    /// # Returns
    /// The recorded amount, or 0 if no record exists. Store failures are
    /// propagated, never conflated with absence.
    pub fn get_balance(
        &self,
        store: &dyn StateStore,
        owner: &PublicKey,
        asset: &AssetId,
    ) -> Result<u64, LedgerError> {
        match store.get(&balance_key(owner, asset))? {
            Some(bytes) => amount_from_bytes(&self.amount_deserializer, &bytes),
            None => Ok(0),
        }
    }

    /// Sets the balance of `(owner, asset)` to `amount`.
    ///
    /// A zero amount deletes the record instead of writing it: absence is
    /// the canonical representation of a zero balance on every path.
    pub fn set_balance(
        &self,
        store: &mut dyn StateStore,
        owner: &PublicKey,
        asset: &AssetId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let key = balance_key(owner, asset);
        debug!(owner = %owner, asset = %asset, amount, "set balance");
        if amount == 0 {
            return store.delete(&key);
        }
        let mut value = Vec::with_capacity(8);
        self.amount_serializer.serialize(&amount, &mut value)?;
        store.put(key, value)
    }

    /// Credits `amount` to the balance of `(owner, asset)`.
    ///
    /// On u64 overflow, fails with `LedgerError::InvalidBalance` and writes
    /// nothing.
    pub fn add_balance(
        &self,
        store: &mut dyn StateStore,
        owner: &PublicKey,
        asset: &AssetId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let balance = self.get_balance(store, owner, asset)?;
        let new_balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::InvalidBalance {
                asset: *asset,
                balance,
                owner: *owner,
                amount,
            })?;
        self.set_balance(store, owner, asset, new_balance)
    }

    /// Debits `amount` from the balance of `(owner, asset)`.
    ///
    /// On underflow, fails with `LedgerError::InvalidBalance` and writes
    /// nothing. A debit down to exactly 0 deletes the record.
    pub fn sub_balance(
        &self,
        store: &mut dyn StateStore,
        owner: &PublicKey,
        asset: &AssetId,
        amount: u64,
    ) -> Result<(), LedgerError> {
        let balance = self.get_balance(store, owner, asset)?;
        let new_balance = balance
            .checked_sub(amount)
            .ok_or(LedgerError::InvalidBalance {
                asset: *asset,
                balance,
                owner: *owner,
                amount,
            })?;
        self.set_balance(store, owner, asset, new_balance)
    }

    /// Deletes the balance record of `(owner, asset)`, idempotent
    pub fn delete_balance(
        &self,
        store: &mut dyn StateStore,
        owner: &PublicKey,
        asset: &AssetId,
    ) -> Result<(), LedgerError> {
        debug!(owner = %owner, asset = %asset, "delete balance");
        store.delete(&balance_key(owner, asset))
    }

    /// Gets the asset record of `asset`.
    ///
    /// # Returns
    /// `None` if the asset does not exist, no error.
    pub fn get_asset(
        &self,
        store: &dyn StateStore,
        asset: &AssetId,
    ) -> Result<Option<AssetEntry>, LedgerError> {
        match store.get(&asset_key(asset))? {
            Some(bytes) => Ok(Some(asset_from_bytes(&self.asset_deserializer, &bytes)?)),
            None => Ok(None),
        }
    }

    /// Writes the asset record of `asset`, overwriting any previous one.
    ///
    /// Keeping the recorded supply equal to the sum of outstanding balances
    /// is the execution engine's responsibility on its mint/burn paths.
    pub fn set_asset(
        &self,
        store: &mut dyn StateStore,
        asset: &AssetId,
        entry: &AssetEntry,
    ) -> Result<(), LedgerError> {
        debug!(asset = %asset, supply = entry.supply, "set asset");
        let mut value =
            Vec::with_capacity(2 + entry.metadata.len() + 8 + entry.owner.as_bytes().len() + 1);
        self.asset_serializer.serialize(entry, &mut value)?;
        store.put(asset_key(asset), value)
    }

    /// Deletes the asset record of `asset`, idempotent
    pub fn delete_asset(
        &self,
        store: &mut dyn StateStore,
        asset: &AssetId,
    ) -> Result<(), LedgerError> {
        debug!(asset = %asset, "delete asset");
        store.delete(&asset_key(asset))
    }

    /// Writes the receipt of transaction `tx`.
    ///
    /// The engine calls this exactly once per transaction; there is no
    /// read-before-write check, so a duplicate call silently overwrites.
    pub fn store_transaction(
        &self,
        store: &mut dyn StateStore,
        tx: &TxId,
        receipt: &TxReceipt,
    ) -> Result<(), LedgerError> {
        debug!(tx = %tx, success = receipt.success, "store transaction receipt");
        let mut value = Vec::with_capacity(token_ledger_exports::RECEIPT_VALUE_SIZE_BYTES);
        self.receipt_serializer.serialize(receipt, &mut value)?;
        store.put(receipt_key(tx), value)
    }

    /// Gets the receipt of transaction `tx`.
    ///
    /// # Returns
    /// `None` if no receipt was recorded for `tx`, no error.
    pub fn get_transaction(
        &self,
        store: &dyn StateStore,
        tx: &TxId,
    ) -> Result<Option<TxReceipt>, LedgerError> {
        match store.get(&receipt_key(tx))? {
            Some(bytes) => Ok(Some(receipt_from_bytes(&self.receipt_deserializer, &bytes)?)),
            None => Ok(None),
        }
    }
}

impl Default for StateLedger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}
