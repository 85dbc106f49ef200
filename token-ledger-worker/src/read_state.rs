//! Read-only query operations over a batched, point-in-time state accessor.
//!
//! This is the path RPC handlers go through: one `BatchReadState::read` call
//! per logical query, decoding with the same codecs as the mutating path so
//! the two can never disagree on the value layout.

use crate::ledger::{amount_from_bytes, asset_from_bytes, receipt_from_bytes};
use token_ledger_exports::{
    asset_key, balance_key, receipt_key, AssetEntry, AssetEntryDeserializer, BatchReadState,
    LedgerConfig, LedgerError, TxReceipt, TxReceiptDeserializer,
};
use token_models::{AssetId, PublicKey, TxId};
use token_serialization::U64BEDeserializer;

/// Read side of the ledger state, serving queries without participating in
/// the write path.
pub struct StateReader {
    amount_deserializer: U64BEDeserializer,
    asset_deserializer: AssetEntryDeserializer,
    receipt_deserializer: TxReceiptDeserializer,
}

impl StateReader {
    /// Creates a new `StateReader`
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            amount_deserializer: U64BEDeserializer::new(),
            asset_deserializer: AssetEntryDeserializer::new(config.max_asset_metadata_length),
            receipt_deserializer: TxReceiptDeserializer::new(),
        }
    }

    fn read_one(
        &self,
        state: &dyn BatchReadState,
        key: Vec<u8>,
    ) -> Result<Option<Vec<u8>>, LedgerError> {
        state
            .read(&[key])
            .into_iter()
            .next()
            .unwrap_or_else(|| {
                Err(LedgerError::StorageError(
                    "batched read returned no result for its key".to_string(),
                ))
            })
    }

    /// Gets the balance of `(owner, asset)` from a point-in-time state.
    ///
    /// # Returns
    /// The recorded amount, or 0 if no record exists
    pub fn get_balance(
        &self,
        state: &dyn BatchReadState,
        owner: &PublicKey,
        asset: &AssetId,
    ) -> Result<u64, LedgerError> {
        match self.read_one(state, balance_key(owner, asset))? {
            Some(bytes) => amount_from_bytes(&self.amount_deserializer, &bytes),
            None => Ok(0),
        }
    }

    /// Gets the asset record of `asset` from a point-in-time state.
    ///
    /// # Returns
    /// `None` if the asset does not exist, no error
    pub fn get_asset(
        &self,
        state: &dyn BatchReadState,
        asset: &AssetId,
    ) -> Result<Option<AssetEntry>, LedgerError> {
        match self.read_one(state, asset_key(asset))? {
            Some(bytes) => Ok(Some(asset_from_bytes(&self.asset_deserializer, &bytes)?)),
            None => Ok(None),
        }
    }

    /// Gets the receipt of transaction `tx` from a point-in-time state.
    ///
    /// # Returns
    /// `None` if no receipt was recorded for `tx`, no error
    pub fn get_transaction(
        &self,
        state: &dyn BatchReadState,
        tx: &TxId,
    ) -> Result<Option<TxReceipt>, LedgerError> {
        match self.read_one(state, receipt_key(tx))? {
            Some(bytes) => Ok(Some(receipt_from_bytes(&self.receipt_deserializer, &bytes)?)),
            None => Ok(None),
        }
    }
}

impl Default for StateReader {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::StateLedger;
    use crate::test_exports::MemStore;

    #[test]
    fn test_read_path_matches_write_path() {
        let ledger = StateLedger::default();
        let reader = StateReader::default();
        let mut store = MemStore::default();
        let owner = PublicKey::new(rand::random());
        let asset = AssetId::new(rand::random());
        let tx = TxId::new(rand::random());
        let entry = AssetEntry {
            metadata: b"points".to_vec(),
            supply: 9000,
            owner,
            warp: false,
        };
        let receipt = TxReceipt {
            timestamp: 1_700_000_000,
            success: true,
            units_consumed: 42,
        };

        ledger.set_balance(&mut store, &owner, &asset, 88).unwrap();
        ledger.set_asset(&mut store, &asset, &entry).unwrap();
        ledger.store_transaction(&mut store, &tx, &receipt).unwrap();

        assert_eq!(reader.get_balance(&store, &owner, &asset).unwrap(), 88);
        assert_eq!(reader.get_asset(&store, &asset).unwrap(), Some(entry));
        assert_eq!(reader.get_transaction(&store, &tx).unwrap(), Some(receipt));
    }

    #[test]
    fn test_absent_records_read_as_defaults() {
        let reader = StateReader::default();
        let store = MemStore::default();
        let owner = PublicKey::new(rand::random());
        let asset = AssetId::new(rand::random());
        let tx = TxId::new(rand::random());

        assert_eq!(reader.get_balance(&store, &owner, &asset).unwrap(), 0);
        assert_eq!(reader.get_asset(&store, &asset).unwrap(), None);
        assert_eq!(reader.get_transaction(&store, &tx).unwrap(), None);
    }

    #[test]
    fn test_batched_reads_preserve_order() {
        let ledger = StateLedger::default();
        let mut store = MemStore::default();
        let owner = PublicKey::new(rand::random());
        let asset_a = AssetId::new(rand::random());
        let asset_b = AssetId::new(rand::random());
        ledger.set_balance(&mut store, &owner, &asset_a, 1).unwrap();
        ledger.set_balance(&mut store, &owner, &asset_b, 2).unwrap();

        let keys = vec![
            balance_key(&owner, &asset_b),
            balance_key(&owner, &asset_a),
        ];
        let results = store.read(&keys);
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].as_ref().unwrap().as_deref(),
            Some(&2u64.to_be_bytes()[..])
        );
        assert_eq!(
            results[1].as_ref().unwrap().as_deref(),
            Some(&1u64.to_be_bytes()[..])
        );
    }
}
