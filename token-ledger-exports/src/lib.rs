//! # General description
//!
//! This crate defines the durable state layout of the token ledger: the key
//! encoding scheme for every record kind, the value codecs for asset records
//! and transaction receipts, the ledger error taxonomy, and the two abstract
//! store interfaces the operational layer is invoked through.
//!
//! The binary layouts here are a disk format, not an implementation detail:
//! they must remain stable across versions.
//!
//! # Architecture
//!
//! ## `key.rs`
//! Record-kind discriminants and typed key derivation (`StateKey`,
//! `ReceiptKey`), including the warp correlation key helpers.
//!
//! ## `entry.rs`
//! The asset record (`AssetEntry`) and its value codec.
//!
//! ## `receipt.rs`
//! The transaction receipt (`TxReceipt`) and its value codec.
//!
//! ## `store.rs`
//! `StateStore` (mutating, transition-scoped) and `BatchReadState`
//! (batched point-in-time reads), both implemented by the external engine.

#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod config;
mod entry;
mod error;
mod key;
mod receipt;
mod store;

pub use config::LedgerConfig;
pub use entry::{AssetEntry, AssetEntryDeserializer, AssetEntrySerializer};
pub use error::LedgerError;
pub use key::{
    asset_key, balance_key, incoming_warp_key, outgoing_warp_key, receipt_key,
    state_key_from_bytes, KeyIdent, ReceiptKey, StateKey, StateKeyDeserializer,
    StateKeySerializer, ASSET_KEY_SIZE_BYTES, BALANCE_KEY_SIZE_BYTES, RECEIPT_IDENT,
    RECEIPT_KEY_SIZE_BYTES,
};
pub use receipt::{
    TxReceipt, TxReceiptDeserializer, TxReceiptSerializer, RECEIPT_VALUE_SIZE_BYTES,
};
pub use store::{BatchReadState, StateStore};
