//! # General description
//!
//! Base value types shared by the ledger state crates: fixed-width typed
//! identifiers, account public keys and the crate-level error enum.
//!
//! Identifiers are plain 32-byte values. They are deliberately not hashes
//! or curve points at this layer: how an id is produced belongs to the
//! execution engine, while this workspace only needs stable key segments
//! with a text form for operator-facing output.

#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

mod error;
mod id;
mod pubkey;

pub use error::{ModelsError, ModelsResult};
pub use id::{
    AssetId, AssetIdDeserializer, AssetIdSerializer, ChainId, ChainIdDeserializer,
    ChainIdSerializer, MessageId, MessageIdDeserializer, MessageIdSerializer, TxId,
    TxIdDeserializer, TxIdSerializer, ID_SIZE_BYTES,
};
pub use pubkey::{PublicKey, PublicKeyDeserializer, PublicKeySerializer, PUBLIC_KEY_SIZE_BYTES};
