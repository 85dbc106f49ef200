//! Key derivation for every record kind of the durable state layout.
//!
//! Keys start with a one-byte record-kind discriminant followed by
//! fixed-width identifier segments, so no delimiter is needed and
//! derivation is injective per record kind.
//!
//! Account-state keyspace:
//! * `[0x0][owner][asset]` balance record
//! * `[0x1][asset]` asset record
//! * `[0x2][source_chain][message]` incoming warp correlation key
//! * `[0x3][tx]` outgoing warp correlation key
//!
//! Receipt keyspace (a logically distinct namespace owned by the engine's
//! metadata store):
//! * `[0x0][tx]` transaction receipt
//!
//! The receipt discriminant coincides with the balance discriminant; that is
//! only safe because the two keyspaces never share a namespace. `ReceiptKey`
//! is therefore a separate type from `StateKey` so the two families cannot
//! be mixed at the call site.

use crate::error::LedgerError;
use nom::error::{context, ContextError, ErrorKind, ParseError};
use nom::IResult;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use token_models::{
    AssetId, AssetIdDeserializer, ChainId, ChainIdDeserializer, MessageId, MessageIdDeserializer,
    PublicKey, PublicKeyDeserializer, TxId, TxIdDeserializer, ID_SIZE_BYTES,
    PUBLIC_KEY_SIZE_BYTES,
};
use token_serialization::{Deserializer, SerializeError, Serializer};

/// Record-kind discriminant of the account-state keyspace.
///
/// The set of kinds is fixed by the wire format; new kinds require a new
/// discriminant value and must never reuse an existing one.
#[derive(Clone, Copy, Eq, PartialEq, Debug, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum KeyIdent {
    /// Balance record
    Balance = 0,
    /// Asset record
    Asset = 1,
    /// Incoming cross-chain message correlation key
    IncomingWarp = 2,
    /// Outgoing cross-chain message correlation key
    OutgoingWarp = 3,
}

/// Discriminant of the receipt keyspace
pub const RECEIPT_IDENT: u8 = 0u8;

/// Byte length of a serialized balance key
pub const BALANCE_KEY_SIZE_BYTES: usize = 1 + PUBLIC_KEY_SIZE_BYTES + ID_SIZE_BYTES;
/// Byte length of a serialized asset key
pub const ASSET_KEY_SIZE_BYTES: usize = 1 + ID_SIZE_BYTES;
/// Byte length of a serialized receipt key
pub const RECEIPT_KEY_SIZE_BYTES: usize = 1 + ID_SIZE_BYTES;

/// Typed key of the account-state keyspace
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum StateKey {
    /// Balance of `owner` for `asset`
    Balance {
        /// owner of the balance record
        owner: PublicKey,
        /// asset the balance is denominated in
        asset: AssetId,
    },
    /// Asset record of the given asset identifier
    Asset(AssetId),
    /// Correlation key of an inbound cross-chain message
    IncomingWarp {
        /// chain the message originates from
        source_chain: ChainId,
        /// message identifier on the source chain
        message: MessageId,
    },
    /// Correlation key of an outbound cross-chain message, by originating tx
    OutgoingWarp(TxId),
}

impl StateKey {
    /// Discriminant of this key
    pub fn ident(&self) -> KeyIdent {
        match self {
            StateKey::Balance { .. } => KeyIdent::Balance,
            StateKey::Asset(..) => KeyIdent::Asset,
            StateKey::IncomingWarp { .. } => KeyIdent::IncomingWarp,
            StateKey::OutgoingWarp(..) => KeyIdent::OutgoingWarp,
        }
    }

    /// Serialized form of this key
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            StateKey::Balance { owner, asset } => {
                let mut key = Vec::with_capacity(BALANCE_KEY_SIZE_BYTES);
                key.push(KeyIdent::Balance.into());
                key.extend_from_slice(owner.as_bytes());
                key.extend_from_slice(asset.as_bytes());
                key
            }
            StateKey::Asset(asset) => {
                let mut key = Vec::with_capacity(ASSET_KEY_SIZE_BYTES);
                key.push(KeyIdent::Asset.into());
                key.extend_from_slice(asset.as_bytes());
                key
            }
            StateKey::IncomingWarp {
                source_chain,
                message,
            } => {
                let mut key = Vec::with_capacity(1 + ID_SIZE_BYTES * 2);
                key.push(KeyIdent::IncomingWarp.into());
                key.extend_from_slice(source_chain.as_bytes());
                key.extend_from_slice(message.as_bytes());
                key
            }
            StateKey::OutgoingWarp(tx) => {
                let mut key = Vec::with_capacity(1 + ID_SIZE_BYTES);
                key.push(KeyIdent::OutgoingWarp.into());
                key.extend_from_slice(tx.as_bytes());
                key
            }
        }
    }
}

/// Derives the balance key of an `(owner, asset)` pair
pub fn balance_key(owner: &PublicKey, asset: &AssetId) -> Vec<u8> {
    StateKey::Balance {
        owner: *owner,
        asset: *asset,
    }
    .to_bytes()
}

/// Derives the asset key of an asset identifier
pub fn asset_key(asset: &AssetId) -> Vec<u8> {
    StateKey::Asset(*asset).to_bytes()
}

/// Derives the correlation key of an inbound cross-chain message.
///
/// The associated value's lifecycle belongs to the execution engine.
pub fn incoming_warp_key(source_chain: &ChainId, message: &MessageId) -> Vec<u8> {
    StateKey::IncomingWarp {
        source_chain: *source_chain,
        message: *message,
    }
    .to_bytes()
}

/// Derives the correlation key of an outbound cross-chain message.
///
/// The associated value's lifecycle belongs to the execution engine.
pub fn outgoing_warp_key(tx: &TxId) -> Vec<u8> {
    StateKey::OutgoingWarp(*tx).to_bytes()
}

/// Typed key of the receipt keyspace
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct ReceiptKey(pub TxId);

impl ReceiptKey {
    /// Serialized form of this key
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut key = Vec::with_capacity(RECEIPT_KEY_SIZE_BYTES);
        key.push(RECEIPT_IDENT);
        key.extend_from_slice(self.0.as_bytes());
        key
    }
}

/// Derives the receipt key of a transaction identifier
pub fn receipt_key(tx: &TxId) -> Vec<u8> {
    ReceiptKey(*tx).to_bytes()
}

/// Serializer for `StateKey`
#[derive(Clone, Default)]
pub struct StateKeySerializer;

impl StateKeySerializer {
    /// Creates a new `StateKeySerializer`
    pub const fn new() -> Self {
        Self
    }
}

impl Serializer<StateKey> for StateKeySerializer {
    fn serialize(&self, value: &StateKey, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        buffer.extend_from_slice(&value.to_bytes());
        Ok(())
    }
}

/// Deserializer for `StateKey`
#[derive(Clone, Default)]
pub struct StateKeyDeserializer {
    asset_id_deserializer: AssetIdDeserializer,
    tx_id_deserializer: TxIdDeserializer,
    chain_id_deserializer: ChainIdDeserializer,
    message_id_deserializer: MessageIdDeserializer,
    public_key_deserializer: PublicKeyDeserializer,
}

impl StateKeyDeserializer {
    /// Creates a new `StateKeyDeserializer`
    pub const fn new() -> Self {
        Self {
            asset_id_deserializer: AssetIdDeserializer::new(),
            tx_id_deserializer: TxIdDeserializer::new(),
            chain_id_deserializer: ChainIdDeserializer::new(),
            message_id_deserializer: MessageIdDeserializer::new(),
            public_key_deserializer: PublicKeyDeserializer::new(),
        }
    }
}

impl Deserializer<StateKey> for StateKeyDeserializer {
    fn deserialize<'a, E: ParseError<&'a [u8]> + ContextError<&'a [u8]>>(
        &self,
        buffer: &'a [u8],
    ) -> IResult<&'a [u8], StateKey, E> {
        context("Failed StateKey deserialization", |input: &'a [u8]| {
            let (rest, ident_byte) = nom::number::complete::u8(input)?;
            let ident = KeyIdent::try_from(ident_byte).map_err(|_| {
                nom::Err::Error(ParseError::from_error_kind(input, ErrorKind::IsNot))
            })?;
            match ident {
                KeyIdent::Balance => {
                    let (rest, owner) = self.public_key_deserializer.deserialize(rest)?;
                    let (rest, asset) = self.asset_id_deserializer.deserialize(rest)?;
                    Ok((rest, StateKey::Balance { owner, asset }))
                }
                KeyIdent::Asset => {
                    let (rest, asset) = self.asset_id_deserializer.deserialize(rest)?;
                    Ok((rest, StateKey::Asset(asset)))
                }
                KeyIdent::IncomingWarp => {
                    let (rest, source_chain) = self.chain_id_deserializer.deserialize(rest)?;
                    let (rest, message) = self.message_id_deserializer.deserialize(rest)?;
                    Ok((
                        rest,
                        StateKey::IncomingWarp {
                            source_chain,
                            message,
                        },
                    ))
                }
                KeyIdent::OutgoingWarp => {
                    let (rest, tx) = self.tx_id_deserializer.deserialize(rest)?;
                    Ok((rest, StateKey::OutgoingWarp(tx)))
                }
            }
        })(buffer)
    }
}

/// Parses a raw account-state key back into its typed form
pub fn state_key_from_bytes(bytes: &[u8]) -> Result<StateKey, LedgerError> {
    let (rest, key) = StateKeyDeserializer::new()
        .deserialize::<token_serialization::DeserializeError>(bytes)
        .map_err(|err| LedgerError::DeserializationError(err.to_string()))?;
    if !rest.is_empty() {
        return Err(LedgerError::DeserializationError(format!(
            "{} trailing bytes after state key",
            rest.len()
        )));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_key_layout() {
        let owner = PublicKey::new([1u8; PUBLIC_KEY_SIZE_BYTES]);
        let asset = AssetId::new([2u8; ID_SIZE_BYTES]);
        let key = balance_key(&owner, &asset);
        assert_eq!(key.len(), BALANCE_KEY_SIZE_BYTES);
        assert_eq!(key[0], 0x0);
        assert_eq!(&key[1..1 + PUBLIC_KEY_SIZE_BYTES], owner.as_bytes());
        assert_eq!(&key[1 + PUBLIC_KEY_SIZE_BYTES..], asset.as_bytes());
    }

    #[test]
    fn test_asset_key_layout() {
        let asset = AssetId::new([7u8; ID_SIZE_BYTES]);
        let key = asset_key(&asset);
        assert_eq!(key.len(), ASSET_KEY_SIZE_BYTES);
        assert_eq!(key[0], 0x1);
        assert_eq!(&key[1..], asset.as_bytes());
    }

    #[test]
    fn test_warp_key_layouts() {
        let source = ChainId::new(rand::random());
        let message = MessageId::new(rand::random());
        let tx = TxId::new(rand::random());

        let incoming = incoming_warp_key(&source, &message);
        assert_eq!(incoming.len(), 1 + ID_SIZE_BYTES * 2);
        assert_eq!(incoming[0], 0x2);
        assert_eq!(&incoming[1..1 + ID_SIZE_BYTES], source.as_bytes());
        assert_eq!(&incoming[1 + ID_SIZE_BYTES..], message.as_bytes());

        let outgoing = outgoing_warp_key(&tx);
        assert_eq!(outgoing.len(), 1 + ID_SIZE_BYTES);
        assert_eq!(outgoing[0], 0x3);
        assert_eq!(&outgoing[1..], tx.as_bytes());
    }

    #[test]
    fn test_receipt_key_layout() {
        let tx = TxId::new(rand::random());
        let key = receipt_key(&tx);
        assert_eq!(key.len(), RECEIPT_KEY_SIZE_BYTES);
        assert_eq!(key[0], RECEIPT_IDENT);
        assert_eq!(&key[1..], tx.as_bytes());
    }

    #[test]
    fn test_balance_key_injective() {
        let owner_a = PublicKey::new(rand::random());
        let owner_b = PublicKey::new(rand::random());
        let asset_a = AssetId::new(rand::random());
        let asset_b = AssetId::new(rand::random());
        assert_ne!(
            balance_key(&owner_a, &asset_a),
            balance_key(&owner_b, &asset_a)
        );
        assert_ne!(
            balance_key(&owner_a, &asset_a),
            balance_key(&owner_a, &asset_b)
        );
    }

    #[test]
    fn test_record_kinds_never_collide() {
        // balance keys and asset keys differ by discriminant and total
        // length; receipt keys live in a distinct namespace but still must
        // not equal an asset key of the same id bytes
        let owner = PublicKey::new(rand::random());
        let asset = AssetId::new(rand::random());
        let tx = TxId::new(*asset.as_bytes());
        assert_ne!(balance_key(&owner, &asset), asset_key(&asset));
        assert_ne!(asset_key(&asset), receipt_key(&tx));
        assert_ne!(asset_key(&asset), outgoing_warp_key(&tx));
    }

    #[test]
    fn test_state_key_round_trip() {
        let keys = [
            StateKey::Balance {
                owner: PublicKey::new(rand::random()),
                asset: AssetId::new(rand::random()),
            },
            StateKey::Asset(AssetId::new(rand::random())),
            StateKey::IncomingWarp {
                source_chain: ChainId::new(rand::random()),
                message: MessageId::new(rand::random()),
            },
            StateKey::OutgoingWarp(TxId::new(rand::random())),
        ];
        for key in keys {
            let bytes = key.to_bytes();
            assert_eq!(state_key_from_bytes(&bytes).unwrap(), key);
        }
    }

    #[test]
    fn test_unknown_ident_rejected() {
        assert!(state_key_from_bytes(&[0x4; 33]).is_err());
        assert!(state_key_from_bytes(&[]).is_err());
    }
}
