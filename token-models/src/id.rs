//! Fixed-width identifiers used as key segments in the durable state layout.
//!
//! Every identifier is 32 bytes wide so that key encodings need no
//! delimiters: each segment has a statically known width. Text forms use
//! bs58 with checksum behind a one-letter kind prefix.

use crate::error::ModelsError;
use nom::bytes::complete::take;
use nom::error::{context, ContextError, ErrorKind, ParseError};
use nom::IResult;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::str::FromStr;
use token_serialization::{Deserializer, SerializeError, Serializer};

/// Byte width of every fixed-width identifier
pub const ID_SIZE_BYTES: usize = 32;

const ASSETID_PREFIX: char = 'A';
const TXID_PREFIX: char = 'T';
const CHAINID_PREFIX: char = 'C';
const MESSAGEID_PREFIX: char = 'M';

fn from_bs58_check(prefix: char, s: &str) -> Result<[u8; ID_SIZE_BYTES], ModelsError> {
    let mut chars = s.chars();
    match chars.next() {
        Some(found) if found == prefix => {
            let decoded = bs58::decode(chars.as_str())
                .with_check(None)
                .into_vec()
                .map_err(|_| ModelsError::IdParseError(s.to_string()))?;
            decoded
                .try_into()
                .map_err(|_| ModelsError::IdParseError(s.to_string()))
        }
        _ => Err(ModelsError::WrongPrefix(
            prefix.to_string(),
            s.to_string(),
        )),
    }
}

/// Identifier of a fungible asset type
#[derive(
    Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct AssetId([u8; ID_SIZE_BYTES]);

impl AssetId {
    /// Identifier of the chain's native asset (the distinguished all-zero id)
    pub const NATIVE: AssetId = AssetId([0u8; ID_SIZE_BYTES]);

    /// Creates an `AssetId` from raw bytes
    pub const fn new(bytes: [u8; ID_SIZE_BYTES]) -> Self {
        Self(bytes)
    }

    /// Identifier as a byte array reference
    pub fn as_bytes(&self) -> &[u8; ID_SIZE_BYTES] {
        &self.0
    }

    /// Identifier as a byte array
    pub fn into_bytes(self) -> [u8; ID_SIZE_BYTES] {
        self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            ASSETID_PREFIX,
            bs58::encode(self.0).with_check().into_string()
        )
    }
}

impl std::fmt::Debug for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for AssetId {
    type Err = ModelsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(AssetId(from_bs58_check(ASSETID_PREFIX, s)?))
    }
}

/// Serializer for `AssetId`
#[derive(Clone, Default)]
pub struct AssetIdSerializer;

impl AssetIdSerializer {
    /// Creates a new `AssetIdSerializer`
    pub const fn new() -> Self {
        Self
    }
}

impl Serializer<AssetId> for AssetIdSerializer {
    fn serialize(&self, value: &AssetId, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        buffer.extend_from_slice(value.as_bytes());
        Ok(())
    }
}

/// Deserializer for `AssetId`
#[derive(Clone, Default)]
pub struct AssetIdDeserializer;

impl AssetIdDeserializer {
    /// Creates a new `AssetIdDeserializer`
    pub const fn new() -> Self {
        Self
    }
}

impl Deserializer<AssetId> for AssetIdDeserializer {
    fn deserialize<'a, E: ParseError<&'a [u8]> + ContextError<&'a [u8]>>(
        &self,
        buffer: &'a [u8],
    ) -> IResult<&'a [u8], AssetId, E> {
        context("Failed AssetId deserialization", |input: &'a [u8]| {
            let (rest, bytes) = take(ID_SIZE_BYTES)(input)?;
            let id = bytes.try_into().map_err(|_| {
                nom::Err::Error(ParseError::from_error_kind(input, ErrorKind::LengthValue))
            })?;
            Ok((rest, AssetId(id)))
        })(buffer)
    }
}

/// Identifier of a transaction
#[derive(
    Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct TxId([u8; ID_SIZE_BYTES]);

impl TxId {
    /// Creates a `TxId` from raw bytes
    pub const fn new(bytes: [u8; ID_SIZE_BYTES]) -> Self {
        Self(bytes)
    }

    /// Identifier as a byte array reference
    pub fn as_bytes(&self) -> &[u8; ID_SIZE_BYTES] {
        &self.0
    }

    /// Identifier as a byte array
    pub fn into_bytes(self) -> [u8; ID_SIZE_BYTES] {
        self.0
    }
}

impl std::fmt::Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            TXID_PREFIX,
            bs58::encode(self.0).with_check().into_string()
        )
    }
}

impl std::fmt::Debug for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for TxId {
    type Err = ModelsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TxId(from_bs58_check(TXID_PREFIX, s)?))
    }
}

/// Serializer for `TxId`
#[derive(Clone, Default)]
pub struct TxIdSerializer;

impl TxIdSerializer {
    /// Creates a new `TxIdSerializer`
    pub const fn new() -> Self {
        Self
    }
}

impl Serializer<TxId> for TxIdSerializer {
    fn serialize(&self, value: &TxId, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        buffer.extend_from_slice(value.as_bytes());
        Ok(())
    }
}

/// Deserializer for `TxId`
#[derive(Clone, Default)]
pub struct TxIdDeserializer;

impl TxIdDeserializer {
    /// Creates a new `TxIdDeserializer`
    pub const fn new() -> Self {
        Self
    }
}

impl Deserializer<TxId> for TxIdDeserializer {
    fn deserialize<'a, E: ParseError<&'a [u8]> + ContextError<&'a [u8]>>(
        &self,
        buffer: &'a [u8],
    ) -> IResult<&'a [u8], TxId, E> {
        context("Failed TxId deserialization", |input: &'a [u8]| {
            let (rest, bytes) = take(ID_SIZE_BYTES)(input)?;
            let id = bytes.try_into().map_err(|_| {
                nom::Err::Error(ParseError::from_error_kind(input, ErrorKind::LengthValue))
            })?;
            Ok((rest, TxId(id)))
        })(buffer)
    }
}

/// Identifier of a chain, used to correlate cross-chain messages
#[derive(
    Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct ChainId([u8; ID_SIZE_BYTES]);

impl ChainId {
    /// Creates a `ChainId` from raw bytes
    pub const fn new(bytes: [u8; ID_SIZE_BYTES]) -> Self {
        Self(bytes)
    }

    /// Identifier as a byte array reference
    pub fn as_bytes(&self) -> &[u8; ID_SIZE_BYTES] {
        &self.0
    }

    /// Identifier as a byte array
    pub fn into_bytes(self) -> [u8; ID_SIZE_BYTES] {
        self.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            CHAINID_PREFIX,
            bs58::encode(self.0).with_check().into_string()
        )
    }
}

impl std::fmt::Debug for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for ChainId {
    type Err = ModelsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ChainId(from_bs58_check(CHAINID_PREFIX, s)?))
    }
}

/// Serializer for `ChainId`
#[derive(Clone, Default)]
pub struct ChainIdSerializer;

impl ChainIdSerializer {
    /// Creates a new `ChainIdSerializer`
    pub const fn new() -> Self {
        Self
    }
}

impl Serializer<ChainId> for ChainIdSerializer {
    fn serialize(&self, value: &ChainId, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        buffer.extend_from_slice(value.as_bytes());
        Ok(())
    }
}

/// Deserializer for `ChainId`
#[derive(Clone, Default)]
pub struct ChainIdDeserializer;

impl ChainIdDeserializer {
    /// Creates a new `ChainIdDeserializer`
    pub const fn new() -> Self {
        Self
    }
}

impl Deserializer<ChainId> for ChainIdDeserializer {
    fn deserialize<'a, E: ParseError<&'a [u8]> + ContextError<&'a [u8]>>(
        &self,
        buffer: &'a [u8],
    ) -> IResult<&'a [u8], ChainId, E> {
        context("Failed ChainId deserialization", |input: &'a [u8]| {
            let (rest, bytes) = take(ID_SIZE_BYTES)(input)?;
            let id = bytes.try_into().map_err(|_| {
                nom::Err::Error(ParseError::from_error_kind(input, ErrorKind::LengthValue))
            })?;
            Ok((rest, ChainId(id)))
        })(buffer)
    }
}

/// Identifier of a cross-chain message
#[derive(
    Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct MessageId([u8; ID_SIZE_BYTES]);

impl MessageId {
    /// Creates a `MessageId` from raw bytes
    pub const fn new(bytes: [u8; ID_SIZE_BYTES]) -> Self {
        Self(bytes)
    }

    /// Identifier as a byte array reference
    pub fn as_bytes(&self) -> &[u8; ID_SIZE_BYTES] {
        &self.0
    }

    /// Identifier as a byte array
    pub fn into_bytes(self) -> [u8; ID_SIZE_BYTES] {
        self.0
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            MESSAGEID_PREFIX,
            bs58::encode(self.0).with_check().into_string()
        )
    }
}

impl std::fmt::Debug for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for MessageId {
    type Err = ModelsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MessageId(from_bs58_check(MESSAGEID_PREFIX, s)?))
    }
}

/// Serializer for `MessageId`
#[derive(Clone, Default)]
pub struct MessageIdSerializer;

impl MessageIdSerializer {
    /// Creates a new `MessageIdSerializer`
    pub const fn new() -> Self {
        Self
    }
}

impl Serializer<MessageId> for MessageIdSerializer {
    fn serialize(&self, value: &MessageId, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        buffer.extend_from_slice(value.as_bytes());
        Ok(())
    }
}

/// Deserializer for `MessageId`
#[derive(Clone, Default)]
pub struct MessageIdDeserializer;

impl MessageIdDeserializer {
    /// Creates a new `MessageIdDeserializer`
    pub const fn new() -> Self {
        Self
    }
}

impl Deserializer<MessageId> for MessageIdDeserializer {
    fn deserialize<'a, E: ParseError<&'a [u8]> + ContextError<&'a [u8]>>(
        &self,
        buffer: &'a [u8],
    ) -> IResult<&'a [u8], MessageId, E> {
        context("Failed MessageId deserialization", |input: &'a [u8]| {
            let (rest, bytes) = take(ID_SIZE_BYTES)(input)?;
            let id = bytes.try_into().map_err(|_| {
                nom::Err::Error(ParseError::from_error_kind(input, ErrorKind::LengthValue))
            })?;
            Ok((rest, MessageId(id)))
        })(buffer)
    }
}
