//! Asset record and its value codec.
//!
//! Value layout, order fixed for backward compatibility with previously
//! written records:
//! `meta_len (2 bytes BE) | metadata | supply (8 bytes BE) | owner (32 bytes) | warp flag (1 byte)`

use nom::bytes::complete::take;
use nom::error::{context, ContextError, ErrorKind, ParseError};
use nom::IResult;
use token_models::{PublicKey, PublicKeyDeserializer, PublicKeySerializer};
use token_serialization::{
    Deserializer, SerializeError, Serializer, U16BEDeserializer, U16BESerializer,
    U64BEDeserializer, U64BESerializer,
};

const WARP_ELIGIBLE_BYTE: u8 = 0x1;
const WARP_INELIGIBLE_BYTE: u8 = 0x0;

/// An asset record: metadata, outstanding supply, owner and warp eligibility.
///
/// The recorded supply is kept equal to the sum of all outstanding balance
/// records of the asset by the execution engine's mint/burn paths; this
/// layer stores what it is told.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct AssetEntry {
    /// free-form metadata blob, at most `u16::MAX` bytes
    pub metadata: Vec<u8>,
    /// total outstanding supply
    pub supply: u64,
    /// current owner of the asset
    pub owner: PublicKey,
    /// whether the asset may cross chains via warp messages
    pub warp: bool,
}

/// Serializer for `AssetEntry`
#[derive(Clone, Default)]
pub struct AssetEntrySerializer {
    meta_len_serializer: U16BESerializer,
    supply_serializer: U64BESerializer,
    owner_serializer: PublicKeySerializer,
}

impl AssetEntrySerializer {
    /// Creates a new `AssetEntrySerializer`
    pub const fn new() -> Self {
        Self {
            meta_len_serializer: U16BESerializer,
            supply_serializer: U64BESerializer,
            owner_serializer: PublicKeySerializer::new(),
        }
    }
}

impl Serializer<AssetEntry> for AssetEntrySerializer {
    fn serialize(&self, value: &AssetEntry, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        let meta_len: u16 = value.metadata.len().try_into().map_err(|_| {
            SerializeError::NumberTooBig(format!(
                "asset metadata length {} exceeds the u16 length field",
                value.metadata.len()
            ))
        })?;
        self.meta_len_serializer.serialize(&meta_len, buffer)?;
        buffer.extend_from_slice(&value.metadata);
        self.supply_serializer.serialize(&value.supply, buffer)?;
        self.owner_serializer.serialize(&value.owner, buffer)?;
        buffer.push(if value.warp {
            WARP_ELIGIBLE_BYTE
        } else {
            WARP_INELIGIBLE_BYTE
        });
        Ok(())
    }
}

/// Deserializer for `AssetEntry`
#[derive(Clone)]
pub struct AssetEntryDeserializer {
    meta_len_deserializer: U16BEDeserializer,
    supply_deserializer: U64BEDeserializer,
    owner_deserializer: PublicKeyDeserializer,
    max_metadata_length: u16,
}

impl AssetEntryDeserializer {
    /// Creates a new `AssetEntryDeserializer`
    ///
    /// # Arguments
    /// * `max_metadata_length`: upper bound accepted for the metadata blob
    pub const fn new(max_metadata_length: u16) -> Self {
        Self {
            meta_len_deserializer: U16BEDeserializer,
            supply_deserializer: U64BEDeserializer,
            owner_deserializer: PublicKeyDeserializer::new(),
            max_metadata_length,
        }
    }
}

impl Deserializer<AssetEntry> for AssetEntryDeserializer {
    fn deserialize<'a, E: ParseError<&'a [u8]> + ContextError<&'a [u8]>>(
        &self,
        buffer: &'a [u8],
    ) -> IResult<&'a [u8], AssetEntry, E> {
        context("Failed AssetEntry deserialization", |input: &'a [u8]| {
            let (rest, meta_len) = self.meta_len_deserializer.deserialize(input)?;
            if meta_len > self.max_metadata_length {
                return Err(nom::Err::Error(ParseError::from_error_kind(
                    input,
                    ErrorKind::TooLarge,
                )));
            }
            let (rest, metadata) = take(meta_len as usize)(rest)?;
            let (rest, supply) = self.supply_deserializer.deserialize(rest)?;
            let (rest, owner) = self.owner_deserializer.deserialize(rest)?;
            let (rest, flag) = nom::number::complete::u8(rest)?;
            Ok((
                rest,
                AssetEntry {
                    metadata: metadata.to_vec(),
                    supply,
                    owner,
                    warp: flag == WARP_ELIGIBLE_BYTE,
                },
            ))
        })(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use token_serialization::DeserializeError;

    fn sample_entry() -> AssetEntry {
        AssetEntry {
            metadata: b"meta".to_vec(),
            supply: 1000,
            owner: PublicKey::new(rand::random()),
            warp: true,
        }
    }

    #[test]
    fn test_asset_entry_round_trip() {
        let entry = sample_entry();
        let mut buffer = Vec::new();
        AssetEntrySerializer::new()
            .serialize(&entry, &mut buffer)
            .unwrap();
        let (rest, got) = AssetEntryDeserializer::new(u16::MAX)
            .deserialize::<DeserializeError>(&buffer)
            .unwrap();
        assert!(rest.is_empty());
        assert_eq!(got, entry);
    }

    #[test]
    fn test_asset_entry_layout() {
        let entry = sample_entry();
        let mut buffer = Vec::new();
        AssetEntrySerializer::new()
            .serialize(&entry, &mut buffer)
            .unwrap();
        // meta_len, metadata, supply, owner, flag
        assert_eq!(&buffer[..2], &[0x0, 0x4]);
        assert_eq!(&buffer[2..6], b"meta");
        assert_eq!(&buffer[6..14], &1000u64.to_be_bytes());
        assert_eq!(&buffer[14..46], entry.owner.as_bytes());
        assert_eq!(buffer[46], 0x1);
        assert_eq!(buffer.len(), 47);
    }

    #[test]
    fn test_empty_metadata_allowed() {
        let entry = AssetEntry {
            metadata: Vec::new(),
            supply: 0,
            owner: PublicKey::EMPTY,
            warp: false,
        };
        let mut buffer = Vec::new();
        AssetEntrySerializer::new()
            .serialize(&entry, &mut buffer)
            .unwrap();
        let (rest, got) = AssetEntryDeserializer::new(u16::MAX)
            .deserialize::<DeserializeError>(&buffer)
            .unwrap();
        assert!(rest.is_empty());
        assert_eq!(got, entry);
    }

    #[test]
    fn test_metadata_over_bound_rejected_on_read() {
        let entry = AssetEntry {
            metadata: vec![0xab; 64],
            ..sample_entry()
        };
        let mut buffer = Vec::new();
        AssetEntrySerializer::new()
            .serialize(&entry, &mut buffer)
            .unwrap();
        assert!(AssetEntryDeserializer::new(32)
            .deserialize::<DeserializeError>(&buffer)
            .is_err());
    }

    #[test]
    fn test_oversized_metadata_rejected_on_write() {
        let entry = AssetEntry {
            metadata: vec![0u8; usize::from(u16::MAX) + 1],
            ..sample_entry()
        };
        let mut buffer = Vec::new();
        assert!(matches!(
            AssetEntrySerializer::new().serialize(&entry, &mut buffer),
            Err(SerializeError::NumberTooBig(_))
        ));
    }

    #[test]
    fn test_truncated_value_rejected() {
        let entry = sample_entry();
        let mut buffer = Vec::new();
        AssetEntrySerializer::new()
            .serialize(&entry, &mut buffer)
            .unwrap();
        buffer.pop();
        assert!(AssetEntryDeserializer::new(u16::MAX)
            .deserialize::<DeserializeError>(&buffer)
            .is_err());
    }
}
