//! Owner public key, used as a fixed-width key segment.
//!
//! Signature checking is the execution engine's concern; at this layer a
//! public key is only the 32-byte identifier of the account holding a
//! balance or an asset ownership right.

use crate::error::ModelsError;
use nom::bytes::complete::take;
use nom::error::{context, ContextError, ErrorKind, ParseError};
use nom::IResult;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::str::FromStr;
use token_serialization::{Deserializer, SerializeError, Serializer};

/// Byte width of a public key
pub const PUBLIC_KEY_SIZE_BYTES: usize = 32;

const PUBLIC_KEY_PREFIX: char = 'P';

/// Public key of an account
#[derive(
    Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct PublicKey([u8; PUBLIC_KEY_SIZE_BYTES]);

impl PublicKey {
    /// The all-zero public key, used where a record stores no owner
    pub const EMPTY: PublicKey = PublicKey([0u8; PUBLIC_KEY_SIZE_BYTES]);

    /// Creates a `PublicKey` from raw bytes
    pub const fn new(bytes: [u8; PUBLIC_KEY_SIZE_BYTES]) -> Self {
        Self(bytes)
    }

    /// Key as a byte array reference
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE_BYTES] {
        &self.0
    }

    /// Key as a byte array
    pub fn into_bytes(self) -> [u8; PUBLIC_KEY_SIZE_BYTES] {
        self.0
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}{}",
            PUBLIC_KEY_PREFIX,
            bs58::encode(self.0).with_check().into_string()
        )
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl FromStr for PublicKey {
    type Err = ModelsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match chars.next() {
            Some(found) if found == PUBLIC_KEY_PREFIX => {
                let decoded = bs58::decode(chars.as_str())
                    .with_check(None)
                    .into_vec()
                    .map_err(|_| ModelsError::IdParseError(s.to_string()))?;
                Ok(PublicKey(decoded.try_into().map_err(|_| {
                    ModelsError::IdParseError(s.to_string())
                })?))
            }
            _ => Err(ModelsError::WrongPrefix(
                PUBLIC_KEY_PREFIX.to_string(),
                s.to_string(),
            )),
        }
    }
}

/// Serializer for `PublicKey`
#[derive(Clone, Default)]
pub struct PublicKeySerializer;

impl PublicKeySerializer {
    /// Creates a new `PublicKeySerializer`
    pub const fn new() -> Self {
        Self
    }
}

impl Serializer<PublicKey> for PublicKeySerializer {
    fn serialize(&self, value: &PublicKey, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        buffer.extend_from_slice(value.as_bytes());
        Ok(())
    }
}

/// Deserializer for `PublicKey`
#[derive(Clone, Default)]
pub struct PublicKeyDeserializer;

impl PublicKeyDeserializer {
    /// Creates a new `PublicKeyDeserializer`
    pub const fn new() -> Self {
        Self
    }
}

impl Deserializer<PublicKey> for PublicKeyDeserializer {
    fn deserialize<'a, E: ParseError<&'a [u8]> + ContextError<&'a [u8]>>(
        &self,
        buffer: &'a [u8],
    ) -> IResult<&'a [u8], PublicKey, E> {
        context("Failed PublicKey deserialization", |input: &'a [u8]| {
            let (rest, bytes) = take(PUBLIC_KEY_SIZE_BYTES)(input)?;
            let key = bytes.try_into().map_err(|_| {
                nom::Err::Error(ParseError::from_error_kind(input, ErrorKind::LengthValue))
            })?;
            Ok((rest, PublicKey(key)))
        })(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use token_serialization::DeserializeError;

    #[test]
    fn test_public_key_text_round_trip() {
        let key = PublicKey::new(rand::random());
        let text = key.to_string();
        assert!(text.starts_with('P'));
        assert_eq!(PublicKey::from_str(&text).unwrap(), key);
    }

    #[test]
    fn test_public_key_binary_round_trip() {
        let key = PublicKey::new(rand::random());
        let mut buffer = Vec::new();
        PublicKeySerializer::new()
            .serialize(&key, &mut buffer)
            .unwrap();
        assert_eq!(buffer.len(), PUBLIC_KEY_SIZE_BYTES);
        let (rest, got) = PublicKeyDeserializer::new()
            .deserialize::<DeserializeError>(&buffer)
            .unwrap();
        assert!(rest.is_empty());
        assert_eq!(got, key);
    }

    #[test]
    fn test_garbage_text_rejected() {
        assert!(PublicKey::from_str("P0O0O0O0").is_err());
        assert!(PublicKey::from_str("").is_err());
    }
}
