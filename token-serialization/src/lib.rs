//! Serialization traits and fixed-width integer serializers shared by every
//! crate of the workspace.
//!
//! All durable values in this project use fixed-width big-endian integers,
//! so the serializers here are the big-endian counterparts of the usual
//! varint helpers. Deserialization is nom-based so that codecs can be
//! composed with parser combinators.

#![warn(missing_docs)]
#![warn(unused_crate_dependencies)]

use displaydoc::Display;
use nom::error::{ContextError, ErrorKind, FromExternalError, ParseError};
use nom::number::complete::{be_i64, be_u16, be_u64};
use nom::IResult;
use std::fmt;
use thiserror::Error;

/// Serialization errors
#[non_exhaustive]
#[derive(Display, Error, Debug, Clone)]
pub enum SerializeError {
    /// Number {0} is too big to be serialized
    NumberTooBig(String),
    /// General error {0}
    GeneralError(String),
}

/// Trait to serialize a value of type `T` into a byte buffer
pub trait Serializer<T> {
    /// Appends the serialized form of `value` to `buffer`
    fn serialize(&self, value: &T, buffer: &mut Vec<u8>) -> Result<(), SerializeError>;
}

/// Trait to deserialize a value of type `T` from a byte buffer
pub trait Deserializer<T> {
    /// Deserializes one `T` from the start of `buffer`, returning the
    /// remaining bytes and the parsed value
    fn deserialize<'a, E: ParseError<&'a [u8]> + ContextError<&'a [u8]>>(
        &self,
        buffer: &'a [u8],
    ) -> IResult<&'a [u8], T, E>;
}

/// Error type used when calling `deserialize::<DeserializeError>(..)`,
/// accumulating the nom context chain for display
#[derive(Debug, Clone)]
pub struct DeserializeError<'a> {
    errors: Vec<(&'a [u8], nom::error::VerboseErrorKind)>,
}

impl<'a> ParseError<&'a [u8]> for DeserializeError<'a> {
    fn from_error_kind(input: &'a [u8], kind: ErrorKind) -> Self {
        Self {
            errors: vec![(input, nom::error::VerboseErrorKind::Nom(kind))],
        }
    }

    fn append(input: &'a [u8], kind: ErrorKind, mut other: Self) -> Self {
        other
            .errors
            .push((input, nom::error::VerboseErrorKind::Nom(kind)));
        other
    }
}

impl<'a> ContextError<&'a [u8]> for DeserializeError<'a> {
    fn add_context(input: &'a [u8], ctx: &'static str, mut other: Self) -> Self {
        other
            .errors
            .push((input, nom::error::VerboseErrorKind::Context(ctx)));
        other
    }
}

impl<'a, E> FromExternalError<&'a [u8], E> for DeserializeError<'a> {
    fn from_external_error(input: &'a [u8], kind: ErrorKind, _e: E) -> Self {
        Self::from_error_kind(input, kind)
    }
}

impl<'a> fmt::Display for DeserializeError<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (input, error) in self.errors.iter().rev() {
            match error {
                nom::error::VerboseErrorKind::Context(ctx) => write!(f, "{} / ", ctx)?,
                nom::error::VerboseErrorKind::Nom(kind) => {
                    write!(f, "{:?} at {} remaining bytes", kind, input.len())?
                }
                nom::error::VerboseErrorKind::Char(c) => write!(f, "char {}: ", c)?,
            }
        }
        Ok(())
    }
}

/// Serializer for `u64` as 8 big-endian bytes
#[derive(Clone, Default)]
pub struct U64BESerializer;

impl U64BESerializer {
    /// Creates a new `U64BESerializer`
    pub fn new() -> Self {
        Self
    }
}

impl Serializer<u64> for U64BESerializer {
    fn serialize(&self, value: &u64, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        buffer.extend_from_slice(&value.to_be_bytes());
        Ok(())
    }
}

/// Deserializer for `u64` from 8 big-endian bytes
#[derive(Clone, Default)]
pub struct U64BEDeserializer;

impl U64BEDeserializer {
    /// Creates a new `U64BEDeserializer`
    pub fn new() -> Self {
        Self
    }
}

impl Deserializer<u64> for U64BEDeserializer {
    fn deserialize<'a, E: ParseError<&'a [u8]> + ContextError<&'a [u8]>>(
        &self,
        buffer: &'a [u8],
    ) -> IResult<&'a [u8], u64, E> {
        nom::error::context("Failed u64 deserialization", be_u64)(buffer)
    }
}

/// Serializer for `u16` as 2 big-endian bytes
#[derive(Clone, Default)]
pub struct U16BESerializer;

impl U16BESerializer {
    /// Creates a new `U16BESerializer`
    pub fn new() -> Self {
        Self
    }
}

impl Serializer<u16> for U16BESerializer {
    fn serialize(&self, value: &u16, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        buffer.extend_from_slice(&value.to_be_bytes());
        Ok(())
    }
}

/// Deserializer for `u16` from 2 big-endian bytes
#[derive(Clone, Default)]
pub struct U16BEDeserializer;

impl U16BEDeserializer {
    /// Creates a new `U16BEDeserializer`
    pub fn new() -> Self {
        Self
    }
}

impl Deserializer<u16> for U16BEDeserializer {
    fn deserialize<'a, E: ParseError<&'a [u8]> + ContextError<&'a [u8]>>(
        &self,
        buffer: &'a [u8],
    ) -> IResult<&'a [u8], u16, E> {
        nom::error::context("Failed u16 deserialization", be_u16)(buffer)
    }
}

/// Serializer for `i64` as 8 big-endian bytes (two's complement)
#[derive(Clone, Default)]
pub struct I64BESerializer;

impl I64BESerializer {
    /// Creates a new `I64BESerializer`
    pub fn new() -> Self {
        Self
    }
}

impl Serializer<i64> for I64BESerializer {
    fn serialize(&self, value: &i64, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        buffer.extend_from_slice(&value.to_be_bytes());
        Ok(())
    }
}

/// Deserializer for `i64` from 8 big-endian bytes (two's complement)
#[derive(Clone, Default)]
pub struct I64BEDeserializer;

impl I64BEDeserializer {
    /// Creates a new `I64BEDeserializer`
    pub fn new() -> Self {
        Self
    }
}

impl Deserializer<i64> for I64BEDeserializer {
    fn deserialize<'a, E: ParseError<&'a [u8]> + ContextError<&'a [u8]>>(
        &self,
        buffer: &'a [u8],
    ) -> IResult<&'a [u8], i64, E> {
        nom::error::context("Failed i64 deserialization", be_i64)(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u64_be_round_trip() {
        let ser = U64BESerializer::new();
        let deser = U64BEDeserializer::new();
        for value in [0u64, 1, 42, u64::MAX] {
            let mut buffer = Vec::new();
            ser.serialize(&value, &mut buffer).unwrap();
            assert_eq!(buffer.len(), 8);
            let (rest, got) = deser.deserialize::<DeserializeError>(&buffer).unwrap();
            assert!(rest.is_empty());
            assert_eq!(got, value);
        }
    }

    #[test]
    fn test_i64_be_round_trip() {
        let ser = I64BESerializer::new();
        let deser = I64BEDeserializer::new();
        for value in [i64::MIN, -1, 0, 1_700_000_000, i64::MAX] {
            let mut buffer = Vec::new();
            ser.serialize(&value, &mut buffer).unwrap();
            let (rest, got) = deser.deserialize::<DeserializeError>(&buffer).unwrap();
            assert!(rest.is_empty());
            assert_eq!(got, value);
        }
    }

    #[test]
    fn test_u16_be_layout() {
        let ser = U16BESerializer::new();
        let mut buffer = Vec::new();
        ser.serialize(&0x0102u16, &mut buffer).unwrap();
        assert_eq!(buffer, vec![0x01, 0x02]);
    }

    #[test]
    fn test_truncated_input_fails() {
        let deser = U64BEDeserializer::new();
        assert!(deser
            .deserialize::<DeserializeError>(&[0u8; 7])
            .is_err());
    }
}
