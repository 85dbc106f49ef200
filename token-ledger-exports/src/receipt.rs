//! Transaction receipt and its value codec.
//!
//! Receipts are append-only audit records: written once per transaction by
//! the execution engine, never mutated, never deleted.
//!
//! Value layout: `timestamp (8 bytes BE) | flag (1 byte, 0x0 fail / 0x1 ok) | units (8 bytes BE)`

use nom::error::{context, ContextError, ParseError};
use nom::IResult;
use token_serialization::{
    Deserializer, I64BEDeserializer, I64BESerializer, SerializeError, Serializer,
    U64BEDeserializer, U64BESerializer,
};

const TX_FAILURE_BYTE: u8 = 0x0;
const TX_SUCCESS_BYTE: u8 = 0x1;

/// Byte length of a serialized receipt value
pub const RECEIPT_VALUE_SIZE_BYTES: usize = 8 + 1 + 8;

/// Outcome record of an executed transaction
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct TxReceipt {
    /// unix timestamp of the block the transaction executed in
    pub timestamp: i64,
    /// whether execution succeeded
    pub success: bool,
    /// resource units consumed by execution, opaque to this layer
    pub units_consumed: u64,
}

/// Serializer for `TxReceipt`
#[derive(Clone, Default)]
pub struct TxReceiptSerializer {
    timestamp_serializer: I64BESerializer,
    units_serializer: U64BESerializer,
}

impl TxReceiptSerializer {
    /// Creates a new `TxReceiptSerializer`
    pub const fn new() -> Self {
        Self {
            timestamp_serializer: I64BESerializer,
            units_serializer: U64BESerializer,
        }
    }
}

impl Serializer<TxReceipt> for TxReceiptSerializer {
    fn serialize(&self, value: &TxReceipt, buffer: &mut Vec<u8>) -> Result<(), SerializeError> {
        self.timestamp_serializer
            .serialize(&value.timestamp, buffer)?;
        buffer.push(if value.success {
            TX_SUCCESS_BYTE
        } else {
            TX_FAILURE_BYTE
        });
        self.units_serializer
            .serialize(&value.units_consumed, buffer)?;
        Ok(())
    }
}

/// Deserializer for `TxReceipt`
#[derive(Clone, Default)]
pub struct TxReceiptDeserializer {
    timestamp_deserializer: I64BEDeserializer,
    units_deserializer: U64BEDeserializer,
}

impl TxReceiptDeserializer {
    /// Creates a new `TxReceiptDeserializer`
    pub const fn new() -> Self {
        Self {
            timestamp_deserializer: I64BEDeserializer,
            units_deserializer: U64BEDeserializer,
        }
    }
}

impl Deserializer<TxReceipt> for TxReceiptDeserializer {
    fn deserialize<'a, E: ParseError<&'a [u8]> + ContextError<&'a [u8]>>(
        &self,
        buffer: &'a [u8],
    ) -> IResult<&'a [u8], TxReceipt, E> {
        context("Failed TxReceipt deserialization", |input: &'a [u8]| {
            let (rest, timestamp) = self.timestamp_deserializer.deserialize(input)?;
            let (rest, flag) = nom::number::complete::u8(rest)?;
            let (rest, units_consumed) = self.units_deserializer.deserialize(rest)?;
            Ok((
                rest,
                TxReceipt {
                    timestamp,
                    success: flag == TX_SUCCESS_BYTE,
                    units_consumed,
                },
            ))
        })(buffer)
    }
}
