//! Utilities for serializing and deserializing arbitrary-precision integers using Serde.
//!
//! The two public items here, `biguint` and `biguint_vec`, look like "modules" to Serde and are
//! used with the `#[serde(with = "crate::serde::biguint")]` syntax on [`BigUint`] fields.
//!
//! Human-readable formats (e.g. JSON) get decimal strings, so integers wider than 64 bits
//! survive parsers that read numbers as floats. Binary formats get the minimal big-endian byte
//! encoding.

use crate::common::*;
use serde::{
    de::{self, SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::fmt;

#[derive(Serialize)]
#[serde(transparent)]
struct SerWrapper<'a>(#[serde(with = "biguint")] &'a BigUint);

#[derive(Deserialize)]
#[serde(transparent)]
struct DeWrapper(#[serde(with = "biguint")] BigUint);

pub mod biguint {
    use super::*;

    pub fn serialize<S>(this: &BigUint, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&this.to_str_radix(10))
        } else {
            serializer.serialize_bytes(&this.to_bytes_be())
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BigUint, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            deserializer.deserialize_str(DecimalVisitor)
        } else {
            deserializer.deserialize_bytes(BytesVisitor)
        }
    }
}

pub mod biguint_vec {
    use super::*;

    pub fn serialize<S>(this: &[BigUint], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(this.len()))?;
        for value in this {
            seq.serialize_element(&SerWrapper(value))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<BigUint>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SeqVisitor;

        impl<'de> Visitor<'de> for SeqVisitor {
            type Value = Vec<BigUint>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of integers")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut values = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(value) = seq.next_element::<DeWrapper>()? {
                    values.push(value.0);
                }
                Ok(values)
            }
        }

        deserializer.deserialize_seq(SeqVisitor)
    }
}

struct DecimalVisitor;

impl<'de> Visitor<'de> for DecimalVisitor {
    type Value = BigUint;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a non-negative decimal integer string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        BigUint::parse_bytes(v.as_bytes(), 10)
            .ok_or_else(|| de::Error::custom("invalid decimal integer encoding"))
    }
}

struct BytesVisitor;

impl<'de> Visitor<'de> for BytesVisitor {
    type Value = BigUint;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a big-endian byte string")
    }

    fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(BigUint::from_bytes_be(v))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(byte) = seq.next_element::<u8>()? {
            bytes.push(byte);
        }
        Ok(BigUint::from_bytes_be(&bytes))
    }
}
