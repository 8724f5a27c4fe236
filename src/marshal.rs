// Copyright Materialize, Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository, or online at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Interchange encodings.
//!
//! The binary form of a [`Decimal64`] is its bit pattern in big-endian byte
//! order. The textual form is its [`Display`](std::fmt::Display) output,
//! which the parser reads back exactly.

use std::convert::TryFrom;

use crate::decimal64::Decimal64;
use crate::error::InvalidLengthError;

impl Decimal64 {
    /// Returns the binary interchange form of the number: its bit pattern
    /// in big-endian byte order.
    pub fn to_binary(&self) -> [u8; 8] {
        self.to_be_bytes()
    }

    /// Decodes the binary interchange form produced by
    /// [`Decimal64::to_binary`].
    ///
    /// Only the first eight bytes of `bytes` are read.
    ///
    /// ```
    /// use dec64::Decimal64;
    /// let bytes = Decimal64::PI.to_binary();
    /// assert_eq!(Decimal64::from_binary(&bytes).unwrap().to_bits(), Decimal64::PI.to_bits());
    /// assert!(Decimal64::from_binary(&bytes[..7]).is_err());
    /// ```
    pub fn from_binary(bytes: &[u8]) -> Result<Decimal64, InvalidLengthError> {
        match bytes.get(..8) {
            Some(head) => {
                let mut buf = [0; 8];
                buf.copy_from_slice(head);
                Ok(Decimal64::from_be_bytes(buf))
            }
            None => Err(InvalidLengthError { len: bytes.len() }),
        }
    }
}

impl TryFrom<&[u8]> for Decimal64 {
    type Error = InvalidLengthError;

    fn try_from(bytes: &[u8]) -> Result<Decimal64, InvalidLengthError> {
        Decimal64::from_binary(bytes)
    }
}

impl From<Decimal64> for [u8; 8] {
    fn from(d: Decimal64) -> [u8; 8] {
        d.to_binary()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;

    use serde::de::{self, Deserialize, Deserializer, Unexpected, Visitor};
    use serde::ser::{Serialize, Serializer};

    use crate::context::DEFAULT_SCAN_CONTEXT;
    use crate::decimal64::Decimal64;

    /// Human-readable formats carry the canonical string; compact formats
    /// carry the raw bit pattern.
    impl Serialize for Decimal64 {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            if serializer.is_human_readable() {
                serializer.collect_str(self)
            } else {
                serializer.serialize_u64(self.to_bits())
            }
        }
    }

    impl<'de> Deserialize<'de> for Decimal64 {
        fn deserialize<D>(deserializer: D) -> Result<Decimal64, D::Error>
        where
            D: Deserializer<'de>,
        {
            if deserializer.is_human_readable() {
                deserializer.deserialize_any(TextVisitor)
            } else {
                deserializer.deserialize_u64(BitsVisitor)
            }
        }
    }

    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = Decimal64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a decimal string or number")
        }

        fn visit_str<E>(self, s: &str) -> Result<Decimal64, E>
        where
            E: de::Error,
        {
            DEFAULT_SCAN_CONTEXT
                .parse(s)
                .map_err(|_| E::invalid_value(Unexpected::Str(s), &self))
        }

        fn visit_i64<E>(self, n: i64) -> Result<Decimal64, E>
        where
            E: de::Error,
        {
            Ok(Decimal64::from(n))
        }

        fn visit_u64<E>(self, n: u64) -> Result<Decimal64, E>
        where
            E: de::Error,
        {
            Ok(Decimal64::from(n))
        }

        fn visit_f64<E>(self, f: f64) -> Result<Decimal64, E>
        where
            E: de::Error,
        {
            Ok(Decimal64::from_f64(f))
        }
    }

    struct BitsVisitor;

    impl<'de> Visitor<'de> for BitsVisitor {
        type Value = Decimal64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("the bit pattern of a decimal64")
        }

        fn visit_u64<E>(self, bits: u64) -> Result<Decimal64, E>
        where
            E: de::Error,
        {
            Ok(Decimal64::from_bits(bits))
        }
    }
}
