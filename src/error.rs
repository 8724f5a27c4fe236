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

use std::error::Error;
use std::fmt;
use std::io;

/// An error indicating that a string is not a valid decimal number.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParseDecimalError {
    kind: ParseErrorKind,
}

impl ParseDecimalError {
    pub(crate) fn new(kind: ParseErrorKind) -> ParseDecimalError {
        ParseDecimalError { kind }
    }

    /// Returns the reason parsing failed.
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

/// The reason a [`ParseDecimalError`] was raised.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParseErrorKind {
    /// Input remained after a complete number was read.
    TrailingCharacter(char),
    /// Neither integral nor fractional digits were present.
    MantissaMissing,
    /// An exponent marker was not followed by any digits.
    ExponentMissing,
    /// A second decimal point followed the mantissa.
    TooManyDots,
    /// More than one sign preceded the number.
    TooManySigns,
    /// The input began like a keyword but did not complete one, or a NaN
    /// payload did not fit.
    Invalid,
    /// The underlying scanner failed.
    Read(String),
}

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::TrailingCharacter(c) => {
                write!(f, "expected end of string, found {}", c)
            }
            ParseErrorKind::MantissaMissing => f.write_str("mantissa missing"),
            ParseErrorKind::ExponentMissing => f.write_str("exponent value missing"),
            ParseErrorKind::TooManyDots => f.write_str("too many dots"),
            ParseErrorKind::TooManySigns => f.write_str("too many +/- characters"),
            ParseErrorKind::Invalid => f.write_str("not a valid Decimal"),
            ParseErrorKind::Read(msg) => write!(f, "read failed: {}", msg),
        }
    }
}

impl Error for ParseDecimalError {}

impl From<io::Error> for ParseDecimalError {
    fn from(e: io::Error) -> ParseDecimalError {
        ParseDecimalError::new(ParseErrorKind::Read(e.to_string()))
    }
}

/// An error indicating that a string does not name a rounding algorithm.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InvalidRoundingError(pub(crate) String);

impl fmt::Display for InvalidRoundingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unsupported rounding mode: {}", self.0)
    }
}

impl Error for InvalidRoundingError {}

/// An error indicating that a value cannot be cast to a primitive type.
///
/// Causes for this failure include calling cast functions on values:
/// - Representing infinity or NaN
/// - With a nonzero fractional part
/// - Whose integral part doesn't fit into the target
#[derive(Debug, Eq, PartialEq)]
pub struct TryFromDecimalError;

impl fmt::Display for TryFromDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("decimal cannot be expressed in target primitive type")
    }
}

impl Error for TryFromDecimalError {}

/// An error indicating that a byte slice is too short to hold an encoded
/// decimal.
#[derive(Debug, Eq, PartialEq)]
pub struct InvalidLengthError {
    pub(crate) len: usize,
}

impl fmt::Display for InvalidLengthError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "decimal requires 8 bytes, found {}", self.len)
    }
}

impl Error for InvalidLengthError {}

/// The payload of the panic raised when a signaling NaN is converted to a
/// primitive number.
#[derive(Debug, Eq, PartialEq)]
pub struct SignalingNanError;

impl fmt::Display for SignalingNanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("sNaN64")
    }
}

impl Error for SignalingNanError {}
