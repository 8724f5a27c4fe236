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

use std::fmt;
use std::str::FromStr;

use crate::error::InvalidRoundingError;

/// A context for performing decimal operations.
///
/// A context configures the rounding algorithm used by operations whose
/// result cannot be represented exactly. Contexts are small immutable values
/// that are cheap to copy; operations never mutate them and they accumulate
/// no status, so a single context may be shared freely between threads.
///
/// The operator overloads on [`Decimal64`](crate::Decimal64) use
/// [`DEFAULT_CONTEXT`]. Formatting uses [`DEFAULT_FORMAT_CONTEXT`], and
/// parsing via [`FromStr`] uses [`DEFAULT_SCAN_CONTEXT`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Context {
    rounding: Rounding,
}

/// The context used by arithmetic that is not given one explicitly.
///
/// It uses [`Rounding::HalfUp`].
pub const DEFAULT_CONTEXT: Context = Context::new(Rounding::HalfUp);

/// The context used when formatting values.
///
/// It uses [`Rounding::HalfEven`].
pub const DEFAULT_FORMAT_CONTEXT: Context = Context::new(Rounding::HalfEven);

/// The context used when parsing values.
pub const DEFAULT_SCAN_CONTEXT: Context = DEFAULT_FORMAT_CONTEXT;

impl Default for Context {
    fn default() -> Context {
        DEFAULT_CONTEXT
    }
}

impl Context {
    /// Constructs a context that uses the specified rounding algorithm.
    pub const fn new(rounding: Rounding) -> Context {
        Context { rounding }
    }

    /// Returns the context's rounding algorithm.
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Returns a copy of the context that uses `rounding` instead.
    pub const fn with_rounding(self, rounding: Rounding) -> Context {
        Context { rounding }
    }
}

/// Algorithms for rounding decimal numbers.
///
/// Rounding applies whenever a result has more significant digits than the
/// sixteen a [`Decimal64`](crate::Decimal64) can hold, or when a value is
/// explicitly rounded to a given decimal position.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Rounding {
    /// Round to nearest; if equidistant, round away from zero.
    HalfUp,
    /// Round to nearest; if equidistant, round so that the final digit is even.
    HalfEven,
    /// Round towards zero (truncation).
    Down,
}

impl Default for Rounding {
    fn default() -> Rounding {
        Rounding::HalfUp
    }
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rounding::HalfUp => f.write_str("HalfUp"),
            Rounding::HalfEven => f.write_str("HalfEven"),
            Rounding::Down => f.write_str("Down"),
        }
    }
}

impl FromStr for Rounding {
    type Err = InvalidRoundingError;

    fn from_str(s: &str) -> Result<Rounding, InvalidRoundingError> {
        if s.eq_ignore_ascii_case("halfup") {
            Ok(Rounding::HalfUp)
        } else if s.eq_ignore_ascii_case("halfeven") {
            Ok(Rounding::HalfEven)
        } else if s.eq_ignore_ascii_case("down") {
            Ok(Rounding::Down)
        } else {
            Err(InvalidRoundingError(s.to_owned()))
        }
    }
}

/// The class of a decimal number.
///
/// These classes follow the IEEE 754-2008 `class` operation.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Class {
    /// Signaling NaN ("Not a Number").
    SignalingNan,
    /// Quiet NaN ("Not a Number").
    QuietNan,
    /// Negative infinity.
    NegInfinity,
    /// Negative normal.
    NegNormal,
    /// Negative subnormal.
    NegSubnormal,
    /// Negative zero.
    NegZero,
    /// Positive zero.
    PosZero,
    /// Positive subnormal.
    PosSubnormal,
    /// Positive normal.
    PosNormal,
    /// Positive infinity.
    PosInfinity,
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Class::SignalingNan => f.write_str("sNaN"),
            Class::QuietNan => f.write_str("NaN"),
            Class::NegInfinity => f.write_str("-Infinity"),
            Class::NegNormal => f.write_str("-Normal"),
            Class::NegSubnormal => f.write_str("-Subnormal"),
            Class::NegZero => f.write_str("-Zero"),
            Class::PosZero => f.write_str("+Zero"),
            Class::PosSubnormal => f.write_str("+Subnormal"),
            Class::PosNormal => f.write_str("+Normal"),
            Class::PosInfinity => f.write_str("+Infinity"),
        }
    }
}
