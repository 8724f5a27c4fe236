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

//! dec64 is a pure Rust implementation of IEEE 754-2008 64-bit decimal
//! floating-point arithmetic.
//!
//! # Introduction
//!
//! Binary floating-point numbers can only approximate common decimal numbers.
//! The value 0.1, for example, would need an infinitely recurring binary
//! fraction. A decimal floating-point number represents 0.1 exactly, as one
//! tenth, so results match those calculated by hand. This makes decimal
//! arithmetic the right tool for financial calculations.
//!
//! # Details
//!
//! [`Decimal64`] is the IEEE 754-2008 `decimal64` interchange format in the
//! *Binary Integer Decimal* (BID) encoding: eight bytes holding a sign, a
//! significand of up to sixteen decimal digits stored as a binary integer, and
//! a decimal exponent in the range \[-398, 369\]. Values are finite numbers,
//! signed infinities, and quiet or signaling NaNs carrying a payload.
//!
//! The main types exposed by this library are as follows:
//!
//!  * [`Decimal64`], the value type. It is `Copy`, and implements the
//!    arithmetic operators, comparison, parsing and formatting.
//!
//!  * [`Context`], which hosts the arithmetic functions with an explicit
//!    [`Rounding`] algorithm. Contexts are immutable and accumulate no
//!    status. Operations that go wrong produce NaNs or infinities instead.
//!    The operators on `Decimal64` use [`DEFAULT_CONTEXT`].
//!
//!  * [`OrderedDecimal`], a wrapper that provides [`Ord`] and [`Hash`].
//!
//! # Examples
//!
//! The following example demonstrates the basic usage of the library:
//!
//! ```
//! # use std::error::Error;
//! use dec64::Decimal64;
//!
//! let x: Decimal64 = ".1".parse()?;
//! let y: Decimal64 = ".2".parse()?;
//! let z: Decimal64 = ".3".parse()?;
//!
//! assert_eq!(x + y, z);
//! assert_eq!((x + y + z).to_string(), "0.6");
//! assert_eq!(format!("{:.3}", Decimal64::PI), "3.142");
//!
//! # Ok::<_, Box<dyn Error>>(())
//! ```
//!
//! # Features
//!
//!  * `serde`: implements `Serialize` and `Deserialize` for [`Decimal64`] and
//!    [`OrderedDecimal`].
//!  * `num-traits`: implements the `num-traits` numeric traits for
//!    [`Decimal64`].

#![deny(missing_debug_implementations, missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod arith;
mod context;
mod conv;
mod decimal64;
mod error;
mod fmt;
#[macro_use]
mod macros;
mod marshal;
#[cfg(feature = "num-traits")]
#[cfg_attr(docsrs, doc(cfg(feature = "num-traits")))]
mod num;
mod ordered;
mod parts;
mod round;
mod scan;
mod uint128;

pub use context::{
    Class, Context, Rounding, DEFAULT_CONTEXT, DEFAULT_FORMAT_CONTEXT, DEFAULT_SCAN_CONTEXT,
};
pub use decimal64::Decimal64;
pub use error::{
    InvalidLengthError, InvalidRoundingError, ParseDecimalError, ParseErrorKind,
    SignalingNanError, TryFromDecimalError,
};
pub use fmt::Contextual;
pub use ordered::OrderedDecimal;
pub use scan::{ByteScanner, ScanState};
