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

//! Conversions between decimals and primitive numbers.

use std::convert::TryFrom;
use std::panic;

use crate::context::{Context, DEFAULT_CONTEXT, DEFAULT_SCAN_CONTEXT};
use crate::decimal64::{Decimal64, Flavor};
use crate::error::{SignalingNanError, TryFromDecimalError};
use crate::parts::Parts;
use crate::round::DiscardedDigit;
use crate::uint128::{U128, TEN_TO_THE};

impl Context {
    /// Constructs a number from an `i64`.
    ///
    /// Integers with more than sixteen significant digits are rounded using
    /// the context's rounding algorithm.
    ///
    /// ```
    /// use dec64::{Context, Decimal64, Rounding};
    /// let cx = Context::new(Rounding::Down);
    /// let d = cx.from_i64(-99_999_999_999_999_999);
    /// assert_eq!(d.to_string(), "-9.999999999999999e+16");
    /// ```
    pub fn from_i64(&self, n: i64) -> Decimal64 {
        self.from_magnitude(n < 0, n.unsigned_abs())
    }

    /// Constructs a number from a `u64`.
    ///
    /// Integers with more than sixteen significant digits are rounded using
    /// the context's rounding algorithm.
    pub fn from_u64(&self, n: u64) -> Decimal64 {
        self.from_magnitude(false, n)
    }

    fn from_magnitude(&self, sign: bool, n: u64) -> Decimal64 {
        let mut p = Parts::finite(sign, 0, U128::from_u64(n));
        p.renormalize();
        p.finish(self.rounding(), DiscardedDigit::Eq0)
    }
}

macro_rules! decimal_from_int {
    ($($t:ty => $via:ident),* $(,)?) => {
        $(
            impl From<$t> for Decimal64 {
                fn from(n: $t) -> Decimal64 {
                    DEFAULT_CONTEXT.$via(n.into())
                }
            }
        )*
    };
}

// Integers of up to 32 bits convert exactly; wider ones may round.
decimal_from_int! {
    i8 => from_i64,
    i16 => from_i64,
    i32 => from_i64,
    i64 => from_i64,
    u8 => from_u64,
    u16 => from_u64,
    u32 => from_u64,
    u64 => from_u64,
}

/// Splits finite `sig * 10^exp` into its integer magnitude, saturated at
/// `u128::MAX`, and whether it has no fractional part.
fn truncate(sig: u64, exp: i16) -> (u128, bool) {
    if sig == 0 {
        (0, true)
    } else if exp >= 0 {
        // 10^16 * 10^22 still fits.
        if exp > 22 {
            (u128::MAX, true)
        } else {
            let scale = 10u128.pow(exp as u32);
            (u128::from(sig) * scale, true)
        }
    } else {
        let scale = usize::from(exp.unsigned_abs());
        if scale >= TEN_TO_THE.len() {
            (0, false)
        } else {
            let unit = TEN_TO_THE[scale];
            (u128::from(sig / unit), sig % unit == 0)
        }
    }
}

impl Decimal64 {
    /// Converts the number to an `i64`, truncating any fractional part and
    /// saturating at [`i64::MIN`] and [`i64::MAX`].
    ///
    /// The second value reports whether the conversion was exact. Infinities
    /// saturate and quiet NaNs convert to zero, inexactly.
    ///
    /// # Panics
    ///
    /// Panics with a [`SignalingNanError`] payload if the number is a
    /// signaling NaN.
    pub fn to_i64_exact(&self) -> (i64, bool) {
        let (fl, sign, exp, sig) = self.unpack();
        match fl {
            Flavor::Inf if sign => (i64::MIN, false),
            Flavor::Inf => (i64::MAX, false),
            Flavor::QNaN => (0, false),
            Flavor::SNaN => panic::panic_any(SignalingNanError),
            Flavor::Normal53 | Flavor::Normal51 => {
                let (mag, exact) = truncate(sig, exp);
                let limit = i64::MAX as u128 + u128::from(sign);
                if mag > limit {
                    (if sign { i64::MIN } else { i64::MAX }, false)
                } else if sign {
                    ((mag as i128).wrapping_neg() as i64, exact)
                } else {
                    (mag as i64, exact)
                }
            }
        }
    }

    /// Converts the number to an `i64` like [`Decimal64::to_i64_exact`],
    /// without reporting exactness.
    pub fn to_i64(&self) -> i64 {
        self.to_i64_exact().0
    }

    /// Converts the number to the nearest `f64`.
    ///
    /// # Panics
    ///
    /// Panics with a [`SignalingNanError`] payload if the number is a
    /// signaling NaN.
    pub fn to_f64(&self) -> f64 {
        let (fl, sign, exp, sig) = self.unpack();
        let f = match fl {
            Flavor::SNaN => panic::panic_any(SignalingNanError),
            Flavor::QNaN => return f64::NAN,
            Flavor::Inf => f64::INFINITY,
            Flavor::Normal53 | Flavor::Normal51 => {
                // The standard library parses decimal strings with correct
                // rounding.
                format!("{}e{}", sig, exp).parse().unwrap_or(f64::NAN)
            }
        };
        if sign {
            -f
        } else {
            f
        }
    }

    /// Constructs the number closest to the shortest decimal representation
    /// of `f` that round-trips.
    ///
    /// ```
    /// use dec64::Decimal64;
    /// assert_eq!(Decimal64::from_f64(0.1).to_string(), "0.1");
    /// ```
    pub fn from_f64(f: f64) -> Decimal64 {
        if f.is_nan() {
            return Decimal64::NAN;
        }
        if f.is_infinite() {
            return Decimal64::infinity(f.is_sign_negative());
        }
        DEFAULT_SCAN_CONTEXT
            .parse(&format!("{:e}", f))
            .unwrap_or(Decimal64::NAN)
    }

    /// Returns the value as an `i128` if it is an integer that fits.
    fn to_exact_integer(&self) -> Option<i128> {
        if !self.is_finite() {
            return None;
        }
        let (_, sign, exp, sig) = self.unpack();
        match truncate(sig, exp) {
            (mag, true) if mag <= i128::MAX as u128 => {
                Some(if sign { -(mag as i128) } else { mag as i128 })
            }
            _ => None,
        }
    }
}

macro_rules! int_try_from_decimal {
    ($($t:ty),*) => {
        $(
            impl TryFrom<Decimal64> for $t {
                type Error = TryFromDecimalError;

                /// Converts the number to an integer if it is one, and fits.
                fn try_from(n: Decimal64) -> Result<$t, TryFromDecimalError> {
                    let i = n.to_exact_integer().ok_or(TryFromDecimalError)?;
                    <$t>::try_from(i).map_err(|_| TryFromDecimalError)
                }
            }
        )*
    };
}

int_try_from_decimal!(i8, i16, i32, i64, u8, u16, u32, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate(0, -5), (0, true));
        assert_eq!(truncate(12_345, -2), (123, false));
        assert_eq!(truncate(12_300, -2), (123, true));
        assert_eq!(truncate(7, 3), (7_000, true));
        assert_eq!(truncate(7, 30), (u128::MAX, true));
        assert_eq!(truncate(7, -25), (0, false));
    }
}
