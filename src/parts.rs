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

//! The unpacked working form of a [`Decimal64`].
//!
//! Arithmetic unpacks its operands into [`Parts`], works on a significand
//! that may grow to 128 bits and an exponent that may leave the encodable
//! range, and finally rounds and packs the result.

use crate::context::Rounding;
use crate::decimal64::{Decimal64, Flavor, DECIMAL_BASE, MAX_EXP, MAX_SIG, MIN_EXP};
use crate::round::DiscardedDigit;
use crate::uint128::{U128, TEN_TO_THE, TEN_TO_THE_128};

const DECIMAL_BASE_128: U128 = U128::from_u64(DECIMAL_BASE);

/// A decimal split into its fields.
///
/// For finite values the magnitude is `sig * 10^exp`. For NaNs `sig` holds
/// the payload; for infinities it is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Parts {
    pub(crate) fl: Flavor,
    pub(crate) sign: bool,
    pub(crate) exp: i32,
    pub(crate) sig: U128,
}

impl Parts {
    pub(crate) fn unpack(d: Decimal64) -> Parts {
        let (fl, sign, exp, sig) = d.unpack();
        Parts {
            fl,
            sign,
            exp: i32::from(exp),
            sig: U128::from_u64(sig),
        }
    }

    /// Builds finite parts.
    pub(crate) fn finite(sign: bool, exp: i32, sig: U128) -> Parts {
        Parts {
            fl: Flavor::Normal53,
            sign,
            exp,
            sig,
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        matches!(self.fl, Flavor::Normal53 | Flavor::Normal51)
    }

    pub(crate) fn is_inf(&self) -> bool {
        self.fl == Flavor::Inf
    }

    pub(crate) fn is_nan(&self) -> bool {
        matches!(self.fl, Flavor::QNaN | Flavor::SNaN)
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.is_finite() && self.sig.is_zero()
    }

    pub(crate) fn is_subnormal(&self) -> bool {
        self.is_finite()
            && !self.sig.is_zero()
            && self.exp + self.sig.num_decimal_digits() as i32 <= -383
    }

    pub(crate) fn num_digits(&self) -> i32 {
        self.sig.num_decimal_digits() as i32
    }

    /// Returns the decimal distance between the most significant digits of
    /// `self` and `other`.
    pub(crate) fn separation(&self, other: &Parts) -> i32 {
        self.num_digits() + self.exp - other.num_digits() - other.exp
    }

    /// Scales a nonzero significand below 10<sup>16</sup> up to sixteen
    /// digits. The exponent may drop below the encodable range.
    pub(crate) fn normalize(&mut self) {
        if self.sig.is_zero() {
            return;
        }
        let digits = self.num_digits();
        if digits < 16 {
            self.sig = self.sig.mul64(TEN_TO_THE[(16 - digits) as usize]);
            self.exp -= 16 - digits;
        }
    }

    /// Like [`Parts::normalize`] but never takes the exponent below the
    /// smallest encodable exponent, so subnormals stay subnormal.
    pub(crate) fn renormalize(&mut self) {
        if self.sig.is_zero() {
            return;
        }
        let digits = self.num_digits();
        if digits < 16 && self.exp > i32::from(MIN_EXP) {
            let k = (16 - digits).min(self.exp - i32::from(MIN_EXP));
            self.sig = self.sig.mul64(TEN_TO_THE[k as usize]);
            self.exp -= k;
        }
    }

    /// Strips trailing zeros from the significand.
    pub(crate) fn remove_zeros(&mut self) {
        if self.sig.is_zero() {
            return;
        }
        loop {
            let (q, r) = self.sig.divrem64(10);
            if r != 0 {
                break;
            }
            self.sig = q;
            self.exp += 1;
        }
    }

    /// Divides the significand by `10^k`, raising the exponent to match, and
    /// reports what was dropped.
    pub(crate) fn shift_right(&mut self, k: i32, below: DiscardedDigit) -> DiscardedDigit {
        if k <= 0 {
            return below;
        }
        let k = k as u32;
        let (q, r) = divrem_pow10(self.sig, k);
        self.sig = q;
        self.exp += k as i32;
        DiscardedDigit::from_remainder(r, k, below)
    }

    /// Reduces the significand to at most sixteen digits.
    pub(crate) fn round_to_lo(&mut self, below: DiscardedDigit) -> DiscardedDigit {
        let excess = self.num_digits() - 16;
        self.shift_right(excess, below)
    }

    /// Brings the exponent up to `target`, dropping low digits.
    pub(crate) fn rescale(&mut self, target: i32, below: DiscardedDigit) -> DiscardedDigit {
        let k = target - self.exp;
        self.shift_right(k, below)
    }

    /// Rounds finite parts to sixteen digits and an exponent no smaller than
    /// the smallest encodable one. `below` describes digits already dropped
    /// beneath the current significand.
    pub(crate) fn round(&mut self, rounding: Rounding, below: DiscardedDigit) {
        let mut status = self.round_to_lo(below);
        if self.exp < i32::from(MIN_EXP) {
            status = self.rescale(i32::from(MIN_EXP), status);
        }
        let sig = rounding.round(self.sig.lo, status);
        if sig > MAX_SIG {
            self.sig = DECIMAL_BASE_128;
            self.exp += 1;
        } else {
            self.sig = U128::from_u64(sig);
        }
    }

    /// Packs rounded finite parts, producing a signed infinity if the
    /// exponent is too large to encode.
    pub(crate) fn pack(mut self) -> Decimal64 {
        debug_assert!(self.sig.fits_u64() && self.sig.lo <= MAX_SIG);
        if self.sig.is_zero() {
            return Decimal64::zero(self.sign);
        }
        // Clamp the exponent by lengthening the significand where possible.
        while self.exp > i32::from(MAX_EXP) && self.sig.lo <= MAX_SIG / 10 {
            self.sig = self.sig.mul64(10);
            self.exp -= 1;
        }
        if self.exp > i32::from(MAX_EXP) {
            return Decimal64::infinity(self.sign);
        }
        debug_assert!(self.exp >= i32::from(MIN_EXP));
        Decimal64::pack(self.sign, self.exp as i16, self.sig.lo)
    }

    /// Rounds and packs finite parts.
    pub(crate) fn finish(mut self, rounding: Rounding, below: DiscardedDigit) -> Decimal64 {
        self.round(rounding, below);
        self.pack()
    }
}

/// Returns `n / 10^k` and `n % 10^k`.
pub(crate) fn divrem_pow10(n: U128, k: u32) -> (U128, U128) {
    if k as usize >= TEN_TO_THE_128.len() {
        return (U128::ZERO, n);
    }
    let p = TEN_TO_THE_128[k as usize];
    if n.lt(p) {
        return (U128::ZERO, n);
    }
    if (k == 15 || k == 16) && n.lt(TEN_TO_THE_128[32]) {
        let q = if k == 15 { n.div_10_15() } else { n.div_10_16() };
        let q = U128::from_u64(q);
        return (q, n.sub(q.mul(p)));
    }
    n.divrem(p)
}
