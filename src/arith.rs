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

//! The arithmetic kernel.

use crate::context::{Context, DEFAULT_CONTEXT};
use crate::decimal64::{Decimal64, DECIMAL_BASE, MAX_EXP, MAX_SIG, MIN_EXP};
use crate::parts::Parts;
use crate::round::DiscardedDigit;
use crate::uint128::{isqrt, U128, TEN_TO_THE, TEN_TO_THE_128};

/// Returns the NaN an operation on `operands` produces, if any operand is a
/// NaN. Signaling NaNs take precedence over quiet ones, and earlier operands
/// over later ones. The result is always quiet.
fn propagate_nan(operands: &[Decimal64]) -> Option<Decimal64> {
    operands
        .iter()
        .find(|d| d.is_signaling_nan())
        .or_else(|| operands.iter().find(|d| d.is_quiet_nan()))
        .map(|d| d.quiet())
}

fn sticky(dropped: bool) -> DiscardedDigit {
    if dropped {
        DiscardedDigit::Lt5
    } else {
        DiscardedDigit::Eq0
    }
}

/// Adds two finite, nonzero values.
///
/// The operand with the larger exponent is scaled up by at most enough to
/// keep its significand below 10<sup>37</sup>; the other is scaled down to
/// match, with anything it loses reported as the returned status. When
/// digits are lost the sum has at least 36 digits, so the loss only ever
/// acts as a sticky digit during rounding.
fn add_aligned(a: Parts, b: Parts) -> (Parts, DiscardedDigit) {
    let (hi, mut lo) = if a.exp >= b.exp { (a, b) } else { (b, a) };
    let k = (hi.exp - lo.exp).min(37 - hi.num_digits());
    let hi_sig = hi.sig.mul(TEN_TO_THE_128[k as usize]);
    let exp = hi.exp - k;
    let dropped = lo.rescale(exp, DiscardedDigit::Eq0) != DiscardedDigit::Eq0;
    let one = U128::from_u64(1);

    let (sign, sig) = if hi.sign == lo.sign {
        (hi.sign, hi_sig.add(lo.sig))
    } else if lo.sig.lt(hi_sig) {
        let diff = hi_sig.sub(lo.sig);
        // The dropped digits belong to `lo`, so borrow one unit for them.
        (hi.sign, if dropped { diff.sub(one) } else { diff })
    } else if hi_sig.lt(lo.sig) {
        (lo.sign, lo.sig.sub(hi_sig))
    } else {
        (false, U128::ZERO)
    };
    (Parts::finite(sign, exp, sig), sticky(dropped))
}

impl Context {
    /// Adds `lhs` and `rhs`.
    ///
    /// The result is exact if it fits in sixteen digits, and is otherwise
    /// rounded using the context's rounding algorithm. An exact result keeps
    /// the smaller of the operands' exponents where it can. Adding infinities
    /// of opposite sign produces a NaN.
    pub fn add(&self, lhs: Decimal64, rhs: Decimal64) -> Decimal64 {
        if let Some(nan) = propagate_nan(&[lhs, rhs]) {
            return nan;
        }
        let (a, b) = (Parts::unpack(lhs), Parts::unpack(rhs));
        match (a.is_inf(), b.is_inf()) {
            (true, true) if a.sign != b.sign => Decimal64::NAN,
            (true, _) => Decimal64::infinity(a.sign),
            (false, true) => Decimal64::infinity(b.sign),
            (false, false) => self.add_finite(lhs, rhs, a, b),
        }
    }

    fn add_finite(&self, lhs: Decimal64, rhs: Decimal64, a: Parts, b: Parts) -> Decimal64 {
        match (a.is_zero(), b.is_zero()) {
            (true, true) => return rhs.copy_sign(Decimal64::zero(a.sign && b.sign)),
            (true, false) => return rhs,
            (false, true) => return lhs,
            (false, false) => (),
        }
        // The smaller operand lies entirely below the larger one's last digit.
        match a.separation(&b) {
            sep if sep > 17 => return lhs,
            sep if sep < -17 => return rhs,
            _ => (),
        }
        if a.exp == b.exp && a.sign == b.sign {
            let sig = a.sig.lo + b.sig.lo;
            if sig <= MAX_SIG {
                return Decimal64::pack(a.sign, a.exp as i16, sig);
            }
        }

        let preferred_exp = a.exp.min(b.exp);
        let (mut sum, below) = add_aligned(a, b);
        if sum.sig.is_zero() {
            return Decimal64::ZERO;
        }
        sum.round(self.rounding(), below);
        while sum.exp < preferred_exp && sum.sig.lo % 10 == 0 {
            sum.sig = U128::from_u64(sum.sig.lo / 10);
            sum.exp += 1;
        }
        while sum.exp > preferred_exp && sum.sig.lo < DECIMAL_BASE {
            sum.sig = sum.sig.mul64(10);
            sum.exp -= 1;
        }
        sum.pack()
    }

    /// Subtracts `rhs` from `lhs`.
    pub fn sub(&self, lhs: Decimal64, rhs: Decimal64) -> Decimal64 {
        self.add(lhs, -rhs)
    }

    /// Multiplies `lhs` by `rhs`.
    ///
    /// Multiplying zero by infinity produces a NaN.
    pub fn mul(&self, lhs: Decimal64, rhs: Decimal64) -> Decimal64 {
        if let Some(nan) = propagate_nan(&[lhs, rhs]) {
            return nan;
        }
        let (a, b) = (Parts::unpack(lhs), Parts::unpack(rhs));
        let sign = a.sign ^ b.sign;
        if a.is_inf() || b.is_inf() {
            if a.is_zero() || b.is_zero() {
                return Decimal64::NAN;
            }
            return Decimal64::infinity(sign);
        }
        if a.is_zero() || b.is_zero() {
            return Decimal64::zero(sign);
        }
        let mut product = Parts::finite(sign, a.exp + b.exp, U128::umul64(a.sig.lo, b.sig.lo));
        product.renormalize();
        product.finish(self.rounding(), DiscardedDigit::Eq0)
    }

    /// Divides `lhs` by `rhs`.
    ///
    /// Dividing a nonzero number by zero produces an infinity; dividing zero
    /// by zero, or infinity by infinity, produces a NaN.
    pub fn div(&self, lhs: Decimal64, rhs: Decimal64) -> Decimal64 {
        if let Some(nan) = propagate_nan(&[lhs, rhs]) {
            return nan;
        }
        let (mut a, mut b) = (Parts::unpack(lhs), Parts::unpack(rhs));
        let sign = a.sign ^ b.sign;
        if a.is_zero() {
            return if b.is_zero() {
                Decimal64::NAN
            } else {
                Decimal64::zero(sign)
            };
        }
        if a.is_inf() {
            return if b.is_inf() {
                Decimal64::NAN
            } else {
                Decimal64::infinity(sign)
            };
        }
        if b.is_inf() {
            return Decimal64::zero(sign);
        }
        if b.is_zero() {
            return Decimal64::infinity(sign);
        }

        a.normalize();
        b.normalize();
        // With both significands in [10^15, 10^16), the quotient has 18 or
        // 19 digits, leaving at least two to round away.
        let (quo, rem) = a.sig.mul64(TEN_TO_THE[18]).divrem64(b.sig.lo);
        let quo = Parts::finite(sign, a.exp - b.exp - 18, quo);
        quo.finish(self.rounding(), sticky(rem != 0))
    }

    /// Computes `a * b + c` with a single rounding.
    pub fn fma(&self, a: Decimal64, b: Decimal64, c: Decimal64) -> Decimal64 {
        if let Some(nan) = propagate_nan(&[a, b, c]) {
            return nan;
        }
        let (mut ap, mut bp, cp) = (Parts::unpack(a), Parts::unpack(b), Parts::unpack(c));
        let sign = ap.sign ^ bp.sign;
        if ap.is_inf() || bp.is_inf() {
            if ap.is_zero() || bp.is_zero() || cp.is_inf() && cp.sign != sign {
                return Decimal64::NAN;
            }
            return Decimal64::infinity(sign);
        }
        if cp.is_inf() {
            return Decimal64::infinity(cp.sign);
        }
        if ap.is_zero() || bp.is_zero() {
            return if cp.is_zero() {
                Decimal64::zero(sign && cp.sign)
            } else {
                c
            };
        }

        ap.remove_zeros();
        bp.remove_zeros();
        let mut product = Parts::finite(sign, ap.exp + bp.exp, U128::umul64(ap.sig.lo, bp.sig.lo));
        let sep = if cp.is_zero() { i32::MAX } else { product.separation(&cp) };
        if sep < -17 {
            return c;
        }
        if sep > 17 {
            product.renormalize();
            return product.finish(self.rounding(), DiscardedDigit::Eq0);
        }
        let (mut sum, below) = add_aligned(product, cp);
        if sum.sig.is_zero() {
            return Decimal64::ZERO;
        }
        sum.renormalize();
        sum.finish(self.rounding(), below)
    }

    /// Computes the square root of `d`.
    ///
    /// The square root of a negative number other than `-0` is a NaN.
    pub fn sqrt(&self, d: Decimal64) -> Decimal64 {
        if let Some(nan) = propagate_nan(&[d]) {
            return nan;
        }
        let mut p = Parts::unpack(d);
        if p.is_zero() {
            return d;
        }
        if p.sign {
            return Decimal64::NAN;
        }
        if p.is_inf() {
            return Decimal64::INFINITY;
        }
        p.normalize();
        // Scale to an even exponent and a radicand of at least 33 digits, so
        // the root has at least 17.
        let k = if p.exp % 2 == 0 { 18 } else { 19 };
        let radicand = p.sig.mul64(TEN_TO_THE[k as usize]);
        let root = isqrt(radicand);
        let inexact = root.mul(root) != radicand;
        let root = Parts::finite(false, (p.exp - k) / 2, root);
        root.finish(self.rounding(), sticky(inexact))
    }

    /// Rounds `d` to the decimal position of the leading digit of `e`, which
    /// is usually a power of ten such as `1`, `0.01` or `1000`.
    ///
    /// ```
    /// use dec64::{Context, Decimal64, Rounding};
    /// let cx = Context::new(Rounding::HalfEven);
    /// let d: Decimal64 = "2.345".parse().unwrap();
    /// let e: Decimal64 = "0.01".parse().unwrap();
    /// assert_eq!(cx.round(d, e).to_string(), "2.34");
    /// ```
    pub fn round(&self, d: Decimal64, e: Decimal64) -> Decimal64 {
        if let Some(nan) = propagate_nan(&[d, e]) {
            return nan;
        }
        let (dp, mut ep) = (Parts::unpack(d), Parts::unpack(e));
        if dp.is_inf() || ep.is_inf() {
            return if dp.is_inf() && ep.is_inf() {
                d
            } else {
                Decimal64::NAN
            };
        }
        ep.normalize();
        self.round_to_exp(d, ep.exp + 15)
    }

    /// Rounds finite `d` to a multiple of `10^exp`.
    pub(crate) fn round_to_exp(&self, d: Decimal64, exp: i32) -> Decimal64 {
        let mut p = Parts::unpack(d);
        if p.is_zero() || exp <= p.exp {
            return d;
        }
        p.normalize();
        let k = exp - p.exp;
        if k > 16 {
            return Decimal64::zero(p.sign);
        }
        if k < 1 {
            return d;
        }
        let (mut sig, grew) = self.rounding().round_to_pow10(p.sig.lo, k as u32);
        if grew {
            sig /= 10;
            p.exp += 1;
        }
        while p.exp < i32::from(MIN_EXP) || sig > MAX_SIG {
            sig /= 10;
            p.exp += 1;
        }
        Parts::finite(p.sign, p.exp, U128::from_u64(sig)).pack()
    }

    /// Rounds `d` to an integer.
    ///
    /// Values that are already integers, and special values, are returned
    /// unchanged.
    pub fn to_integral(&self, d: Decimal64) -> Decimal64 {
        if !d.is_finite() || d.is_zero() || d.exponent() >= 0 {
            return d;
        }
        self.round_to_exp(d, 0)
    }

    /// Multiplies `d` by 10 raised to the power `e`, which must be an
    /// integer.
    ///
    /// If `e` is infinite or has a fractional part, the result is a NaN.
    pub fn scale_b(&self, d: Decimal64, e: Decimal64) -> Decimal64 {
        if let Some(nan) = propagate_nan(&[d, e]) {
            return nan;
        }
        if !d.is_finite() || d.is_zero() {
            return d;
        }
        if !e.is_finite() {
            return Decimal64::NAN;
        }
        match e.to_i64_exact() {
            (n, true) => self.scale_b_int(d, n.clamp(-1000, 1000) as i32),
            (_, false) => Decimal64::NAN,
        }
    }

    /// Multiplies `d` by 10 raised to the power `n`.
    ///
    /// Results too large to represent become infinities; results too small
    /// are rounded into the subnormal range, possibly to zero.
    pub fn scale_b_int(&self, d: Decimal64, n: i32) -> Decimal64 {
        if !d.is_finite() || d.is_zero() {
            return d;
        }
        let mut p = Parts::unpack(d);
        p.exp += n.clamp(-1000, 1000);
        p.renormalize();
        p.finish(self.rounding(), DiscardedDigit::Eq0)
    }
}

impl Decimal64 {
    /// Computes `self * b + c` with a single rounding, using
    /// [`DEFAULT_CONTEXT`].
    pub fn fma(self, b: Decimal64, c: Decimal64) -> Decimal64 {
        DEFAULT_CONTEXT.fma(self, b, c)
    }

    /// Computes the square root of the number, using [`DEFAULT_CONTEXT`].
    pub fn sqrt(self) -> Decimal64 {
        DEFAULT_CONTEXT.sqrt(self)
    }

    /// Rounds the number to the decimal position of `e`, using
    /// [`DEFAULT_CONTEXT`]. See [`Context::round`].
    pub fn round(self, e: Decimal64) -> Decimal64 {
        DEFAULT_CONTEXT.round(self, e)
    }

    /// Rounds the number to an integer, using [`DEFAULT_CONTEXT`].
    pub fn to_integral(self) -> Decimal64 {
        DEFAULT_CONTEXT.to_integral(self)
    }

    /// Multiplies the number by 10<sup>e</sup>, using [`DEFAULT_CONTEXT`].
    pub fn scale_b(self, e: Decimal64) -> Decimal64 {
        DEFAULT_CONTEXT.scale_b(self, e)
    }

    /// Multiplies the number by 10<sup>n</sup>, using [`DEFAULT_CONTEXT`].
    pub fn scale_b_int(self, n: i32) -> Decimal64 {
        DEFAULT_CONTEXT.scale_b_int(self, n)
    }

    /// Compares two numbers numerically.
    ///
    /// Returns `-1`, `0` or `1` if `self` is less than, equal to or greater
    /// than `other`, and `-2` if either is a NaN. Zeros of either sign are
    /// equal, as are members of the same cohort.
    pub fn compare(self, other: Decimal64) -> i32 {
        if self.is_nan() || other.is_nan() {
            return -2;
        }
        if self.to_bits() == other.to_bits() || self.is_zero() && other.is_zero() {
            return 0;
        }
        let order = |neg: bool| if neg { -1 } else { 1 };
        match (self.is_infinite(), other.is_infinite()) {
            (true, true) if self.is_signed() == other.is_signed() => 0,
            (true, _) => order(self.is_signed()),
            (false, true) => -order(other.is_signed()),
            (false, false) => {
                let diff = DEFAULT_CONTEXT.sub(self, other);
                if diff.is_zero() {
                    0
                } else {
                    order(diff.is_signed())
                }
            }
        }
    }

    /// Like [`Decimal64::compare`], but returns the result as a number:
    /// [`Decimal64::NEG_ONE`], [`Decimal64::ZERO`] or [`Decimal64::ONE`]. If
    /// either operand is a NaN, the result is a NaN.
    pub fn compare_dec(self, other: Decimal64) -> Decimal64 {
        if let Some(nan) = propagate_nan(&[self, other]) {
            return nan;
        }
        match self.compare(other) {
            -1 => Decimal64::NEG_ONE,
            1 => Decimal64::ONE,
            _ => Decimal64::ZERO,
        }
    }

    /// Returns the smaller of `self` and `other`.
    ///
    /// A quiet NaN loses to a number; a signaling NaN wins, quieted. Of two
    /// equal numbers, the negative one is returned.
    pub fn min(self, other: Decimal64) -> Decimal64 {
        pick(self, other, false, |d| d)
    }

    /// Returns the larger of `self` and `other`.
    ///
    /// A quiet NaN loses to a number; a signaling NaN wins, quieted. Of two
    /// equal numbers, the positive one is returned.
    pub fn max(self, other: Decimal64) -> Decimal64 {
        pick(self, other, true, |d| d)
    }

    /// Returns whichever of `self` and `other` has the smaller magnitude.
    pub fn min_mag(self, other: Decimal64) -> Decimal64 {
        pick(self, other, false, Decimal64::abs)
    }

    /// Returns whichever of `self` and `other` has the larger magnitude.
    pub fn max_mag(self, other: Decimal64) -> Decimal64 {
        pick(self, other, true, Decimal64::abs)
    }

    /// Returns the smallest representable number greater than `self`.
    pub fn next_plus(self) -> Decimal64 {
        let mut p = Parts::unpack(self);
        if p.is_nan() {
            return self.quiet();
        }
        if p.is_inf() {
            return if p.sign {
                Decimal64::NEG_MAX
            } else {
                Decimal64::INFINITY
            };
        }
        if p.is_zero() {
            return Decimal64::MIN;
        }
        p.renormalize();
        let (sign, exp, sig) = (p.sign, p.exp as i16, p.sig.lo);
        if !sign {
            if sig < MAX_SIG {
                Decimal64::pack(sign, exp, sig + 1)
            } else if exp == MAX_EXP {
                Decimal64::INFINITY
            } else {
                Decimal64::pack(sign, exp + 1, DECIMAL_BASE)
            }
        } else if sig > DECIMAL_BASE || exp == MIN_EXP {
            if sig == 1 {
                Decimal64::NEG_ZERO
            } else {
                Decimal64::pack(sign, exp, sig - 1)
            }
        } else {
            Decimal64::pack(sign, exp - 1, MAX_SIG)
        }
    }

    /// Returns the largest representable number less than `self`.
    pub fn next_minus(self) -> Decimal64 {
        -(-self).next_plus()
    }

    /// Returns the exponent of the most significant digit of the number, as
    /// a number.
    ///
    /// The result for zero is negative infinity, and for an infinity is
    /// positive infinity.
    pub fn logb(self) -> Decimal64 {
        if let Some(nan) = propagate_nan(&[self]) {
            return nan;
        }
        if self.is_zero() {
            return Decimal64::NEG_INFINITY;
        }
        if self.is_infinite() {
            return Decimal64::INFINITY;
        }
        let mut p = Parts::unpack(self);
        p.normalize();
        Decimal64::from(p.exp + 15)
    }

    /// Reports whether the number is finite and has no fractional part.
    pub fn is_integer(&self) -> bool {
        if !self.is_finite() {
            return false;
        }
        let (_, _, exp, sig) = self.unpack();
        if sig == 0 || exp >= 0 {
            return true;
        }
        let scale = usize::from(exp.unsigned_abs());
        scale < TEN_TO_THE.len() && sig % TEN_TO_THE[scale] == 0
    }

    /// Reduces the number to its shortest coefficient, stripping trailing
    /// zeros. Every member of a cohort reduces to the same representation.
    ///
    /// Zeros reduce to a zero with exponent 0, and infinities to the
    /// canonical infinity of the same sign. NaNs are quieted.
    ///
    /// ```
    /// use dec64::Decimal64;
    /// let d: Decimal64 = "1.2300".parse().unwrap();
    /// assert_eq!(d.reduce().exponent(), -2);
    /// ```
    pub fn reduce(self) -> Decimal64 {
        if self.is_nan() {
            return self.quiet();
        }
        if self.is_infinite() {
            return Decimal64::infinity(self.is_signed());
        }
        let mut p = Parts::unpack(self);
        p.remove_zeros();
        p.pack()
    }
}

// Shared by min, max and their magnitude variants.
fn pick(a: Decimal64, b: Decimal64, want_max: bool, key: fn(Decimal64) -> Decimal64) -> Decimal64 {
    if a.is_signaling_nan() {
        return a.quiet();
    }
    if b.is_signaling_nan() {
        return b.quiet();
    }
    match (a.is_nan(), b.is_nan()) {
        (true, false) => return b,
        (_, true) => return a,
        (false, false) => (),
    }
    match key(a).compare(key(b)) {
        -1 if want_max => b,
        -1 => a,
        1 if want_max => a,
        1 => b,
        // Ties go to the positive operand for max and the negative for min.
        _ if a.is_signed() == want_max => b,
        _ => a,
    }
}
