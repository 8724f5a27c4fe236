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

use std::cmp::Ordering;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use paste::paste;
use static_assertions::{assert_eq_size, assert_impl_all, const_assert};

use crate::context::{Class, DEFAULT_CONTEXT};

/// The smallest normal significand, 10<sup>15</sup>.
pub(crate) const DECIMAL_BASE: u64 = 1_000_000_000_000_000;
/// The largest significand, 10<sup>16</sup> - 1.
pub(crate) const MAX_SIG: u64 = 10 * DECIMAL_BASE - 1;
/// The number of significant digits a value holds.
pub(crate) const DECIMAL_DIGITS: u32 = 16;

pub(crate) const EXP_BIAS: i16 = 398;
pub(crate) const MIN_EXP: i16 = -EXP_BIAS;
pub(crate) const MAX_EXP: i16 = 369;

const SIGN_BIT: u64 = 0x80 << 56;
const INF_BITS: u64 = 0x78 << 56;
const QNAN_BITS: u64 = 0x7c << 56;
const SNAN_BITS: u64 = 0x7e << 56;
const SIGNALING_BIT: u64 = 0x02 << 56;
pub(crate) const PAYLOAD_MASK: u64 = (1 << 51) - 1;
const FORM_A_SIG_MASK: u64 = (1 << 53) - 1;

const_assert!(MAX_SIG < 1 << 54);
const_assert!(MAX_SIG - (1 << 53) <= PAYLOAD_MASK);

/// The encoding a 64-bit pattern uses, decided by its seven leading bits.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum Flavor {
    Inf,
    /// A finite value with a 53-bit significand field.
    Normal53,
    /// A finite value with a 51-bit significand field and implied `100`
    /// prefix.
    Normal51,
    QNaN,
    SNaN,
}

const FLAVORS: [Flavor; 128] = flavor_table();

const fn flavor_table() -> [Flavor; 128] {
    let mut table = [Flavor::Normal53; 128];
    let mut i = 0;
    while i < table.len() {
        // Bits 62..57 of the pattern; bit 63 is the sign.
        let prefix = i & 0x3f;
        table[i] = if prefix >> 2 == 0xf {
            match prefix & 3 {
                0 | 1 => Flavor::Inf,
                2 => Flavor::QNaN,
                _ => Flavor::SNaN,
            }
        } else if prefix >> 4 == 3 {
            Flavor::Normal51
        } else {
            Flavor::Normal53
        };
        i += 1;
    }
    table
}

/// A 64-bit decimal floating-point number in the binary integer decimal
/// (BID) encoding of IEEE 754-2008.
///
/// A `Decimal64` holds sixteen significant decimal digits and an exponent in
/// the range [-398, 369], along with a sign. It can also hold a positive or
/// negative infinity, and quiet and signaling NaNs with a payload.
///
/// Additional operations are defined as methods on the [`Context`] type.
///
/// For convenience, `Decimal64` overloads many of the standard Rust operators.
/// For example, you can use the standard `+` operator to add two values
/// together:
///
/// ```
/// use dec64::Decimal64;
/// let a = Decimal64::from(1);
/// let b = Decimal64::from(2);
/// assert_eq!(a + b, Decimal64::from(3));
/// ```
///
/// These overloaded operators use [`DEFAULT_CONTEXT`], which rounds half
/// away from zero. To round differently, call the operation on a [`Context`]
/// you construct yourself.
///
/// Equality and ordering follow IEEE 754: `0` equals `-0`, members of a
/// cohort such as `1.0` and `1.00` are equal, and a NaN is unequal to
/// everything. For a total order use [`OrderedDecimal`]; for the exact
/// encoding use [`Decimal64::to_bits`].
///
/// [`Context`]: crate::Context
/// [`DEFAULT_CONTEXT`]: crate::DEFAULT_CONTEXT
/// [`OrderedDecimal`]: crate::OrderedDecimal
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct Decimal64 {
    bits: u64,
}

assert_eq_size!(Decimal64, u64);
assert_impl_all!(Decimal64: Copy, Send, Sync);

impl Decimal64 {
    /// The value that represents zero.
    pub const ZERO: Decimal64 = Decimal64::pack_raw(false, 0, 0);

    /// The value that represents negative zero.
    pub const NEG_ZERO: Decimal64 = Decimal64::pack_raw(true, 0, 0);

    /// The value that represents one.
    pub const ONE: Decimal64 = Decimal64::pack_raw(false, -15, DECIMAL_BASE);

    /// The value that represents negative one.
    pub const NEG_ONE: Decimal64 = Decimal64::pack_raw(true, -15, DECIMAL_BASE);

    /// The value that represents positive infinity.
    pub const INFINITY: Decimal64 = Decimal64::from_bits(INF_BITS);

    /// The value that represents negative infinity.
    pub const NEG_INFINITY: Decimal64 = Decimal64::from_bits(SIGN_BIT | INF_BITS);

    /// The value that represents a quiet Not-a-Number (NaN).
    pub const NAN: Decimal64 = Decimal64::from_bits(QNAN_BITS);

    /// The value that represents a signaling Not-a-Number (sNaN).
    ///
    /// Arithmetic does not trap on a signaling NaN, but some operations treat
    /// it differently from a quiet NaN.
    pub const SNAN: Decimal64 = Decimal64::from_bits(SNAN_BITS);

    /// The closest value to π.
    pub const PI: Decimal64 = Decimal64::pack_raw(false, -15, 3_141_592_653_589_793);

    /// The closest value to e, the base of the natural logarithm.
    pub const E: Decimal64 = Decimal64::pack_raw(false, -15, 2_718_281_828_459_045);

    /// The largest finite value, 9.999999999999999E+384.
    pub const MAX: Decimal64 = Decimal64::pack_raw(false, MAX_EXP, MAX_SIG);

    /// The smallest finite value, -9.999999999999999E+384.
    pub const NEG_MAX: Decimal64 = Decimal64::pack_raw(true, MAX_EXP, MAX_SIG);

    /// The smallest positive value, 1E-398.
    pub const MIN: Decimal64 = Decimal64::pack_raw(false, MIN_EXP, 1);

    /// The largest negative value, -1E-398.
    pub const NEG_MIN: Decimal64 = Decimal64::pack_raw(true, MIN_EXP, 1);

    /// Creates a number from its raw BID encoding.
    ///
    /// Every bit pattern is accepted. A finite pattern whose significand
    /// would exceed 16 digits is non-canonical and reads as zero.
    pub const fn from_bits(bits: u64) -> Decimal64 {
        Decimal64 { bits }
    }

    /// Returns the raw BID encoding of the number.
    pub const fn to_bits(self) -> u64 {
        self.bits
    }

    /// Creates a number from its representation as a little-endian byte array.
    pub fn from_le_bytes(bytes: [u8; 8]) -> Decimal64 {
        Decimal64::from_bits(u64::from_le_bytes(bytes))
    }

    /// Creates a number from its representation as a big-endian byte array.
    pub fn from_be_bytes(bytes: [u8; 8]) -> Decimal64 {
        Decimal64::from_bits(u64::from_be_bytes(bytes))
    }

    /// Creates a number from its representation as a byte array in the
    /// native endianness of the target platform.
    pub fn from_ne_bytes(bytes: [u8; 8]) -> Decimal64 {
        Decimal64::from_bits(u64::from_ne_bytes(bytes))
    }

    /// Returns the memory representation of the number as a byte array in
    /// little-endian order.
    pub fn to_le_bytes(&self) -> [u8; 8] {
        self.bits.to_le_bytes()
    }

    /// Returns the memory representation of the number as a byte array in
    /// big-endian order.
    pub fn to_be_bytes(&self) -> [u8; 8] {
        self.bits.to_be_bytes()
    }

    /// Returns the memory representation of the number as a byte array in
    /// the native endianness of the target platform.
    pub fn to_ne_bytes(&self) -> [u8; 8] {
        self.bits.to_ne_bytes()
    }

    /// Packs a finite value without checking its range.
    pub(crate) const fn pack_raw(sign: bool, exp: i16, sig: u64) -> Decimal64 {
        let sign = (sign as u64) << 63;
        let biased = (exp + EXP_BIAS) as u64;
        let bits = if sig <= FORM_A_SIG_MASK {
            // s EEEEEEEEEE ttt...t (53 bits)
            sign | biased << 53 | sig
        } else {
            // s 11 EEEEEEEEEE ttt...t (51 bits, implied 100 prefix)
            sign | (0xc00 | biased) << 51 | sig & PAYLOAD_MASK
        };
        Decimal64 { bits }
    }

    /// Packs a finite value whose exponent and significand are in range.
    pub(crate) fn pack(sign: bool, exp: i16, sig: u64) -> Decimal64 {
        debug_assert!((MIN_EXP..=MAX_EXP).contains(&exp), "exponent {} out of range", exp);
        debug_assert!(sig <= MAX_SIG, "significand {} out of range", sig);
        Decimal64::pack_raw(sign, exp, sig)
    }

    pub(crate) fn zero(sign: bool) -> Decimal64 {
        if sign {
            Decimal64::NEG_ZERO
        } else {
            Decimal64::ZERO
        }
    }

    pub(crate) fn infinity(sign: bool) -> Decimal64 {
        if sign {
            Decimal64::NEG_INFINITY
        } else {
            Decimal64::INFINITY
        }
    }

    /// Builds a NaN carrying `payload` in its low 51 bits.
    pub(crate) fn nan_with_payload(sign: bool, signaling: bool, payload: u64) -> Decimal64 {
        debug_assert!(payload <= PAYLOAD_MASK);
        let kind = if signaling { SNAN_BITS } else { QNAN_BITS };
        Decimal64::from_bits((sign as u64) << 63 | kind | payload)
    }

    pub(crate) fn flavor(self) -> Flavor {
        FLAVORS[(self.bits >> 57) as usize]
    }

    /// Splits the number into flavor, sign, exponent and significand.
    ///
    /// Infinities report a zero exponent and significand; NaNs report their
    /// payload as the significand. A zero significand always reports a zero
    /// exponent.
    pub(crate) fn unpack(self) -> (Flavor, bool, i16, u64) {
        let sign = self.bits & SIGN_BIT != 0;
        let fl = self.flavor();
        match fl {
            Flavor::Inf => (fl, sign, 0, 0),
            Flavor::QNaN | Flavor::SNaN => (fl, sign, 0, self.bits & PAYLOAD_MASK),
            Flavor::Normal51 => {
                let sig = self.bits & PAYLOAD_MASK | 1 << 53;
                if sig > MAX_SIG {
                    return (fl, sign, 0, 0);
                }
                let exp = ((self.bits >> 51) & 0x3ff) as i16 - EXP_BIAS;
                (fl, sign, exp, sig)
            }
            Flavor::Normal53 => {
                let sig = self.bits & FORM_A_SIG_MASK;
                if sig == 0 {
                    return (fl, sign, 0, 0);
                }
                let exp = ((self.bits >> 53) & 0x3ff) as i16 - EXP_BIAS;
                (fl, sign, exp, sig)
            }
        }
    }

    /// Returns a quiet NaN with this NaN's sign and payload. Other values are
    /// returned unchanged.
    pub fn quiet(self) -> Decimal64 {
        if self.flavor() == Flavor::SNaN {
            Decimal64::from_bits(self.bits & !SIGNALING_BIT)
        } else {
            self
        }
    }

    /// Classifies the number.
    pub fn class(&self) -> Class {
        let (fl, sign, _, sig) = self.unpack();
        match fl {
            Flavor::SNaN => Class::SignalingNan,
            Flavor::QNaN => Class::QuietNan,
            Flavor::Inf if sign => Class::NegInfinity,
            Flavor::Inf => Class::PosInfinity,
            _ if sig == 0 && sign => Class::NegZero,
            _ if sig == 0 => Class::PosZero,
            _ if self.is_subnormal() && sign => Class::NegSubnormal,
            _ if self.is_subnormal() => Class::PosSubnormal,
            _ if sign => Class::NegNormal,
            _ => Class::PosNormal,
        }
    }

    /// Computes the number of significant digits in the number.
    ///
    /// If the number is zero or infinite, returns 1. If the number is a NaN,
    /// returns the number of digits in the payload.
    pub fn digits(&self) -> u32 {
        let (fl, _, _, sig) = self.unpack();
        if fl == Flavor::Inf || sig == 0 {
            1
        } else {
            crate::uint128::num_decimal_digits_u64(sig)
        }
    }

    /// Computes the coefficient of the number, that is, its significand with
    /// the number's sign.
    ///
    /// If the number is a special value (i.e., NaN or infinity), returns zero.
    pub fn coefficient(&self) -> i64 {
        match self.unpack() {
            (Flavor::Normal53, sign, _, sig) | (Flavor::Normal51, sign, _, sig) => {
                // The significand is below 10^16, so the conversion is exact.
                let sig = sig as i64;
                if sign {
                    -sig
                } else {
                    sig
                }
            }
            _ => 0,
        }
    }

    /// Computes the exponent of the number.
    ///
    /// If the number is a special value or zero, returns zero.
    pub fn exponent(&self) -> i32 {
        i32::from(self.unpack().2)
    }

    /// Reports whether the number is finite.
    ///
    /// A finite number is one that is neither infinite nor a NaN.
    pub fn is_finite(&self) -> bool {
        matches!(self.flavor(), Flavor::Normal53 | Flavor::Normal51)
    }

    /// Reports whether the number is positive or negative infinity.
    pub fn is_infinite(&self) -> bool {
        self.flavor() == Flavor::Inf
    }

    /// Reports whether the number is a NaN.
    pub fn is_nan(&self) -> bool {
        matches!(self.flavor(), Flavor::QNaN | Flavor::SNaN)
    }

    /// Reports whether the number is a quiet NaN.
    pub fn is_quiet_nan(&self) -> bool {
        self.flavor() == Flavor::QNaN
    }

    /// Reports whether the number is a signaling NaN.
    pub fn is_signaling_nan(&self) -> bool {
        self.flavor() == Flavor::SNaN
    }

    /// Reports whether the number is less than zero and not a NaN.
    pub fn is_negative(&self) -> bool {
        self.is_signed() && !self.is_nan() && !self.is_zero()
    }

    /// Reports whether the number is greater than zero and not a NaN.
    pub fn is_positive(&self) -> bool {
        !self.is_signed() && !self.is_nan() && !self.is_zero()
    }

    /// Reports whether the number has a sign of 1.
    ///
    /// Note that zeros and NaNs may have a sign of 1.
    pub fn is_signed(&self) -> bool {
        self.bits & SIGN_BIT != 0
    }

    /// Reports whether the number is normal.
    ///
    /// A normal number is finite, non-zero, and not subnormal.
    pub fn is_normal(&self) -> bool {
        self.is_finite() && !self.is_zero() && !self.is_subnormal()
    }

    /// Reports whether the number is subnormal.
    ///
    /// A subnormal number is finite, non-zero, and has magnitude less than
    /// 10<sup>-383</sup>.
    pub fn is_subnormal(&self) -> bool {
        match self.unpack() {
            (Flavor::Normal53, _, exp, sig) => {
                sig != 0 && sig < DECIMAL_BASE && i32::from(exp) + num_digits(sig) <= -383
            }
            _ => false,
        }
    }

    /// Reports whether the number is positive or negative zero.
    pub fn is_zero(&self) -> bool {
        self.is_finite() && self.unpack().3 == 0
    }

    /// Returns -1, 0 or 1 according to the sign of the number.
    ///
    /// Zeros and NaNs return 0.
    pub fn sign(&self) -> i32 {
        if self.is_nan() || self.is_zero() {
            0
        } else if self.is_signed() {
            -1
        } else {
            1
        }
    }

    /// Returns the absolute value of the number.
    ///
    /// NaNs are returned unchanged.
    pub fn abs(self) -> Decimal64 {
        if self.is_nan() {
            self
        } else {
            Decimal64::from_bits(self.bits & !SIGN_BIT)
        }
    }

    /// Returns the number with the sign of `sign`.
    pub fn copy_sign(self, sign: Decimal64) -> Decimal64 {
        Decimal64::from_bits(self.bits & !SIGN_BIT | sign.bits & SIGN_BIT)
    }
}

fn num_digits(sig: u64) -> i32 {
    crate::uint128::num_decimal_digits_u64(sig) as i32
}

impl Default for Decimal64 {
    fn default() -> Decimal64 {
        Decimal64::ZERO
    }
}

impl PartialOrd for Decimal64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.compare(*other) {
            -1 => Some(Ordering::Less),
            0 => Some(Ordering::Equal),
            1 => Some(Ordering::Greater),
            _ => None,
        }
    }
}

impl PartialEq for Decimal64 {
    fn eq(&self, other: &Self) -> bool {
        self.compare(*other) == 0
    }
}

impl Neg for Decimal64 {
    type Output = Decimal64;

    /// Flips the sign of the number. NaNs are returned unchanged.
    fn neg(self) -> Decimal64 {
        if self.is_nan() {
            self
        } else {
            Decimal64::from_bits(self.bits ^ SIGN_BIT)
        }
    }
}

macro_rules! impl_binary_ops {
    ($($trait:ident, $method:ident, $cx_method:ident;)*) => {
        paste! {
            $(
                impl $trait<Decimal64> for Decimal64 {
                    type Output = Decimal64;

                    fn $method(self, rhs: Decimal64) -> Decimal64 {
                        DEFAULT_CONTEXT.$cx_method(self, rhs)
                    }
                }

                impl [<$trait Assign>]<Decimal64> for Decimal64 {
                    fn [<$method _assign>](&mut self, rhs: Decimal64) {
                        *self = DEFAULT_CONTEXT.$cx_method(*self, rhs);
                    }
                }
            )*
        }
    };
}

impl_binary_ops! {
    Add, add, add;
    Sub, sub, sub;
    Mul, mul, mul;
    Div, div, div;
}

impl Sum for Decimal64 {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Decimal64>,
    {
        iter.fold(Decimal64::ZERO, |acc, d| DEFAULT_CONTEXT.add(acc, d))
    }
}

impl<'a> Sum<&'a Decimal64> for Decimal64 {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = &'a Decimal64>,
    {
        iter.copied().sum()
    }
}

impl Product for Decimal64 {
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = Decimal64>,
    {
        iter.fold(Decimal64::ONE, |acc, d| DEFAULT_CONTEXT.mul(acc, d))
    }
}

impl<'a> Product<&'a Decimal64> for Decimal64 {
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = &'a Decimal64>,
    {
        iter.copied().product()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_unpack() {
        let exps = [MIN_EXP, MIN_EXP + 1, -200, -15, -1, 0, 1, 200, MAX_EXP - 1, MAX_EXP];
        let sigs = [
            1,
            9,
            DECIMAL_BASE - 1,
            DECIMAL_BASE,
            (1 << 53) - 1,
            1 << 53,
            (1 << 53) + 1,
            9_007_199_254_740_993,
            MAX_SIG,
        ];
        for &sign in &[false, true] {
            for &exp in &exps {
                for &sig in &sigs {
                    let d = Decimal64::pack(sign, exp, sig);
                    let fl = if sig < 1 << 53 {
                        Flavor::Normal53
                    } else {
                        Flavor::Normal51
                    };
                    assert_eq!(d.unpack(), (fl, sign, exp, sig), "{} {} {}", sign, exp, sig);
                }
                let zero = Decimal64::pack(sign, exp, 0);
                assert_eq!(zero.unpack(), (Flavor::Normal53, sign, 0, 0));
            }
        }
    }

    #[test]
    fn test_flavor_table() {
        assert_eq!(Decimal64::ZERO.flavor(), Flavor::Normal53);
        assert_eq!(Decimal64::MAX.flavor(), Flavor::Normal51);
        assert_eq!(Decimal64::INFINITY.flavor(), Flavor::Inf);
        assert_eq!(Decimal64::NEG_INFINITY.flavor(), Flavor::Inf);
        assert_eq!(Decimal64::from_bits(0x7a << 56).flavor(), Flavor::Inf);
        assert_eq!(Decimal64::NAN.flavor(), Flavor::QNaN);
        assert_eq!(Decimal64::SNAN.flavor(), Flavor::SNaN);
        assert_eq!((-Decimal64::SNAN).flavor(), Flavor::SNaN);
    }

    #[test]
    fn test_non_canonical_reads_as_zero() {
        // Form B with every significand bit set decodes past 10^16.
        let d = Decimal64::from_bits(0x6c00_0000_0000_0000 | PAYLOAD_MASK);
        assert_eq!(d.flavor(), Flavor::Normal51);
        assert!(d.is_zero());
    }

    #[test]
    fn test_constants() {
        assert_eq!(Decimal64::ONE.unpack(), (Flavor::Normal53, false, -15, DECIMAL_BASE));
        assert_eq!(Decimal64::MIN.unpack(), (Flavor::Normal53, false, MIN_EXP, 1));
        assert_ne!(Decimal64::ZERO.to_bits(), Decimal64::NEG_ZERO.to_bits());
        assert!(Decimal64::MIN.is_subnormal());
        assert!(!Decimal64::MAX.is_subnormal());
        assert_eq!(Decimal64::NAN.quiet().to_bits(), Decimal64::NAN.to_bits());
        assert_eq!(Decimal64::SNAN.quiet().to_bits(), Decimal64::NAN.to_bits());
    }

    #[test]
    fn test_class() {
        assert_eq!(Decimal64::ONE.class(), Class::PosNormal);
        assert_eq!(Decimal64::NEG_ONE.class(), Class::NegNormal);
        assert_eq!(Decimal64::MIN.class(), Class::PosSubnormal);
        assert_eq!(Decimal64::NEG_MIN.class(), Class::NegSubnormal);
        assert_eq!(Decimal64::ZERO.class(), Class::PosZero);
        assert_eq!(Decimal64::NEG_ZERO.class(), Class::NegZero);
        assert_eq!(Decimal64::INFINITY.class(), Class::PosInfinity);
        assert_eq!(Decimal64::NEG_INFINITY.class(), Class::NegInfinity);
        assert_eq!(Decimal64::NAN.class(), Class::QuietNan);
        assert_eq!(Decimal64::SNAN.class(), Class::SignalingNan);
    }
}
