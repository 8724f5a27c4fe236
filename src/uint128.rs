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

//! Two-word unsigned integers and the decimal helpers the arithmetic kernel
//! builds on.

use std::cmp::Ordering;
use std::sync::OnceLock;

use static_assertions::const_assert_eq;

/// Powers of ten that fit in a `u64`.
pub(crate) const TEN_TO_THE: [u64; 20] = pow10_64();

/// Powers of ten that fit in a [`U128`]; `10^39` does not.
pub(crate) const TEN_TO_THE_128: [U128; 39] = pow10_128();

const_assert_eq!(TEN_TO_THE[19], 10_000_000_000_000_000_000);

// Magic reciprocals for unsigned division by 10^15 and 10^16 of values below
// 10^32 (Hacker's Delight, 10-15). Applied to n >> 14.
const M15: U128 = U128::from_native(5_575_186_299_632_655_785_383_929_569);
const M16: U128 = U128::from_native(557_518_629_963_265_578_538_392_957);

const fn pow10_64() -> [u64; 20] {
    let mut table = [1u64; 20];
    let mut i = 1;
    while i < table.len() {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
}

const fn pow10_128() -> [U128; 39] {
    let mut table = [U128::ZERO; 39];
    let mut i = 0;
    while i < table.len() {
        table[i] = U128::umul64(TEN_TO_THE[i / 2], TEN_TO_THE[(i + 1) / 2]);
        i += 1;
    }
    table
}

/// An unsigned 128-bit integer laid out as a low and a high word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub(crate) struct U128 {
    pub(crate) lo: u64,
    pub(crate) hi: u64,
}

impl U128 {
    pub(crate) const ZERO: U128 = U128 { lo: 0, hi: 0 };

    pub(crate) const fn from_u64(lo: u64) -> U128 {
        U128 { lo, hi: 0 }
    }

    const fn from_native(n: u128) -> U128 {
        U128 {
            lo: n as u64,
            hi: (n >> 64) as u64,
        }
    }

    const fn to_native(self) -> u128 {
        (self.hi as u128) << 64 | self.lo as u128
    }

    /// Returns the exact product of two 64-bit words.
    pub(crate) const fn umul64(a: u64, b: u64) -> U128 {
        U128::from_native(a as u128 * b as u128)
    }

    pub(crate) fn is_zero(self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    /// Reports whether the value fits in the low word.
    pub(crate) fn fits_u64(self) -> bool {
        self.hi == 0
    }

    pub(crate) fn bit_len(self) -> u32 {
        if self.hi != 0 {
            128 - self.hi.leading_zeros()
        } else {
            64 - self.lo.leading_zeros()
        }
    }

    pub(crate) fn add(self, rhs: U128) -> U128 {
        let (lo, carry) = self.lo.overflowing_add(rhs.lo);
        U128 {
            lo,
            hi: self.hi.wrapping_add(rhs.hi).wrapping_add(carry as u64),
        }
    }

    pub(crate) fn sub(self, rhs: U128) -> U128 {
        let (lo, borrow) = self.lo.overflowing_sub(rhs.lo);
        U128 {
            lo,
            hi: self.hi.wrapping_sub(rhs.hi).wrapping_sub(borrow as u64),
        }
    }

    pub(crate) fn lt(self, rhs: U128) -> bool {
        self < rhs
    }

    pub(crate) fn shl(self, s: u32) -> U128 {
        debug_assert!(s < 128);
        match s {
            0 => self,
            1..=63 => U128 {
                lo: self.lo << s,
                hi: self.hi << s | self.lo >> (64 - s),
            },
            _ => U128 {
                lo: 0,
                hi: self.lo << (s - 64),
            },
        }
    }

    pub(crate) fn shr(self, s: u32) -> U128 {
        debug_assert!(s < 128);
        match s {
            0 => self,
            1..=63 => U128 {
                lo: self.lo >> s | self.hi << (64 - s),
                hi: self.hi >> s,
            },
            _ => U128 {
                lo: self.hi >> (s - 64),
                hi: 0,
            },
        }
    }

    /// Returns the low 128 bits of the product.
    pub(crate) fn mul(self, rhs: U128) -> U128 {
        let p = U128::umul64(self.lo, rhs.lo);
        U128 {
            lo: p.lo,
            hi: p
                .hi
                .wrapping_add(self.hi.wrapping_mul(rhs.lo))
                .wrapping_add(self.lo.wrapping_mul(rhs.hi)),
        }
    }

    pub(crate) fn mul64(self, rhs: u64) -> U128 {
        self.mul(U128::from_u64(rhs))
    }

    /// Divides by a nonzero word, returning quotient and remainder.
    pub(crate) fn divrem64(self, d: u64) -> (U128, u64) {
        if self.hi == 0 {
            return (U128::from_u64(self.lo / d), self.lo % d);
        }
        let qhi = self.hi / d;
        let n = u128::from(self.hi % d) << 64 | u128::from(self.lo);
        let d = u128::from(d);
        (
            U128 {
                lo: (n / d) as u64,
                hi: qhi,
            },
            (n % d) as u64,
        )
    }

    /// Divides by a nonzero value, returning quotient and remainder.
    pub(crate) fn divrem(self, d: U128) -> (U128, U128) {
        if d.hi == 0 {
            let (q, r) = self.divrem64(d.lo);
            return (q, U128::from_u64(r));
        }
        let (n, d) = (self.to_native(), d.to_native());
        (U128::from_native(n / d), U128::from_native(n % d))
    }

    /// Returns `self / 10^15` for `self < 10^32`.
    pub(crate) fn div_10_15(self) -> u64 {
        self.div_pow10_magic(15, M15)
    }

    /// Returns `self / 10^16` for `self < 10^32`.
    pub(crate) fn div_10_16(self) -> u64 {
        self.div_pow10_magic(16, M16)
    }

    fn div_pow10_magic(self, k: usize, m: U128) -> u64 {
        if self.hi == 0 {
            return self.lo / TEN_TO_THE[k];
        }
        let n = self.shr(14);
        // Third word of the 256-bit product n * m.
        let b1 = U128::umul64(n.lo, m.lo).hi;
        let p2 = U128::umul64(n.hi, m.lo);
        let p3 = U128::umul64(n.lo, m.hi);
        let c4 = n.hi.wrapping_mul(m.hi);
        let (b, carry1) = b1.overflowing_add(p2.lo);
        let (_, carry2) = b.overflowing_add(p3.lo);
        let q = p2
            .hi
            .wrapping_add(p3.hi)
            .wrapping_add(c4)
            .wrapping_add(carry1 as u64)
            .wrapping_add(carry2 as u64);
        // The reciprocal can overshoot by one just below a multiple of 10^k.
        if self.lt(U128::umul64(q, TEN_TO_THE[k])) {
            q - 1
        } else {
            q
        }
    }

    /// Returns the number of decimal digits; zero has none.
    pub(crate) fn num_decimal_digits(self) -> u32 {
        let est = ((self.bit_len() + 1) * 77 / 256) as usize;
        if est < TEN_TO_THE_128.len() && !self.lt(TEN_TO_THE_128[est]) {
            est as u32 + 1
        } else {
            est as u32
        }
    }
}

impl From<u64> for U128 {
    fn from(n: u64) -> U128 {
        U128::from_u64(n)
    }
}

impl PartialOrd for U128 {
    fn partial_cmp(&self, other: &U128) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U128 {
    fn cmp(&self, other: &U128) -> Ordering {
        (self.hi, self.lo).cmp(&(other.hi, other.lo))
    }
}

/// Returns the number of decimal digits in `n`; zero has none.
pub(crate) fn num_decimal_digits_u64(n: u64) -> u32 {
    U128::from_u64(n).num_decimal_digits()
}

const SQRT_CHUNK: usize = 32;

const SQRT_CHUNK_INIT: OnceLock<[u16; SQRT_CHUNK]> = OnceLock::new();

// floor(sqrt(i << 16)) for every 16-bit i, filled on first touch.
static SQRT_TABLE: [OnceLock<[u16; SQRT_CHUNK]>; 65536 / SQRT_CHUNK] =
    [SQRT_CHUNK_INIT; 65536 / SQRT_CHUNK];

fn sqrt_u16(i: u16) -> u64 {
    let i = usize::from(i);
    let chunk = SQRT_TABLE[i / SQRT_CHUNK].get_or_init(|| {
        let base = i / SQRT_CHUNK * SQRT_CHUNK;
        let mut roots = [0u16; SQRT_CHUNK];
        for (j, root) in roots.iter_mut().enumerate() {
            *root = isqrt_exhaustive(((base + j) as u64) << 16) as u16;
        }
        roots
    });
    u64::from(chunk[i % SQRT_CHUNK])
}

// Bitwise integer square root; used to populate the lookup table.
fn isqrt_exhaustive(n: u64) -> u64 {
    let mut root = 0u64;
    let mut bit = 1u64 << 31;
    while bit != 0 {
        let candidate = root | bit;
        if candidate * candidate <= n {
            root = candidate;
        }
        bit >>= 1;
    }
    root
}

/// Returns `floor(sqrt(n))`.
pub(crate) fn sqrt_u64(n: u64) -> u64 {
    if n < 1 << 16 {
        return sqrt_u16(n as u16) >> 8;
    }
    if n >= u64::from(u32::MAX) * u64::from(u32::MAX) {
        return u64::from(u32::MAX);
    }
    let half_shift = n.leading_zeros() / 2;
    let n = n << (2 * half_shift);
    let mut x = sqrt_u16((n >> 48) as u16) << 16;
    x = (x + n / x) >> 1;
    let root = (x + n / x) >> (1 + half_shift);
    // Two steps can land one above the root just below a perfect square.
    if u128::from(root) * u128::from(root) > u128::from(n >> (2 * half_shift)) {
        root - 1
    } else {
        root
    }
}

/// Returns `floor(sqrt(n))`, seeding a Newton iteration from [`sqrt_u64`].
pub(crate) fn isqrt(n: U128) -> U128 {
    if n.fits_u64() {
        return U128::from_u64(sqrt_u64(n.lo));
    }
    let n = n.to_native();
    // (floor(sqrt(hi)) + 1) << 32 is never below the root.
    let mut x = u128::from(sqrt_u64((n >> 64) as u64) + 1) << 32;
    loop {
        let y = (x + n / x) >> 1;
        if y >= x {
            return U128::from_native(x);
        }
        x = y;
    }
}
