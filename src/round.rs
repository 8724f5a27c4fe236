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

//! The rounding engine.
//!
//! Every inexact operation reduces the digits it could not keep to a
//! [`DiscardedDigit`] and hands it, together with the retained significand,
//! to [`Rounding::round`]. Rounding to a decimal position goes through the
//! same decision.

use crate::context::Rounding;
use crate::uint128::{num_decimal_digits_u64, U128, TEN_TO_THE, TEN_TO_THE_128};

/// How the digits dropped from a significand compare to half a unit in the
/// last retained place.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum DiscardedDigit {
    /// Nothing but zeros was dropped.
    Eq0,
    /// Less than half a unit was dropped.
    Lt5,
    /// Exactly half a unit was dropped.
    Eq5,
    /// More than half a unit was dropped.
    Gt5,
}

impl DiscardedDigit {
    /// Classifies `rem`, the remainder of a division by `10^k`. `below`
    /// describes any digits that were dropped earlier, beneath `rem`.
    pub(crate) fn from_remainder(rem: U128, k: u32, below: DiscardedDigit) -> DiscardedDigit {
        if k == 0 {
            return below;
        }
        let sticky = below != DiscardedDigit::Eq0;
        // Past 10^38 the midpoint exceeds every 128-bit remainder.
        if k > 38 {
            return if rem.is_zero() && !sticky {
                DiscardedDigit::Eq0
            } else {
                DiscardedDigit::Lt5
            };
        }
        let half = TEN_TO_THE_128[k as usize - 1].mul64(5);
        let status = if rem.is_zero() {
            DiscardedDigit::Eq0
        } else if rem.lt(half) {
            DiscardedDigit::Lt5
        } else if rem == half {
            DiscardedDigit::Eq5
        } else {
            DiscardedDigit::Gt5
        };
        status.with_sticky(sticky)
    }

    /// Classifies a single dropped decimal digit; `rest_zero` reports whether
    /// everything after it is zero.
    pub(crate) fn from_digit(digit: u8, rest_zero: bool) -> DiscardedDigit {
        match digit {
            0 if rest_zero => DiscardedDigit::Eq0,
            0..=4 => DiscardedDigit::Lt5,
            5 if rest_zero => DiscardedDigit::Eq5,
            _ => DiscardedDigit::Gt5,
        }
    }

    /// Folds in whether any nonzero digit lies beneath the ones this status
    /// describes.
    pub(crate) fn with_sticky(self, sticky: bool) -> DiscardedDigit {
        match self {
            DiscardedDigit::Eq0 if sticky => DiscardedDigit::Lt5,
            DiscardedDigit::Eq5 if sticky => DiscardedDigit::Gt5,
            status => status,
        }
    }
}

impl Rounding {
    fn rounds_up(self, retained: u64, status: DiscardedDigit) -> bool {
        match self {
            Rounding::HalfUp => matches!(status, DiscardedDigit::Eq5 | DiscardedDigit::Gt5),
            Rounding::HalfEven => {
                status == DiscardedDigit::Gt5 || status == DiscardedDigit::Eq5 && retained % 2 == 1
            }
            Rounding::Down => false,
        }
    }

    /// Rounds the retained significand `sig` given what was dropped from it.
    pub(crate) fn round(self, sig: u64, status: DiscardedDigit) -> u64 {
        if self.rounds_up(sig, status) {
            sig + 1
        } else {
            sig
        }
    }

    /// Rounds `sig` to a multiple of `10^k`, for `1 <= k <= 19`. Also reports
    /// whether the result has more digits than `sig` had.
    pub(crate) fn round_to_pow10(self, sig: u64, k: u32) -> (u64, bool) {
        let unit = TEN_TO_THE[k as usize];
        let (quo, rem) = (sig / unit, sig % unit);
        if rem == 0 {
            return (sig, false);
        }
        let status = DiscardedDigit::from_remainder(U128::from_u64(rem), k, DiscardedDigit::Eq0);
        let rounded = quo * unit;
        if self.rounds_up(quo, status) {
            let rounded = rounded + unit;
            (
                rounded,
                num_decimal_digits_u64(rounded) > num_decimal_digits_u64(sig),
            )
        } else {
            (rounded, false)
        }
    }
}
