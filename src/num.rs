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

//! Implementations of the `num-traits` numeric traits.

use std::convert::TryFrom;

use num_traits::{Bounded, FromPrimitive, One, ToPrimitive, Zero};

use crate::decimal64::Decimal64;

impl Zero for Decimal64 {
    fn zero() -> Decimal64 {
        Decimal64::ZERO
    }

    fn is_zero(&self) -> bool {
        Decimal64::is_zero(self)
    }
}

impl One for Decimal64 {
    fn one() -> Decimal64 {
        Decimal64::ONE
    }
}

impl Bounded for Decimal64 {
    fn min_value() -> Decimal64 {
        Decimal64::NEG_MAX
    }

    fn max_value() -> Decimal64 {
        Decimal64::MAX
    }
}

impl FromPrimitive for Decimal64 {
    fn from_i64(n: i64) -> Option<Decimal64> {
        Some(Decimal64::from(n))
    }

    fn from_u64(n: u64) -> Option<Decimal64> {
        Some(Decimal64::from(n))
    }

    fn from_f64(n: f64) -> Option<Decimal64> {
        Some(Decimal64::from_f64(n))
    }
}

/// Integer conversions succeed only for integral values in range. Float
/// conversions fail only for signaling NaNs.
impl ToPrimitive for Decimal64 {
    fn to_i64(&self) -> Option<i64> {
        i64::try_from(*self).ok()
    }

    fn to_u64(&self) -> Option<u64> {
        u64::try_from(*self).ok()
    }

    fn to_f64(&self) -> Option<f64> {
        if self.is_signaling_nan() {
            None
        } else {
            Some(Decimal64::to_f64(self))
        }
    }
}
