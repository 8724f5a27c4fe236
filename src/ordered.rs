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
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use paste::paste;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::decimal64::Decimal64;
use crate::error::ParseDecimalError;

/// A wrapper for a decimal number that provides an implementation of [`Ord`]
/// and [`Hash`].
///
/// Like the [`OrderedFloat`] type provided by the [`ordered_float`] crate, but
/// for decimals.
///
/// NaN is treated as equal to itself and greater than all non-NaN values.
/// All other values are compared numerically, so the members of a cohort
/// (e.g. `1.2` and `1.20`), and positive and negative zero, are equal and
/// hash identically.
///
/// [`OrderedFloat`]: https://docs.rs/ordered-float/2.0.1/ordered_float/struct.OrderedFloat.html
/// [`ordered_float`]: https://crates.io/crates/ordered-float
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderedDecimal<D>(pub D);

impl<D> OrderedDecimal<D> {
    /// Consumes the ordered decimal wrapper, returning the decimal within.
    pub fn into_inner(self) -> D {
        self.0
    }
}

impl<D> fmt::Display for OrderedDecimal<D>
where
    D: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<D> PartialOrd for OrderedDecimal<D>
where
    Self: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D> PartialEq for OrderedDecimal<D>
where
    Self: Ord,
{
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<D> Eq for OrderedDecimal<D> where Self: Ord {}

impl Ord for OrderedDecimal<Decimal64> {
    fn cmp(&self, other: &Self) -> Ordering {
        let (lhs, rhs) = (self.0, other.0);
        match (lhs.is_nan(), rhs.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => lhs.compare(rhs).cmp(&0),
        }
    }
}

impl Hash for OrderedDecimal<Decimal64> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        let d = if self.0.is_nan() {
            Decimal64::NAN
        } else if self.0.is_zero() {
            Decimal64::ZERO
        } else {
            self.0.reduce()
        };
        d.to_bits().hash(state)
    }
}

impl<D> Default for OrderedDecimal<D>
where
    D: Default,
{
    fn default() -> Self {
        OrderedDecimal(D::default())
    }
}

impl<D> FromStr for OrderedDecimal<D>
where
    D: FromStr<Err = ParseDecimalError>,
{
    type Err = ParseDecimalError;

    fn from_str(s: &str) -> Result<OrderedDecimal<D>, ParseDecimalError> {
        Ok(OrderedDecimal(D::from_str(s)?))
    }
}

impl From<i32> for OrderedDecimal<Decimal64> {
    fn from(n: i32) -> OrderedDecimal<Decimal64> {
        OrderedDecimal(Decimal64::from(n))
    }
}

impl From<i64> for OrderedDecimal<Decimal64> {
    fn from(n: i64) -> OrderedDecimal<Decimal64> {
        OrderedDecimal(Decimal64::from(n))
    }
}

impl From<Decimal64> for OrderedDecimal<Decimal64> {
    fn from(d: Decimal64) -> OrderedDecimal<Decimal64> {
        OrderedDecimal(d)
    }
}

macro_rules! impl_ordered_ops {
    ($($trait:ident, $method:ident);* $(;)?) => {
        paste! {
            $(
                impl<D> $trait for OrderedDecimal<D>
                where
                    D: $trait<Output = D>,
                {
                    type Output = Self;

                    fn $method(self, other: OrderedDecimal<D>) -> Self {
                        OrderedDecimal(self.0.$method(other.0))
                    }
                }

                impl<D> $trait<D> for OrderedDecimal<D>
                where
                    D: $trait<Output = D>,
                {
                    type Output = Self;

                    fn $method(self, other: D) -> Self {
                        OrderedDecimal(self.0.$method(other))
                    }
                }

                impl $trait<OrderedDecimal<Decimal64>> for Decimal64 {
                    type Output = Self;

                    fn $method(self, other: OrderedDecimal<Decimal64>) -> Self {
                        self.$method(other.0)
                    }
                }

                impl<D> [<$trait Assign>] for OrderedDecimal<D>
                where
                    D: [<$trait Assign>],
                {
                    fn [<$method _assign>](&mut self, other: Self) {
                        self.0.[<$method _assign>](other.0);
                    }
                }

                impl<D> [<$trait Assign>]<D> for OrderedDecimal<D>
                where
                    D: [<$trait Assign>],
                {
                    fn [<$method _assign>](&mut self, other: D) {
                        self.0.[<$method _assign>](other);
                    }
                }
            )*
        }
    };
}

impl_ordered_ops! {
    Add, add;
    Sub, sub;
    Mul, mul;
    Div, div;
}

impl<D> Neg for OrderedDecimal<D>
where
    D: Neg<Output = D>,
{
    type Output = Self;

    fn neg(self) -> Self {
        OrderedDecimal(-self.0)
    }
}

impl<D> Sum for OrderedDecimal<D>
where
    D: Sum,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = OrderedDecimal<D>>,
    {
        OrderedDecimal(iter.map(|v| v.0).sum())
    }
}

impl<'a, D> Sum<&'a OrderedDecimal<D>> for OrderedDecimal<D>
where
    D: Sum<&'a D> + 'a,
{
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = &'a OrderedDecimal<D>>,
    {
        OrderedDecimal(iter.map(|v| &v.0).sum())
    }
}

impl<D> Product for OrderedDecimal<D>
where
    D: Product,
{
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = OrderedDecimal<D>>,
    {
        OrderedDecimal(iter.map(|v| v.0).product())
    }
}

impl<'a, D> Product<&'a OrderedDecimal<D>> for OrderedDecimal<D>
where
    D: Product<&'a D> + 'a,
{
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = &'a OrderedDecimal<D>>,
    {
        OrderedDecimal(iter.map(|v| &v.0).product())
    }
}
