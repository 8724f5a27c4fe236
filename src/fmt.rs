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

//! Writing decimals as text.
//!
//! Three verbs are supported, after the conventions of `printf`:
//!
//!  * `e`/`E`: scientific notation with the shortest mantissa, e.g.
//!    `1.25e-7`. Precision is ignored.
//!  * `f`/`F`: fixed-point notation. Without a precision the shortest
//!    fraction is written; with one, the number is first rounded to that many
//!    places using the context's rounding algorithm.
//!  * `g`/`G`: whichever of `e` and `f` suits the exponent.
//!
//! Any other verb produces `%` followed by the verb.

use std::fmt::{self, Write};

use crate::context::{Context, DEFAULT_FORMAT_CONTEXT};
use crate::decimal64::{Decimal64, Flavor, DECIMAL_BASE};
use crate::uint128::TEN_TO_THE;

/// Normalizes a nonzero significand to sixteen digits, ignoring the
/// exponent's lower bound.
fn unsubnormal(exp: i16, sig: u64) -> (i32, u64) {
    let (mut exp, mut sig) = (i32::from(exp), sig);
    if sig != 0 {
        while sig < DECIMAL_BASE {
            sig *= 10;
            exp -= 1;
        }
    }
    (exp, sig)
}

fn push_zeros(buf: &mut String, n: usize) {
    buf.extend(std::iter::repeat('0').take(n));
}

fn push_dot_zeros(buf: &mut String, prec: Option<usize>) {
    if let Some(n) = prec.filter(|n| *n > 0) {
        buf.push('.');
        push_zeros(buf, n);
    }
}

/// Writes the low `width` digits of `n` as exactly `prec` fractional digits,
/// truncating or padding with zeros.
fn push_frac(buf: &mut String, mut n: u64, mut width: usize, prec: usize) {
    if width > prec {
        n /= TEN_TO_THE[width - prec];
        width = prec;
    }
    if width > 0 {
        // Writing to a `String` cannot fail.
        let _ = write!(buf, "{:01$}", n % TEN_TO_THE[width], width);
    }
    push_zeros(buf, prec - width);
}

impl Context {
    /// Appends the text of `d` to `buf` using `verb` and the optional
    /// precision `prec`. See the [module documentation](self) for the verbs.
    ///
    /// When `prec` is given and at most 16, the `f` verb rounds with this
    /// context's rounding algorithm.
    pub fn append(&self, d: Decimal64, buf: &mut String, verb: char, prec: Option<usize>) {
        let (fl, sign, exp, sig) = d.unpack();
        if sign {
            buf.push('-');
        }
        match fl {
            Flavor::QNaN | Flavor::SNaN => {
                buf.push_str("NaN");
                if sig != 0 {
                    let _ = write!(buf, "{}", sig);
                }
                return;
            }
            Flavor::Inf => {
                buf.push_str("inf");
                return;
            }
            Flavor::Normal53 | Flavor::Normal51 => (),
        }

        let verb = match verb {
            'g' | 'G' => {
                let exp = i32::from(exp);
                let scientific = exp < -19
                    || match prec {
                        Some(prec) => i64::from(exp) > prec as i64,
                        None => exp > -10,
                    };
                match (verb, scientific) {
                    ('g', true) => 'e',
                    ('G', true) => 'E',
                    ('g', false) => 'f',
                    _ => 'F',
                }
            }
            verb => verb,
        };

        match verb {
            'e' | 'E' => append_scientific(buf, exp, sig, verb),
            'f' | 'F' => self.append_fixed(d, buf, prec),
            verb => {
                buf.push('%');
                buf.push(verb);
            }
        }
    }

    fn append_fixed(&self, d: Decimal64, buf: &mut String, prec: Option<usize>) {
        let (_, _, mut exp, mut sig) = d.unpack();
        if let Some(prec) = prec.filter(|prec| *prec <= 16) {
            let (_, _, rounded_exp, rounded_sig) = self.round_to_exp(d, -(prec as i32)).unpack();
            exp = rounded_exp;
            sig = rounded_sig;
        }
        if sig == 0 {
            buf.push('0');
            push_dot_zeros(buf, prec);
            return;
        }

        let (exp, sig) = unsubnormal(exp, sig);
        if exp >= 0 {
            let _ = write!(buf, "{}", sig);
            push_zeros(buf, exp as usize);
            push_dot_zeros(buf, prec);
            return;
        }

        let frac_digits = (-exp).min(16) as usize;
        let unit = TEN_TO_THE[frac_digits];
        let _ = write!(buf, "{}", sig / unit);
        if sig % unit == 0 {
            push_dot_zeros(buf, prec);
            return;
        }
        buf.push('.');

        // Zeros between the point and the first significant digit.
        let prefix = (-exp - 16).max(0) as usize;
        match prec {
            None => {
                push_zeros(buf, prefix);
                push_frac(buf, sig, frac_digits, 16);
                let trimmed = buf.trim_end_matches('0').len();
                buf.truncate(trimmed);
            }
            Some(prec) => {
                push_zeros(buf, prec.min(prefix));
                if prec > prefix {
                    push_frac(buf, sig, frac_digits, prec - prefix);
                }
            }
        }
    }

    /// Returns the text of `d` as produced by [`Context::append`].
    pub fn text(&self, d: Decimal64, verb: char, prec: Option<usize>) -> String {
        let mut buf = String::with_capacity(32);
        self.append(d, &mut buf, verb, prec);
        buf
    }

    /// Pairs `d` with this context, so that formatting it uses this context's
    /// rounding algorithm.
    ///
    /// ```
    /// use dec64::{Context, Decimal64, Rounding};
    /// let d: Decimal64 = "2.5".parse().unwrap();
    /// let cx = Context::new(Rounding::HalfUp);
    /// assert_eq!(format!("{:.0}", cx.with(d)), "3");
    /// assert_eq!(format!("{:.0}", d), "2");
    /// ```
    pub fn with(&self, d: Decimal64) -> Contextual {
        Contextual { cx: *self, d }
    }

    /// Writes `d` to a formatter, honoring its width, fill, alignment and
    /// sign flags. A precision selects fixed-point notation for `g`.
    fn format(&self, d: Decimal64, f: &mut fmt::Formatter, verb: char) -> fmt::Result {
        let (verb, prec) = match (verb, f.precision()) {
            ('g', Some(prec)) => ('f', Some(prec)),
            (verb, prec) => (verb, prec),
        };
        let text = self.text(d.copy_sign(Decimal64::ZERO), verb, prec);
        f.pad_integral(!d.is_signed(), "", &text)
    }
}

fn append_scientific(buf: &mut String, exp: i16, sig: u64, marker: char) {
    let (exp, sig) = unsubnormal(exp, sig);
    let _ = write!(buf, "{}", sig / DECIMAL_BASE);
    let frac = sig % DECIMAL_BASE;
    if frac > 0 {
        let digits = format!("{:015}", frac);
        buf.push('.');
        buf.push_str(digits.trim_end_matches('0'));
    }
    if sig == 0 {
        return;
    }
    let exp = exp + 15;
    if exp != 0 {
        buf.push(marker);
        buf.push(if exp < 0 { '-' } else { '+' });
        let _ = write!(buf, "{}", exp.unsigned_abs());
    }
}

impl Decimal64 {
    /// Appends the text of the number to `buf` using
    /// [`DEFAULT_FORMAT_CONTEXT`]. See [`Context::append`].
    pub fn append(&self, buf: &mut String, verb: char, prec: Option<usize>) {
        DEFAULT_FORMAT_CONTEXT.append(*self, buf, verb, prec)
    }

    /// Returns the text of the number using [`DEFAULT_FORMAT_CONTEXT`].
    ///
    /// ```
    /// use dec64::Decimal64;
    /// assert_eq!(Decimal64::PI.text('e', None), "3.141592653589793");
    /// assert_eq!(Decimal64::PI.text('f', Some(4)), "3.1416");
    /// ```
    pub fn text(&self, verb: char, prec: Option<usize>) -> String {
        DEFAULT_FORMAT_CONTEXT.text(*self, verb, prec)
    }

    /// Returns a string of the number in standard notation, i.e. guaranteed to
    /// not be scientific notation.
    pub fn to_standard_notation_string(&self) -> String {
        self.text('f', None)
    }
}

impl fmt::Debug for Decimal64 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Formats the number using [`DEFAULT_FORMAT_CONTEXT`].
///
/// Without a precision the shortest form is chosen between fixed-point and
/// scientific notation. With a precision, e.g. `{:.2}`, the number is
/// written in fixed-point notation rounded to that many places.
impl fmt::Display for Decimal64 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        DEFAULT_FORMAT_CONTEXT.format(*self, f, 'g')
    }
}

impl fmt::LowerExp for Decimal64 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        DEFAULT_FORMAT_CONTEXT.format(*self, f, 'e')
    }
}

impl fmt::UpperExp for Decimal64 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        DEFAULT_FORMAT_CONTEXT.format(*self, f, 'E')
    }
}

/// A [`Decimal64`] bound to the [`Context`] used to format it.
///
/// Constructed by [`Context::with`].
#[derive(Debug, Clone, Copy)]
pub struct Contextual {
    cx: Context,
    d: Decimal64,
}

impl Contextual {
    /// Returns the text of the number using the bound context. See
    /// [`Context::append`].
    pub fn text(&self, verb: char, prec: Option<usize>) -> String {
        self.cx.text(self.d, verb, prec)
    }
}

impl fmt::Display for Contextual {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.cx.format(self.d, f, 'g')
    }
}

impl fmt::LowerExp for Contextual {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.cx.format(self.d, f, 'e')
    }
}
