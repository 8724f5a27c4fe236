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

#[macro_export]
/// A macro to construct a [`Decimal64`] from a literal.
/// Converts the input tokens to a string, and then parses the string into a
/// [`Decimal64`] with [`DEFAULT_SCAN_CONTEXT`].
/// Panics if the provided input is not a valid [`Decimal64`] literal.
///
/// [`Decimal64`]: crate::Decimal64
/// [`DEFAULT_SCAN_CONTEXT`]: crate::DEFAULT_SCAN_CONTEXT
///
/// # Examples:
/// ```
/// use dec64::d64;
///
/// assert!(d64!(NaN).is_nan());
/// assert!(d64!(0).is_zero());
/// assert!(d64!(-0.1).is_negative());
/// assert_eq!(d64!(1.753).to_string(), "1.753");
/// ```
macro_rules! d64 {
    ($l:expr) => {
        $crate::DEFAULT_SCAN_CONTEXT.must_parse(stringify!($l))
    };
}
