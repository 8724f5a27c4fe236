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

use serde_test::{assert_tokens, Configure, Token};

use dec64::{d64, Decimal64, OrderedDecimal};

#[test]
fn test_serde_tokens() {
    let d = d64!(-12.34);
    assert_tokens(&d.readable(), &[Token::Str("-12.34")]);
    assert_tokens(&d.compact(), &[Token::U64(d.to_bits())]);

    let d = d64!(1.5e300);
    assert_tokens(&d.readable(), &[Token::Str("1.5e+300")]);
    assert_tokens(&Decimal64::INFINITY.readable(), &[Token::Str("inf")]);
    assert_tokens(
        &OrderedDecimal(d64!(7)).readable(),
        &[Token::NewtypeStruct { name: "OrderedDecimal" }, Token::Str("7")],
    );
    assert_tokens(
        &OrderedDecimal(d64!(7)).compact(),
        &[
            Token::NewtypeStruct { name: "OrderedDecimal" },
            Token::U64(d64!(7).to_bits()),
        ],
    );
}

#[test]
fn test_serde_json() {
    let d = d64!(123.432);
    assert_eq!(serde_json::to_string(&d).unwrap(), r#""123.432""#);
    assert_eq!(
        serde_json::to_string(&vec![Decimal64::NAN, Decimal64::NEG_ZERO]).unwrap(),
        r#"["NaN","-0"]"#
    );

    for (json, expected) in vec![
        (r#""123.432""#, d64!(123.432)),
        (r#""1.5""#, d64!(1.5)),
        (r#""-inf""#, Decimal64::NEG_INFINITY),
        ("23456", d64!(23456)),
        ("-5", d64!(-5)),
        ("0.5", d64!(0.5)),
        ("18446744073709551615", Decimal64::from(u64::MAX)),
    ] {
        let d: Decimal64 = serde_json::from_str(json).unwrap();
        assert_eq!(d, expected, "{}", json);
    }

    let d: Decimal64 = serde_json::from_str(r#""sNaN12""#).unwrap();
    assert!(d.is_signaling_nan());

    let err = serde_json::from_str::<Decimal64>(r#""abc""#).unwrap_err();
    assert!(
        err.to_string()
            .starts_with(r#"invalid value: string "abc", expected a decimal string or number"#),
        "{}",
        err
    );
    let err = serde_json::from_str::<Decimal64>("true").unwrap_err();
    assert!(
        err.to_string()
            .starts_with("invalid type: boolean `true`, expected a decimal string or number"),
        "{}",
        err
    );
}

#[test]
fn test_serde_ordered() {
    let v = vec![OrderedDecimal(d64!(2)), OrderedDecimal(d64!(-0.5))];
    let json = serde_json::to_string(&v).unwrap();
    assert_eq!(json, r#"["2","-0.5"]"#);
    let back: Vec<OrderedDecimal<Decimal64>> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, v);
}
