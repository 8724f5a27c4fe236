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

use std::error::Error;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dec64::{d64, Context, Decimal64, Rounding};

fn cx(rounding: Rounding) -> Context {
    Context::new(rounding)
}

#[test]
fn test_integer_arithmetic() -> Result<(), Box<dyn Error>> {
    for i in -100i64..=100 {
        for j in -100i64..=100 {
            let (a, b) = (Decimal64::from(i), Decimal64::from(j));
            assert_eq!((a + b).to_i64_exact(), (i + j, true), "{} + {}", i, j);
            assert_eq!((a - b).to_i64_exact(), (i - j, true), "{} - {}", i, j);
            assert_eq!((a * b).to_i64_exact(), (i * j, true), "{} * {}", i, j);
            if j != 0 {
                let k = Decimal64::from(i * j);
                assert_eq!((k / b).to_i64_exact(), (i, true), "{} / {}", i * j, j);
            }
        }
    }
    Ok(())
}

#[test]
fn test_add_scenarios() -> Result<(), Box<dyn Error>> {
    // Subnormal addition.
    let d = d64!(1E-383) + d64!(-1E-398);
    assert_eq!(d.to_string(), "9.99999999999999e-384");
    assert!(d.is_subnormal());

    // Overflow saturates.
    let d = Decimal64::MAX + d64!(0.000000000000001e384);
    assert_eq!(d.to_bits(), Decimal64::INFINITY.to_bits());
    let d = Decimal64::NEG_MAX - d64!(1e369);
    assert_eq!(d.to_bits(), Decimal64::NEG_INFINITY.to_bits());

    // Ties round to even.
    let d = cx(Rounding::HalfEven).add(d64!(12345678), d64!(0.123456785));
    assert_eq!(d.to_string(), "1.234567812345678e+7");
    assert_eq!(d.to_bits(), d64!(12345678.12345678).to_bits());
    let d = cx(Rounding::HalfUp).add(d64!(12345678), d64!(0.123456785));
    assert_eq!(d.text('f', None), "12345678.12345679");
    let d = cx(Rounding::Down).add(d64!(12345678), d64!(0.123456789));
    assert_eq!(d.text('f', None), "12345678.12345678");

    // Operands far apart: the larger comes back untouched.
    let d = cx(Rounding::HalfUp).add(d64!(1e20), d64!(4e-30));
    assert_eq!(d.to_bits(), d64!(1e20).to_bits());
    let d = cx(Rounding::Down).add(d64!(1e20), d64!(-4e-30));
    assert_eq!(d.to_bits(), d64!(1e20).to_bits());
    let d = cx(Rounding::Down).add(d64!(-4e-30), d64!(1e20));
    assert_eq!(d.to_bits(), d64!(1e20).to_bits());
    // Seventeen digits apart still rounds.
    let d = cx(Rounding::Down).add(d64!(1e20), d64!(-4e3));
    assert_eq!(d.to_string(), "9.999999999999999e+19");

    assert_eq!((d64!(0.1) + d64!(0.2)).to_string(), "0.3");
    assert_eq!((d64!(1.5) + d64!(-1.5)).to_bits(), Decimal64::ZERO.to_bits());
    assert_eq!((d64!(-0) + d64!(-0)).to_bits(), Decimal64::NEG_ZERO.to_bits());
    assert_eq!((d64!(-0) + d64!(0)).to_bits(), Decimal64::ZERO.to_bits());
    assert_eq!((d64!(0) + d64!(-0)).to_bits(), Decimal64::ZERO.to_bits());

    // Adding zeros keeps the right operand's exponent.
    let zero_e5 = Decimal64::from_bits((398 + 5) << 53);
    let neg_zero_em3 = Decimal64::from_bits(1 << 63 | (398 - 3) << 53);
    assert_eq!((neg_zero_em3 + zero_e5).to_bits(), zero_e5.to_bits());
    assert_eq!((zero_e5 + neg_zero_em3).to_bits(), (398 - 3) << 53);
    assert_eq!((neg_zero_em3 + neg_zero_em3).to_bits(), neg_zero_em3.to_bits());
    assert!((Decimal64::INFINITY + Decimal64::NEG_INFINITY).is_nan());
    assert_eq!((Decimal64::INFINITY + d64!(-5)).to_bits(), Decimal64::INFINITY.to_bits());
    Ok(())
}

#[test]
fn test_additive_inverse() -> Result<(), Box<dyn Error>> {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let d = Decimal64::from(rng.gen_range(i64::MIN / 2, i64::MAX / 2))
            .scale_b_int(rng.gen_range(-400, 360));
        let sum = d + -d;
        assert!(sum.is_zero(), "{}", d);
        assert!(!sum.is_signed(), "{}", d);
        assert_eq!((-(-d)).to_bits(), d.to_bits());
        assert!(!d.abs().is_signed());
    }
    Ok(())
}

#[test]
fn test_mul_div() -> Result<(), Box<dyn Error>> {
    let three = Decimal64::from(3);
    let ten = Decimal64::from(10);
    assert_eq!(three * (Decimal64::ONE / ten) * ten, three);

    assert_eq!((Decimal64::ONE / three).to_string(), "0.3333333333333333");
    assert_eq!(cx(Rounding::HalfUp).div(d64!(2), three).to_string(), "0.6666666666666667");
    assert_eq!(cx(Rounding::Down).div(d64!(2), three).to_string(), "0.6666666666666666");
    assert_eq!((d64!(1) / d64!(8)).to_string(), "0.125");
    assert_eq!((d64!(1e300) * d64!(1e300)).to_bits(), Decimal64::INFINITY.to_bits());
    assert!((d64!(1e-300) * d64!(1e-300)).is_zero());
    assert_eq!((d64!(-2) * d64!(0)).to_bits(), Decimal64::NEG_ZERO.to_bits());
    assert!((Decimal64::INFINITY * Decimal64::ZERO).is_nan());

    assert_eq!((d64!(5) / Decimal64::ZERO).to_bits(), Decimal64::INFINITY.to_bits());
    assert_eq!((d64!(-5) / Decimal64::ZERO).to_bits(), Decimal64::NEG_INFINITY.to_bits());
    assert!((Decimal64::ZERO / Decimal64::ZERO).is_quiet_nan());
    assert!((Decimal64::INFINITY / Decimal64::INFINITY).is_nan());
    assert!((d64!(5) / Decimal64::NEG_INFINITY).is_zero());
    Ok(())
}

#[test]
fn test_nan_propagation() -> Result<(), Box<dyn Error>> {
    let qnan = d64!(-NaN12);
    let snan = d64!(sNaN34);
    let d = qnan + snan;
    assert!(d.is_quiet_nan());
    assert_eq!(d.to_string(), "NaN34");
    let d = d64!(1) * qnan;
    assert_eq!(d.to_string(), "-NaN12");
    assert!(Decimal64::fma(d64!(1), d64!(2), snan).is_quiet_nan());
    assert!(snan.sqrt().is_quiet_nan());
    assert_eq!(qnan.compare(qnan), -2);
    assert_eq!(Decimal64::NAN.compare(Decimal64::ONE), -2);
    assert!(qnan != qnan);
    assert!(qnan.partial_cmp(&d64!(1)).is_none());

    let quieted = d64!(-sNaN5).quiet();
    assert!(quieted.is_quiet_nan());
    assert!(quieted.is_signed());
    assert_eq!(quieted.to_string(), "-NaN5");
    assert_eq!(qnan.quiet().to_bits(), qnan.to_bits());
    assert_eq!(d64!(1.5).quiet().to_bits(), d64!(1.5).to_bits());
    Ok(())
}

#[test]
fn test_fma() -> Result<(), Box<dyn Error>> {
    assert_eq!(d64!(2).fma(d64!(3), d64!(4)), d64!(10));
    assert_eq!(d64!(2).fma(d64!(-3), d64!(6)).to_bits(), Decimal64::ZERO.to_bits());

    // A single rounding keeps digits that separate rounding would lose.
    let a = d64!(1.000000000000001);
    let fused = a.fma(a, Decimal64::NEG_ONE);
    assert_eq!(fused.to_string(), "2.000000000000001e-15");
    assert!(a * a - Decimal64::ONE != fused);

    assert!(Decimal64::INFINITY.fma(Decimal64::ZERO, d64!(1)).is_nan());
    assert!(Decimal64::INFINITY.fma(d64!(1), Decimal64::NEG_INFINITY).is_nan());
    assert_eq!(
        d64!(1).fma(d64!(2), Decimal64::NEG_INFINITY).to_bits(),
        Decimal64::NEG_INFINITY.to_bits()
    );
    assert_eq!(d64!(0).fma(d64!(5), d64!(7)), d64!(7));

    // An addend far below the product is ignored, and vice versa.
    let d = cx(Rounding::Down).fma(d64!(1e-30), d64!(-4), d64!(1e20));
    assert_eq!(d.to_bits(), d64!(1e20).to_bits());
    let d = cx(Rounding::Down).fma(d64!(1e10), d64!(1e10), d64!(-4e-30));
    assert_eq!(d.to_string(), "1e+20");
    assert_eq!(d64!(1e-30).fma(d64!(3), Decimal64::ZERO).to_string(), "3e-30");
    assert_eq!(d64!(-0).fma(d64!(5), d64!(-0)).to_bits(), Decimal64::NEG_ZERO.to_bits());
    Ok(())
}

#[test]
fn test_sqrt() -> Result<(), Box<dyn Error>> {
    for i in 0..=10_000i64 {
        let d = Decimal64::from(i * i).sqrt();
        assert_eq!(d.to_i64_exact(), (i, true), "sqrt({})", i * i);
    }
    assert_eq!(d64!(2).sqrt().to_string(), "1.414213562373095");
    assert_eq!(d64!(0.0001).sqrt().to_string(), "0.01");
    assert_eq!(d64!(1e-397).sqrt().to_string(), "3.162277660168379e-199");
    assert!(d64!(-1).sqrt().is_nan());
    assert_eq!(d64!(-0).sqrt().to_bits(), Decimal64::NEG_ZERO.to_bits());
    assert_eq!(Decimal64::INFINITY.sqrt().to_bits(), Decimal64::INFINITY.to_bits());
    assert!(Decimal64::NEG_INFINITY.sqrt().is_nan());
    Ok(())
}

#[test]
fn test_round() -> Result<(), Box<dyn Error>> {
    let d = d64!(2.345);
    let e = d64!(0.01);
    assert_eq!(cx(Rounding::HalfUp).round(d, e).to_string(), "2.35");
    assert_eq!(cx(Rounding::HalfEven).round(d, e).to_string(), "2.34");
    assert_eq!(cx(Rounding::Down).round(d, e).to_string(), "2.34");
    assert_eq!(cx(Rounding::HalfUp).round(d64!(-9.96), d64!(0.1)).to_string(), "-10");
    assert_eq!(d64!(1234.5).round(d64!(1000)).to_string(), "1000");
    assert!(d64!(-0.004).round(d64!(10)).is_zero());
    assert!(d64!(-0.004).round(d64!(10)).is_signed());
    assert_eq!(d64!(1.5).round(d64!(0.001)), d64!(1.5));
    // A value already at the requested position keeps its encoding.
    let d = Decimal64::from_bits((398 - 3) << 53 | 2345);
    assert_eq!((d.exponent(), d.coefficient()), (-3, 2345));
    assert_eq!(cx(Rounding::HalfUp).round(d, d64!(0.001)).to_bits(), d.to_bits());
    assert_eq!(cx(Rounding::HalfUp).round(d, d64!(0.0001)).to_bits(), d.to_bits());
    assert_eq!(cx(Rounding::HalfUp).round(d, d64!(0.01)).to_string(), "2.35");
    assert!(d64!(1.5).round(Decimal64::INFINITY).is_nan());

    assert_eq!(cx(Rounding::HalfUp).to_integral(d64!(2.5)).to_string(), "3");
    assert_eq!(cx(Rounding::HalfEven).to_integral(d64!(2.5)).to_string(), "2");
    assert_eq!(cx(Rounding::Down).to_integral(d64!(-2.9)).to_string(), "-2");
    assert_eq!(d64!(1e20).to_integral().to_bits(), d64!(1e20).to_bits());
    assert_eq!(Decimal64::NAN.to_integral().to_string(), "NaN");
    Ok(())
}

#[test]
fn test_parse_rounding() -> Result<(), Box<dyn Error>> {
    // Seventeen digits: the last is a tie against an odd sixteenth digit.
    let s = "1.4999999999999995";
    assert_eq!(cx(Rounding::HalfUp).parse(s)?.to_string(), "1.5");
    assert_eq!(cx(Rounding::HalfEven).parse(s)?.to_string(), "1.5");
    assert_eq!(cx(Rounding::Down).parse(s)?.to_string(), "1.499999999999999");
    let s = "1.4999999999999985";
    assert_eq!(cx(Rounding::HalfUp).parse(s)?.to_string(), "1.499999999999999");
    assert_eq!(cx(Rounding::HalfEven).parse(s)?.to_string(), "1.499999999999998");
    Ok(())
}

#[test]
fn test_scale_b() -> Result<(), Box<dyn Error>> {
    let d = d64!(1.23);
    for n in -380..=380 {
        let expected: Decimal64 = format!("1.23e{}", n).parse()?;
        assert_eq!(d.scale_b_int(n).compare(expected), 0, "{}", n);
        assert_eq!(d.scale_b(Decimal64::from(n)), expected);
    }
    assert_eq!(d.scale_b_int(400).to_bits(), Decimal64::INFINITY.to_bits());
    assert!(d.scale_b_int(-420).is_zero());
    assert_eq!(d.scale_b_int(-398).to_string(), "1e-398");
    assert!(d.scale_b_int(-399).is_zero());
    assert!(d.scale_b(d64!(1.5)).is_nan());
    assert!(d.scale_b(Decimal64::INFINITY).is_nan());
    assert_eq!(Decimal64::INFINITY.scale_b(d64!(3)).to_bits(), Decimal64::INFINITY.to_bits());
    assert_eq!(d.scale_b(d64!(1e10)).to_bits(), Decimal64::INFINITY.to_bits());
    Ok(())
}

#[test]
fn test_compare() -> Result<(), Box<dyn Error>> {
    assert_eq!(Decimal64::ZERO.compare(Decimal64::NEG_ZERO), 0);
    assert_ne!(Decimal64::ZERO.to_bits(), Decimal64::NEG_ZERO.to_bits());
    assert_eq!(Decimal64::ZERO, Decimal64::NEG_ZERO);
    assert_eq!(d64!(1.20).compare(d64!(1.2)), 0);
    assert_eq!(d64!(-1).compare(d64!(1)), -1);
    assert_eq!(Decimal64::INFINITY.compare(Decimal64::MAX), 1);
    assert_eq!(Decimal64::NEG_INFINITY.compare(Decimal64::NEG_INFINITY), 0);
    assert_eq!(Decimal64::NEG_MAX.compare(Decimal64::MAX), -1);
    assert_eq!(d64!(5).compare_dec(d64!(3)).to_bits(), Decimal64::ONE.to_bits());
    assert_eq!(d64!(3).compare_dec(d64!(5)).to_bits(), Decimal64::NEG_ONE.to_bits());
    assert_eq!(d64!(3).compare_dec(d64!(3.0)).to_bits(), Decimal64::ZERO.to_bits());
    assert!(d64!(3).compare_dec(Decimal64::NAN).is_nan());
    assert!(d64!(1) < d64!(2));
    assert!(d64!(-1e-398) < Decimal64::ZERO);
    Ok(())
}

#[test]
fn test_min_max() -> Result<(), Box<dyn Error>> {
    assert_eq!(d64!(1).min(d64!(2)).to_string(), "1");
    assert_eq!(d64!(1).max(d64!(2)).to_string(), "2");
    assert_eq!(d64!(-0).max(d64!(0)).to_bits(), Decimal64::ZERO.to_bits());
    assert_eq!(d64!(0).min(d64!(-0)).to_bits(), Decimal64::NEG_ZERO.to_bits());
    assert_eq!(d64!(-3).max_mag(d64!(2)).to_string(), "-3");
    assert_eq!(d64!(-3).min_mag(d64!(2)).to_string(), "2");
    assert_eq!(d64!(-2).max_mag(d64!(2)).to_string(), "2");
    assert_eq!(Decimal64::NAN.max(d64!(4)).to_string(), "4");
    assert_eq!(d64!(4).min(Decimal64::NAN).to_string(), "4");
    assert!(d64!(sNaN).max(d64!(4)).is_quiet_nan());
    assert!(d64!(4).min(d64!(sNaN)).is_quiet_nan());
    assert!(Decimal64::NAN.min(Decimal64::NAN).is_nan());
    Ok(())
}

#[test]
fn test_next() -> Result<(), Box<dyn Error>> {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..1000 {
        let d = Decimal64::from(rng.gen_range(-1_000_000_000, 1_000_000_000))
            .scale_b_int(rng.gen_range(-400, 370));
        assert!(d.next_plus() > d, "{}", d);
        assert!(d.next_minus() < d, "{}", d);
        assert_eq!(d.next_plus().compare(d), 1);
        assert_eq!(d.next_plus().next_minus(), d);
    }

    assert_eq!(Decimal64::ZERO.next_plus().to_bits(), Decimal64::MIN.to_bits());
    assert_eq!(Decimal64::ZERO.next_minus().to_bits(), Decimal64::NEG_MIN.to_bits());
    assert_eq!(Decimal64::MAX.next_plus().to_bits(), Decimal64::INFINITY.to_bits());
    assert_eq!(Decimal64::INFINITY.next_minus().to_bits(), Decimal64::MAX.to_bits());
    assert_eq!(Decimal64::NEG_INFINITY.next_plus().to_bits(), Decimal64::NEG_MAX.to_bits());
    assert_eq!(d64!(1).next_plus().to_string(), "1.000000000000001");
    assert_eq!(d64!(1).next_minus().to_string(), "0.9999999999999999");
    assert_eq!(d64!(9.999999999999999).next_plus().to_string(), "10");
    assert!(Decimal64::NEG_MIN.next_plus().is_zero());
    Ok(())
}

#[test]
fn test_logb() -> Result<(), Box<dyn Error>> {
    assert_eq!(d64!(1234.5).logb().to_string(), "3");
    assert_eq!(d64!(0.001).logb().to_string(), "-3");
    assert_eq!(Decimal64::MIN.logb().to_string(), "-398");
    assert_eq!(d64!(-0).logb().to_bits(), Decimal64::NEG_INFINITY.to_bits());
    assert_eq!(Decimal64::NEG_INFINITY.logb().to_bits(), Decimal64::INFINITY.to_bits());
    assert!(Decimal64::NAN.logb().is_nan());
    Ok(())
}
