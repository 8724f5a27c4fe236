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

//! Reading decimals from text.

use std::io;
use std::str::{self, FromStr};

use crate::context::{Context, DEFAULT_SCAN_CONTEXT};
use crate::decimal64::{Decimal64, PAYLOAD_MASK};
use crate::error::{ParseDecimalError, ParseErrorKind};
use crate::parts::Parts;
use crate::round::DiscardedDigit;
use crate::uint128::U128;

/// Exponents beyond this magnitude saturate to infinity or zero.
const MAX_PARSED_EXP: u64 = 1000;

/// A source of characters for [`Context::scan`].
///
/// A scanner reads one character at a time and can push back the most
/// recently read character. The end of input is reported as `Ok(None)`;
/// any error aborts the scan.
pub trait ScanState {
    /// Reads the next character, or `None` at the end of input.
    fn read_rune(&mut self) -> io::Result<Option<char>>;

    /// Pushes back the character most recently returned by
    /// [`ScanState::read_rune`].
    fn unread_rune(&mut self) -> io::Result<()>;

    /// Skips leading whitespace.
    fn skip_space(&mut self) -> io::Result<()> {
        while let Some(c) = self.read_rune()? {
            if !c.is_whitespace() {
                return self.unread_rune();
            }
        }
        Ok(())
    }

    /// Reads the longest run of characters satisfying `f` and returns it
    /// encoded as UTF-8. Whitespace is skipped first if `skip_space` is set.
    fn token(&mut self, skip_space: bool, f: &mut dyn FnMut(char) -> bool) -> io::Result<Vec<u8>> {
        if skip_space {
            self.skip_space()?;
        }
        let mut token = Vec::new();
        while let Some(c) = self.read_rune()? {
            if !f(c) {
                self.unread_rune()?;
                break;
            }
            let mut buf = [0; 4];
            token.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
        Ok(token)
    }

    /// Reads raw bytes into `buf`, returning how many were read.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Returns the field width the scanner is limited to, if any.
    fn width(&self) -> Option<usize> {
        None
    }
}

/// A [`ScanState`] over a UTF-8 byte slice.
#[derive(Debug, Clone)]
pub struct ByteScanner<'a> {
    src: &'a [u8],
    pos: usize,
    prev: Option<usize>,
}

impl<'a> ByteScanner<'a> {
    /// Constructs a scanner that reads from `src`.
    pub fn new(src: &'a [u8]) -> ByteScanner<'a> {
        ByteScanner {
            src,
            pos: 0,
            prev: None,
        }
    }

    /// Returns the bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.src[self.pos..]
    }
}

fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7f => 1,
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        _ => 4,
    }
}

impl<'a> ScanState for ByteScanner<'a> {
    fn read_rune(&mut self) -> io::Result<Option<char>> {
        let rest = self.remaining();
        let lead = match rest.first() {
            None => return Ok(None),
            Some(b) => *b,
        };
        let width = utf8_width(lead).min(rest.len());
        let c = str::from_utf8(&rest[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "invalid UTF-8"))?;
        self.prev = Some(self.pos);
        self.pos += width;
        Ok(Some(c))
    }

    fn unread_rune(&mut self) -> io::Result<()> {
        match self.prev.take() {
            Some(pos) => {
                self.pos = pos;
                Ok(())
            }
            None => Err(io::Error::new(
                io::ErrorKind::Other,
                "unread_rune called without a preceding read_rune",
            )),
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let rest = self.remaining();
        let n = rest.len().min(buf.len());
        buf[..n].copy_from_slice(&rest[..n]);
        self.pos += n;
        self.prev = None;
        Ok(n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Infinity,
    SignalingNan,
    QuietNan,
}

/// A node in the keyword matcher. Once one of `heads` is read, either the
/// node yields `result` or matching continues with `tails`. An empty head
/// matches without consuming input.
struct Trie {
    heads: &'static [&'static str],
    tails: &'static [Trie],
    result: Option<Keyword>,
}

impl Trie {
    const fn branch(heads: &'static [&'static str], tails: &'static [Trie]) -> Trie {
        Trie {
            heads,
            tails,
            result: None,
        }
    }

    const fn leaf(heads: &'static [&'static str], result: Keyword) -> Trie {
        Trie {
            heads,
            tails: &[],
            result: Some(result),
        }
    }
}

const KEYWORDS: &[Trie] = &[
    Trie::branch(&["inf", "Inf"], &[Trie::leaf(&["inity", ""], Keyword::Infinity)]),
    Trie::leaf(&["∞"], Keyword::Infinity),
    Trie::branch(&["s"], &[Trie::leaf(&["nan", "NaN"], Keyword::SignalingNan)]),
    Trie::branch(&["q", ""], &[Trie::leaf(&["nan", "NaN"], Keyword::QuietNan)]),
];

fn invalid() -> ParseDecimalError {
    ParseDecimalError::new(ParseErrorKind::Invalid)
}

fn match_keyword<S>(tries: &[Trie], state: &mut S) -> Result<Option<Keyword>, ParseDecimalError>
where
    S: ScanState + ?Sized,
{
    for trie in tries {
        for head in trie.heads {
            if eat_head(state, head)? {
                return match trie.result {
                    Some(keyword) => Ok(Some(keyword)),
                    None => match_keyword(trie.tails, state),
                };
            }
        }
    }
    Ok(None)
}

/// Consumes `head` if the input starts with it. A mismatch on the first
/// character consumes nothing; a mismatch after that is an error.
fn eat_head<S>(state: &mut S, head: &str) -> Result<bool, ParseDecimalError>
where
    S: ScanState + ?Sized,
{
    for (i, expected) in head.chars().enumerate() {
        match state.read_rune()? {
            Some(c) if c == expected => (),
            Some(_) if i == 0 => {
                state.unread_rune()?;
                return Ok(false);
            }
            None if i == 0 => return Ok(false),
            _ => return Err(invalid()),
        }
    }
    Ok(true)
}

/// Consumes the next character if it is one of `options`, returning its
/// index.
fn eat_rune<S>(state: &mut S, options: &[char]) -> Result<Option<usize>, ParseDecimalError>
where
    S: ScanState + ?Sized,
{
    match state.read_rune()? {
        None => Ok(None),
        Some(c) => match options.iter().position(|o| *o == c) {
            Some(i) => Ok(Some(i)),
            None => {
                state.unread_rune()?;
                Ok(None)
            }
        },
    }
}

fn eat_digits<S>(state: &mut S) -> Result<Vec<u8>, ParseDecimalError>
where
    S: ScanState + ?Sized,
{
    Ok(state.token(false, &mut |c| c.is_ascii_digit())?)
}

/// Reads a NaN payload, which must fit in the payload field.
fn parse_payload(digits: &[u8]) -> Result<u64, ParseDecimalError> {
    let mut payload = 0u64;
    for d in digits {
        payload = payload
            .checked_mul(10)
            .and_then(|p| p.checked_add(u64::from(d - b'0')))
            .filter(|p| *p <= PAYLOAD_MASK)
            .ok_or_else(invalid)?;
    }
    Ok(payload)
}

/// Reads an exponent magnitude, saturating well past the clamp threshold.
fn parse_exponent(digits: &[u8]) -> u64 {
    digits.iter().fold(0u64, |acc, d| {
        (acc * 10 + u64::from(d - b'0')).min(MAX_PARSED_EXP * 10)
    })
}

/// The leading significant digits of a mantissa.
struct Mantissa {
    sig: u64,
    /// Significant digits that did not fit.
    dropped: i32,
    status: DiscardedDigit,
}

impl Mantissa {
    fn parse(digits: &[u8]) -> Mantissa {
        let mut sig = 0u64;
        let mut kept = 0;
        let start = digits.iter().position(|d| *d != b'0').unwrap_or(digits.len());
        let significant = &digits[start..];
        for d in significant.iter().take(16) {
            sig = sig * 10 + u64::from(d - b'0');
            kept += 1;
        }
        let rest = &significant[kept..];
        let status = match rest.split_first() {
            None => DiscardedDigit::Eq0,
            Some((first, tail)) => {
                DiscardedDigit::from_digit(first - b'0', tail.iter().all(|d| *d == b'0'))
            }
        };
        Mantissa {
            sig,
            dropped: rest.len() as i32,
            status,
        }
    }
}

impl Context {
    /// Reads a number from `state`, rounding it to sixteen digits with the
    /// context's rounding algorithm if necessary.
    ///
    /// Scanning stops at the first character that cannot continue the number;
    /// that character is left unread.
    pub fn scan<S>(&self, state: &mut S) -> Result<Decimal64, ParseDecimalError>
    where
        S: ScanState + ?Sized,
    {
        let sign = eat_rune(state, &['+', '-'])? == Some(1);
        if eat_rune(state, &['+', '-'])?.is_some() {
            return Err(ParseDecimalError::new(ParseErrorKind::TooManySigns));
        }

        match match_keyword(KEYWORDS, state)? {
            Some(Keyword::Infinity) => return Ok(Decimal64::infinity(sign)),
            Some(keyword) => {
                let payload = parse_payload(&eat_digits(state)?)?;
                let signaling = keyword == Keyword::SignalingNan;
                return Ok(Decimal64::nan_with_payload(sign, signaling, payload));
            }
            None => (),
        }

        let mut digits = eat_digits(state)?;
        let mut frac_len = 0;
        if eat_rune(state, &['.'])?.is_some() {
            let frac = eat_digits(state)?;
            frac_len = frac.len() as i32;
            digits.extend_from_slice(&frac);
        }
        if digits.is_empty() {
            return Err(ParseDecimalError::new(ParseErrorKind::MantissaMissing));
        }
        if eat_rune(state, &['.'])?.is_some() {
            return Err(ParseDecimalError::new(ParseErrorKind::TooManyDots));
        }

        let mut exp = 0i64;
        if eat_rune(state, &['e', 'E'])?.is_some() {
            let negative = eat_rune(state, &['+', '-'])? == Some(1);
            let exp_digits = eat_digits(state)?;
            if exp_digits.is_empty() {
                return Err(ParseDecimalError::new(ParseErrorKind::ExponentMissing));
            }
            exp = parse_exponent(&exp_digits) as i64;
            if negative {
                exp = -exp;
            }
        }

        let mantissa = Mantissa::parse(&digits);
        if mantissa.sig == 0 {
            return Ok(Decimal64::zero(sign));
        }
        if exp > MAX_PARSED_EXP as i64 {
            return Ok(Decimal64::infinity(sign));
        }
        if exp < -(MAX_PARSED_EXP as i64) {
            return Ok(Decimal64::zero(sign));
        }

        let exp = exp as i32 + mantissa.dropped - frac_len;
        let mut p = Parts::finite(sign, exp, U128::from_u64(mantissa.sig));
        p.renormalize();
        Ok(p.finish(self.rounding(), mantissa.status))
    }

    /// Parses a number from a string, which must contain nothing but the
    /// number.
    pub fn parse(&self, s: &str) -> Result<Decimal64, ParseDecimalError> {
        let mut state = ByteScanner::new(s.as_bytes());
        let d = self.scan(&mut state)?;
        match state.read_rune()? {
            None => Ok(d),
            Some(c) => Err(ParseDecimalError::new(ParseErrorKind::TrailingCharacter(c))),
        }
    }

    /// Parses a number from a string like [`Context::parse`].
    ///
    /// # Panics
    ///
    /// Panics if `s` is not a valid number.
    pub fn must_parse(&self, s: &str) -> Decimal64 {
        match self.parse(s) {
            Ok(d) => d,
            Err(e) => panic!("{}: {:?}", e, s),
        }
    }
}

impl FromStr for Decimal64 {
    type Err = ParseDecimalError;

    /// Parses a number using [`DEFAULT_SCAN_CONTEXT`].
    fn from_str(s: &str) -> Result<Decimal64, ParseDecimalError> {
        DEFAULT_SCAN_CONTEXT.parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fails the `fail_at`-th call made to the wrapped scanner.
    struct FlakyScanState<S> {
        inner: S,
        calls: usize,
        fail_at: usize,
    }

    impl<S> FlakyScanState<S> {
        fn new(inner: S, fail_at: usize) -> FlakyScanState<S> {
            FlakyScanState {
                inner,
                calls: 0,
                fail_at,
            }
        }

        fn tick(&mut self) -> io::Result<()> {
            let call = self.calls;
            self.calls += 1;
            if call == self.fail_at {
                Err(io::Error::new(io::ErrorKind::Interrupted, "flaky"))
            } else {
                Ok(())
            }
        }
    }

    impl<S: ScanState> ScanState for FlakyScanState<S> {
        fn read_rune(&mut self) -> io::Result<Option<char>> {
            self.tick()?;
            self.inner.read_rune()
        }

        fn unread_rune(&mut self) -> io::Result<()> {
            self.tick()?;
            self.inner.unread_rune()
        }

        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.tick()?;
            self.inner.read(buf)
        }
    }

    #[test]
    fn test_flaky_scan_state() {
        let fail_at = |text: &str, n: usize| {
            let mut state = FlakyScanState::new(ByteScanner::new(text.as_bytes()), n);
            let err = DEFAULT_SCAN_CONTEXT.scan(&mut state).unwrap_err();
            assert_eq!(err.kind(), &ParseErrorKind::Read("flaky".into()), "{} {}", text, n);
        };
        fail_at("x", 0);
        for n in 0..7 {
            fail_at("-1.0e-3", n);
        }
    }

    #[test]
    fn test_byte_scanner() {
        let mut state = ByteScanner::new("a∞ b".as_bytes());
        assert_eq!(state.read_rune().unwrap(), Some('a'));
        assert_eq!(state.read_rune().unwrap(), Some('∞'));
        state.unread_rune().unwrap();
        assert!(state.unread_rune().is_err());
        assert_eq!(state.token(false, &mut |c| c != ' ').unwrap(), "∞".as_bytes());
        assert_eq!(state.token(true, &mut |c| c.is_alphabetic()).unwrap(), b"b");
        assert_eq!(state.read_rune().unwrap(), None);
        assert_eq!(state.width(), None);

        let mut state = ByteScanner::new(b"12345");
        let mut buf = [0; 3];
        assert_eq!(state.read(&mut buf).unwrap(), 3);
        assert_eq!(&buf, b"123");
        assert_eq!(state.remaining(), b"45");

        let mut state = ByteScanner::new(&[0xff, 0x41]);
        assert_eq!(state.read_rune().unwrap_err().kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_keywords() {
        let keyword = |s: &str| match_keyword(KEYWORDS, &mut ByteScanner::new(s.as_bytes()));
        assert_eq!(keyword("inf"), Ok(Some(Keyword::Infinity)));
        assert_eq!(keyword("Infinity"), Ok(Some(Keyword::Infinity)));
        assert_eq!(keyword("∞"), Ok(Some(Keyword::Infinity)));
        assert_eq!(keyword("nan"), Ok(Some(Keyword::QuietNan)));
        assert_eq!(keyword("qNaN"), Ok(Some(Keyword::QuietNan)));
        assert_eq!(keyword("sNaN"), Ok(Some(Keyword::SignalingNan)));
        assert_eq!(keyword("12"), Ok(None));
        assert_eq!(keyword(""), Ok(None));
        assert_eq!(keyword("ix"), Err(invalid()));
        assert_eq!(keyword("Na"), Err(invalid()));
    }

    #[test]
    fn test_mantissa() {
        let m = Mantissa::parse(b"000123");
        assert_eq!((m.sig, m.dropped, m.status), (123, 0, DiscardedDigit::Eq0));
        let m = Mantissa::parse(b"12345678901234567500");
        assert_eq!(m.sig, 1_234_567_890_123_456);
        assert_eq!((m.dropped, m.status), (4, DiscardedDigit::Gt5));
        let m = Mantissa::parse(b"1234567890123456500");
        assert_eq!((m.dropped, m.status), (3, DiscardedDigit::Eq5));
    }

    #[test]
    fn test_parse_payload() {
        assert_eq!(parse_payload(b""), Ok(0));
        assert_eq!(parse_payload(b"33"), Ok(33));
        assert_eq!(parse_payload(b"2251799813685247"), Ok(PAYLOAD_MASK));
        assert_eq!(parse_payload(b"2251799813685248"), Err(invalid()));
        assert_eq!(parse_payload(b"99999999999999999999999"), Err(invalid()));
    }
}
