//! Property tests corresponding to the P1-P6 invariants: idempotent release,
//! no leak on error, single root, scratch stack balance, ASCII string
//! round-tripping, and UTF-8 well-formedness of `\u` escapes.

use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;

use crate::parser::parse_reporting_scratch_len;
use crate::{parse, Value};

/// P1: dropping/resetting a value is always safe, and resetting twice is
/// identical to resetting once.
#[quickcheck]
fn p1_set_null_is_idempotent(seed: u8) -> bool {
    let mut v = Value::Number(f64::from(seed));
    v.set_null();
    let first = v.clone();
    v.set_null();
    first == v && v.is_null()
}

/// P2 + P4: whatever the outcome, the scratch stack returns to empty.
#[quickcheck]
fn p2_p4_scratch_always_balances(input: String) -> bool {
    let (_, scratch_len) = parse_reporting_scratch_len(&input);
    scratch_len == 0
}

/// P3: trailing non-whitespace after a complete value is always rejected.
#[quickcheck]
fn p3_single_root(trailer: NonWhitespaceTrailer) -> TestResult {
    let input = format!("null{}", trailer.0);
    match parse(&input) {
        Err(e) => TestResult::from_bool(e.kind == crate::error::ParseErrorKind::RootNotSingular),
        Ok(_) => TestResult::failed(),
    }
}

/// A non-empty string guaranteed to contain at least one non-whitespace
/// byte, so appending it after a complete value always trips `RootNotSingular`.
#[derive(Clone, Debug)]
struct NonWhitespaceTrailer(String);

impl Arbitrary for NonWhitespaceTrailer {
    fn arbitrary(g: &mut Gen) -> Self {
        let choices: &[char] = &['x', '1', '{', '}', '!', 'a'];
        let len = 1 + usize::arbitrary(g) % 8;
        NonWhitespaceTrailer((0..len).map(|_| *g.choose(choices).unwrap()).collect())
    }
}

/// P5: printable ASCII other than `"` and `\` round-trips byte-identically.
#[quickcheck]
fn p5_ascii_round_trip(byte: u8) -> TestResult {
    if !(0x20..=0x7E).contains(&byte) || byte == b'"' || byte == b'\\' {
        return TestResult::discard();
    }
    let ch = byte as char;
    let input = format!("\"{ch}\"");
    let v = parse(&input).expect("printable ASCII string should always parse");
    TestResult::from_bool(v.as_str() == ch.to_string())
}

/// P6: every accepted `\uXXXX` (and surrogate pair) escape emits valid UTF-8
/// for the corresponding scalar value.
#[quickcheck]
fn p6_unicode_escape_is_valid_utf8(code: u16) -> TestResult {
    // Paired surrogates are a separate code path (`p6_surrogate_pair_is_valid_utf8`
    // below); restrict this property to code points a single `\u` escape can denote.
    if (0xD800..=0xDFFF).contains(&code) {
        return TestResult::discard();
    }
    let input = format!("\"\\u{code:04x}\"");
    let v = parse(&input).expect("a non-surrogate \\u escape always parses");
    let decoded = v.as_str();
    TestResult::from_bool(core::str::from_utf8(decoded.as_bytes()).is_ok() && decoded.chars().count() == 1)
}

/// P6, paired-surrogate case: every valid high/low surrogate pair decodes to
/// the UTF-8 encoding of the combined scalar
/// `0x10000 + ((high - 0xD800) << 10 | (low - 0xDC00))` — the one piece of
/// arithmetic in the string parser that a trivial `char::from_u32` round
/// trip can't exercise.
#[quickcheck]
fn p6_surrogate_pair_is_valid_utf8(high_offset: u16, low_offset: u16) -> bool {
    let high = 0xD800 + (high_offset % 0x400);
    let low = 0xDC00 + (low_offset % 0x400);
    let input = format!("\"\\u{high:04x}\\u{low:04x}\"");
    let v = parse(&input).expect("a well-formed surrogate pair always parses");
    let decoded = v.as_str();

    let expected_scalar = 0x10000 + ((u32::from(high) - 0xD800) << 10 | (u32::from(low) - 0xDC00));
    let expected = char::from_u32(expected_scalar).expect("surrogate arithmetic always yields a valid scalar");

    decoded.chars().count() == 1 && decoded.chars().next() == Some(expected)
}
