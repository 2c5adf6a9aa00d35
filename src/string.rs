//! String literal decoding: escapes, surrogate pairs, UTF-8 re-encoding.
//!
//! Used both for object keys and string values, so the decode logic is
//! written exactly once (see `parse_raw_string`).

use crate::error::{ParseError, ParseErrorKind};
use crate::scanner::Scanner;
use crate::scratch::ByteScratch;

const HIGH_SURROGATE: core::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
const LOW_SURROGATE: core::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

/// Decodes a string literal (the cursor must be positioned at the opening
/// `"`) onto `scratch`, returning the decoded content as an owned `String`.
///
/// On any failure, `scratch` is truncated back to its length on entry so no
/// partial decode survives.
pub(crate) fn parse_raw_string(
    scanner: &mut Scanner,
    scratch: &mut ByteScratch,
) -> Result<String, ParseError> {
    let mark = scratch.len();
    match parse_raw_string_inner(scanner, scratch, mark) {
        Ok(s) => Ok(s),
        Err(e) => {
            scratch.truncate_to(mark);
            Err(e)
        }
    }
}

fn parse_raw_string_inner(
    scanner: &mut Scanner,
    scratch: &mut ByteScratch,
    mark: usize,
) -> Result<String, ParseError> {
    debug_assert_eq!(scanner.peek(), Some(b'"'));
    scanner.advance();

    loop {
        let byte = scanner
            .peek()
            .ok_or_else(|| scanner.err(ParseErrorKind::MissQuotationMark))?;

        match byte {
            b'"' => {
                scanner.advance();
                return Ok(scratch.take_str_since(mark));
            }
            b'\\' => {
                scanner.advance();
                parse_escape(scanner, scratch)?;
            }
            0x00..=0x1F => {
                return Err(scanner.err(ParseErrorKind::InvalidStringChar));
            }
            _ => {
                let start = scanner.pos();
                let ch_len = utf8_len(byte);
                for _ in 0..ch_len {
                    scanner.advance();
                }
                let bytes = scanner.input().as_bytes();
                scratch.push_bytes(&bytes[start..start + ch_len]);
            }
        }
    }
}

fn utf8_len(lead: u8) -> usize {
    if lead < 0x80 {
        1
    } else if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else {
        4
    }
}

fn parse_escape(scanner: &mut Scanner, scratch: &mut ByteScratch) -> Result<(), ParseError> {
    let escape_start = scanner.pos();
    let escape = scanner
        .peek()
        .ok_or_else(|| scanner.err(ParseErrorKind::MissQuotationMark))?;

    let literal = match escape {
        b'"' => Some(b'"'),
        b'\\' => Some(b'\\'),
        b'/' => Some(b'/'),
        b'b' => Some(0x08),
        b'f' => Some(0x0C),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        b'u' => None,
        _ => return Err(scanner.err_at(ParseErrorKind::InvalidStringEscape, escape_start)),
    };

    if let Some(byte) = literal {
        scanner.advance();
        scratch.push_bytes(&[byte]);
        return Ok(());
    }

    scanner.advance(); // consume 'u'
    let unit = scanner.parse_hex4()?;

    let scalar = if HIGH_SURROGATE.contains(&unit) {
        let pair_start = scanner.pos();
        if scanner.peek() != Some(b'\\') || scanner.peek_at(1) != Some(b'u') {
            return Err(scanner.err_at(ParseErrorKind::InvalidUnicodeSurrogate, pair_start));
        }
        scanner.advance();
        scanner.advance();
        let low = scanner.parse_hex4()?;
        if !LOW_SURROGATE.contains(&low) {
            return Err(scanner.err_at(ParseErrorKind::InvalidUnicodeSurrogate, pair_start));
        }
        0x10000 + ((u32::from(unit) - 0xD800) << 10 | (u32::from(low) - 0xDC00))
    } else if LOW_SURROGATE.contains(&unit) {
        return Err(scanner.err_at(ParseErrorKind::InvalidUnicodeSurrogate, escape_start));
    } else {
        u32::from(unit)
    };

    let ch = char::from_u32(scalar)
        .expect("surrogate arithmetic always yields a valid Unicode scalar value");
    let mut buf = [0u8; 4];
    scratch.push_bytes(ch.encode_utf8(&mut buf).as_bytes());
    Ok(())
}
