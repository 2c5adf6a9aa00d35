//! The JSON number grammar: validation plus `f64` conversion.

use crate::error::{ParseError, ParseErrorKind};
use crate::scanner::Scanner;

/// Validates and consumes a JSON number lexeme starting at the cursor,
/// returning its `f64` value. The cursor is left at the first byte beyond
/// the lexeme.
///
/// Grammar: `'-'? ('0' | [1-9][0-9]*) ('.' [0-9]+)? ([eE] [+-]? [0-9]+)?`.
/// A leading `+`, a bare `.`, or a digit-less exponent are `InvalidValue`.
pub(crate) fn parse_number(scanner: &mut Scanner) -> Result<f64, ParseError> {
    let start = scanner.pos();

    if scanner.peek() == Some(b'-') {
        scanner.advance();
    }

    match scanner.peek() {
        Some(b'0') => scanner.advance(),
        Some(b'1'..=b'9') => {
            scanner.advance();
            while matches!(scanner.peek(), Some(b'0'..=b'9')) {
                scanner.advance();
            }
        }
        _ => return Err(scanner.err_at(ParseErrorKind::InvalidValue, start)),
    }

    if scanner.peek() == Some(b'.') {
        scanner.advance();
        require_digits(scanner, start)?;
    }

    if matches!(scanner.peek(), Some(b'e' | b'E')) {
        scanner.advance();
        if matches!(scanner.peek(), Some(b'+' | b'-')) {
            scanner.advance();
        }
        require_digits(scanner, start)?;
    }

    let lexeme = &scanner.input()[start..scanner.pos()];
    let value: f64 = lexeme
        .parse()
        .expect("a validated JSON number lexeme always parses as f64");

    if value.is_infinite() {
        return Err(scanner.err_at(ParseErrorKind::NumberTooBig, start));
    }

    Ok(value)
}

fn require_digits(scanner: &mut Scanner, lexeme_start: usize) -> Result<(), ParseError> {
    if !matches!(scanner.peek(), Some(b'0'..=b'9')) {
        return Err(scanner.err_at(ParseErrorKind::InvalidValue, lexeme_start));
    }
    while matches!(scanner.peek(), Some(b'0'..=b'9')) {
        scanner.advance();
    }
    Ok(())
}
