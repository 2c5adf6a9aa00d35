//! The recursive-descent driver: value dispatch, array/object collection,
//! and the public [`parse`] entry point.

use crate::error::{ParseError, ParseErrorKind};
use crate::number::parse_number;
use crate::scanner::Scanner;
use crate::scratch::ByteScratch;
use crate::string::parse_raw_string;
use crate::value::{Member, Value};

/// Recursion limit for nested arrays/objects, converting stack exhaustion on
/// adversarially deep input into a reported error rather than a crash.
const MAX_DEPTH: usize = 512;

struct Parser<'a> {
    scanner: Scanner<'a>,
    scratch: ByteScratch,
    depth: usize,
}

/// Parses a single complete JSON document from `text`.
///
/// The document may be surrounded by whitespace, but exactly one value must
/// be present: any trailing non-whitespace after the value is a
/// [`ParseErrorKind::RootNotSingular`] error, and a value-free input (empty
/// or all whitespace) is [`ParseErrorKind::ExpectValue`].
///
/// # Examples
/// ```
/// use jsondom::parse;
///
/// let v = parse(r#"{ "a": [1, 2, 3] }"#).unwrap();
/// assert_eq!(v.object_value(0).array_len(), 3);
/// ```
pub fn parse(text: &str) -> Result<Value, ParseError> {
    let mut parser = Parser {
        scanner: Scanner::new(text),
        scratch: ByteScratch::new(),
        depth: 0,
    };

    parser.scanner.skip_whitespace();
    if parser.scanner.is_eof() {
        return Err(parser.scanner.err(ParseErrorKind::ExpectValue));
    }

    let value = parser.parse_value()?;

    parser.scanner.skip_whitespace();
    if !parser.scanner.is_eof() {
        return Err(parser.scanner.err(ParseErrorKind::RootNotSingular));
    }

    debug_assert_eq!(parser.scratch.len(), 0, "scratch stack leaked across parse");
    Ok(value)
}

/// Test-only hook exposing the scratch stack's length alongside the parse
/// outcome, so property tests can assert it always returns to zero on every
/// outcome, not just the success path `debug_assert!` above already covers.
#[cfg(test)]
pub(crate) fn parse_reporting_scratch_len(text: &str) -> (Result<Value, ParseError>, usize) {
    let mut parser = Parser {
        scanner: Scanner::new(text),
        scratch: ByteScratch::new(),
        depth: 0,
    };

    parser.scanner.skip_whitespace();
    let result = if parser.scanner.is_eof() {
        Err(parser.scanner.err(ParseErrorKind::ExpectValue))
    } else {
        parser.parse_value().and_then(|value| {
            parser.scanner.skip_whitespace();
            if parser.scanner.is_eof() {
                Ok(value)
            } else {
                Err(parser.scanner.err(ParseErrorKind::RootNotSingular))
            }
        })
    };

    (result, parser.scratch.len())
}

impl<'a> Parser<'a> {
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.scanner.peek() {
            Some(b'n') => {
                self.scanner.match_literal("null")?;
                Ok(Value::Null)
            }
            Some(b't') => {
                self.scanner.match_literal("true")?;
                Ok(Value::Boolean(true))
            }
            Some(b'f') => {
                self.scanner.match_literal("false")?;
                Ok(Value::Boolean(false))
            }
            Some(b'"') => {
                let s = parse_raw_string(&mut self.scanner, &mut self.scratch)?;
                Ok(Value::String(s))
            }
            Some(b'[') => self.parse_array(),
            Some(b'{') => self.parse_object(),
            Some(b'-' | b'0'..=b'9') => {
                let n = parse_number(&mut self.scanner)?;
                Ok(Value::Number(n))
            }
            Some(_) => Err(self.scanner.err(ParseErrorKind::InvalidValue)),
            None => Err(self.scanner.err(ParseErrorKind::ExpectValue)),
        }
    }

    /// Increments the nesting depth, rejecting the increment (and leaving
    /// `depth` unchanged) if it would exceed `MAX_DEPTH`. Every `Ok` return
    /// here has a matching `self.depth -= 1` on every exit path of the
    /// caller; since a rejected increment never happens, `?`-propagating the
    /// `Err` out of `parse_array`/`parse_object` never skips a decrement that
    /// was owed.
    fn enter_composite(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.scanner.err(ParseErrorKind::NestingTooDeep));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_array(&mut self) -> Result<Value, ParseError> {
        debug_assert_eq!(self.scanner.peek(), Some(b'['));
        self.scanner.advance();
        self.enter_composite()?;

        self.scanner.skip_whitespace();
        if self.scanner.peek() == Some(b']') {
            self.scanner.advance();
            self.depth -= 1;
            return Ok(Value::Array(Vec::new()));
        }

        let mut elements = Vec::new();
        let result = loop {
            let value = match self.parse_value() {
                Ok(v) => v,
                Err(e) => break Err(e),
            };
            elements.push(value);
            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                Some(b',') => {
                    self.scanner.advance();
                    self.scanner.skip_whitespace();
                }
                Some(b']') => {
                    self.scanner.advance();
                    break Ok(());
                }
                _ => break Err(self.scanner.err(ParseErrorKind::MissCommaOrSquareBracket)),
            }
        };

        self.depth -= 1;
        result.map(|()| Value::Array(elements))
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        debug_assert_eq!(self.scanner.peek(), Some(b'{'));
        self.scanner.advance();
        self.enter_composite()?;

        self.scanner.skip_whitespace();
        if self.scanner.peek() == Some(b'}') {
            self.scanner.advance();
            self.depth -= 1;
            return Ok(Value::Object(Vec::new()));
        }

        let mut members = Vec::new();
        let result = loop {
            match self.scanner.peek() {
                Some(b'"') => {}
                _ => break Err(self.scanner.err(ParseErrorKind::MissKey)),
            }
            let key = match parse_raw_string(&mut self.scanner, &mut self.scratch) {
                Ok(k) => k,
                Err(e) => break Err(e),
            };

            self.scanner.skip_whitespace();
            if self.scanner.peek() != Some(b':') {
                break Err(self.scanner.err(ParseErrorKind::MissColon));
            }
            self.scanner.advance();
            self.scanner.skip_whitespace();

            let value = match self.parse_value() {
                Ok(v) => v,
                Err(e) => break Err(e),
            };
            members.push(Member { key, value });

            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                Some(b',') => {
                    self.scanner.advance();
                    self.scanner.skip_whitespace();
                }
                Some(b'}') => {
                    self.scanner.advance();
                    break Ok(());
                }
                _ => break Err(self.scanner.err(ParseErrorKind::MissCommaOrCurlyBracket)),
            }
        };

        self.depth -= 1;
        result.map(|()| Value::Object(members))
    }
}
