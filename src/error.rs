use thiserror::Error;

/// The distinct result codes a parse can fail with, each tagged with the byte
/// offset into the input at which the failure was detected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at byte {offset} (line {line}, column {column})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, offset: usize, input: &str) -> Self {
        let (line, column) = line_column(input, offset);
        Self {
            kind,
            offset,
            line,
            column,
        }
    }
}

/// Computes 1-based line/column for a byte offset into `input`.
fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let prefix = &input[..offset.min(input.len())];
    let line = prefix.bytes().filter(|&b| b == b'\n').count() + 1;
    let column = match prefix.rfind('\n') {
        Some(nl) => prefix[nl + 1..].chars().count() + 1,
        None => prefix.chars().count() + 1,
    };
    (line, column)
}

/// The fixed error taxonomy. Names are part of the public surface; numeric
/// ordering is not significant.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("input contains only whitespace")]
    ExpectValue,
    #[error("input does not begin a valid value")]
    InvalidValue,
    #[error("trailing non-whitespace after a complete value")]
    RootNotSingular,
    #[error("number magnitude exceeds f64 range")]
    NumberTooBig,
    #[error("unterminated string")]
    MissQuotationMark,
    #[error("unrecognized backslash escape")]
    InvalidStringEscape,
    #[error("raw control character in string")]
    InvalidStringChar,
    #[error("malformed \\u escape")]
    InvalidUnicodeHex,
    #[error("broken UTF-16 surrogate pairing")]
    InvalidUnicodeSurrogate,
    #[error("expected ',' or ']'")]
    MissCommaOrSquareBracket,
    #[error("expected a string key")]
    MissKey,
    #[error("expected ':' after key")]
    MissColon,
    #[error("expected ',' or '}}'")]
    MissCommaOrCurlyBracket,
    #[error("value nesting exceeds the recursion limit")]
    NestingTooDeep,
}
