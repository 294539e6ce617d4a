//! Field extraction: pull one number out of a map-file line with an `sscanf`-style pattern.
//!
//! Only the subset of `sscanf` that map-file configs actually use is supported: literal text,
//! whitespace, `%x`, `%d` and `%%`.

use log::trace;

use crate::error::Error;

/// The numeric conversions a pattern may contain.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Conversion {
    /// `%x`: an unsigned hexadecimal integer, with or without a `0x` prefix.
    Hex,
    /// `%d`: a signed decimal integer, reinterpreted as `u32`.
    Decimal,
}

impl Conversion {
    fn name(self) -> &'static str {
        match self {
            Conversion::Hex => "hex",
            Conversion::Decimal => "decimal",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    /// Must match exactly.
    Literal(char),
    /// Matches any amount of whitespace, including none.
    Space,
    Convert(Conversion),
}

/// A compiled scan pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanPattern {
    tokens: Vec<Token>,
    /// The conversion that decides how the value is interpreted.
    conversion: Option<Conversion>,
}

impl ScanPattern {
    /// Compile `pattern`. Returns `None` if it contains a conversion other than `%x`, `%d` or
    /// `%%`.
    pub fn parse(pattern: &str) -> Option<Self> {
        let mut tokens = Vec::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '%' {
                match chars.next()? {
                    'x' => tokens.push(Token::Convert(Conversion::Hex)),
                    'd' => tokens.push(Token::Convert(Conversion::Decimal)),
                    '%' => tokens.push(Token::Literal('%')),
                    _ => return None,
                }
            } else if c.is_whitespace() {
                while chars.peek().map_or(false, |c| c.is_whitespace()) {
                    chars.next();
                }
                tokens.push(Token::Space);
            } else {
                tokens.push(Token::Literal(c));
            }
        }

        // A hex placeholder anywhere in the pattern takes precedence over a decimal one.
        let conversion = if tokens.contains(&Token::Convert(Conversion::Hex)) {
            Some(Conversion::Hex)
        } else if tokens.contains(&Token::Convert(Conversion::Decimal)) {
            Some(Conversion::Decimal)
        } else {
            None
        };

        Some(ScanPattern { tokens, conversion })
    }

    pub fn conversion(&self) -> Option<Conversion> {
        self.conversion
    }

    /// Apply the pattern to the start of `input` and return the first converted value.
    ///
    /// Text after the last token is ignored. Returns `None` if the input stops matching before
    /// the first conversion has produced a value.
    pub fn scan(&self, input: &str) -> Option<u32> {
        let mut rest = input;

        for token in &self.tokens {
            match token {
                Token::Literal(c) => rest = rest.strip_prefix(*c)?,
                Token::Space => rest = rest.trim_start(),
                Token::Convert(conv) => return scan_number(rest, *conv),
            }
        }

        None
    }
}

/// Parse a number at the start of `s`, skipping leading whitespace.
fn scan_number(s: &str, conv: Conversion) -> Option<u32> {
    let s = s.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    match conv {
        Conversion::Hex => {
            let digits = if s.starts_with("0x") || s.starts_with("0X") {
                // `0x` with no hex digits after it still scans as the `0`.
                if s[2..].starts_with(|c: char| c.is_ascii_hexdigit()) {
                    &s[2..]
                } else {
                    s
                }
            } else {
                s
            };
            let end = digits
                .find(|c: char| !c.is_ascii_hexdigit())
                .unwrap_or_else(|| digits.len());
            if end == 0 {
                return None;
            }
            let magnitude = u32::from_str_radix(&digits[..end], 16).ok()?;
            Some(if negative {
                magnitude.wrapping_neg()
            } else {
                magnitude
            })
        }

        Conversion::Decimal => {
            let end = s
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or_else(|| s.len());
            if end == 0 {
                return None;
            }
            let magnitude = s[..end].parse::<i64>().ok()?;
            let value = if negative { -magnitude } else { magnitude };
            if value < i64::from(i32::MIN) || value > i64::from(u32::MAX) {
                return None;
            }
            Some(value as u32)
        }
    }
}

/// Extract the value of `key` from `line` using `pattern`.
///
/// The pattern is applied starting at the first occurrence of `key`. A key that does not appear
/// in the line yields `Ok(0)`; a pattern that cannot be applied is an error.
pub fn extract(line: &str, key: &str, pattern: &str) -> Result<u32, Error> {
    let start = match line.find(key) {
        Some(start) => start,
        None => return Ok(0),
    };

    let compiled = ScanPattern::parse(pattern);
    let conversion = compiled.as_ref().and_then(ScanPattern::conversion);

    let (compiled, conversion) = match (compiled, conversion) {
        (Some(compiled), Some(conversion)) => (compiled, conversion),
        _ => return Err(Error::NoPlaceholder(key.to_owned())),
    };

    // A pattern may carry context in front of the key (`"region1 used=%d"` for key `used`).
    // The line is only scanned from the key onwards, so fall back to the pattern from its own
    // copy of the key.
    let value = compiled
        .scan(&line[start..])
        .or_else(|| match pattern.find(key) {
            Some(at) if at > 0 => ScanPattern::parse(&pattern[at..])?.scan(&line[start..]),
            _ => None,
        })
        .ok_or_else(|| Error::FieldParse {
            kind: conversion.name(),
            key: key.to_owned(),
        })?;

    trace!("{} = {:#x} (pattern {:?})", key, value, pattern);

    Ok(value)
}
