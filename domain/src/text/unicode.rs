//! Backslash-escape decoding

use regex::Regex;
use std::borrow::Cow;
use std::iter::Peekable;
use std::str::CharIndices;
use std::sync::LazyLock;
use thiserror::Error;

/// `\u` followed by four alphanumerics. Deliberately looser than a hex match
/// so that malformed escapes are detected and reported instead of skipped.
static UNICODE_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\u[0-9a-zA-Z]{4}").expect("escape pattern is valid"));

/// Why an escape sequence could not be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Input ends with a lone backslash
    TrailingBackslash,
    /// `\x`, `\u` or `\U` not followed by enough hex digits
    InvalidHex,
    /// UTF-16 surrogate without its pair
    LoneSurrogate,
    /// Hex value outside the Unicode scalar range
    InvalidCodePoint,
}

impl std::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeErrorKind::TrailingBackslash => write!(f, "trailing backslash"),
            DecodeErrorKind::InvalidHex => write!(f, "truncated or non-hex escape"),
            DecodeErrorKind::LoneSurrogate => write!(f, "unpaired surrogate"),
            DecodeErrorKind::InvalidCodePoint => write!(f, "invalid code point"),
        }
    }
}

/// A failed decode, carrying the untouched input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot decode escape at byte {position}: {kind}")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub position: usize,
    pub original: String,
}

impl DecodeError {
    /// Recover the original text
    pub fn into_original(self) -> String {
        self.original
    }
}

/// Whether `text` contains a `\uXXXX`-like escape
pub fn has_unicode_escape(text: &str) -> bool {
    UNICODE_ESCAPE.is_match(text)
}

/// Decode backslash escapes in `text`.
///
/// Text without a `\uXXXX`-like pattern is returned unchanged (borrowed).
/// Otherwise every escape is decoded: `\uXXXX` (including surrogate pairs),
/// `\UXXXXXXXX`, `\xHH`, octal `\ooo` and `\\ \' \" \n \r \t \a \b \f \v`.
/// Unknown escapes such as `\q` are kept verbatim.
///
/// # Examples
///
/// ```
/// use atoss_domain::text::decode_escapes;
///
/// assert_eq!(decode_escapes("caf\\u00e9").unwrap(), "café");
/// assert_eq!(decode_escapes("plain text").unwrap(), "plain text");
/// assert!(decode_escapes("bad \\uZZZZ").is_err());
/// ```
pub fn decode_escapes(text: &str) -> Result<Cow<'_, str>, DecodeError> {
    if !has_unicode_escape(text) {
        return Ok(Cow::Borrowed(text));
    }
    unescape(text)
        .map(Cow::Owned)
        .map_err(|(position, kind)| DecodeError {
            kind,
            position,
            original: text.to_string(),
        })
}

/// Decode escapes, falling back to the original text on failure
pub fn normalize(text: &str) -> String {
    match decode_escapes(text) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => e.into_original(),
    }
}

type Chars<'a> = Peekable<CharIndices<'a>>;

fn unescape(text: &str) -> Result<String, (usize, DecodeErrorKind)> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some((_, esc)) = chars.next() else {
            return Err((pos, DecodeErrorKind::TrailingBackslash));
        };
        match esc {
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0c}'),
            'v' => out.push('\u{0b}'),
            // Escaped newline is a line continuation
            '\n' => {}
            '0'..='7' => out.push(read_octal(esc, &mut chars)),
            'x' => out.push(scalar(read_hex(&mut chars, 2, pos)?, pos)?),
            'U' => out.push(scalar(read_hex(&mut chars, 8, pos)?, pos)?),
            'u' => {
                let unit = read_hex(&mut chars, 4, pos)?;
                out.push(utf16_unit(unit, &mut chars, pos)?);
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    Ok(out)
}

fn read_hex(
    chars: &mut Chars<'_>,
    digits: usize,
    pos: usize,
) -> Result<u32, (usize, DecodeErrorKind)> {
    let mut value = 0u32;
    for _ in 0..digits {
        let digit = chars
            .next()
            .and_then(|(_, c)| c.to_digit(16))
            .ok_or((pos, DecodeErrorKind::InvalidHex))?;
        value = value * 16 + digit;
    }
    Ok(value)
}

fn read_octal(first: char, chars: &mut Chars<'_>) -> char {
    // `first` is 0-7, so at most three digits stay below 0o777
    let mut value = first.to_digit(8).unwrap_or(0);
    for _ in 0..2 {
        match chars.peek().and_then(|(_, c)| c.to_digit(8)) {
            Some(d) => {
                value = value * 8 + d;
                chars.next();
            }
            None => break,
        }
    }
    char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn scalar(value: u32, pos: usize) -> Result<char, (usize, DecodeErrorKind)> {
    char::from_u32(value).ok_or((pos, DecodeErrorKind::InvalidCodePoint))
}

fn utf16_unit(
    unit: u32,
    chars: &mut Chars<'_>,
    pos: usize,
) -> Result<char, (usize, DecodeErrorKind)> {
    match unit {
        0xD800..=0xDBFF => {
            // High surrogate must be followed by `\u` + low surrogate
            let mut lookahead = chars.clone();
            let paired = matches!(lookahead.next(), Some((_, '\\')))
                && matches!(lookahead.next(), Some((_, 'u')));
            if !paired {
                return Err((pos, DecodeErrorKind::LoneSurrogate));
            }
            let low = read_hex(&mut lookahead, 4, pos)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return Err((pos, DecodeErrorKind::LoneSurrogate));
            }
            *chars = lookahead;
            scalar(0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00), pos)
        }
        0xDC00..=0xDFFF => Err((pos, DecodeErrorKind::LoneSurrogate)),
        _ => scalar(unit, pos),
    }
}
