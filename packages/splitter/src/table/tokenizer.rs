//! Minimal tag tokenizer for HTML table fragments.
//!
//! Only distinguishes start tags, end tags and text. Attributes are skipped,
//! comments and declarations are dropped, and a small set of character
//! references is decoded in text.

use crate::error::{Result, SplitError};

/// A lexical unit of a table fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<name ...>` or `<name .../>`; the name is lower-cased.
    Start { name: String, self_closing: bool },
    /// `</name>`; the name is lower-cased.
    End { name: String },
    /// Text between tags with character references decoded.
    Text(String),
}

/// Iterator over the tokens of a fragment.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Whether the remaining input starts with something that is markup rather than text.
    fn at_markup(&self) -> bool {
        let rest = self.rest();
        let mut chars = rest.chars();
        if chars.next() != Some('<') {
            return false;
        }
        match chars.next() {
            Some('/') => chars.next().is_some_and(|c| c.is_ascii_alphabetic()),
            Some('!' | '?') => true,
            Some(c) => c.is_ascii_alphabetic(),
            None => false,
        }
    }

    fn read_text(&mut self) -> Token {
        let start = self.pos;
        // Always consume at least one char so a stray '<' is treated as text.
        let mut end = start + self.rest().chars().next().map_or(0, char::len_utf8);
        while end < self.input.len() {
            match self.input[end..].find('<') {
                Some(offset) => {
                    end += offset;
                    self.pos = end;
                    if self.at_markup() {
                        break;
                    }
                    end += 1;
                }
                None => {
                    end = self.input.len();
                    break;
                }
            }
        }
        self.pos = end;
        Token::Text(decode_entities(&self.input[start..end]))
    }

    /// Position of the `>` closing the tag at the current position, honoring quoted attribute values.
    fn find_tag_end(&self) -> Option<usize> {
        let mut quote: Option<char> = None;
        for (offset, c) in self.rest().char_indices() {
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, '>') => return Some(self.pos + offset),
                (None, _) => {}
            }
        }
        None
    }

    fn malformed(&self) -> SplitError {
        let snippet: String = self.rest().chars().take(40).collect();
        SplitError::MalformedTag(snippet)
    }

    fn read_markup(&mut self) -> Result<Option<Token>> {
        let rest = self.rest();

        if rest.starts_with("<!--") {
            let Some(end) = rest.find("-->") else {
                return Err(self.malformed());
            };
            self.pos += end + 3;
            return Ok(None);
        }

        let Some(tag_end) = self.find_tag_end() else {
            return Err(self.malformed());
        };
        let inner = &self.input[self.pos + 1..tag_end];
        self.pos = tag_end + 1;

        if inner.starts_with('!') || inner.starts_with('?') {
            return Ok(None);
        }

        if let Some(name) = inner.strip_prefix('/') {
            return Ok(Some(Token::End {
                name: tag_name(name),
            }));
        }

        Ok(Some(Token::Start {
            name: tag_name(inner),
            self_closing: inner.trim_end().ends_with('/'),
        }))
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.input.len() {
            if !self.at_markup() {
                return Some(Ok(self.read_text()));
            }
            match self.read_markup() {
                Ok(Some(token)) => return Some(Ok(token)),
                Ok(None) => continue,
                Err(e) => {
                    self.pos = self.input.len();
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

fn tag_name(inner: &str) -> String {
    inner
        .trim_start()
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}

/// Decode the character references commonly found in converted table cells.
///
/// Unknown references are kept verbatim.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        result.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        let decoded = candidate
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&candidate[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                result.push(c);
                rest = &candidate[semi + 1..];
            }
            None => {
                result.push('&');
                rest = &candidate[1..];
            }
        }
    }
    result.push_str(rest);
    result
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}
