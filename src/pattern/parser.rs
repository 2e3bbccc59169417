use std::fmt;

use serde::{Deserialize, Serialize};

use super::compile::escape;
use super::error::{PatternError, PatternResult};
use super::lexer::{LexToken, TokenKind, lex};
use super::options::CompileOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Quantifier {
    #[default]
    One,
    ZeroOrOne,
    ZeroOrMore,
    OneOrMore,
}

impl Quantifier {
    pub fn from_modifier(value: Option<&str>) -> Self {
        match value {
            Some("?") => Self::ZeroOrOne,
            Some("*") => Self::ZeroOrMore,
            Some("+") => Self::OneOrMore,
            _ => Self::One,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Self::ZeroOrOne | Self::ZeroOrMore)
    }

    pub fn is_repeating(&self) -> bool {
        matches!(self, Self::ZeroOrMore | Self::OneOrMore)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::One => "",
            Self::ZeroOrOne => "?",
            Self::ZeroOrMore => "*",
            Self::OneOrMore => "+",
        }
    }
}

/// Parameter identity: declared names stay strings, unnamed captures are
/// numbered from zero per parsed pattern. Serializes untagged so a name
/// shows up as a string and an index as an integer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamKey {
    Index(usize),
    Name(String),
}

impl ParamKey {
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Index(_) => None,
        }
    }

    /// Property-style comparison: an indexed key answers to its decimal
    /// rendering, so `Index(0)` matches the query `"0"`.
    pub fn matches(&self, query: &str) -> bool {
        match self {
            Self::Name(name) => name == query,
            Self::Index(index) => index.to_string() == query,
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for ParamKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ParamKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for ParamKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Parameter descriptor. `pattern` is the capture's inner regex source; an
/// empty pattern marks a non-capturing group whose literal prefix/suffix is
/// gated by the modifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Key {
    pub name: ParamKey,
    pub prefix: String,
    pub suffix: String,
    pub pattern: String,
    pub modifier: Quantifier,
}

impl Key {
    pub fn is_capturing(&self) -> bool {
        !self.pattern.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(Key),
}

/// Cursor over a lexed token stream. The stream always ends with `End` and
/// the cursor never advances past it, so indexing stays in bounds.
#[derive(Debug)]
struct TokenCursor {
    tokens: Vec<LexToken>,
    index: usize,
}

impl TokenCursor {
    fn new(tokens: Vec<LexToken>) -> Self {
        Self { tokens, index: 0 }
    }

    fn try_consume(&mut self, kind: TokenKind) -> Option<String> {
        let token = &mut self.tokens[self.index];
        if token.kind != kind {
            return None;
        }
        let value = std::mem::take(&mut token.value);
        self.index += 1;
        Some(value)
    }

    fn must_consume(&mut self, kind: TokenKind) -> PatternResult<String> {
        if let Some(value) = self.try_consume(kind) {
            return Ok(value);
        }
        let token = &self.tokens[self.index];
        Err(PatternError::UnexpectedToken {
            found: token.kind,
            index: token.index,
            expected: kind,
        })
    }

    fn consume_text(&mut self) -> String {
        let mut text = String::new();
        loop {
            let value = self
                .try_consume(TokenKind::Char)
                .or_else(|| self.try_consume(TokenKind::EscapedChar));
            match value {
                Some(chunk) => {
                    if chunk.is_empty() {
                        break;
                    }
                    text.push_str(&chunk);
                }
                None => break,
            }
        }
        text
    }

    fn done(&self) -> bool {
        self.index >= self.tokens.len()
    }
}

/// Parses a route pattern into literal and parameter segments. Consults
/// `options.delimiter` (default capture pattern) and `options.prefixes`
/// (which characters may become a parameter's implicit prefix).
#[tracing::instrument(level = "trace", skip(options), fields(pattern = %pattern))]
pub fn parse(pattern: &str, options: &CompileOptions) -> PatternResult<Vec<Segment>> {
    let tokens = lex(pattern)?;
    let default_pattern = format!("[^{}]+?", escape(options.parse_delimiter()));
    let prefixes = options.prefixes.as_str();

    let mut cursor = TokenCursor::new(tokens);
    let mut segments = Vec::new();
    let mut path = String::new();
    let mut key = 0usize;

    while !cursor.done() {
        let ch = cursor.try_consume(TokenKind::Char);
        let name = cursor.try_consume(TokenKind::Name);
        let pattern_text = cursor.try_consume(TokenKind::Pattern);

        // `:name` or `(re)`, optionally merged into one capture when both
        // appear back to back. A preceding char becomes the prefix only
        // when it is a member of `prefixes`.
        if name.is_some() || pattern_text.is_some() {
            let mut prefix = ch.unwrap_or_default();

            if !prefixes.contains(&prefix) {
                path.push_str(&prefix);
                prefix = String::new();
            }

            if !path.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut path)));
            }

            let name = match name {
                Some(name) => ParamKey::Name(name),
                None => {
                    let index = key;
                    key += 1;
                    ParamKey::Index(index)
                }
            };
            let capture = pattern_text.unwrap_or_else(|| default_pattern.clone());
            let modifier =
                Quantifier::from_modifier(cursor.try_consume(TokenKind::Modifier).as_deref());

            segments.push(Segment::Param(Key {
                name,
                prefix,
                suffix: String::new(),
                pattern: capture,
                modifier,
            }));
            continue;
        }

        let value = ch.or_else(|| cursor.try_consume(TokenKind::EscapedChar));
        if let Some(value) = value
            && !value.is_empty()
        {
            path.push_str(&value);
            continue;
        }

        if !path.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut path)));
        }

        // `{prefix :name(re) suffix}modifier`; every piece is optional. A
        // bare group keeps an empty name and no capture pattern, leaving it
        // non-capturing.
        if cursor.try_consume(TokenKind::Open).is_some() {
            let prefix = cursor.consume_text();
            let name = cursor.try_consume(TokenKind::Name).unwrap_or_default();
            let group_pattern = cursor.try_consume(TokenKind::Pattern).unwrap_or_default();
            let suffix = cursor.consume_text();

            cursor.must_consume(TokenKind::Close)?;

            let named = !name.is_empty();
            let has_pattern = !group_pattern.is_empty();

            let resolved_name = if named {
                ParamKey::Name(name)
            } else if has_pattern {
                let index = key;
                key += 1;
                ParamKey::Index(index)
            } else {
                ParamKey::Name(String::new())
            };
            let resolved_pattern = if named && !has_pattern {
                default_pattern.clone()
            } else {
                group_pattern
            };
            let modifier =
                Quantifier::from_modifier(cursor.try_consume(TokenKind::Modifier).as_deref());

            segments.push(Segment::Param(Key {
                name: resolved_name,
                prefix,
                suffix,
                pattern: resolved_pattern,
                modifier,
            }));
            continue;
        }

        cursor.must_consume(TokenKind::End)?;
    }

    Ok(segments)
}
