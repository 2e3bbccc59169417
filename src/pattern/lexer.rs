use std::fmt;

use super::error::{PatternError, PatternResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Open,
    Close,
    Pattern,
    Name,
    Char,
    EscapedChar,
    Modifier,
    End,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Open => "OPEN",
            Self::Close => "CLOSE",
            Self::Pattern => "PATTERN",
            Self::Name => "NAME",
            Self::Char => "CHAR",
            Self::EscapedChar => "ESCAPED_CHAR",
            Self::Modifier => "MODIFIER",
            Self::End => "END",
        };
        f.write_str(name)
    }
}

/// One token of a route pattern. `index` is the byte offset of the token in
/// the source pattern; offsets are monotonically non-decreasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexToken {
    pub kind: TokenKind,
    pub index: usize,
    pub value: String,
}

impl LexToken {
    fn new(kind: TokenKind, index: usize, value: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            value: value.into(),
        }
    }
}

/// Splits a route pattern into tokens. Total over its input: every failure
/// is a `PatternError`, and on success the stream always terminates with a
/// single `End` token.
#[tracing::instrument(level = "trace", fields(pattern = %pattern))]
pub fn lex(pattern: &str) -> PatternResult<Vec<LexToken>> {
    let chars: Vec<(usize, char)> = pattern.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        let (index, ch) = chars[i];

        match ch {
            '*' | '+' | '?' => {
                tokens.push(LexToken::new(TokenKind::Modifier, index, ch));
                i += 1;
            }
            '\\' => {
                // A trailing lone backslash escapes nothing; the parser
                // drops the resulting empty-valued token.
                let value = chars
                    .get(i + 1)
                    .map(|&(_, escaped)| escaped.to_string())
                    .unwrap_or_default();
                tokens.push(LexToken::new(TokenKind::EscapedChar, index, value));
                i += 2;
            }
            '{' => {
                tokens.push(LexToken::new(TokenKind::Open, index, ch));
                i += 1;
            }
            '}' => {
                tokens.push(LexToken::new(TokenKind::Close, index, ch));
                i += 1;
            }
            ':' => {
                let mut name = String::new();
                let mut j = i + 1;

                while let Some(&(_, c)) = chars.get(j) {
                    if !(c.is_ascii_alphanumeric() || c == '_') {
                        break;
                    }
                    name.push(c);
                    j += 1;
                }

                if name.is_empty() {
                    return Err(PatternError::EmptyParameterName { index });
                }

                tokens.push(LexToken::new(TokenKind::Name, index, name));
                i = j;
            }
            '(' => {
                let (token, next) = lex_group(&chars, i)?;
                tokens.push(token);
                i = next;
            }
            _ => {
                tokens.push(LexToken::new(TokenKind::Char, index, ch));
                i += 1;
            }
        }
    }

    tokens.push(LexToken::new(TokenKind::End, pattern.len(), ""));

    Ok(tokens)
}

/// Scans a custom-pattern group from its opening parenthesis. The inner text
/// is copied verbatim, including escape pairs; nested groups must be
/// non-capturing and count toward the depth.
fn lex_group(chars: &[(usize, char)], start: usize) -> PatternResult<(LexToken, usize)> {
    let (open_index, _) = chars[start];
    let mut depth = 1usize;
    let mut value = String::new();
    let mut nested_capture: Option<usize> = None;
    let mut j = start + 1;

    if let Some(&(question_index, '?')) = chars.get(j) {
        return Err(PatternError::PatternStartsWithQuestionMark {
            index: question_index,
        });
    }

    while j < chars.len() {
        let (index, ch) = chars[j];

        if ch == '\\' {
            value.push(ch);
            if let Some(&(_, escaped)) = chars.get(j + 1) {
                value.push(escaped);
            }
            j += 2;
            continue;
        }

        if ch == ')' {
            depth -= 1;
            if depth == 0 {
                j += 1;
                break;
            }
        } else if ch == '(' {
            depth += 1;
            // Recorded rather than raised: a group that never closes is an
            // imbalance, whatever its inner parentheses look like.
            if nested_capture.is_none()
                && chars.get(j + 1).map(|&(_, next)| next) != Some('?')
            {
                nested_capture = Some(index);
            }
        }

        value.push(ch);
        j += 1;
    }

    if depth != 0 {
        return Err(PatternError::UnbalancedGroup { index: open_index });
    }
    if let Some(index) = nested_capture {
        return Err(PatternError::NestedCapturingGroupNotAllowed { index });
    }
    if value.is_empty() {
        return Err(PatternError::EmptyPattern { index: open_index });
    }

    Ok((LexToken::new(TokenKind::Pattern, open_index, value), j))
}
