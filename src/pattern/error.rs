use thiserror::Error;

use super::lexer::TokenKind;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("missing parameter name at index {index}")]
    EmptyParameterName { index: usize },
    #[error("pattern group at index {index} must not start with '?'")]
    PatternStartsWithQuestionMark { index: usize },
    #[error("capturing group at index {index} is not allowed inside a pattern group")]
    NestedCapturingGroupNotAllowed { index: usize },
    #[error("unbalanced pattern group starting at index {index}")]
    UnbalancedGroup { index: usize },
    #[error("missing pattern in group at index {index}")]
    EmptyPattern { index: usize },
    #[error("unexpected {found} at index {index}, expected {expected}")]
    UnexpectedToken {
        found: TokenKind,
        index: usize,
        expected: TokenKind,
    },
    #[error("invalid route regex: {0}")]
    Regex(Box<fancy_regex::Error>),
}

impl From<fancy_regex::Error> for PatternError {
    fn from(err: fancy_regex::Error) -> Self {
        Self::Regex(Box::new(err))
    }
}

pub type PatternResult<T> = Result<T, PatternError>;
