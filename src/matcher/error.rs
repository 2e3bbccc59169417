use thiserror::Error;

use crate::pattern::ParamKey;

/// Per-request failures. Unlike [`PatternError`](crate::pattern::PatternError)
/// these are caused by untrusted input and must be translated into a
/// client-error response, never treated as a server fault.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("parameter '{name}' captured an undecodable value '{raw}'")]
    ParamDecode { name: ParamKey, raw: String },
    #[error("regex engine fault during matching: {0}")]
    Engine(Box<fancy_regex::Error>),
}

impl From<fancy_regex::Error> for MatchError {
    fn from(err: fancy_regex::Error) -> Self {
        Self::Engine(Box::new(err))
    }
}

pub type MatcherResult<T> = Result<T, MatchError>;
