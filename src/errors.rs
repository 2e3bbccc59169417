use thiserror::Error;

use crate::enums::HttpMethod;
use crate::matcher::MatchError;
use crate::pattern::PatternError;
use crate::router::RouterOptionsError;

#[derive(Debug, Error)]
pub enum RouterError {
    #[error("no route matched {method} {path}")]
    RouteNotFound { method: HttpMethod, path: String },
    #[error(transparent)]
    Pattern(#[from] PatternError),
    #[error(transparent)]
    Match(#[from] MatchError),
    #[error(transparent)]
    Options(#[from] RouterOptionsError),
}

pub type RouterResult<T> = Result<T, RouterError>;
