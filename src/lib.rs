pub mod enums;
pub mod errors;
pub mod matcher;
pub mod pattern;
pub mod router;
pub mod types;

pub use enums::{HTTP_METHOD_COUNT, HttpMethod};
pub use errors::{RouterError, RouterResult};
pub use matcher::{
    CompiledMatcher, MatchError, MatcherCache, PathMatch, PathParams, percent_decode,
    percent_encode,
};
pub use pattern::{
    CompileOptions, CompileOptionsBuilder, Key, ParamKey, PatternError, Quantifier, RoutePath,
};
pub use router::{RouteLayer, RouteMatch, Router, RouterOptions, RouterOptionsError};
pub use types::RouteKey;
