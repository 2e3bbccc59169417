mod cache;
mod compiled;
mod decode;
mod error;
mod params;

pub use cache::{DEFAULT_CACHE_CAPACITY, MatcherCache};
pub use compiled::{CompiledMatcher, PathMatch};
pub use decode::{percent_decode, percent_encode};
pub use error::{MatchError, MatcherResult};
pub use params::PathParams;
