use crate::matcher::{CompiledMatcher, MatcherResult, PathMatch};
use crate::pattern::{CompileOptions, PatternResult, RoutePath};
use crate::types::RouteKey;

/// One registered route: its assigned key, the pattern text it was declared
/// with and the matcher compiled from it. Match outcomes are returned, never
/// stored on the layer.
#[derive(Debug)]
pub struct RouteLayer {
    key: RouteKey,
    pattern: String,
    matcher: CompiledMatcher,
}

impl RouteLayer {
    pub fn new(key: RouteKey, path: RoutePath, options: &CompileOptions) -> PatternResult<Self> {
        let pattern = path.to_string();
        let matcher = CompiledMatcher::new(path, options)?;

        Ok(Self {
            key,
            pattern,
            matcher,
        })
    }

    pub fn key(&self) -> RouteKey {
        self.key
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matcher(&self) -> &CompiledMatcher {
        &self.matcher
    }

    pub fn find(&self, path: &str) -> MatcherResult<Option<PathMatch>> {
        self.matcher.find(path)
    }
}
