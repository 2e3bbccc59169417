use fancy_regex::Regex;

use crate::pattern::{CompileOptions, Key, ParamKey, PatternResult, RoutePath, compile};

use super::decode::percent_decode;
use super::error::{MatchError, MatcherResult};
use super::params::PathParams;

/// One compiled route pattern: the automaton, its ordered parameter keys and
/// the two fast-path flags. Immutable after construction and safe to share
/// across threads; every [`find`](CompiledMatcher::find) call returns a fresh
/// [`PathMatch`].
#[derive(Debug)]
pub struct CompiledMatcher {
    source: RoutePath,
    regex: Regex,
    keys: Vec<Key>,
    fast_wildcard: bool,
    fast_slash: bool,
}

/// Outcome of one successful match: the consumed portion of the candidate
/// path and the decoded parameters, in capture order.
#[derive(Debug, Clone, PartialEq)]
pub struct PathMatch {
    pub path: String,
    pub params: PathParams,
}

impl CompiledMatcher {
    pub fn new(path: impl Into<RoutePath>, options: &CompileOptions) -> PatternResult<Self> {
        let source = path.into();
        let (regex, keys) = compile(&source, options)?;

        // The fast paths key off the literal source pattern, not anything
        // derivable from the automaton.
        let fast_wildcard = matches!(&source, RoutePath::Template(t) if t == "*");
        let fast_slash = matches!(&source, RoutePath::Template(t) if t == "/") && !options.end;

        Ok(Self {
            source,
            regex,
            keys,
            fast_wildcard,
            fast_slash,
        })
    }

    /// The pattern this matcher was compiled from.
    pub fn source(&self) -> &RoutePath {
        &self.source
    }

    /// Automaton source text, mostly useful for diagnostics.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Parameter descriptors in capture-group order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Tests `path` and extracts parameters. `Ok(None)` is a clean no-match;
    /// `Err` is either an undecodable capture (client input) or an engine
    /// runtime fault.
    #[tracing::instrument(level = "trace", skip(self), fields(pattern = %self.source))]
    pub fn find(&self, path: &str) -> MatcherResult<Option<PathMatch>> {
        if self.fast_wildcard {
            let decoded = decode_capture(&ParamKey::Index(0), path)?;
            let mut params = PathParams::new();
            params.insert(ParamKey::Index(0), Some(decoded));
            return Ok(Some(PathMatch {
                path: path.to_string(),
                params,
            }));
        }

        if self.fast_slash {
            return Ok(Some(PathMatch {
                path: String::new(),
                params: PathParams::new(),
            }));
        }

        let Some(captures) = self.regex.captures(path)? else {
            return Ok(None);
        };

        let consumed = captures
            .get(0)
            .map(|group| group.as_str().to_string())
            .unwrap_or_default();

        let mut params = PathParams::new();
        for (position, key) in self.keys.iter().enumerate() {
            let value = match captures.get(position + 1) {
                Some(group) => Some(decode_capture(&key.name, group.as_str())?),
                None => None,
            };
            params.insert(key.name.clone(), value);
        }

        Ok(Some(PathMatch {
            path: consumed,
            params,
        }))
    }
}

fn decode_capture(name: &ParamKey, raw: &str) -> MatcherResult<String> {
    percent_decode(raw).ok_or_else(|| MatchError::ParamDecode {
        name: name.clone(),
        raw: raw.to_string(),
    })
}
