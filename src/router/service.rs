use parking_lot::RwLock;

use crate::enums::{HTTP_METHOD_COUNT, HttpMethod};
use crate::errors::{RouterError, RouterResult};
use crate::matcher::PathParams;
use crate::pattern::RoutePath;
use crate::types::RouteKey;

use super::layer::RouteLayer;
use super::options::RouterOptions;

/// Outcome of a successful route lookup: the registered route's key, the
/// consumed portion of the path and the decoded parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteMatch {
    pub key: RouteKey,
    pub path: String,
    pub params: PathParams,
}

#[derive(Debug, Default)]
struct RouterState {
    method_layers: [Vec<RouteLayer>; HTTP_METHOD_COUNT],
    any_layers: Vec<RouteLayer>,
    next_key: RouteKey,
}

impl RouterState {
    fn assign_key(&mut self) -> RouteKey {
        let key = self.next_key;
        self.next_key += 1;
        key
    }
}

/// Method-dispatching route table. Registration compiles the pattern up
/// front; lookups share the compiled layers read-only, so they can run
/// concurrently with each other.
#[derive(Debug)]
pub struct Router {
    options: RouterOptions,
    state: RwLock<RouterState>,
}

impl Router {
    pub fn new(options: Option<RouterOptions>) -> Self {
        Self {
            options: options.unwrap_or_default(),
            state: RwLock::new(RouterState::default()),
        }
    }

    /// Registers `path` under one method. Pattern defects surface here, at
    /// registration time, never during traffic.
    pub fn add(&self, method: HttpMethod, path: impl Into<RoutePath>) -> RouterResult<RouteKey> {
        let mut state = self.state.write();
        let key = state.assign_key();
        let layer = RouteLayer::new(key, path.into(), &self.options.compile)?;

        tracing::event!(
            tracing::Level::DEBUG,
            method = %method,
            pattern = %layer.pattern(),
            key,
            "route registered"
        );

        state.method_layers[method as usize].push(layer);
        Ok(key)
    }

    /// Registers `path` for every method; consulted after the method's own
    /// layers during lookup.
    pub fn add_all(&self, path: impl Into<RoutePath>) -> RouterResult<RouteKey> {
        let mut state = self.state.write();
        let key = state.assign_key();
        let layer = RouteLayer::new(key, path.into(), &self.options.compile)?;

        tracing::event!(
            tracing::Level::DEBUG,
            method = "*",
            pattern = %layer.pattern(),
            key,
            "route registered"
        );

        state.any_layers.push(layer);
        Ok(key)
    }

    /// Finds the first registered route matching `path`: the method's own
    /// layers in registration order, then the any-method layers. A decode
    /// failure in a candidate's parameters aborts the walk; it is the
    /// caller's 400-class condition, not a reason to try the next route.
    #[tracing::instrument(level = "trace", skip(self, path), fields(method = %method, path = %path))]
    pub fn find(&self, method: HttpMethod, path: &str) -> RouterResult<RouteMatch> {
        let candidate = self.strip_prefix(path).ok_or_else(|| {
            RouterError::RouteNotFound {
                method,
                path: path.to_string(),
            }
        })?;

        let state = self.state.read();
        let layers = state.method_layers[method as usize]
            .iter()
            .chain(state.any_layers.iter());

        for layer in layers {
            if let Some(found) = layer.find(candidate)? {
                return Ok(RouteMatch {
                    key: layer.key(),
                    path: found.path,
                    params: found.params,
                });
            }
        }

        Err(RouterError::RouteNotFound {
            method,
            path: candidate.to_string(),
        })
    }

    /// Removes the configured routing prefix; `None` when the path lives
    /// outside it. A path equal to the prefix matches as the root path.
    fn strip_prefix<'a>(&self, path: &'a str) -> Option<&'a str> {
        match &self.options.prefix {
            None => Some(path),
            Some(prefix) => {
                let rest = path.strip_prefix(prefix.as_str())?;
                if rest.is_empty() { Some("/") } else { Some(rest) }
            }
        }
    }
}
