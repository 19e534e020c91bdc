use std::{collections::HashMap, fmt, num::NonZeroUsize, str::FromStr};

use lru::LruCache;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

use crate::{Params, Route, RouterError, UrlMatch};

pub const DEFAULT_CACHE_CAPACITY: usize = 100;

type ErrorHandler = Box<dyn Fn() -> String + Send + Sync>;
type CacheKey = (String, String);

/// Ordered route table with first-match-wins resolution.
///
/// Registration takes `&mut self`; matching takes `&self` and only touches the result
/// cache, so a fully registered router can be shared behind an `Arc`.
///
/// The cache is keyed by `(url, method)` alone. Routes or handlers added after a pair was
/// resolved do not affect its cached result until [`Router::clear_cache`] is called.
pub struct Router<C> {
    routes: Vec<Route<C>>,
    handlers: HashMap<ErrorKind, ErrorHandler>,
    // None when caching is disabled
    cache: Option<Mutex<LruCache<CacheKey, MatchResult<C>>>>,
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct RouterOptions {
    /// 0 disables caching.
    #[builder(default = DEFAULT_CACHE_CAPACITY)]
    pub cache_capacity: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NoRoute,
    InvalidMethod,
    TypeMismatch,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult<C> {
    Success { controller: C, params: Params },
    Error { kind: ErrorKind, error: String },
}

impl<C> Router<C> {
    pub fn new() -> Self {
        Self::with_options(RouterOptions::default())
    }

    pub fn with_options(opts: RouterOptions) -> Self {
        Self {
            routes: Vec::new(),
            handlers: HashMap::new(),
            cache: NonZeroUsize::new(opts.cache_capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    /// Compile and append a route. Overlapping patterns are allowed; the earlier one wins.
    pub fn add_route(
        &mut self,
        pattern: impl Into<String>,
        controller: C,
        methods: Option<&[&str]>,
    ) -> Result<&mut Self, RouterError> {
        let route = Route::new(pattern, controller, methods)?;
        debug!(
            "route added: {} {:?} {:?}",
            route.pattern(),
            route.methods(),
            route.param_types()
        );
        self.routes.push(route);
        Ok(self)
    }

    pub fn add_error_handler<F>(&mut self, kind: ErrorKind, handler: F) -> &mut Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.handlers.insert(kind, Box::new(handler));
        self
    }

    pub fn routes(&self) -> impl Iterator<Item = &Route<C>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().clear();
        }
    }

    pub fn cached_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.lock().len())
    }

    fn error(&self, kind: ErrorKind, default: impl FnOnce() -> String) -> MatchResult<C> {
        let error = match self.handlers.get(&kind) {
            Some(handler) => handler(),
            None => default(),
        };
        MatchResult::Error { kind, error }
    }
}

impl<C: Clone> Router<C> {
    /// Resolve `(url, method)` against the route table.
    ///
    /// `method` is compared verbatim; callers normalise case.
    pub fn match_route(&self, url: &str, method: &str) -> MatchResult<C> {
        let key = (url.to_string(), method.to_string());
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.lock().get(&key) {
                trace!("cache hit: {} {}", method, url);
                return hit.clone();
            }
        }

        let result = self.resolve(url, method);
        debug!("{} {} -> {}", method, url, result.status_code());
        if let Some(cache) = &self.cache {
            cache.lock().put(key, result.clone());
        }
        result
    }

    fn resolve(&self, url: &str, method: &str) -> MatchResult<C> {
        let mut method_mismatch = false;

        for route in &self.routes {
            match route.match_url(url) {
                UrlMatch::TypeError => {
                    warn!("type mismatch: {} against {}", url, route.pattern());
                    return self.error(ErrorKind::TypeMismatch, || {
                        format!("Type mismatch in route {}", route.pattern())
                    });
                }
                UrlMatch::Matched(params) => {
                    if route.match_method(method) {
                        return MatchResult::Success {
                            controller: route.controller().clone(),
                            params,
                        };
                    }
                    method_mismatch = true;
                }
                UrlMatch::NoMatch => {}
            }
        }

        if method_mismatch {
            self.error(ErrorKind::InvalidMethod, || "Invalid method".to_string())
        } else {
            self.error(ErrorKind::NoRoute, || "No matching route found".to_string())
        }
    }
}

impl<C> Default for Router<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: fmt::Debug> fmt::Debug for Router<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes)
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .field("cached", &self.cached_len())
            .finish()
    }
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NoRoute => "no_route",
            ErrorKind::InvalidMethod => "invalid_method",
            ErrorKind::TypeMismatch => "type_mismatch",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::NoRoute => 404,
            ErrorKind::InvalidMethod => 405,
            ErrorKind::TypeMismatch => 400,
        }
    }
}

impl FromStr for ErrorKind {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no_route" => Ok(ErrorKind::NoRoute),
            "invalid_method" => Ok(ErrorKind::InvalidMethod),
            "type_mismatch" => Ok(ErrorKind::TypeMismatch),
            v => Err(RouterError::UnknownErrorTag(v.to_string())),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<C> MatchResult<C> {
    pub fn status_code(&self) -> u16 {
        match self {
            MatchResult::Success { .. } => 200,
            MatchResult::Error { kind, .. } => kind.status_code(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, MatchResult::Success { .. })
    }

    pub fn controller(&self) -> Option<&C> {
        match self {
            MatchResult::Success { controller, .. } => Some(controller),
            MatchResult::Error { .. } => None,
        }
    }

    pub fn params(&self) -> Option<&Params> {
        match self {
            MatchResult::Success { params, .. } => Some(params),
            MatchResult::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            MatchResult::Success { .. } => None,
            MatchResult::Error { error, .. } => Some(error),
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            MatchResult::Success { .. } => None,
            MatchResult::Error { kind, .. } => Some(*kind),
        }
    }
}

// {"controller": .., "params": .., "status_code": 200} or
// {"controller": null, "error": .., "status_code": 4xx}
impl<C: Serialize> Serialize for MatchResult<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MatchResult", 3)?;
        match self {
            MatchResult::Success { controller, params } => {
                state.serialize_field("controller", controller)?;
                state.serialize_field("params", params)?;
            }
            MatchResult::Error { error, .. } => {
                state.serialize_field("controller", &None::<C>)?;
                state.serialize_field("error", error)?;
            }
        }
        state.serialize_field("status_code", &self.status_code())?;
        state.end()
    }
}
