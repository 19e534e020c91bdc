use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use tracing::trace;

use crate::{ParamType, Params, RouterError};

// `{name}` or `{name:type}`
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)(?::(\w+))?\}").expect("placeholder regex"));

pub const DEFAULT_METHOD: &str = "GET";

/// One compiled URL template.
#[derive(Debug, Clone)]
pub struct Route<C> {
    pattern: String,
    regex: Regex,
    param_types: IndexMap<String, ParamType>,
    controller: C,
    methods: HashSet<String>,
}

/// Outcome of matching a url against a single route, ignoring the method.
#[derive(Debug, Clone, PartialEq)]
pub enum UrlMatch {
    Matched(Params),
    TypeError,
    NoMatch,
}

impl<C> Route<C> {
    /// Compile `pattern`. `None` or an empty method list means `GET` only.
    pub fn new(
        pattern: impl Into<String>,
        controller: C,
        methods: Option<&[&str]>,
    ) -> Result<Self, RouterError> {
        let pattern = pattern.into();
        let (regex, param_types) = compile(&pattern)?;
        let methods: HashSet<String> = match methods {
            Some(methods) if !methods.is_empty() => {
                methods.iter().map(|m| m.to_string()).collect()
            }
            _ => HashSet::from([DEFAULT_METHOD.to_string()]),
        };

        Ok(Self {
            pattern,
            regex,
            param_types,
            controller,
            methods,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn methods(&self) -> &HashSet<String> {
        &self.methods
    }

    pub fn param_types(&self) -> &IndexMap<String, ParamType> {
        &self.param_types
    }

    pub fn match_url(&self, url: &str) -> UrlMatch {
        let Some(caps) = self.regex.captures(url) else {
            return UrlMatch::NoMatch;
        };

        let mut params = Params::with_capacity(self.param_types.len());
        // capture groups are positional, in the same order as `param_types`
        for (i, (name, ty)) in self.param_types.iter().enumerate() {
            let raw = caps.get(i + 1).map(|m| m.as_str()).unwrap_or_default();
            match ty.convert(raw) {
                Ok(value) => {
                    params.insert(name.clone(), value);
                }
                Err(e) => {
                    trace!("{} on {}: {}", self.pattern, url, e);
                    return UrlMatch::TypeError;
                }
            }
        }
        UrlMatch::Matched(params)
    }

    /// Exact, case-sensitive membership test.
    pub fn match_method(&self, method: &str) -> bool {
        self.methods.contains(method)
    }
}

fn compile(pattern: &str) -> Result<(Regex, IndexMap<String, ParamType>), RouterError> {
    let mut param_types = IndexMap::new();
    let mut source = String::with_capacity(pattern.len() + 2);
    source.push('^');

    let mut last = 0;
    for caps in PLACEHOLDER.captures_iter(pattern) {
        let Some(token) = caps.get(0) else {
            continue;
        };
        let name = &caps[1];
        let ty = ParamType::from_tag(caps.get(2).map(|m| m.as_str()));
        if param_types.insert(name.to_string(), ty).is_some() {
            return Err(RouterError::DuplicateParam {
                pattern: pattern.to_string(),
                name: name.to_string(),
            });
        }

        source.push_str(&regex::escape(&pattern[last..token.start()]));
        source.push_str("([^/]+)");
        last = token.end();
    }
    source.push_str(&regex::escape(&pattern[last..]));
    source.push('$');

    let regex = Regex::new(&source).map_err(|source| RouterError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;
    Ok((regex, param_types))
}
