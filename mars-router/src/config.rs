use std::{collections::HashMap, fs, path::Path};

use anyhow::Result;
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::{DEFAULT_CACHE_CAPACITY, DEFAULT_METHOD, ErrorKind, Router, RouterError, RouterOptions};

/// Routes in declaration (= matching) order. A pattern may repeat.
pub type ConfigRoutes = Vec<ConfigRoute>;

const KNOWN_METHODS: [&str; 9] = [
    "GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS", "CONNECT", "TRACE",
];

#[derive(Debug, Deserialize)]
pub struct RouterConfig {
    pub name: String,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    pub routes: ConfigRoutes,
    /// Static messages replacing the built-in error messages.
    #[serde(default)]
    pub errors: HashMap<ErrorKind, String>,
}

#[derive(Debug, Deserialize)]
pub struct ConfigRoute {
    pub pattern: String,
    pub handler: String,
    #[serde(default = "default_methods", deserialize_with = "deserialize_methods")]
    pub methods: Vec<String>,
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_methods() -> Vec<String> {
    vec![DEFAULT_METHOD.to_string()]
}

// method names are upper-cased here so matching can stay case-sensitive
fn deserialize_methods<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let methods = Vec::<String>::deserialize(deserializer)?;
    methods
        .into_iter()
        .map(|m| {
            let m = m.to_uppercase();
            if KNOWN_METHODS.contains(&m.as_str()) {
                Ok(m)
            } else {
                Err(serde::de::Error::custom(format!("invalid method: {}", m)))
            }
        })
        .collect()
}

impl RouterConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml::from_str(&content)?;
        info!(
            "loaded router config {} from {}",
            config.name,
            path.as_ref().display()
        );
        Ok(config)
    }

    /// Build a router whose controllers are the configured handler names.
    pub fn into_router(self) -> Result<Router<String>, RouterError> {
        let opts = RouterOptions::builder()
            .cache_capacity(self.cache_capacity)
            .build();
        let mut router = Router::with_options(opts);

        for route in self.routes {
            let methods: Vec<&str> = route.methods.iter().map(String::as_str).collect();
            router.add_route(route.pattern, route.handler, Some(methods.as_slice()))?;
        }
        for (kind, message) in self.errors {
            router.add_error_handler(kind, move || message.clone());
        }
        Ok(router)
    }
}
