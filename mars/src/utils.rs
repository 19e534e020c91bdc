use std::path::Path;

use anyhow::Result;
use mars_router::{Route, Router, RouterConfig};
use tracing::info;

pub(crate) fn load_router(path: impl AsRef<Path>) -> Result<Router<String>> {
    let router = RouterConfig::load(path)?.into_router()?;
    info!("{} routes registered", router.len());
    Ok(router)
}

// "GET,HEAD /about -> about" plus typed placeholders, if any
pub(crate) fn describe_route(route: &Route<String>) -> String {
    let mut methods: Vec<&str> = route.methods().iter().map(String::as_str).collect();
    methods.sort_unstable();

    let mut line = format!(
        "{} {} -> {}",
        methods.join(","),
        route.pattern(),
        route.controller()
    );
    if !route.param_types().is_empty() {
        let params: Vec<String> = route
            .param_types()
            .iter()
            .map(|(name, ty)| format!("{}:{}", name, ty))
            .collect();
        line.push_str(&format!(" [{}]", params.join(", ")));
    }
    line
}
