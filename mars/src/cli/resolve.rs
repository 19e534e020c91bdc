use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use mars_router::MatchResult;

use crate::{CmdExecutor, DEFAULT_CONFIG, utils::load_router};

#[derive(Debug, Parser)]
pub struct MatchOpts {
    /// Url path to resolve, e.g. /posts/id/123
    pub url: String,
    #[arg(short, long, default_value = "GET")]
    pub method: String,
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

impl CmdExecutor for MatchOpts {
    async fn execute(self) -> Result<()> {
        let ret = resolve(&self)?;
        println!("{}", serde_json::to_string_pretty(&ret)?);
        if !ret.is_success() {
            bail!("{} {} -> {}", self.method, self.url, ret.status_code());
        }
        Ok(())
    }
}

fn resolve(opts: &MatchOpts) -> Result<MatchResult<String>> {
    let router = load_router(&opts.config)?;
    Ok(router.match_route(&opts.url, &opts.method.to_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(url: &str, method: &str) -> MatchOpts {
        MatchOpts {
            url: url.to_string(),
            method: method.to_string(),
            config: PathBuf::from("fixtures/routes.yml"),
        }
    }

    #[test]
    fn resolve_should_normalise_method() -> Result<()> {
        let ret = resolve(&opts("/posts/id/42", "post"))?;
        assert_eq!(ret.controller().map(String::as_str), Some("create_post"));
        Ok(())
    }

    #[tokio::test]
    async fn execute_should_succeed_on_match() -> Result<()> {
        opts("/user/johndoe", "GET").execute().await
    }

    #[tokio::test]
    async fn execute_should_fail_on_error_status() {
        let err = opts("/user/johndoe", "DELETE").execute().await.unwrap_err();
        assert_eq!(err.to_string(), "DELETE /user/johndoe -> 405");
    }

    #[tokio::test]
    async fn execute_should_fail_on_missing_config() {
        let mut opts = opts("/", "GET");
        opts.config = PathBuf::from("fixtures/missing.yml");
        assert!(opts.execute().await.is_err());
    }
}
