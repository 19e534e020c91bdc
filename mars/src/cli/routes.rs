use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    CmdExecutor, DEFAULT_CONFIG,
    utils::{describe_route, load_router},
};

#[derive(Debug, Parser)]
pub struct RoutesOpts {
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

impl CmdExecutor for RoutesOpts {
    async fn execute(self) -> Result<()> {
        let router = load_router(&self.config)?;
        for (i, route) in router.routes().enumerate() {
            println!("{:>3}  {}", i, describe_route(route));
        }
        Ok(())
    }
}
