mod resolve;
mod routes;

use clap::{Parser, Subcommand};
use enum_dispatch::enum_dispatch;

pub use resolve::MatchOpts;
pub use routes::RoutesOpts;

#[derive(Debug, Parser)]
#[command(name = "mars", version, about = "Resolve urls against a typed route table", long_about = None)]
pub struct Opts {
    #[command(subcommand)]
    pub cmd: SubCommand,
}

#[derive(Debug, Subcommand)]
#[enum_dispatch(CmdExecutor)]
pub enum SubCommand {
    #[command(name = "match", about = "Resolve a url and method, print the result as json")]
    Match(MatchOpts),
    #[command(name = "routes", about = "List routes in matching order")]
    Routes(RoutesOpts),
}
