mod cli;
mod utils;

pub use cli::*;
use enum_dispatch::enum_dispatch;

pub const DEFAULT_CONFIG: &str = "routes.yml";

#[allow(async_fn_in_trait)]
#[enum_dispatch]
pub trait CmdExecutor {
    async fn execute(self) -> anyhow::Result<()>;
}
