use clap::Parser;
use mars::{CmdExecutor, Opts};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt::Layer, layer::SubscriberExt, util::SubscriberInitExt as _,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the json result, logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = Layer::new().with_writer(std::io::stderr).with_filter(filter);
    tracing_subscriber::registry().with(layer).init();

    let opts = Opts::parse();
    opts.cmd.execute().await
}
