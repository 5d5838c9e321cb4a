use clap::Parser;
use options::run_options::RunOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = RunOptions::parse();

    monitor_system::runner::run(args).await
}
