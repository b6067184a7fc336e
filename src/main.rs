use anyhow::Result;
use bankbook::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    bankbook::logging::init(&cli.log_level, cli.log_json)?;
    cli.run().await
}
