use clap::Parser;
use tfe_teams_relay::cli::{execute_command, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    execute_command(cli).await?;
    Ok(())
}
