//! `cairn`: chat with an agent described by JSON config files.

use anyhow::Context;
use cairn_agent::AnswerFormat;
use cairn_cli::assemble::{ModelCatalog, agent_factory};
use cairn_cli::config::{AgentFile, ModelsFile, load_json};
use cairn_cli::{Args, repl};
use clap::Parser;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    args.logging().install().context("failed to set up logging")?;

    let models: ModelsFile = load_json(&args.models)?;
    let agent_file: AgentFile = load_json(&args.agent)?;

    let catalog = ModelCatalog::from_file(&models)?;
    let factory = agent_factory(&catalog, &agent_file, AnswerFormat::PlainText)
        .context("failed to assemble agent")?;
    let mut agent = factory()?;
    repl::attach_printing_hooks(&mut agent);

    repl::run(&mut agent, catalog.usage(), BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}
