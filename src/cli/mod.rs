pub mod commands;
pub mod config;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::cli::config::PortalConfig;

#[derive(Parser)]
#[command(name = "coach")]
#[command(about = "Coach CLI - review client workouts against the FitCoach API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, conflicts_with = "json", help = "Output in human-readable text format (default)")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "API base URL (defaults to FITCOACH_API_URL)")]
    pub api_url: Option<String>,

    #[arg(long, global = true, help = "Bearer token (defaults to FITCOACH_TOKEN)")]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show a client's profile")]
    Client {
        #[arg(help = "Client id")]
        client_id: String,
    },

    #[command(about = "Leave feedback on a client's workout")]
    Feedback(commands::feedback::FeedbackArgs),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        match (cli.text, cli.json) {
            (false, true) => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let config = PortalConfig::from_env().with_overrides(cli.api_url, cli.token);

    match cli.command {
        Commands::Client { client_id } => {
            commands::client::handle(&client_id, &config, output_format).await
        }
        Commands::Feedback(args) => commands::feedback::handle(args, &config, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_for(args: &[&str]) -> Result<OutputFormat, clap::Error> {
        Cli::try_parse_from(args).map(|cli| OutputFormat::from_cli(&cli))
    }

    #[test]
    fn output_format_follows_flags() {
        assert!(matches!(format_for(&["coach", "client", "c1"]), Ok(OutputFormat::Text)));
        assert!(matches!(format_for(&["coach", "--text", "client", "c1"]), Ok(OutputFormat::Text)));
        assert!(matches!(format_for(&["coach", "client", "c1", "--json"]), Ok(OutputFormat::Json)));
    }

    #[test]
    fn text_and_json_are_mutually_exclusive() {
        assert!(format_for(&["coach", "--text", "--json", "client", "c1"]).is_err());
    }
}
