pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "myflix")]
#[command(about = "myFlix - movie catalogue and user accounts REST API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Print command results as JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on; overrides MYFLIX_PORT")]
        port: Option<u16>,
        #[arg(long, help = "JSON file of movies to load before serving")]
        seed: Option<PathBuf>,
    },

    #[command(about = "Create the Postgres tables (requires DATABASE_URL)")]
    Migrate,

    #[command(about = "Insert movies from a JSON array file into the configured store")]
    Seed {
        #[arg(help = "Path to the movies JSON file")]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command.unwrap_or(Commands::Serve { port: None, seed: None }) {
        Commands::Serve { port, seed } => commands::serve::handle(port, seed).await,
        Commands::Migrate => commands::migrate::handle(output_format).await,
        Commands::Seed { file } => commands::seed::handle(file, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_default() {
        let cli = Cli::parse_from(["myflix"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_serve_flags() {
        let cli = Cli::parse_from(["myflix", "serve", "--port", "9000", "--seed", "movies.json"]);
        match cli.command {
            Some(Commands::Serve { port, seed }) => {
                assert_eq!(port, Some(9000));
                assert_eq!(seed, Some(PathBuf::from("movies.json")));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn json_flag_is_global() {
        let cli = Cli::parse_from(["myflix", "seed", "movies.json", "--json"]);
        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
    }
}
