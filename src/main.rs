use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use toolbridge::Result;

#[derive(Parser)]
#[command(name = "toolbridge")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server configs and slash commands for AI coding assistants", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// MCP server catalog and client config installation
    #[command(subcommand)]
    Mcp(toolbridge::cli::mcp::McpCommands),

    /// Convert universal YAML commands to Claude/Copilot/Gemini formats
    Convert(toolbridge::cli::convert::ConvertArgs),

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Mcp(cmd) => {
            toolbridge::cli::mcp::run(cmd)?;
        }

        Commands::Convert(args) => {
            toolbridge::cli::convert::run(args)?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "toolbridge", &mut io::stdout());
        }
    }

    Ok(())
}
