//! `toolbridge mcp` - install MCP server configs into client config files.

use crate::error::EngineError;
use crate::projector::Client;
use crate::prompt;
use crate::registry::ServerRegistry;
use crate::tokens::{self, TokenSet, WORKSPACE_FOLDER};
use crate::writer;
use crate::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum McpCommands {
    /// List catalog servers and per-client support
    List,

    /// Install selected servers into client config files
    Install(InstallArgs),
}

#[derive(Args)]
pub struct InstallArgs {
    /// Server keys to install (interactive selection when omitted)
    pub servers: Vec<String>,

    /// Target client, repeatable: claude-code, claude-desktop, vscode, gemini
    #[arg(long = "client", value_name = "CLIENT")]
    pub clients: Vec<String>,

    /// Install for every supported client
    #[arg(long)]
    pub all: bool,

    /// Workspace folder substituted for ${WORKSPACE_FOLDER}
    #[arg(long)]
    pub workspace: Option<PathBuf>,

    /// Print the full content that would be written, without writing
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(cmd: McpCommands) -> Result<()> {
    match cmd {
        McpCommands::List => run_list(),
        McpCommands::Install(args) => run_install(args),
    }
}

fn run_list() -> Result<()> {
    let registry = ServerRegistry::builtin()?;

    println!("{}", "Available MCP servers:".cyan().bold());
    println!();
    for key in registry.list() {
        let descriptor = registry.get(key)?;
        let supported: Vec<&str> = Client::ALL
            .iter()
            .filter(|c| descriptor.projection(**c).is_some())
            .map(|c| c.as_str())
            .collect();

        println!(
            "  {} {} — {}",
            key.green().bold(),
            format!("[{}]", supported.join(", ")).bright_black(),
            descriptor.description
        );
        if !descriptor.required_tokens.is_empty() {
            println!(
                "    {} {}",
                "requires:".bright_black(),
                descriptor.required_tokens.join(", ").bright_black()
            );
        }
    }

    Ok(())
}

fn run_install(args: InstallArgs) -> Result<()> {
    let registry = ServerRegistry::builtin()?;

    let servers = select_servers(&registry, &args.servers)?;
    let clients = select_clients(&args)?;
    let workspace = resolve_workspace(args.workspace)?;

    let mut token_set = collect_tokens(&registry, &servers)?;
    token_set.insert(
        WORKSPACE_FOLDER.to_string(),
        workspace.to_string_lossy().into_owned(),
    );

    // Servers with unresolved required tokens are skipped per-item; when
    // nothing is installable the run aborts before any write.
    let mut installable = Vec::new();
    for key in &servers {
        let validation = registry.validate_tokens(key, &token_set)?;
        if validation.valid {
            installable.push(key.clone());
        } else {
            println!(
                "{}",
                format!(
                    "⚠ Skipping '{}': missing tokens {}",
                    key,
                    validation.missing.join(", ")
                )
                .yellow()
            );
        }
    }
    if installable.is_empty() {
        anyhow::bail!("no selected server has all required tokens resolved");
    }

    let mut summary = Summary::default();
    for client in clients {
        install_for_client(
            &registry,
            client,
            &installable,
            &token_set,
            &workspace,
            args.dry_run,
            &mut summary,
        );
    }

    println!();
    println!(
        "{}",
        format!(
            "Done: {} written, {} skipped, {} failed",
            summary.wrote, summary.skipped, summary.failed
        )
        .cyan()
        .bold()
    );
    if summary.wrote == 0 && summary.failed > 0 {
        anyhow::bail!("no client config was written");
    }
    Ok(())
}

#[derive(Default)]
struct Summary {
    wrote: usize,
    skipped: usize,
    failed: usize,
}

fn select_servers(registry: &ServerRegistry, requested: &[String]) -> Result<Vec<String>> {
    if !requested.is_empty() {
        // Fail fast on unknown keys before anything is prompted or written.
        for key in requested {
            registry
                .get(key)
                .with_context(|| format!("unknown server '{}'", key))?;
        }
        return Ok(requested.to_vec());
    }

    let keys: Vec<String> = registry.list().iter().map(|k| k.to_string()).collect();
    let labels: Vec<String> = keys
        .iter()
        .map(|k| {
            let d = registry.get(k).expect("listed key");
            format!("{} — {}", d.display_name, d.description)
        })
        .collect();

    let picked = prompt::prompt_multi("Select servers to install", &labels)?;
    if picked.is_empty() {
        anyhow::bail!("no servers selected");
    }
    Ok(picked.into_iter().map(|i| keys[i].clone()).collect())
}

fn select_clients(args: &InstallArgs) -> Result<Vec<Client>> {
    if args.all {
        return Ok(Client::ALL.to_vec());
    }
    if !args.clients.is_empty() {
        return args
            .clients
            .iter()
            .map(|c| c.parse::<Client>().map_err(anyhow::Error::msg))
            .collect();
    }

    let labels: Vec<String> = Client::ALL
        .iter()
        .map(|c| c.display_name().to_string())
        .collect();
    let picked = prompt::prompt_multi("Select target clients", &labels)?;
    if picked.is_empty() {
        anyhow::bail!("no clients selected");
    }
    Ok(picked.into_iter().map(|i| Client::ALL[i]).collect())
}

fn resolve_workspace(flag: Option<PathBuf>) -> Result<PathBuf> {
    let path = match flag {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir()?;
            PathBuf::from(prompt::prompt_text_with_default(
                "Workspace folder",
                &cwd.to_string_lossy(),
            )?)
        }
    };

    if !path.is_dir() {
        return Err(EngineError::ValidationFailed(format!(
            "workspace path does not exist: {}",
            path.display()
        ))
        .into());
    }
    Ok(path)
}

/// Resolve required tokens in server declaration order: environment first,
/// interactive prompt second. A failed prompt leaves the token missing so
/// validation can report it.
fn collect_tokens(registry: &ServerRegistry, servers: &[String]) -> Result<TokenSet> {
    let mut token_set = TokenSet::new();

    for key in servers {
        let descriptor = registry.get(key)?;
        for name in &descriptor.required_tokens {
            if token_set.contains_key(name) {
                continue;
            }
            match std::env::var(name) {
                Ok(value) if !value.trim().is_empty() => {
                    println!("{}", format!("🔑 {} (from environment)", name).bright_black());
                    token_set.insert(name.clone(), value);
                }
                _ => {
                    let question = format!("Enter value for {}", name);
                    match prompt::prompt_text(&question, prompt::non_empty) {
                        Ok(value) => {
                            token_set.insert(name.clone(), value);
                        }
                        Err(e) => {
                            println!("{}", format!("⚠ {}: {}", name, e).yellow());
                        }
                    }
                }
            }
        }
    }

    Ok(token_set)
}

fn install_for_client(
    registry: &ServerRegistry,
    client: Client,
    servers: &[String],
    token_set: &TokenSet,
    workspace: &Path,
    dry_run: bool,
    summary: &mut Summary,
) {
    let mut entries: Vec<(String, Value)> = Vec::new();
    let mut input_names: Vec<String> = Vec::new();

    for key in servers {
        let descriptor = match registry.get(key) {
            Ok(d) => d,
            Err(e) => {
                println!("{}", format!("✗ {}: {}", key, e).red());
                summary.failed += 1;
                continue;
            }
        };

        let Some(fragment) = descriptor.projection(client) else {
            println!(
                "{}",
                format!("⚠ '{}' has no {} projection, skipping", key, client).yellow()
            );
            summary.skipped += 1;
            continue;
        };

        let resolved = if client == Client::VsCode {
            for name in tokens::input_placeholders(&fragment) {
                if !input_names.contains(&name) {
                    input_names.push(name);
                }
            }
            tokens::rewrite_inputs(&fragment).and_then(|f| tokens::substitute(&f, token_set))
        } else {
            tokens::substitute(&fragment, token_set)
        };

        match resolved {
            Ok(value) => entries.push((key.clone(), value)),
            Err(e) => {
                println!("{}", format!("✗ {} for {}: {}", key, client, e).red());
                summary.failed += 1;
            }
        }
    }

    if entries.is_empty() {
        return;
    }

    match write_client_config(client, &entries, &input_names, workspace, dry_run) {
        Ok(destination) => {
            let verb = if dry_run { "Would write" } else { "✓ Wrote" };
            for (key, _) in &entries {
                println!(
                    "{}",
                    format!("{} '{}' → {}", verb, key, destination.display()).green()
                );
                summary.wrote += 1;
            }
        }
        Err(e) => {
            println!("{}", format!("✗ {}: {}", client.display_name(), e).red());
            summary.failed += entries.len();
        }
    }
}

/// Produce the target config for one client, then either print it (dry-run)
/// or persist it. VS Code's workspace file is authored fresh (tool-owned);
/// the other targets merge into whatever is already there.
fn write_client_config(
    client: Client,
    entries: &[(String, Value)],
    input_names: &[String],
    workspace: &Path,
    dry_run: bool,
) -> Result<PathBuf, EngineError> {
    let destination = config_path(client, workspace)?;

    let content = match client {
        Client::VsCode => {
            let mut config = json!({
                "servers": Value::Object(
                    entries.iter().cloned().collect::<serde_json::Map<_, _>>()
                )
            });
            if !input_names.is_empty() {
                config["inputs"] = Value::Array(
                    input_names
                        .iter()
                        .map(|name| {
                            json!({
                                "id": name,
                                "type": "promptString",
                                "password": true
                            })
                        })
                        .collect(),
                );
            }
            config
        }
        _ => writer::merged_config(&destination, client.section_name(), entries)?,
    };

    if dry_run {
        println!();
        println!("{}", format!("--- {} ---", destination.display()).cyan());
        print!("{}", writer::pretty(&content));
        return Ok(destination);
    }

    match client {
        Client::VsCode => writer::author_json_config(&destination, &content)?,
        _ => writer::merge_json_config(&destination, client.section_name(), entries)?,
    }
    Ok(destination)
}

fn config_path(client: Client, workspace: &Path) -> Result<PathBuf, EngineError> {
    match client {
        Client::ClaudeCode => Ok(workspace.join(".mcp.json")),
        Client::VsCode => Ok(workspace.join(".vscode/mcp.json")),
        Client::Gemini => Ok(workspace.join(".gemini/settings.json")),
        Client::ClaudeDesktop => {
            if cfg!(target_os = "linux") {
                return Err(EngineError::UnsupportedPlatform(
                    "Claude Desktop has no Linux build".to_string(),
                ));
            }
            let base = dirs::config_dir().ok_or_else(|| {
                EngineError::UnsupportedPlatform("no config directory on this OS".to_string())
            })?;
            Ok(base.join("Claude").join("claude_desktop_config.json"))
        }
    }
}
