//! `toolbridge convert` - render universal command documents into the three
//! platform formats.

use crate::commands::{self, CommandDocument, Rendered};
use crate::fetch;
use crate::prompt;
use crate::writer::{self, WriteStatus};
use crate::Result;
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct ConvertArgs {
    /// Source directory of universal YAML command definitions
    #[arg(long, conflicts_with = "bundled")]
    pub source: Option<PathBuf>,

    /// Download the bundled command pack (optionally from a custom URL)
    #[arg(long, value_name = "URL", num_args = 0..=1, default_missing_value = fetch::DEFAULT_PACK_URL)]
    pub bundled: Option<String>,

    /// Output directory for Claude Code commands
    #[arg(long, default_value = ".claude/commands")]
    pub claude_dir: PathBuf,

    /// Output directory for Copilot prompt files
    #[arg(long, default_value = ".github/prompts")]
    pub copilot_dir: PathBuf,

    /// Output directory for Gemini CLI commands
    #[arg(long, default_value = ".gemini/commands")]
    pub gemini_dir: PathBuf,

    /// Print the full content that would be written, without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Overwrite existing files without asking
    #[arg(short, long)]
    pub force: bool,
}

pub fn run(args: ConvertArgs) -> Result<()> {
    // The TempDir must outlive the whole batch when using the bundled pack.
    let mut _pack_dir = None;
    let source = match (&args.source, &args.bundled) {
        (Some(source), _) => source.clone(),
        (None, Some(url)) => {
            let temp = tempfile::TempDir::new()?;
            let root = fetch::fetch_command_pack(url, temp.path())?;
            _pack_dir = Some(temp);
            root
        }
        (None, None) => {
            anyhow::bail!("either --source <dir> or --bundled is required");
        }
    };

    let outcome = commands::load_documents(&source)?;
    for issue in &outcome.issues {
        println!(
            "{}",
            format!("⚠ Skipping {}: {}", issue.path.display(), issue.reason).yellow()
        );
    }
    if outcome.documents.is_empty() {
        anyhow::bail!(
            "no valid command documents found under {}",
            source.display()
        );
    }

    println!(
        "{}",
        format!("📦 Converting {} command(s)...", outcome.documents.len()).cyan()
    );

    let mut summary = Summary::default();
    for doc in &outcome.documents {
        convert_one(doc, &args, &mut summary);
    }

    println!();
    println!(
        "{}",
        format!(
            "Done: {} written, {} skipped, {} failed, {} source file(s) unreadable",
            summary.wrote,
            summary.skipped,
            summary.failed,
            outcome.issues.len()
        )
        .cyan()
        .bold()
    );
    Ok(())
}

#[derive(Default)]
struct Summary {
    wrote: usize,
    skipped: usize,
    failed: usize,
}

fn convert_one(doc: &CommandDocument, args: &ConvertArgs, summary: &mut Summary) {
    let targets: [(&Path, Rendered); 3] = [
        (&args.claude_dir, commands::render_claude(doc)),
        (&args.copilot_dir, commands::render_copilot(doc)),
        (&args.gemini_dir, commands::render_gemini(doc)),
    ];

    for (root, rendered) in targets {
        if args.dry_run {
            println!();
            println!(
                "{}",
                format!("--- {} ---", root.join(&rendered.path).display()).cyan()
            );
            print!("{}", rendered.text);
            summary.wrote += 1;
            continue;
        }

        let force = args.force;
        let mut confirm = |path: &Path| {
            if force {
                return true;
            }
            let question = format!("Overwrite {}?", path.display());
            // Declining (or no terminal) skips; the existing file wins.
            prompt::prompt_confirm(&question, false).unwrap_or(false)
        };

        match writer::write_rendered(root, &rendered, &mut confirm) {
            Ok((path, WriteStatus::Wrote)) => {
                println!("{}", format!("✓ {} → {}", doc.name, path.display()).green());
                summary.wrote += 1;
            }
            Ok((path, WriteStatus::Skipped)) => {
                println!(
                    "{}",
                    format!("− {} exists, kept as-is", path.display()).bright_black()
                );
                summary.skipped += 1;
            }
            Err(e) => {
                println!("{}", format!("✗ {}: {}", doc.name, e).red());
                summary.failed += 1;
            }
        }
    }
}
