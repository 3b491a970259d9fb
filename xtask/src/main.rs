//! xtask - Build tasks for fbfsvg
//!
//! Run with: cargo xtask <command>
//!
//! Commands:
//! - gen-man: Generate man pages from the CLI definitions

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Command, CommandFactory, Parser, Subcommand};
use clap_mangen::Man;

use fbfsvg::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build tasks for fbfsvg")]
struct Xtask {
    #[command(subcommand)]
    command: XtaskCommand,
}

#[derive(Subcommand)]
enum XtaskCommand {
    /// Generate man pages from CLI definitions
    #[command(name = "gen-man")]
    GenMan {
        /// Output directory (default: docs/man)
        #[arg(long, short, default_value = "docs/man")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Xtask::parse();

    match args.command {
        XtaskCommand::GenMan { output } => generate_man_pages(&output),
    }
}

/// Generate man pages for the root command and every visible subcommand.
fn generate_man_pages(man_dir: &Path) -> Result<()> {
    fs::create_dir_all(man_dir).context("Failed to create man directory")?;

    let cmd = Cli::command();
    write_man_page(man_dir, "fbfsvg", &cmd)?;

    for subcommand in cmd.get_subcommands().filter(|c| !c.is_hide_set()) {
        let name = format!("fbfsvg-{}", subcommand.get_name());
        write_man_page(man_dir, &name, subcommand)?;

        for nested in subcommand.get_subcommands().filter(|c| !c.is_hide_set()) {
            let nested_name = format!("{}-{}", name, nested.get_name());
            write_man_page(man_dir, &nested_name, nested)?;
        }
    }

    println!("Man pages generated in {}", man_dir.display());
    Ok(())
}

fn write_man_page(man_dir: &Path, name: &str, cmd: &Command) -> Result<()> {
    let mut buffer = Vec::new();
    Man::new(cmd.clone()).render(&mut buffer)?;
    let path = man_dir.join(format!("{}.1", name));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Generated: {}", path.display());
    Ok(())
}
