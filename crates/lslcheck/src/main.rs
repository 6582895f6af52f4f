use clap::{Parser, Subcommand};
use std::path::PathBuf;

use lslcheck::commands;
use lslcheck::commands::check::CheckArgs;
use lslcheck::config::Config;
use lslcheck::output::OutputFormat;

#[derive(Parser)]
#[command(name = "lslcheck")]
#[command(about = "Lint LSL scripts with lslint, optionally through mcpp", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Human-friendly output with colors and formatting
    #[arg(long, global = true, conflicts_with = "compact")]
    pretty: bool,

    /// Compact output without colors (overrides TTY detection)
    #[arg(long, global = true, conflicts_with = "pretty")]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint files or directories
    Check(CheckArgs),

    /// Report lslint/mcpp availability and versions
    Tools {
        /// Root directory for config discovery (defaults to current directory)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// Re-lint on file changes
    Watch(CheckArgs),
}

fn main() {
    let cli = Cli::parse();

    let root = match &cli.command {
        Commands::Check(args) | Commands::Watch(args) => args.root.clone(),
        Commands::Tools { root } => root.clone(),
    }
    .unwrap_or_else(|| PathBuf::from("."));

    let config = Config::load(&root);
    let format = OutputFormat::from_cli(cli.json, cli.pretty, cli.compact, &config.pretty);

    let code = match &cli.command {
        Commands::Check(args) => commands::check::cmd_check(args, &format, &config),
        Commands::Tools { .. } => commands::tools::cmd_tools(&config, &format),
        Commands::Watch(args) => commands::watch::cmd_watch(args, &format, &config),
    };

    std::process::exit(code);
}
