use std::path::Path;

use clap::Parser;
use tracing::info;
use vaxsched_core::config::SchedulerConfig;
use vaxsched_shell::{repl, Shell};

/// Used when `RUST_LOG` is unset. Covers every `vaxsched_*` crate target.
const DEFAULT_LOG_FILTER: &str = "vaxsched=warn";

#[derive(Parser)]
#[command(
    name = "vaxsched",
    about = "Vaccine appointment scheduler",
    version
)]
struct Cli {
    /// Path to vaxsched.toml (default: ~/.vaxsched/vaxsched.toml).
    #[arg(long, env = "VAXSCHED_CONFIG")]
    config: Option<String>,

    /// SQLite database file; overrides `database.path` from the config.
    #[arg(long)]
    database: Option<String>,

    /// Skip the welcome text and command list.
    #[arg(long)]
    no_banner: bool,
}

fn main() -> anyhow::Result<()> {
    // stdout belongs to the command protocol; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = SchedulerConfig::load(cli.config.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        SchedulerConfig::default()
    });
    if let Some(path) = cli.database {
        config.database.path = path;
    }
    if cli.no_banner {
        config.shell.banner = false;
    }

    let db_path = &config.database.path;
    ensure_parent_dir(db_path)?;
    info!(path = %db_path, "opening SQLite database");

    let conn = rusqlite::Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    let mut shell = Shell::open(conn)?;
    info!("database schema ready");

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    repl::run(
        &mut shell,
        stdin.lock(),
        &mut stdout,
        &config.shell.prompt,
        config.shell.banner,
    )?;
    Ok(())
}

fn ensure_parent_dir(db_path: &str) -> std::io::Result<()> {
    match Path::new(db_path).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::fs::create_dir_all(dir),
        _ => Ok(()),
    }
}
