//! FunLe Admin CLI
//!
//! Lists and exports documents from a running admin backend.
//!
//! # Usage
//!
//! ```bash
//! # List tutorials on the default backend (http://127.0.0.1:8000)
//! cargo run --bin funle-admin -- infos
//!
//! # Export a course as wire JSON after a load round trip
//! cargo run --bin funle-admin -- --base-url https://api.example.com export-course 65a1f0c2
//!
//! # Delete an action test
//! cargo run --bin funle-admin -- delete-test action 65a1f0c3
//! ```
//!
//! # Configuration
//!
//! `--config <path>` reads a JSON `AdminConfig`; otherwise `FUNLE_ADMIN_URL`
//! and `FUNLE_ADMIN_TIMEOUT_SECS` override the defaults. `--base-url` wins
//! over both. Log verbosity follows `RUST_LOG`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use funle_admin_core::client::{AdminApi, AdminConfig, HttpAdminClient};
use funle_admin_core::models::{ObjectId, TestKind};
use funle_admin_core::services::{CourseSession, TutorialSession};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "funle_admin=info,funle_admin_core=info";

/// Inspect and export FunLe admin documents
#[derive(Parser, Debug)]
#[command(name = "funle-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend root URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List courses
    Courses,

    /// List tutorials
    Infos,

    /// List tests of both kinds
    Tests,

    /// List users
    Users,

    /// Print a tutorial's wire JSON
    ExportInfo { id: String },

    /// Print a course's wire JSON
    ExportCourse { id: String },

    /// Delete a test
    DeleteTest {
        /// `choice` or `action`
        kind: TestKind,
        id: String,
    },
}

fn resolve_config(cli: &Cli) -> anyhow::Result<AdminConfig> {
    resolve_config_with(cli, |key| std::env::var(key).ok())
}

fn resolve_config_with<F>(cli: &Cli, lookup: F) -> anyhow::Result<AdminConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config {
        Some(path) => AdminConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AdminConfig::default()
            .with_overrides(lookup)
            .context("reading config from environment")?,
    };
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
        config.validate()?;
    }
    Ok(config)
}

fn id_or_dash(id: Option<&ObjectId>) -> &str {
    id.map(ObjectId::as_str).unwrap_or("-")
}

async fn run(command: Command, api: &dyn AdminApi) -> anyhow::Result<()> {
    match command {
        Command::Courses => {
            for course in api.list_courses().await? {
                println!(
                    "{}\t{}\t{} levels",
                    id_or_dash(course.id.as_ref()),
                    course.title,
                    course.levels.len()
                );
            }
        }
        Command::Infos => {
            for info in api.list_infos().await? {
                println!(
                    "{}\t{}\t{}",
                    id_or_dash(info.id.as_ref()),
                    info.title,
                    info.theme
                );
            }
        }
        Command::Tests => {
            for test in api.list_tests().await? {
                println!(
                    "{}\t{}\t{}",
                    id_or_dash(test.id()),
                    test.kind,
                    test.body.question
                );
            }
        }
        Command::Users => {
            for user in api.list_users().await? {
                println!(
                    "{}\t{}\t{}\t{:?}",
                    id_or_dash(user.id.as_ref()),
                    user.username,
                    user.email,
                    user.role
                );
            }
        }
        Command::ExportInfo { id } => {
            let mut session = TutorialSession::new();
            session.load(api, &id).await?;
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
        Command::ExportCourse { id } => {
            let mut session = CourseSession::new();
            session.load(api, &id).await?;
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
        Command::DeleteTest { kind, id } => {
            api.delete_test(kind, &id).await?;
            println!("Deleted {} test {}", kind, id);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    tracing::debug!("Using backend {}", config.base_url);

    let client = HttpAdminClient::new(config)?;
    run(cli.command, &client).await
}
