//! jobmaster-cli entry point

mod cli;
mod config;
mod excel;
mod reconcile;
mod record;
mod schema;
mod store;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let db = cli.db.clone();

    match cli.command {
        Command::Types => {
            cli::commands::handle_types();
            Ok(())
        }
        Command::Template { record_type, out } => {
            cli::commands::handle_template(&record_type, &out)
        }
        Command::Export { record_type, out } => {
            let pool = open_pool(db).await?;
            cli::commands::handle_export(pool, &record_type, &out).await
        }
        Command::Check {
            record_type,
            file,
            json,
        } => {
            let pool = open_pool(db).await?;
            cli::commands::handle_check(pool, &record_type, file, json).await
        }
        Command::Import {
            record_type,
            file,
            mode,
            json,
            temp,
        } => {
            let pool = open_pool(db).await?;
            cli::commands::handle_import(pool, &record_type, file, mode, json, temp).await
        }
    }
}

async fn open_pool(flag: Option<PathBuf>) -> Result<SqlitePool> {
    let path = config::resolve_db_path(flag);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let options = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open database {}", path.display()))
}
