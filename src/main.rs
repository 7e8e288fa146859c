mod cli;
mod config;
mod database;
mod format;
mod http;
mod schema;
mod service;
mod timestamp;

use crate::cli::Cli;
use crate::config::Config;
use crate::database::{SqliteRunStore, StoreHandle};
use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use std::fs::create_dir_all;
use std::path::PathBuf;

/// Return the directory where perfstor stores application data by default
fn get_data_dir() -> Result<PathBuf> {
    let project_dirs = directories::ProjectDirs::from("com", "perfstor", "perfstor")
        .context("Failed to determine application directories")?;
    Ok(project_dirs.data_local_dir().to_owned())
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    simple_logger::SimpleLogger::new()
        .with_module_level("actix_server", LevelFilter::Warn)
        .with_module_level("mio", LevelFilter::Off)
        .with_level(if cli.quiet {
            LevelFilter::Warn
        } else {
            LevelFilter::Debug
        })
        .init()?;

    let config = Config::load(&cli, &get_data_dir()?)?;
    if let Some(parent) = config.database_path.parent() {
        create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let store = SqliteRunStore::open(&config.database_path, config.busy_timeout)?;
    info!("Opened database {}", config.database_path.display());

    http::start_server(StoreHandle::new(store), &config.host, config.port)
        .await
        .context("Failed to run HTTP server")?;

    Ok(())
}
