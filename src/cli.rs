use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(name = "perfstor", about = "Record and report test runs", version)]
pub struct Cli {
    /// HTTP server port
    #[clap(short = 'p', long, env = "PORT")]
    pub port: Option<u16>,

    /// Address the HTTP server binds to
    #[clap(long)]
    pub host: Option<String>,

    /// Path to the SQLite database
    #[clap(long, env = "PERFSTOR_DATABASE")]
    pub database: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Log fewer messages
    #[clap(short = 'q', long)]
    pub quiet: bool,
}
