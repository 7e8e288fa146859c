#[path = "src/cli.rs"]
mod cli;

use clap::CommandFactory;
use cli::Cli;
use clap_complete::shells::{Bash, Fish, Zsh};
use std::env;
use std::fs::{create_dir_all, write};
use std::io::Result;
use std::path::{Path, PathBuf};

// Shell completions and the man page are only written when packaging asks for them
const ASSETS_DIR_VAR: &str = "PERFSTOR_ASSETS_DIR";

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=migrations");
    println!("cargo:rerun-if-env-changed={ASSETS_DIR_VAR}");

    let Some(assets_dir) = env::var_os(ASSETS_DIR_VAR).map(PathBuf::from) else {
        return Ok(());
    };
    write_completions(&assets_dir.join("completions"))?;
    write_manpage(&assets_dir.join("man/man1"))
}

fn write_completions(out_dir: &Path) -> Result<()> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_owned();

    create_dir_all(out_dir)?;
    clap_complete::generate_to(Bash, &mut command, &bin_name, out_dir)?;
    clap_complete::generate_to(Fish, &mut command, &bin_name, out_dir)?;
    clap_complete::generate_to(Zsh, &mut command, &bin_name, out_dir)?;
    Ok(())
}

fn write_manpage(out_dir: &Path) -> Result<()> {
    let mut page = Vec::new();
    clap_mangen::Man::new(Cli::command()).render(&mut page)?;

    create_dir_all(out_dir)?;
    write(out_dir.join("perfstor.1"), page)
}
