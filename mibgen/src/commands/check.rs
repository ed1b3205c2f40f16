use std::path::{Path, PathBuf};

use clap::Args;
use eyre::Result;
use mibgen_manifest::ConfigFile;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to mibgen.toml (defaults to ./mibgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let config = ConfigFile::discover(self.config.as_deref(), Path::new(".")).unwrap_or_exit();

        let discovery = ops::discover(&config).unwrap_or_exit();

        let report = ops::check(&config, discovery)?;
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }

        Ok(())
    }
}
