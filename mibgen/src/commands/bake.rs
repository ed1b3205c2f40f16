use std::path::{Path, PathBuf};

use clap::Args;
use eyre::Result;
use mibgen_manifest::ConfigFile;

use super::UnwrapOrExit;
use crate::{
    ops::{self, BakeOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct BakeCommand {
    /// Path to mibgen.toml (defaults to ./mibgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory (overrides [output] dir)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Write per-phase pipeline snapshots to <output>/.mibgen/debug
    #[arg(long)]
    pub visualize: bool,

    /// Exit with status 1 when the run reports errors
    #[arg(long)]
    pub deny_errors: bool,
}

impl BakeCommand {
    /// Run the bake command
    pub fn run(&self) -> Result<()> {
        let config = ConfigFile::discover(self.config.as_deref(), Path::new(".")).unwrap_or_exit();
        let discovery = ops::discover(&config).unwrap_or_exit();
        let output_dir = self.output.clone().unwrap_or_else(|| config.output_dir());

        let report = ops::bake(
            &config,
            discovery,
            BakeOptions {
                output_dir: &output_dir,
                dry_run: self.dry_run,
                visualize: self.visualize,
            },
        )?;

        report.render(&mut TerminalOutput::new());

        if self.deny_errors && report.has_errors() {
            std::process::exit(1);
        }

        Ok(())
    }
}
