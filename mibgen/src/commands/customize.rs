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
pub struct CustomizeCommand {
    /// Module whose customizable file is now maintained by hand (e.g. IF-MIB)
    pub module: String,

    /// Suppression document to update (defaults to the first [inputs] customized
    /// entry, or project.customized next to mibgen.toml)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Path to mibgen.toml (defaults to ./mibgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl CustomizeCommand {
    /// Run the customize command
    pub fn run(&self) -> Result<()> {
        let config = ConfigFile::discover(self.config.as_deref(), Path::new(".")).unwrap_or_exit();
        let path = self
            .file
            .clone()
            .unwrap_or_else(|| ops::default_suppression_file(&config));

        let module = ops::module_name(&self.module)?;

        let report = ops::customize(&path, module).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
