use std::{io, path::PathBuf};

use clap::{Args, CommandFactory};
use clap_complete::Shell;
use eyre::{Result, WrapErr};
use mibgen_core::{Overwrite, write_file};

use super::Cli;

#[derive(Args)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    shell: Shell,

    /// Write the script to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl CompletionsCommand {
    pub fn run(&self) -> Result<()> {
        let script = self.render()?;
        match &self.output {
            Some(path) => {
                write_file(path, &script, Overwrite::Always)?;
                tracing::info!(path = %path.display(), shell = %self.shell, "wrote completions");
            }
            None => io::Write::write_all(&mut io::stdout(), script.as_bytes())?,
        }
        Ok(())
    }

    /// Completion script for the configured shell, named after the binary.
    fn render(&self) -> Result<String> {
        let mut cmd = Cli::command();
        let bin = cmd.get_name().to_string();
        let mut buf = Vec::new();
        clap_complete::generate(self.shell, &mut cmd, bin, &mut buf);
        String::from_utf8(buf).wrap_err("completion script is not valid UTF-8")
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn command(shell: Shell, output: Option<PathBuf>) -> CompletionsCommand {
        CompletionsCommand { shell, output }
    }

    #[test]
    fn test_bash_script_completes_subcommands() {
        let script = command(Shell::Bash, None).render().unwrap();

        assert!(script.contains("_mibgen()"));
        for subcommand in ["bake", "check", "customize", "completions"] {
            assert!(script.contains(subcommand), "missing {subcommand}");
        }
    }

    #[test]
    fn test_output_file_receives_script() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("completions/mibgen.fish");

        command(Shell::Fish, Some(path.clone())).run().unwrap();

        let script = std::fs::read_to_string(&path).unwrap();
        assert!(script.contains("complete -c mibgen"));
    }
}
