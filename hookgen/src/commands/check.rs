use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use hookgen_manifest::Manifest;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to hookgen.toml (defaults to ./hookgen.toml)
    #[arg(short, long, default_value = "hookgen.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let manifest = Manifest::from_file(&self.config).unwrap_or_exit();
        let report = ops::check(&manifest, &self.config)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
