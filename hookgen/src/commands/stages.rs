use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use hookgen_manifest::Manifest;
use hookgen_stages::ALL_STAGES;

use super::UnwrapOrExit;
use crate::ops;

#[derive(Args)]
pub struct StagesCommand {
    /// Show the stage sequence this manifest produces instead of the catalogue
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl StagesCommand {
    pub fn run(&self) -> Result<()> {
        let Some(config) = &self.config else {
            println!("Stages ({}):", ALL_STAGES.len());
            for (index, stage) in ALL_STAGES.iter().enumerate() {
                println!("  {:>2}. {}", index + 1, stage);
            }
            return Ok(());
        };

        let manifest = Manifest::from_file(config).unwrap_or_exit();
        let resource = ops::load_resource(&manifest, config);
        let pipeline = hookgen_stages::standard_pipeline(&resource).build()?;
        let names = pipeline.stage_names();

        println!("Sequence for {} ({} stages):", config.display(), names.len());
        for (index, stage) in names.iter().enumerate() {
            println!("  {:>2}. {}", index + 1, stage);
        }
        Ok(())
    }
}
