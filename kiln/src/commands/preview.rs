use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use kiln_schema::{Config, EntitySchema};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct PreviewCommand {
    /// Entity schema file (.json or .toml)
    pub schema: PathBuf,

    /// Path to kiln.toml; defaults apply when it does not exist
    #[arg(short, long, default_value = "kiln.toml")]
    pub config: PathBuf,
}

impl PreviewCommand {
    /// Run the preview command
    pub fn run(&self) -> Result<()> {
        let config = if self.config.exists() {
            Some(Config::from_file(&self.config).unwrap_or_exit())
        } else {
            tracing::debug!(path = %self.config.display(), "no config, using defaults");
            None
        };
        let entity = EntitySchema::from_file(&self.schema).unwrap_or_exit();

        let report = ops::preview(&entity, config.as_ref());
        report.render(&mut TerminalOutput::new());

        if !report.is_success() {
            std::process::exit(1);
        }
        Ok(())
    }
}
