//! Scratch directory creation command.

use crate::error::CliError;
use crate::utils::{config_builder, GlobalOptions};
use clap::Args;
use scratchfs::{create_temp_directory, Config, SystemFileSystem};

/// Create a uniquely named scratch directory and print its path.
#[derive(Args)]
pub struct MktempCommand {
    /// Name template ending in XXXXXX (default from configuration)
    #[arg(value_name = "TEMPLATE")]
    pub template: Option<String>,
}

impl MktempCommand {
    /// Execute the mktemp command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut builder = config_builder(global);
        if let Some(template) = self.template {
            builder = builder.with_config(Config {
                template: Some(template),
                ..Config::default()
            });
        }
        let config = builder.build()?;

        let template = config.scratch_template()?;
        let created = create_temp_directory(&SystemFileSystem, &template)?;

        if global.verbose {
            eprintln!("Created scratch directory from template {template}");
        }
        println!("{created}");
        Ok(())
    }
}
