use clap::{Args, Subcommand};
use serde::Serialize;

use shipmate::config::ProjectConfig;

use super::CmdResult;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the resolved project configuration with defaults applied
    Show,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ConfigOutput {
    #[serde(rename = "config.show")]
    Show {
        root: String,
        #[serde(flatten)]
        config: ProjectConfig,
    },
}

pub fn run(args: ConfigArgs, global: &super::GlobalArgs) -> CmdResult<ConfigOutput> {
    let config = super::load_config(global)?;

    match args.command {
        ConfigCommand::Show => {
            let root = config.root().display().to_string();
            Ok((ConfigOutput::Show { root, config }, 0))
        }
    }
}
