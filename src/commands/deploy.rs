use clap::{Args, Subcommand};
use serde::Serialize;

use shipmate::deploy::{DeployCommand, DeployLock};
use shipmate::release::{DeployPipeline, LockManager};

use super::CmdResult;

#[derive(Args)]
pub struct DeployArgs {
    #[command(subcommand)]
    command: DeployCommandArg,
}

#[derive(Subcommand)]
enum DeployCommandArg {
    /// Invoke the deploy pipeline only
    Run,
    /// Clear the deploy lock only
    Unlock,
}

#[derive(Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum DeployOutput {
    #[serde(rename = "deploy.run")]
    Run { deployed: bool },
    #[serde(rename = "deploy.unlock")]
    Unlock { unlocked: bool },
}

pub fn run(args: DeployArgs, global: &super::GlobalArgs) -> CmdResult<DeployOutput> {
    let config = super::load_config(global)?;

    match args.command {
        DeployCommandArg::Run => {
            let pipeline = DeployCommand::from_config(&config);
            pipeline.invoke()?;
            Ok((DeployOutput::Run { deployed: true }, 0))
        }
        DeployCommandArg::Unlock => {
            let lock = DeployLock::from_config(&config);
            lock.release();
            Ok((DeployOutput::Unlock { unlocked: true }, 0))
        }
    }
}
