use clap::{Args, Subcommand};
use serde::Serialize;

use shipmate::deploy::{DeployCommand, DeployLock};
use shipmate::git::GitCli;
use shipmate::publish::GhPublisher;
use shipmate::release::{ReleaseOrchestrator, ReleaseOutcome, ReleasePlan, ReleaseRequest};

use super::CmdResult;
use crate::tty::TtyPrompt;

#[derive(Args)]
pub struct ReleaseArgs {
    #[command(subcommand)]
    command: ReleaseCommand,
}

#[derive(Subcommand)]
enum ReleaseCommand {
    /// Show the release plan without executing anything
    Plan {
        /// Commit message (skips the interactive prompt)
        #[arg(long, short)]
        message: Option<String>,
    },
    /// Run the versioned release: bump, commit, tag, push, publish, deploy
    Run {
        /// Commit message (skips the interactive prompt)
        #[arg(long, short)]
        message: Option<String>,
    },
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum ReleaseOutput {
    #[serde(rename = "release.plan")]
    Plan { plan: ReleasePlan },
    #[serde(rename = "release.run")]
    Run {
        #[serde(flatten)]
        outcome: ReleaseOutcome,
    },
}

pub fn run(args: ReleaseArgs, global: &super::GlobalArgs) -> CmdResult<ReleaseOutput> {
    let config = super::load_config(global)?;

    let lock = DeployLock::from_config(&config);
    let scm = GitCli::new(config.root());
    let publisher = GhPublisher::new(config.root());
    let pipeline = DeployCommand::from_config(&config);
    let orchestrator =
        ReleaseOrchestrator::new(&config, &lock, &scm, &publisher, &pipeline, &TtyPrompt);

    match args.command {
        ReleaseCommand::Plan { message } => {
            let plan = orchestrator.plan(message.as_deref());
            Ok((ReleaseOutput::Plan { plan }, 0))
        }
        ReleaseCommand::Run { message } => {
            let outcome = orchestrator.run_versioned(&ReleaseRequest { message })?;
            Ok((ReleaseOutput::Run { outcome }, 0))
        }
    }
}
