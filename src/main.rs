use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{config, deploy, push, release, version};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "shipmate")]
#[command(version = VERSION)]
#[command(about = "CLI for versioned release and deploy orchestration")]
struct Cli {
    /// Path to shipmate.json (defaults to ./shipmate.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current and next version from the environment file
    Version(version::VersionArgs),
    /// Plan or run a versioned release
    Release(release::ReleaseArgs),
    /// Push changes and deploy (no version bump)
    Push(push::PushArgs),
    /// Deploy pipeline operations
    Deploy(deploy::DeployArgs),
    /// Show project configuration
    Config(config::ConfigArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs {
        config_path: cli.config,
    };

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    output::print_json_result(json_result).ok();

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
