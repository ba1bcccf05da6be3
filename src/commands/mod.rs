use std::path::{Path, PathBuf};

use shipmate::config::ProjectConfig;

pub type CmdResult<T> = shipmate::Result<(T, i32)>;

/// Flags shared by every subcommand.
pub struct GlobalArgs {
    /// Explicit `shipmate.json` path; defaults to the current directory.
    pub config_path: Option<String>,
}

/// Resolve the project config from --config or the working directory.
pub fn load_config(global: &GlobalArgs) -> shipmate::Result<ProjectConfig> {
    match &global.config_path {
        Some(path) => {
            let expanded = shellexpand::tilde(path);
            ProjectConfig::load(Path::new(expanded.as_ref()))
        }
        None => {
            let cwd = std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."));
            ProjectConfig::discover(&cwd)
        }
    }
}

pub mod config;
pub mod deploy;
pub mod push;
pub mod release;
pub mod version;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (shipmate::Result<serde_json::Value>, i32) {
    crate::tty::status("shipmate is working...");

    match command {
        crate::Commands::Version(args) => dispatch!(args, global, version),
        crate::Commands::Release(args) => dispatch!(args, global, release),
        crate::Commands::Push(args) => dispatch!(args, global, push),
        crate::Commands::Deploy(args) => dispatch!(args, global, deploy),
        crate::Commands::Config(args) => dispatch!(args, global, config),
    }
}
