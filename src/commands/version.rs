use clap::Args;
use serde::Serialize;

use shipmate::version;

use super::CmdResult;

#[derive(Args)]
pub struct VersionArgs {}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionOutput {
    pub env_file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    pub next: String,
}

pub fn run(_args: VersionArgs, global: &super::GlobalArgs) -> CmdResult<VersionOutput> {
    let config = super::load_config(global)?;
    let path = config.env_file_path();

    // Missing or unreadable file reads as empty: the next version defaults.
    let contents = std::fs::read_to_string(&path).unwrap_or_default();

    Ok((
        VersionOutput {
            env_file: path.display().to_string(),
            current: version::current_version(&contents).map(|v| v.to_string()),
            next: version::next_version(&contents).to_string(),
        },
        0,
    ))
}
