use std::fs;

use anyhow::{Context, Result, bail};

use super::super::args::InitCommand;
use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};
use crate::core::SyncError;

pub fn init(cmd: InitCommand) -> Result<CommandResult> {
    if !cmd.app_path.is_dir() {
        return Err(SyncError::PathUnusable {
            path: cmd.app_path,
            reason: "not a directory".to_string(),
        }
        .into());
    }

    let config_path = cmd.app_path.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }

    fs::write(&config_path, format!("{}\n", default_config_json()?))
        .with_context(|| format!("Failed to write file: {}", config_path.display()))?;

    Ok(CommandResult::new(CommandSummary::Init(InitSummary {
        path: config_path,
    })))
}
