use anyhow::Result;

use super::super::args::AppendCommand;
use super::helper::{Project, resolve_document, write_back};
use super::{CommandResult, CommandSummary, SyncSummary};
use crate::core::{DocumentHandle, SyncError, SyncMode, extract::read_key_list, synchronize};

/// Add the keys of a flat list to an existing XLIFF file.
///
/// Only ever adds: stored keys missing from the list are kept.
pub fn append(cmd: AppendCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let project = Project::open(&args.common.app_path)?;
    let locales_dir = project.directory(
        args.common.locales_dir.as_deref(),
        &project.config.locales_dir,
    )?;

    let path = resolve_document(&locales_dir, &args.document).ok_or_else(|| {
        SyncError::PathUnusable {
            path: locales_dir.join(&args.document),
            reason: "XLIFF file does not exist, run `xlfsync sync` first".to_string(),
        }
    })?;
    let mut doc = DocumentHandle::load(&path)?;
    let stored_count = doc.keys().len();

    let keys = read_key_list(&args.source)?;

    let mut events = Vec::new();
    let changes = synchronize(&mut doc, &keys, SyncMode::AppendOnly, &mut events)?;
    let output = write_back(&doc, &changes, args.common.dry)?;

    Ok(CommandResult::new(CommandSummary::Append(SyncSummary {
        document: path,
        created: false,
        config_from_file: project.config_from_file,
        stored_count,
        discovered_count: keys.len(),
        files_scanned: None,
        changes,
        events,
        warnings: Vec::new(),
        output,
    })))
}
