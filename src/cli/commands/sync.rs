use anyhow::Result;

use super::super::args::SyncCommand;
use super::helper::{Project, resolve_document, write_back};
use super::{CommandResult, CommandSummary, SyncSummary};
use crate::core::{DocumentHandle, SyncMode, scanner::scan_templates, synchronize};

/// Make an XLIFF file mirror the trans keys of the project's Twig views.
///
/// The document is created when it does not exist yet, and is loaded before
/// any template is scanned so a malformed file aborts the run early.
pub fn sync(cmd: SyncCommand) -> Result<CommandResult> {
    let args = &cmd.args;
    let project = Project::open(&args.common.app_path)?;
    let config = &project.config;

    let views_dir = project.directory(args.views_dir.as_deref(), &config.views_dir)?;
    let locales_dir = project.directory(args.common.locales_dir.as_deref(), &config.locales_dir)?;
    let patterns = config.template_patterns()?;
    let languages = args.lang.clone().unwrap_or_else(|| config.languages());

    let path = resolve_document(&locales_dir, &args.document)
        .unwrap_or_else(|| locales_dir.join(&args.document));
    let (mut doc, created) = DocumentHandle::load_or_create(&path, &languages)?;
    let stored_count = doc.keys().len();

    let scan = scan_templates(&views_dir, &patterns)?;

    let mut events = Vec::new();
    let changes = synchronize(&mut doc, &scan.keys, SyncMode::Synchronize, &mut events)?;
    let output = write_back(&doc, &changes, args.common.dry)?;

    Ok(CommandResult::new(CommandSummary::Sync(SyncSummary {
        document: path,
        created,
        config_from_file: project.config_from_file,
        stored_count,
        discovered_count: scan.keys.len(),
        files_scanned: Some(scan.files_scanned),
        changes,
        events,
        warnings: scan.warnings,
        output,
    })))
}
