//! Report formatting and printing utilities.
//!
//! Separate from core logic so that xlfsync can be used as a library
//! without printing side effects.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, InitSummary, Output, SyncSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::core::SyncEvent;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Print the outcome of a command.
///
/// In dry-run mode the report goes to stderr and the document to stdout, so
/// the output can be redirected to a file as-is.
pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Sync(summary) | CommandSummary::Append(summary) => {
            if let Output::Dry(document) = &summary.output {
                print_sync_to(summary, verbose, &mut io::stderr().lock());
                print_document_to(document, &mut io::stdout().lock());
            } else {
                print_sync_to(summary, verbose, &mut io::stdout().lock());
            }
        }
        CommandSummary::Init(summary) => print_init_to(summary, &mut io::stdout().lock()),
    }
}

fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}

/// Print a sync or append summary to a custom writer.
pub fn print_sync_to<W: Write>(summary: &SyncSummary, verbose: bool, writer: &mut W) {
    if verbose {
        if summary.config_from_file {
            let _ = writeln!(writer, "{}", format!("Using {}", CONFIG_FILE_NAME).dimmed());
        }
        for warning in &summary.warnings {
            let _ = writeln!(
                writer,
                "{} {}: {}",
                "warning:".bold().yellow(),
                warning.path.display(),
                warning.error
            );
        }
    }

    if summary.created {
        let _ = writeln!(
            writer,
            "{} {} does not exist yet, building a new XLIFF file",
            "info:".bold().blue(),
            summary.document.display()
        );
    }

    let _ = writeln!(
        writer,
        "Found {} trans {} already defined in {}",
        summary.stored_count,
        plural(summary.stored_count, "key", "keys"),
        summary.document.display()
    );
    match summary.files_scanned {
        Some(files) => {
            let _ = writeln!(
                writer,
                "Found {} unique trans {} in {} template {}",
                summary.discovered_count,
                plural(summary.discovered_count, "key", "keys"),
                files,
                plural(files, "file", "files")
            );
        }
        None => {
            let _ = writeln!(
                writer,
                "Read {} trans {} from the source file",
                summary.discovered_count,
                plural(summary.discovered_count, "key", "keys")
            );
        }
    }

    for event in &summary.events {
        let label = match event {
            SyncEvent::Added(_) => "adding".green(),
            SyncEvent::Removed(_) => "removing".red(),
            SyncEvent::Skipped(_) if verbose => "skipping".dimmed(),
            SyncEvent::Skipped(_) => continue,
        };
        let _ = writeln!(writer, "  {:<10}{}", label, event.key());
    }

    let added = summary.changes.to_add.len();
    let removed = summary.changes.to_remove.len();
    let message = match &summary.output {
        Output::Unchanged => format!("{} {}", SUCCESS_MARK.green(), "Nothing to update".green()),
        Output::Dry(_) => format!(
            "{} {} to add, {} to remove (dry run, no file was changed)",
            "dry run:".bold().yellow(),
            added,
            removed
        ),
        Output::Saved => format!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Saved {} ({} added, {} removed). Now go translate those strings!",
                summary.document.display(),
                added,
                removed
            )
            .green()
        ),
    };
    let _ = writeln!(writer, "{}", message);
}

/// Write the serialized document as-is.
pub fn print_document_to<W: Write>(document: &str, writer: &mut W) {
    let _ = writer.write_all(document.as_bytes());
    let _ = writer.flush();
}

pub fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path.display()).green()
    );
}
