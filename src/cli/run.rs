use super::{
    args::{Arguments, Command},
    commands::{CommandResult, append::append, init::init, sync::sync},
};
use anyhow::Result;

/// Dispatches to the appropriate command handler based on the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` describing what the command did
/// - `Err` if the command aborted (unusable path, malformed XLIFF, failed write, ...)
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Sync(cmd)) => sync(cmd),
        Some(Command::Append(cmd)) => append(cmd),
        Some(Command::Init(cmd)) => init(cmd),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
