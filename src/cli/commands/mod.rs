pub mod append;
mod command_result;
pub mod helper;
pub mod init;
pub mod sync;

pub use command_result::*;
