pub mod editing;
pub mod file_cmds;
pub mod layout_cmds;
pub mod motion;
pub mod registry;
pub mod sink_cmds;

pub use registry::{Command, CommandContext, CommandError, CommandRegistry, CommandResult};
