use std::collections::HashMap;
use thiserror::Error;

use crate::error::PlaygroundError;
use crate::state::PlaygroundState;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),

    #[error("No active file")]
    NoActiveFile,

    #[error("Cancelled")]
    Cancelled,

    #[error(transparent)]
    Playground(#[from] PlaygroundError),
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    pub last_command: Option<&'static str>,
}

impl CommandContext {
    pub fn new() -> Self {
        Self::default()
    }
}

pub type CommandFn = fn(&mut PlaygroundState, &CommandContext) -> CommandResult;

#[derive(Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub execute: CommandFn,
    /// Edits text in the active file, so the preview is out of date after it.
    pub edits: bool,
}

impl Command {
    pub const fn new(name: &'static str, execute: CommandFn) -> Self {
        Self {
            name,
            execute,
            edits: false,
        }
    }

    pub const fn editing(name: &'static str, execute: CommandFn) -> Self {
        Self {
            name,
            execute,
            edits: true,
        }
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("edits", &self.edits)
            .finish()
    }
}

#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.name, command);
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

pub fn build_default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    for cmd in super::motion::all_commands() {
        registry.register(cmd);
    }

    for cmd in super::editing::all_commands() {
        registry.register(cmd);
    }

    for cmd in super::file_cmds::all_commands() {
        registry.register(cmd);
    }

    for cmd in super::sink_cmds::all_commands() {
        registry.register(cmd);
    }

    for cmd in super::layout_cmds::all_commands() {
        registry.register(cmd);
    }

    registry
}
