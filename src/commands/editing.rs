use crate::core::TextEditor;
use crate::state::PlaygroundState;

use super::registry::{Command, CommandContext, CommandError, CommandResult};

pub(crate) fn active_editor(state: &mut PlaygroundState) -> Result<&mut TextEditor, CommandError> {
    state
        .files
        .active_mut()
        .map(|file| &mut file.editor)
        .ok_or(CommandError::NoActiveFile)
}

pub fn self_insert(state: &mut PlaygroundState, c: char) -> CommandResult {
    active_editor(state)?.insert_char(c);
    Ok(())
}

pub fn delete_char(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    active_editor(state)?.delete_forward();
    Ok(())
}

pub fn delete_backward_char(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    active_editor(state)?.delete_backward();
    Ok(())
}

pub fn newline(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    active_editor(state)?.newline();
    Ok(())
}

pub fn indent_for_tab(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    active_editor(state)?.indent();
    Ok(())
}

pub fn keyboard_quit(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    state.minibuffer.clear();
    state.key_resolver.clear();
    state.message = Some("Quit".to_string());
    Err(CommandError::Cancelled)
}

pub fn all_commands() -> Vec<Command> {
    vec![
        Command::editing("delete-char", delete_char),
        Command::editing("delete-backward-char", delete_backward_char),
        Command::editing("newline", newline),
        Command::editing("indent-for-tab-command", indent_for_tab),
        Command::new("keyboard-quit", keyboard_quit),
    ]
}
