use crate::state::{PlaygroundState, PromptKind};

use super::registry::{Command, CommandContext, CommandError, CommandResult};

pub fn new_file(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    state.start_minibuffer_prompt(PromptKind::NewFile);
    Ok(())
}

pub fn import_file(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    state.start_minibuffer_prompt(PromptKind::ImportFile);
    Ok(())
}

pub fn switch_to_file(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    state.start_minibuffer_prompt(PromptKind::SwitchToFile);
    Ok(())
}

pub fn execute_extended_command(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    state.start_minibuffer_prompt(PromptKind::ExtendedCommand);
    Ok(())
}

/// Closes the active file.
pub fn close_file(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    let name = state
        .files
        .active_name()
        .map(str::to_string)
        .ok_or(CommandError::NoActiveFile)?;
    state.files.close_file(&name)?;
    state.message = Some(format!("Closed {}", name));
    Ok(())
}

pub fn next_file(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    state.files.activate_next()?;
    Ok(())
}

pub fn previous_file(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    state.files.activate_previous()?;
    Ok(())
}

pub fn exit(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    state.should_quit = true;
    Ok(())
}

pub fn all_commands() -> Vec<Command> {
    vec![
        Command::new("new-file", new_file),
        Command::new("import-file", import_file),
        Command::new("switch-to-file", switch_to_file),
        Command::new("execute-extended-command", execute_extended_command),
        Command::new("close-file", close_file),
        Command::new("next-file", next_file),
        Command::new("previous-file", previous_file),
        Command::new("exit", exit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlaygroundError;
    use crate::state::playground::tests::test_state;

    #[test]
    fn test_close_active_file() {
        let (mut state, _dir) = test_state();
        let ctx = CommandContext::new();

        close_file(&mut state, &ctx).unwrap();
        assert_eq!(state.files.registry().names(), vec!["style.css", "script.js"]);
        assert_eq!(state.files.active_name(), Some("style.css"));
        assert_eq!(state.message.as_deref(), Some("Closed index.html"));
    }

    #[test]
    fn test_close_last_file_is_refused() {
        let (mut state, _dir) = test_state();
        let ctx = CommandContext::new();

        close_file(&mut state, &ctx).unwrap();
        close_file(&mut state, &ctx).unwrap();
        let result = close_file(&mut state, &ctx);
        assert!(matches!(
            result,
            Err(CommandError::Playground(PlaygroundError::LastFile))
        ));
        assert_eq!(state.files.registry().names(), vec!["script.js"]);
    }

    #[test]
    fn test_cycle_files() {
        let (mut state, _dir) = test_state();
        let ctx = CommandContext::new();

        previous_file(&mut state, &ctx).unwrap();
        assert_eq!(state.files.active_name(), Some("script.js"));
        next_file(&mut state, &ctx).unwrap();
        assert_eq!(state.files.active_name(), Some("index.html"));
    }

    #[test]
    fn test_prompts_open_minibuffer() {
        let (mut state, _dir) = test_state();
        new_file(&mut state, &CommandContext::new()).unwrap();
        assert_eq!(state.minibuffer.prompt, Some(PromptKind::NewFile));
    }
}
