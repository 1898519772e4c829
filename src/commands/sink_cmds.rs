use crate::state::PlaygroundState;

use super::registry::{Command, CommandContext, CommandResult};

pub fn run_preview(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    state.run_preview()?;
    state.message = Some("Preview updated".to_string());
    Ok(())
}

pub fn open_in_new_window(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    let path = state.open_in_new_window()?;
    state.message = Some(format!("Opened {}", path.display()));
    Ok(())
}

pub fn download_archive(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    state.download_archive();
    Ok(())
}

pub fn all_commands() -> Vec<Command> {
    vec![
        Command::new("run-preview", run_preview),
        Command::new("open-in-new-window", open_in_new_window),
        Command::new("download-archive", download_archive),
    ]
}
