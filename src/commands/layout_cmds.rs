use super::registry::{Command, CommandContext, CommandResult};
use crate::state::{Layout, PlaygroundState};

pub fn layout_vertical(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    state.set_layout(Layout::Vertical);
    Ok(())
}

pub fn layout_horizontal(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    state.set_layout(Layout::Horizontal);
    Ok(())
}

pub fn toggle_layout(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    state.set_layout(state.layout.toggled());
    Ok(())
}

pub fn all_commands() -> Vec<Command> {
    vec![
        Command::new("layout-vertical", layout_vertical),
        Command::new("layout-horizontal", layout_horizontal),
        Command::new("toggle-layout", toggle_layout),
    ]
}
