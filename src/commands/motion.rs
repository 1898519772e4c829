use crate::state::PlaygroundState;

use super::editing::active_editor;
use super::registry::{Command, CommandContext, CommandResult};

pub fn forward_char(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    active_editor(state)?.move_forward(1);
    Ok(())
}

pub fn backward_char(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    active_editor(state)?.move_backward(1);
    Ok(())
}

pub fn next_line(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    active_editor(state)?.move_lines(1);
    Ok(())
}

pub fn previous_line(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    active_editor(state)?.move_lines(-1);
    Ok(())
}

pub fn move_beginning_of_line(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    active_editor(state)?.move_to_line_start();
    Ok(())
}

pub fn move_end_of_line(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    active_editor(state)?.move_to_line_end();
    Ok(())
}

pub fn beginning_of_buffer(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    active_editor(state)?.move_to_start();
    Ok(())
}

pub fn end_of_buffer(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    active_editor(state)?.move_to_end();
    Ok(())
}

pub fn scroll_up_command(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    active_editor(state)?.page(1);
    Ok(())
}

pub fn scroll_down_command(state: &mut PlaygroundState, _ctx: &CommandContext) -> CommandResult {
    active_editor(state)?.page(-1);
    Ok(())
}

pub fn all_commands() -> Vec<Command> {
    vec![
        Command::new("forward-char", forward_char),
        Command::new("backward-char", backward_char),
        Command::new("next-line", next_line),
        Command::new("previous-line", previous_line),
        Command::new("move-beginning-of-line", move_beginning_of_line),
        Command::new("move-end-of-line", move_end_of_line),
        Command::new("beginning-of-buffer", beginning_of_buffer),
        Command::new("end-of-buffer", end_of_buffer),
        Command::new("scroll-up-command", scroll_up_command),
        Command::new("scroll-down-command", scroll_down_command),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EditorAdapter, Position};
    use crate::state::playground::tests::test_state;

    fn state_with(text: &str) -> PlaygroundState {
        let (mut state, _dir) = test_state();
        state.files.create_file("m.txt").unwrap();
        active_editor(&mut state).unwrap().set_text(text);
        state
    }

    #[test]
    fn test_forward_backward_char() {
        let mut state = state_with("abc\ndef");
        let ctx = CommandContext::new();

        forward_char(&mut state, &ctx).unwrap();
        forward_char(&mut state, &ctx).unwrap();
        assert_eq!(active_editor(&mut state).unwrap().cursor.0, 2);

        backward_char(&mut state, &ctx).unwrap();
        assert_eq!(active_editor(&mut state).unwrap().cursor.0, 1);
    }

    #[test]
    fn test_line_motion() {
        let mut state = state_with("abc\ndef\nghi");
        let ctx = CommandContext::new();

        forward_char(&mut state, &ctx).unwrap();
        next_line(&mut state, &ctx).unwrap();
        assert_eq!(
            active_editor(&mut state).unwrap().cursor_position(),
            Position::new(1, 1)
        );

        move_end_of_line(&mut state, &ctx).unwrap();
        assert_eq!(
            active_editor(&mut state).unwrap().cursor_position(),
            Position::new(1, 3)
        );

        end_of_buffer(&mut state, &ctx).unwrap();
        assert_eq!(active_editor(&mut state).unwrap().cursor.0, 11);

        beginning_of_buffer(&mut state, &ctx).unwrap();
        previous_line(&mut state, &ctx).unwrap();
        assert_eq!(active_editor(&mut state).unwrap().cursor.0, 0);
    }
}
