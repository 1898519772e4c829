mod input;
mod render;

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{self, ClearType},
};

use crate::state::PlaygroundState;

use super::traits::{Frontend, FrontendError, FrontendEvent};

const TICK: Duration = Duration::from_millis(50);

pub struct TerminalFrontend {
    stdout: Stdout,
    width: u16,
    height: u16,
    active: bool,
}

impl TerminalFrontend {
    pub fn new() -> Self {
        let (width, height) = terminal::size().unwrap_or((80, 24));
        Self {
            stdout: io::stdout(),
            width,
            height,
            active: false,
        }
    }

    fn poll_event(&mut self, timeout: Duration) -> Option<FrontendEvent> {
        if event::poll(timeout).ok()? {
            let event = event::read().ok()?;
            input::convert_event(event)
        } else {
            None
        }
    }

    fn title_for(state: &PlaygroundState) -> String {
        match state.files.active_name() {
            Some(name) => format!("playpen - {}", name),
            None => "playpen".to_string(),
        }
    }
}

impl Default for TerminalFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontend for TerminalFrontend {
    fn init(&mut self) -> Result<(), FrontendError> {
        terminal::enable_raw_mode()?;
        execute!(
            self.stdout,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        self.active = true;
        let (width, height) = terminal::size()?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), FrontendError> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(
            self.stdout,
            DisableBracketedPaste,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn run(mut self, mut state: PlaygroundState) -> Result<(), FrontendError> {
        state.set_dimensions(self.width, self.height);
        let mut title = String::new();
        let mut dirty = true;

        loop {
            if state.pump_completions() > 0 {
                dirty = true;
            }

            if dirty {
                let wanted = Self::title_for(&state);
                if wanted != title {
                    self.set_title(&wanted);
                    title = wanted;
                }
                self.render(&state)?;
                dirty = false;
            }

            if state.should_quit {
                break;
            }

            if let Some(event) = self.poll_event(TICK) {
                dirty = true;
                match event {
                    FrontendEvent::Key(key) => {
                        state.handle_key(key);
                    }
                    FrontendEvent::Resize(width, height) => {
                        state.set_dimensions(width, height);
                        self.width = width;
                        self.height = height;
                        execute!(self.stdout, terminal::Clear(ClearType::All))?;
                    }
                    FrontendEvent::Mouse(mouse) => {
                        state.handle_mouse(mouse);
                    }
                    FrontendEvent::Paste(text) => {
                        state.paste(&text);
                    }
                    FrontendEvent::Focus(_) => {}
                }
            }
        }

        self.shutdown()
    }

    fn render(&mut self, state: &PlaygroundState) -> Result<(), FrontendError> {
        if self.width < render::MIN_WIDTH || self.height < render::MIN_HEIGHT {
            render::render_too_small(&mut self.stdout, self.width, self.height)?;
        } else {
            render::render(state, &mut self.stdout, self.width, self.height)?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    fn set_title(&mut self, title: &str) {
        if let Err(e) = execute!(self.stdout, terminal::SetTitle(title)) {
            log::debug!("could not set title: {}", e);
        }
    }
}

impl Drop for TerminalFrontend {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
