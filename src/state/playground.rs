use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use crate::commands::registry::{build_default_registry, CommandContext, CommandError, CommandRegistry};
use crate::compose::Composer;
use crate::config::Config;
use crate::core::TextEditorFactory;
use crate::error::{PlaygroundError, Result};
use crate::frontend::traits::{MouseEvent, MouseEventKind};
use crate::keybinding::default::default_keymap;
use crate::keybinding::{KeyEvent, KeyMap, KeyResolution, KeyResolver};
use crate::sinks::{
    ArchiveExporter, BrowserLauncher, InlinePreview, NewWindowSource, SystemBrowser, WindowPreview,
};

use super::files::FileManager;
use super::layout::{Layout, Panes};
use super::minibuffer::{Minibuffer, PromptKind};
use super::tabs::TabHit;

const SCROLL_LINES: isize = 3;

/// Outcome of background work, delivered to the UI thread.
#[derive(Debug)]
pub enum Completion {
    Import {
        name: String,
        path: PathBuf,
        contents: io::Result<Vec<u8>>,
    },
    Export(Result<PathBuf>),
}

pub struct PlaygroundState {
    pub files: FileManager<TextEditorFactory>,
    pub composer: Composer,
    pub preview: InlinePreview,
    pub window: WindowPreview,
    pub exporter: ArchiveExporter,
    pub minibuffer: Minibuffer,
    pub keymap: KeyMap,
    pub key_resolver: KeyResolver,
    pub command_registry: CommandRegistry,
    pub message: Option<String>,
    pub last_command: Option<&'static str>,
    pub layout: Layout,
    pub config: Config,
    /// Text changed since the last preview run.
    pub preview_stale: bool,
    pub exporting: bool,
    pub should_quit: bool,
    width: u16,
    height: u16,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
}

impl PlaygroundState {
    pub fn new(config: Config) -> Self {
        Self::with_browser(config, Box::new(SystemBrowser))
    }

    pub fn with_browser(config: Config, browser: Box<dyn BrowserLauncher>) -> Self {
        let (completion_tx, completion_rx) = mpsc::channel();
        let exporter =
            ArchiveExporter::new(config.export_dir()).with_name(config.archive_name.clone());

        let mut state = Self {
            files: FileManager::new(config.editor_factory()),
            composer: Composer::new(),
            preview: InlinePreview::new(config.preview_file.clone()),
            window: WindowPreview::new(browser),
            exporter,
            minibuffer: Minibuffer::new(),
            keymap: default_keymap(),
            key_resolver: KeyResolver::new(),
            command_registry: build_default_registry(),
            message: None,
            last_command: None,
            layout: config.layout,
            config,
            preview_stale: false,
            exporting: false,
            should_quit: false,
            width: 80,
            height: 24,
            completion_tx,
            completion_rx,
        };

        if let Err(e) = state.run_preview() {
            log::warn!("initial preview failed: {}", e);
            state.message = Some(e.to_string());
        }
        state
    }

    pub fn panes(&self) -> Panes {
        Panes::compute(self.layout, self.width, self.height)
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn set_dimensions(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        let editor = self.panes().editor;
        self.files.resize(editor.width, editor.height);
    }

    pub fn set_layout(&mut self, layout: Layout) {
        self.layout = layout;
        let editor = self.panes().editor;
        self.files.resize(editor.width, editor.height);
        self.files.refresh_all();
        self.message = Some(format!("Layout: {}", layout.name()));
    }

    /// Composes the conventional files and shows the result in the preview
    /// pane.
    pub fn run_preview(&mut self) -> Result<()> {
        let document = self.composer.compose(self.files.registry())?;
        self.preview.set_source(document)?;
        self.preview_stale = false;
        log::debug!("preview run #{}", self.preview.runs());
        Ok(())
    }

    pub fn open_in_new_window(&mut self) -> Result<PathBuf> {
        let contents = match self.config.new_window_source {
            NewWindowSource::Composed => self.composer.compose(self.files.registry())?.into_string(),
            NewWindowSource::ActiveFile => self
                .files
                .active()
                .map(|file| file.text())
                .ok_or_else(|| PlaygroundError::NotFound("active file".to_string()))?,
        };
        self.window.open(&contents)
    }

    /// Starts an archive export of every file. The result arrives through
    /// `pump_completions`.
    pub fn download_archive(&mut self) {
        if self.exporting {
            self.message = Some("Archive export already running".to_string());
            return;
        }
        let entries = self.files.registry().entries();
        let tx = self.completion_tx.clone();
        self.exporting = true;
        self.message = Some(format!("Packing {} files...", entries.len()));
        self.exporter.spawn(entries, move |outcome| {
            if tx.send(Completion::Export(outcome)).is_err() {
                log::warn!("export finished after shutdown");
            }
        });
    }

    /// Reserves the file name and reads the file on a worker thread.
    pub fn request_import(&mut self, path: &Path) -> Result<()> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| PlaygroundError::InvalidName(path.display().to_string()))?;
        self.files.begin_import(&name)?;

        let tx = self.completion_tx.clone();
        let path = path.to_path_buf();
        thread::spawn(move || {
            let contents = fs::read(&path);
            if tx.send(Completion::Import { name, path, contents }).is_err() {
                log::warn!("import finished after shutdown");
            }
        });
        Ok(())
    }

    /// Applies every finished background job. Returns how many were applied.
    pub fn pump_completions(&mut self) -> usize {
        let mut applied = 0;
        loop {
            match self.completion_rx.try_recv() {
                Ok(completion) => {
                    self.apply_completion(completion);
                    applied += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        applied
    }

    fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Import {
                name,
                path,
                contents,
            } => match contents {
                Ok(bytes) => match self.files.finish_import(&name, &bytes) {
                    Ok(()) => self.message = Some(format!("Imported {}", name)),
                    Err(e) => {
                        log::debug!("import of {} rejected: {}", name, e);
                        self.message = Some(e.to_string());
                    }
                },
                Err(e) => {
                    self.files.abort_import(&name);
                    log::error!("failed to read {}: {}", path.display(), e);
                    self.message = Some(format!("Error reading {}: {}", path.display(), e));
                }
            },
            Completion::Export(outcome) => {
                self.exporting = false;
                self.message = Some(match outcome {
                    Ok(path) => format!("Saved {}", path.display()),
                    Err(e) => e.to_string(),
                });
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.minibuffer.is_active() {
            self.handle_minibuffer_key(key);
            return;
        }

        self.message = None;

        match self.key_resolver.resolve(key, &self.keymap) {
            KeyResolution::Complete(command_name) => {
                self.execute_command(command_name);
            }
            KeyResolution::Prefix(display) => {
                self.message = Some(display);
            }
            KeyResolution::SelfInsert(c) => {
                if let Err(e) = crate::commands::editing::self_insert(self, c) {
                    self.message = Some(e.to_string());
                }
                self.preview_stale = true;
                self.last_command = Some("self-insert-command");
            }
            KeyResolution::Unbound(keys) => {
                let key_str: String = keys
                    .iter()
                    .map(|k| k.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                self.message = Some(format!("{} is undefined", key_str));
            }
        }
    }

    /// Inserts pasted text into the prompt or the active editor.
    pub fn paste(&mut self, text: &str) {
        if self.minibuffer.is_active() {
            for c in text.chars().filter(|c| !c.is_control()) {
                self.minibuffer.insert_char(c);
            }
            return;
        }
        if let Some(file) = self.files.active_mut() {
            file.editor.insert_str(&text.replace("\r\n", "\n"));
            self.preview_stale = true;
        }
    }

    /// Left clicks on the tab row activate or close tabs; the wheel scrolls
    /// the editor.
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        let panes = self.panes();
        match event.kind {
            MouseEventKind::Down if event.row == panes.tab_row => {
                let result = match self.files.tabs().hit_test(event.column) {
                    Some(TabHit::Activate(name)) => self.files.activate(&name),
                    Some(TabHit::Close(name)) => self.files.close_file(&name),
                    None => Ok(()),
                };
                if let Err(e) = result {
                    self.message = Some(e.to_string());
                }
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
                if panes.editor.contains(event.column, event.row) =>
            {
                let delta = match event.kind {
                    MouseEventKind::ScrollUp => -SCROLL_LINES,
                    _ => SCROLL_LINES,
                };
                if let Some(file) = self.files.active_mut() {
                    file.editor.move_lines(delta);
                }
            }
            _ => {}
        }
    }

    pub fn execute_command(&mut self, name: &'static str) {
        let ctx = CommandContext {
            last_command: self.last_command,
        };

        let (result, edits) = match self.command_registry.get(name) {
            Some(cmd) => {
                let (exec, edits) = (cmd.execute, cmd.edits);
                (exec(self, &ctx), edits)
            }
            None => (Err(CommandError::NotFound(name.to_string())), false),
        };

        match result {
            Ok(()) => {
                if edits {
                    self.preview_stale = true;
                }
            }
            Err(CommandError::Cancelled) => {}
            Err(e) => {
                log::debug!("{} failed: {}", name, e);
                self.message = Some(e.to_string());
            }
        }

        self.last_command = Some(name);
    }

    fn handle_minibuffer_key(&mut self, key: KeyEvent) {
        use crate::keybinding::key::{Key, Modifiers};

        match (key.key, key.modifiers) {
            (Key::Enter, Modifiers::NONE) => {
                if let Some((kind, content)) = self.minibuffer.submit() {
                    self.handle_minibuffer_callback(kind, content);
                }
            }
            (Key::Char('g'), Modifiers::CTRL) | (Key::Escape, _) => {
                self.minibuffer.clear();
                self.message = Some("Quit".to_string());
            }
            (Key::Tab, Modifiers::NONE) => self.complete_minibuffer(),
            (Key::Backspace, Modifiers::NONE) => {
                self.minibuffer.delete_backward();
            }
            (Key::Delete, Modifiers::NONE) | (Key::Char('d'), Modifiers::CTRL) => {
                self.minibuffer.delete_forward();
            }
            (Key::Char('f'), Modifiers::CTRL) | (Key::Right, Modifiers::NONE) => {
                self.minibuffer.move_forward();
            }
            (Key::Char('b'), Modifiers::CTRL) | (Key::Left, Modifiers::NONE) => {
                self.minibuffer.move_backward();
            }
            (Key::Char('a'), Modifiers::CTRL) | (Key::Home, Modifiers::NONE) => {
                self.minibuffer.move_to_start();
            }
            (Key::Char('e'), Modifiers::CTRL) | (Key::End, Modifiers::NONE) => {
                self.minibuffer.move_to_end();
            }
            (Key::Char('p'), Modifiers::CTRL) | (Key::Up, Modifiers::NONE) => {
                self.minibuffer.history_prev();
            }
            (Key::Char('n'), Modifiers::CTRL) | (Key::Down, Modifiers::NONE) => {
                self.minibuffer.history_next();
            }
            _ => {
                if let Some(c) = key.insertable_char() {
                    self.minibuffer.insert_char(c);
                }
            }
        }
    }

    fn complete_minibuffer(&mut self) {
        let matched = match self.minibuffer.prompt {
            Some(PromptKind::SwitchToFile) => {
                let names = self.files.registry().names();
                self.minibuffer.complete(names)
            }
            Some(PromptKind::ExtendedCommand) => {
                let names = self.command_registry.names();
                self.minibuffer.complete(names)
            }
            _ => return,
        };
        if matched == 0 {
            self.message = Some("No match".to_string());
        }
    }

    fn handle_minibuffer_callback(&mut self, kind: PromptKind, content: String) {
        let result = match kind {
            PromptKind::NewFile => self
                .files
                .create_file(&content)
                .map(|()| format!("Created {}", content.trim())),
            PromptKind::ImportFile => {
                let path = PathBuf::from(content.trim());
                self.request_import(&path)
                    .map(|()| format!("Importing {}...", path.display()))
            }
            PromptKind::SwitchToFile => self
                .files
                .activate(content.trim())
                .map(|()| format!("Switched to {}", content.trim())),
            PromptKind::ExtendedCommand => {
                match self.command_registry.get(content.trim()).map(|c| c.name) {
                    Some(name) => {
                        self.execute_command(name);
                        return;
                    }
                    None => {
                        self.message = Some(format!("Unknown command: {}", content.trim()));
                        return;
                    }
                }
            }
        };

        self.message = Some(match result {
            Ok(message) => message,
            Err(e) => {
                log::debug!("{:?} prompt rejected {:?}: {}", kind, content, e);
                e.to_string()
            }
        });
    }

    pub fn start_minibuffer_prompt(&mut self, kind: PromptKind) {
        self.minibuffer.start_prompt(kind);
    }
}
