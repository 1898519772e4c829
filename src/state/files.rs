use std::collections::HashSet;

use crate::core::file_kind::{DEFAULT_CSS, DEFAULT_HTML, DEFAULT_JS};
use crate::core::{EditorAdapter, EditorFactory, FileKind};
use crate::error::{PlaygroundError, Result};

use super::registry::{FileRegistry, PlaygroundFile};
use super::tabs::{Tab, TabStrip};

pub const DEFAULT_FILES: [(&str, &str); 3] = [
    ("index.html", DEFAULT_HTML),
    ("style.css", DEFAULT_CSS),
    ("script.js", DEFAULT_JS),
];

/// Creates, imports, closes and activates files, keeping the registry and
/// the tab strip in step.
pub struct FileManager<F: EditorFactory> {
    registry: FileRegistry<F::Editor>,
    tabs: TabStrip,
    factory: F,
    pending_imports: HashSet<String>,
    pane_size: Option<(u16, u16)>,
}

impl<F: EditorFactory> FileManager<F> {
    /// Starts a project with the default `index.html`, `style.css` and
    /// `script.js`, with `index.html` active.
    pub fn new(factory: F) -> Self {
        let mut manager = Self {
            registry: FileRegistry::new(),
            tabs: TabStrip::new(),
            factory,
            pending_imports: HashSet::new(),
            pane_size: None,
        };

        for (name, contents) in DEFAULT_FILES {
            if let Err(e) = manager.insert(name, contents) {
                log::error!("failed to add default file {}: {}", name, e);
            }
        }
        if let Err(e) = manager.activate("index.html") {
            log::error!("failed to activate index.html: {}", e);
        }
        manager
    }

    pub fn registry(&self) -> &FileRegistry<F::Editor> {
        &self.registry
    }

    pub fn tabs(&self) -> &TabStrip {
        &self.tabs
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn active_name(&self) -> Option<&str> {
        self.tabs.active_name()
    }

    pub fn active(&self) -> Option<&PlaygroundFile<F::Editor>> {
        self.active_name().and_then(|n| self.registry.get(n).ok())
    }

    pub fn active_mut(&mut self) -> Option<&mut PlaygroundFile<F::Editor>> {
        let name = self.tabs.active_name()?;
        self.registry.get_mut(name).ok()
    }

    pub fn create_file(&mut self, candidate: &str) -> Result<()> {
        let name = candidate.trim();
        let kind = self.validate_new(name)?;
        log::debug!("creating {}", name);
        self.insert(name, kind.template())?;
        self.activate(name)
    }

    /// Imports a file in one step. The name collision policy is reject.
    pub fn import_file(&mut self, name: &str, raw: &[u8]) -> Result<()> {
        self.validate_new(name)?;
        self.insert_imported(name, raw)
    }

    /// Validates an import and reserves its name until `finish_import` or
    /// `abort_import`.
    pub fn begin_import(&mut self, name: &str) -> Result<()> {
        self.validate_new(name)?;
        self.pending_imports.insert(name.to_string());
        log::debug!("import of {} started", name);
        Ok(())
    }

    pub fn finish_import(&mut self, name: &str, raw: &[u8]) -> Result<()> {
        if !self.pending_imports.remove(name) {
            log::debug!("import of {} finished without a reservation", name);
        }
        self.validate_new(name)?;
        self.insert_imported(name, raw)
    }

    pub fn abort_import(&mut self, name: &str) {
        self.pending_imports.remove(name);
    }

    pub fn is_import_pending(&self, name: &str) -> bool {
        self.pending_imports.contains(name)
    }

    pub fn close_file(&mut self, name: &str) -> Result<()> {
        let was_active = self.tabs.is_active(name);
        self.registry.remove(name)?;
        self.tabs.remove(name);
        log::debug!("closed {}", name);

        if was_active {
            let next = self
                .registry
                .first_name()
                .map(str::to_string)
                .ok_or(PlaygroundError::LastFile)?;
            self.activate(&next)?;
        }
        Ok(())
    }

    pub fn activate(&mut self, name: &str) -> Result<()> {
        if !self.registry.contains(name) {
            return Err(PlaygroundError::NotFound(name.to_string()));
        }
        self.tabs.activate(name);

        for file in self.registry.iter_mut() {
            file.editor.set_visible(file.name == name);
        }
        let file = self.registry.get_mut(name)?;
        file.editor.refresh();
        Ok(())
    }

    pub fn activate_next(&mut self) -> Result<()> {
        self.activate_offset(1)
    }

    pub fn activate_previous(&mut self) -> Result<()> {
        self.activate_offset(-1)
    }

    /// Forwards the editor pane size to every editor and re-measures the
    /// visible one.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.pane_size = Some((width, height));
        for file in self.registry.iter_mut() {
            file.editor.resize(width, height);
            if file.editor.is_visible() {
                file.editor.refresh();
            }
        }
    }

    /// Re-measures every editor, visible or not.
    pub fn refresh_all(&mut self) {
        for file in self.registry.iter_mut() {
            file.editor.refresh();
        }
    }

    fn activate_offset(&mut self, offset: isize) -> Result<()> {
        let name = self
            .tabs
            .neighbor(offset)
            .map(str::to_string)
            .ok_or(PlaygroundError::LastFile)?;
        self.activate(&name)
    }

    fn validate_new(&self, name: &str) -> Result<FileKind> {
        let kind = FileKind::from_name(name)?;
        if self.registry.contains(name) {
            return Err(PlaygroundError::DuplicateName(name.to_string()));
        }
        if self.pending_imports.contains(name) {
            return Err(PlaygroundError::ImportPending(name.to_string()));
        }
        Ok(kind)
    }

    fn insert_imported(&mut self, name: &str, raw: &[u8]) -> Result<()> {
        let contents = String::from_utf8_lossy(raw);
        log::debug!("importing {} ({} bytes)", name, raw.len());
        self.insert(name, &contents)?;
        self.activate(name)
    }

    /// Adds file and tab together; nothing is touched if the registry
    /// rejects the file.
    fn insert(&mut self, name: &str, contents: &str) -> Result<()> {
        let kind = FileKind::from_name(name)?;
        let mut editor = self.factory.create(kind, contents);
        if let Some((width, height)) = self.pane_size {
            editor.resize(width, height);
        }
        self.registry.add(name, kind, editor)?;
        self.tabs.push(Tab::new(name, kind));
        Ok(())
    }
}
