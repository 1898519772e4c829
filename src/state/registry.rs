use std::collections::HashMap;

use crate::core::{EditorAdapter, FileKind};
use crate::error::{PlaygroundError, Result};

#[derive(Debug)]
pub struct PlaygroundFile<E> {
    pub name: String,
    pub kind: FileKind,
    pub editor: E,
}

impl<E: EditorAdapter> PlaygroundFile<E> {
    pub fn text(&self) -> String {
        self.editor.text()
    }
}

/// Name and contents of one file at the moment it was captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub contents: String,
}

/// Authoritative set of open files, in insertion order.
#[derive(Debug)]
pub struct FileRegistry<E> {
    files: HashMap<String, PlaygroundFile<E>>,
    order: Vec<String>,
}

impl<E> Default for FileRegistry<E> {
    fn default() -> Self {
        Self {
            files: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<E: EditorAdapter> FileRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, kind: FileKind, editor: E) -> Result<()> {
        let name = name.into();
        if self.files.contains_key(&name) {
            return Err(PlaygroundError::DuplicateName(name));
        }
        self.order.push(name.clone());
        self.files.insert(
            name.clone(),
            PlaygroundFile {
                name,
                kind,
                editor,
            },
        );
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<PlaygroundFile<E>> {
        if !self.files.contains_key(name) {
            return Err(PlaygroundError::NotFound(name.to_string()));
        }
        if self.files.len() == 1 {
            return Err(PlaygroundError::LastFile);
        }
        self.order.retain(|n| n != name);
        self.files
            .remove(name)
            .ok_or_else(|| PlaygroundError::NotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Result<&PlaygroundFile<E>> {
        self.files
            .get(name)
            .ok_or_else(|| PlaygroundError::NotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut PlaygroundFile<E>> {
        self.files
            .get_mut(name)
            .ok_or_else(|| PlaygroundError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.order.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlaygroundFile<E>> {
        self.order.iter().filter_map(|name| self.files.get(name))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PlaygroundFile<E>> {
        self.files.values_mut()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn entries(&self) -> Vec<ArchiveEntry> {
        self.iter()
            .map(|file| ArchiveEntry {
                name: file.name.clone(),
                contents: file.text(),
            })
            .collect()
    }
}
