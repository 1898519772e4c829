use std::collections::HashMap;
use super::key::KeyEvent;

#[derive(Debug, Clone)]
pub enum KeyBinding {
    Command(&'static str),
    Prefix(KeyMap),
    Unbound,
}

/// One level of key bindings. Prefix keys nest a further map.
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    bindings: HashMap<KeyEvent, KeyBinding>,
}

impl KeyMap {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn bind(&mut self, key: KeyEvent, binding: KeyBinding) {
        self.bindings.insert(key, binding);
    }

    pub fn bind_command(&mut self, key: KeyEvent, command: &'static str) {
        self.bind(key, KeyBinding::Command(command));
    }

    pub fn bind_prefix(&mut self, key: KeyEvent, map: KeyMap) {
        self.bind(key, KeyBinding::Prefix(map));
    }

    /// Binds a key sequence, creating intermediate prefix maps as needed.
    /// An existing command binding on a prefix key is replaced.
    pub fn bind_sequence(&mut self, keys: &[KeyEvent], command: &'static str) {
        match keys {
            [] => {}
            [last] => self.bind_command(*last, command),
            [first, rest @ ..] => {
                let entry = self
                    .bindings
                    .entry(*first)
                    .or_insert_with(|| KeyBinding::Prefix(KeyMap::new()));
                if !matches!(entry, KeyBinding::Prefix(_)) {
                    *entry = KeyBinding::Prefix(KeyMap::new());
                }
                if let KeyBinding::Prefix(map) = entry {
                    map.bind_sequence(rest, command);
                }
            }
        }
    }

    pub fn get(&self, key: &KeyEvent) -> Option<&KeyBinding> {
        self.bindings.get(key)
    }

    pub fn is_prefix(&self, key: &KeyEvent) -> bool {
        matches!(self.bindings.get(key), Some(KeyBinding::Prefix(_)))
    }

    pub fn get_prefix(&self, key: &KeyEvent) -> Option<&KeyMap> {
        match self.bindings.get(key) {
            Some(KeyBinding::Prefix(map)) => Some(map),
            _ => None,
        }
    }

    /// Command bound to a full key sequence, if any.
    pub fn lookup(&self, keys: &[KeyEvent]) -> Option<&'static str> {
        match keys {
            [] => None,
            [last] => match self.get(last) {
                Some(KeyBinding::Command(name)) => Some(*name),
                _ => None,
            },
            [first, rest @ ..] => self.get_prefix(first)?.lookup(rest),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyEvent, &KeyBinding)> {
        self.bindings.iter()
    }
}
