use super::key::KeyEvent;
use super::keymap::{KeyBinding, KeyMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResolution {
    Complete(&'static str),
    Prefix(String),
    Unbound(Vec<KeyEvent>),
    SelfInsert(char),
}

/// Walks multi-key sequences such as `C-x C-s` one key at a time.
#[derive(Debug, Default)]
pub struct KeyResolver {
    pending_keys: Vec<KeyEvent>,
    prefix_display: String,
}

impl KeyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, key: KeyEvent, keymap: &KeyMap) -> KeyResolution {
        let mut map = keymap;
        for pending in &self.pending_keys {
            match map.get_prefix(pending) {
                Some(inner) => map = inner,
                None => break,
            }
        }

        match map.get(&key) {
            Some(KeyBinding::Command(cmd)) => {
                let cmd = *cmd;
                self.clear();
                KeyResolution::Complete(cmd)
            }
            Some(KeyBinding::Prefix(_)) => {
                self.pending_keys.push(key);
                self.update_prefix_display();
                KeyResolution::Prefix(self.prefix_display.clone())
            }
            Some(KeyBinding::Unbound) | None => {
                if self.pending_keys.is_empty() {
                    if let Some(c) = key.insertable_char() {
                        return KeyResolution::SelfInsert(c);
                    }
                }
                let mut keys = std::mem::take(&mut self.pending_keys);
                keys.push(key);
                self.clear();
                KeyResolution::Unbound(keys)
            }
        }
    }

    pub fn clear(&mut self) {
        self.pending_keys.clear();
        self.prefix_display.clear();
    }

    pub fn is_pending(&self) -> bool {
        !self.pending_keys.is_empty()
    }

    pub fn pending_display(&self) -> &str {
        &self.prefix_display
    }

    fn update_prefix_display(&mut self) {
        self.prefix_display = self
            .pending_keys
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        self.prefix_display.push('-');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybinding::key::{Key, Modifiers};

    fn make_test_keymap() -> KeyMap {
        let mut map = KeyMap::new();
        map.bind_command(KeyEvent::plain(Key::F(5)), "run-preview");
        map.bind_command(KeyEvent::ctrl('f'), "forward-char");
        map.bind_sequence(&[KeyEvent::ctrl('x'), KeyEvent::ctrl('s')], "download-archive");
        map.bind_sequence(&[KeyEvent::ctrl('x'), KeyEvent::char('b')], "switch-to-file");
        map
    }

    #[test]
    fn test_resolve_direct_command() {
        let keymap = make_test_keymap();
        let mut resolver = KeyResolver::new();

        let result = resolver.resolve(KeyEvent::plain(Key::F(5)), &keymap);
        assert_eq!(result, KeyResolution::Complete("run-preview"));
        assert!(!resolver.is_pending());
    }

    #[test]
    fn test_resolve_prefix_then_command() {
        let keymap = make_test_keymap();
        let mut resolver = KeyResolver::new();

        let result = resolver.resolve(KeyEvent::ctrl('x'), &keymap);
        assert_eq!(result, KeyResolution::Prefix("C-x-".to_string()));
        assert!(resolver.is_pending());

        let result = resolver.resolve(KeyEvent::char('b'), &keymap);
        assert_eq!(result, KeyResolution::Complete("switch-to-file"));
        assert!(!resolver.is_pending());
    }

    #[test]
    fn test_resolve_self_insert() {
        let keymap = make_test_keymap();
        let mut resolver = KeyResolver::new();

        assert_eq!(
            resolver.resolve(KeyEvent::char('a'), &keymap),
            KeyResolution::SelfInsert('a')
        );
        assert_eq!(
            resolver.resolve(KeyEvent::new(Key::Char('<'), Modifiers::SHIFT), &keymap),
            KeyResolution::SelfInsert('<')
        );
    }

    #[test]
    fn test_resolve_unbound() {
        let keymap = make_test_keymap();
        let mut resolver = KeyResolver::new();

        let result = resolver.resolve(KeyEvent::ctrl('z'), &keymap);
        assert_eq!(result, KeyResolution::Unbound(vec![KeyEvent::ctrl('z')]));
    }

    #[test]
    fn test_printable_after_prefix_is_unbound() {
        let keymap = make_test_keymap();
        let mut resolver = KeyResolver::new();

        let _ = resolver.resolve(KeyEvent::ctrl('x'), &keymap);
        let result = resolver.resolve(KeyEvent::char('z'), &keymap);
        assert_eq!(
            result,
            KeyResolution::Unbound(vec![KeyEvent::ctrl('x'), KeyEvent::char('z')])
        );
        assert!(!resolver.is_pending());
    }
}
