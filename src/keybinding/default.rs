use super::key::{Key, KeyEvent, Modifiers};
use super::keymap::KeyMap;

pub fn default_keymap() -> KeyMap {
    let mut map = KeyMap::new();

    // Basic movement (Ctrl)
    map.bind_command(KeyEvent::ctrl('f'), "forward-char");
    map.bind_command(KeyEvent::ctrl('b'), "backward-char");
    map.bind_command(KeyEvent::ctrl('n'), "next-line");
    map.bind_command(KeyEvent::ctrl('p'), "previous-line");
    map.bind_command(KeyEvent::ctrl('a'), "move-beginning-of-line");
    map.bind_command(KeyEvent::ctrl('e'), "move-end-of-line");
    map.bind_command(KeyEvent::ctrl('v'), "scroll-up-command");
    map.bind_command(KeyEvent::meta('v'), "scroll-down-command");
    map.bind_command(
        KeyEvent::new(Key::Char('<'), Modifiers::META),
        "beginning-of-buffer",
    );
    map.bind_command(
        KeyEvent::new(Key::Char('>'), Modifiers::META),
        "end-of-buffer",
    );

    map.bind_command(KeyEvent::plain(Key::Right), "forward-char");
    map.bind_command(KeyEvent::plain(Key::Left), "backward-char");
    map.bind_command(KeyEvent::plain(Key::Down), "next-line");
    map.bind_command(KeyEvent::plain(Key::Up), "previous-line");
    map.bind_command(KeyEvent::plain(Key::Home), "move-beginning-of-line");
    map.bind_command(KeyEvent::plain(Key::End), "move-end-of-line");
    map.bind_command(KeyEvent::plain(Key::PageUp), "scroll-down-command");
    map.bind_command(KeyEvent::plain(Key::PageDown), "scroll-up-command");
    map.bind_command(KeyEvent::new(Key::Home, Modifiers::CTRL), "beginning-of-buffer");
    map.bind_command(KeyEvent::new(Key::End, Modifiers::CTRL), "end-of-buffer");

    map.bind_command(KeyEvent::ctrl('d'), "delete-char");
    map.bind_command(KeyEvent::plain(Key::Delete), "delete-char");
    map.bind_command(KeyEvent::plain(Key::Backspace), "delete-backward-char");
    map.bind_command(KeyEvent::plain(Key::Enter), "newline");
    map.bind_command(KeyEvent::ctrl('j'), "newline");
    map.bind_command(KeyEvent::plain(Key::Tab), "indent-for-tab-command");

    map.bind_command(KeyEvent::ctrl('g'), "keyboard-quit");
    map.bind_command(KeyEvent::meta('x'), "execute-extended-command");

    // Tabs
    map.bind_command(KeyEvent::meta_key(Key::Right), "next-file");
    map.bind_command(KeyEvent::meta_key(Key::Left), "previous-file");

    // Preview and export
    map.bind_command(KeyEvent::plain(Key::F(5)), "run-preview");
    map.bind_sequence(&[KeyEvent::ctrl('c'), KeyEvent::ctrl('c')], "run-preview");
    map.bind_sequence(&[KeyEvent::ctrl('c'), KeyEvent::ctrl('o')], "open-in-new-window");

    let mut cx_map = KeyMap::new();

    cx_map.bind_command(KeyEvent::ctrl('s'), "download-archive");
    cx_map.bind_command(KeyEvent::ctrl('f'), "import-file");
    cx_map.bind_command(KeyEvent::char('n'), "new-file");
    cx_map.bind_command(KeyEvent::char('k'), "close-file");
    cx_map.bind_command(KeyEvent::char('b'), "switch-to-file");
    cx_map.bind_command(KeyEvent::char('o'), "next-file");
    cx_map.bind_command(KeyEvent::char('O'), "previous-file");

    cx_map.bind_command(KeyEvent::char('3'), "layout-vertical");
    cx_map.bind_command(KeyEvent::char('2'), "layout-horizontal");
    cx_map.bind_command(KeyEvent::char('l'), "toggle-layout");

    cx_map.bind_command(KeyEvent::ctrl('c'), "exit");

    map.bind_prefix(KeyEvent::ctrl('x'), cx_map);

    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keybinding::keymap::KeyBinding;

    #[test]
    fn test_default_keymap_has_basic_bindings() {
        let keymap = default_keymap();

        assert!(matches!(
            keymap.get(&KeyEvent::ctrl('f')),
            Some(KeyBinding::Command("forward-char"))
        ));
        assert!(keymap.is_prefix(&KeyEvent::ctrl('x')));
        assert!(keymap.is_prefix(&KeyEvent::ctrl('c')));
    }

    #[test]
    fn test_playground_bindings() {
        let keymap = default_keymap();
        let cases: [(&[KeyEvent], &str); 8] = [
            (&[KeyEvent::plain(Key::F(5))], "run-preview"),
            (&[KeyEvent::ctrl('c'), KeyEvent::ctrl('c')], "run-preview"),
            (&[KeyEvent::ctrl('c'), KeyEvent::ctrl('o')], "open-in-new-window"),
            (&[KeyEvent::ctrl('x'), KeyEvent::ctrl('s')], "download-archive"),
            (&[KeyEvent::ctrl('x'), KeyEvent::char('n')], "new-file"),
            (&[KeyEvent::ctrl('x'), KeyEvent::ctrl('f')], "import-file"),
            (&[KeyEvent::ctrl('x'), KeyEvent::char('k')], "close-file"),
            (&[KeyEvent::ctrl('x'), KeyEvent::char('l')], "toggle-layout"),
        ];
        for (keys, command) in cases {
            assert_eq!(keymap.lookup(keys), Some(command));
        }
    }
}
