use bitflags::bitflags;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    F(u8),
    Backspace,
    Tab,
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const NONE  = 0b0000;
        const CTRL  = 0b0001;
        const META  = 0b0010;
        const SHIFT = 0b0100;
        const SUPER = 0b1000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn char(c: char) -> Self {
        Self {
            key: Key::Char(c),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            key: Key::Char(c.to_ascii_lowercase()),
            modifiers: Modifiers::CTRL,
        }
    }

    pub fn meta(c: char) -> Self {
        Self {
            key: Key::Char(c.to_ascii_lowercase()),
            modifiers: Modifiers::META,
        }
    }

    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn meta_key(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::META,
        }
    }

    /// A character that should be typed into the editor. Shift alone still
    /// counts as typing.
    pub fn insertable_char(&self) -> Option<char> {
        match self.key {
            Key::Char(c) if !c.is_control() && (self.modifiers - Modifiers::SHIFT).is_empty() => {
                Some(c)
            }
            _ => None,
        }
    }

    pub fn is_printable(&self) -> bool {
        self.insertable_char().is_some()
    }
}

const MODIFIER_PREFIXES: [(Modifiers, &str); 4] = [
    (Modifiers::CTRL, "C-"),
    (Modifiers::META, "M-"),
    (Modifiers::SUPER, "s-"),
    (Modifiers::SHIFT, "S-"),
];

impl Key {
    /// Bracketed name used in the modeline, `None` for chars and function keys.
    fn name(&self) -> Option<&'static str> {
        let name = match self {
            Key::Char(_) | Key::F(_) => return None,
            Key::Backspace => "backspace",
            Key::Tab => "tab",
            Key::Enter => "return",
            Key::Escape => "escape",
            Key::Up => "up",
            Key::Down => "down",
            Key::Left => "left",
            Key::Right => "right",
            Key::Home => "home",
            Key::End => "end",
            Key::PageUp => "prior",
            Key::PageDown => "next",
            Key::Insert => "insert",
            Key::Delete => "delete",
        };
        Some(name)
    }

    fn from_code(code: crossterm::event::KeyCode) -> Option<Key> {
        use crossterm::event::KeyCode;

        Some(match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::F(n) => Key::F(n),
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Tab | KeyCode::BackTab => Key::Tab,
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Insert => Key::Insert,
            KeyCode::Delete => Key::Delete,
            _ => return None,
        })
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, prefix) in MODIFIER_PREFIXES {
            if self.modifiers.contains(flag) {
                f.write_str(prefix)?;
            }
        }
        match (self.key, self.key.name()) {
            (Key::Char(c), _) => write!(f, "{c}"),
            (Key::F(n), _) => write!(f, "<f{n}>"),
            (_, Some(name)) => write!(f, "<{name}>"),
            (_, None) => Ok(()),
        }
    }
}

impl KeyEvent {
    /// Translates a terminal key press. Keys the playground has no name for
    /// (media keys, lone modifiers) yield `None` and are dropped.
    pub fn from_terminal(event: crossterm::event::KeyEvent) -> Option<Self> {
        use crossterm::event::KeyModifiers;

        let mut modifiers = [
            (KeyModifiers::CONTROL, Modifiers::CTRL),
            (KeyModifiers::ALT, Modifiers::META),
            (KeyModifiers::SHIFT, Modifiers::SHIFT),
            (KeyModifiers::SUPER, Modifiers::SUPER),
        ]
        .into_iter()
        .filter(|(term, _)| event.modifiers.contains(*term))
        .fold(Modifiers::NONE, |acc, (_, ours)| acc | ours);

        let key = match Key::from_code(event.code)? {
            // Some terminals report M-O as 'O' with Alt but no Shift flag.
            Key::Char(c)
                if c.is_ascii_uppercase()
                    && modifiers.intersects(Modifiers::CTRL | Modifiers::META) =>
            {
                modifiers |= Modifiers::SHIFT;
                Key::Char(c.to_ascii_lowercase())
            }
            Key::Char(c) => {
                // The char already carries its case.
                modifiers.remove(Modifiers::SHIFT);
                Key::Char(c)
            }
            other => other,
        };

        Some(Self { key, modifiers })
    }
}
