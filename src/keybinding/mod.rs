pub mod default;
pub mod key;
pub mod keymap;
pub mod resolver;

pub use key::{Key, KeyEvent, Modifiers};
pub use keymap::KeyMap;
pub use resolver::{KeyResolution, KeyResolver};
