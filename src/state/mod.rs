pub mod files;
pub mod layout;
pub mod minibuffer;
pub mod playground;
pub mod registry;
pub mod tabs;

pub use files::FileManager;
pub use layout::{Layout, Panes, Rect};
pub use minibuffer::{Minibuffer, PromptKind};
pub use playground::{Completion, PlaygroundState};
pub use registry::{ArchiveEntry, FileRegistry, PlaygroundFile};
pub use tabs::{Tab, TabHit, TabRegion, TabStrip};
