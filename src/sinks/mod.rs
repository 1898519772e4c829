pub mod export;
pub mod preview;

pub use export::{ArchiveExporter, DEFAULT_ARCHIVE_NAME};
pub use preview::{BrowserLauncher, InlinePreview, NewWindowSource, SystemBrowser, WindowPreview};
