pub mod editor;
pub mod file_kind;
pub mod position;
pub mod rope_ext;
pub mod syntax;

pub use editor::{EditorAdapter, EditorFactory, EditorOptions, TextEditor, TextEditorFactory};
pub use file_kind::FileKind;
pub use position::{CharOffset, Position};
pub use syntax::{HighlightKind, HighlightSpan, SyntaxMode};
