use ropey::Rope;

use super::file_kind::FileKind;
use super::position::{CharOffset, Position};
use super::rope_ext::RopeExt;
use super::syntax::{self, HighlightSpan, SyntaxMode};

pub const DEFAULT_THEME: &str = "material-ocean";

/// The capability set the file manager needs from an embedded editor.
pub trait EditorAdapter {
    fn text(&self) -> String;

    fn set_text(&mut self, text: &str);

    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;

    /// Records a new pane size. Hidden editors only remember it until the
    /// next `refresh`.
    fn resize(&mut self, width: u16, height: u16);

    /// Re-measures geometry. Must be called after any visibility change or
    /// resize, otherwise scroll and line geometry are stale.
    fn refresh(&mut self);
}

pub trait EditorFactory {
    type Editor: EditorAdapter;

    fn create(&self, kind: FileKind, initial_value: &str) -> Self::Editor;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    pub syntax_mode: SyntaxMode,
    pub theme: String,
    pub show_line_numbers: bool,
    pub initial_value: String,
    pub auto_close_tags: bool,
    pub tab_width: usize,
}

impl EditorOptions {
    pub fn for_kind(kind: FileKind, initial_value: impl Into<String>) -> Self {
        Self {
            syntax_mode: kind.syntax_mode(),
            theme: DEFAULT_THEME.to_string(),
            show_line_numbers: true,
            initial_value: initial_value.into(),
            auto_close_tags: kind.auto_close_tags(),
            tab_width: 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextEditorFactory {
    pub theme: String,
    pub show_line_numbers: bool,
    pub tab_width: usize,
}

impl Default for TextEditorFactory {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            show_line_numbers: true,
            tab_width: 4,
        }
    }
}

impl EditorFactory for TextEditorFactory {
    type Editor = TextEditor;

    fn create(&self, kind: FileKind, initial_value: &str) -> TextEditor {
        let mut options = EditorOptions::for_kind(kind, initial_value);
        options.theme = self.theme.clone();
        options.show_line_numbers = self.show_line_numbers;
        options.tab_width = self.tab_width;
        TextEditor::new(options)
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Rope-backed editor widget used by the terminal frontend.
#[derive(Debug)]
pub struct TextEditor {
    pub options: EditorOptions,
    pub text: Rope,
    pub cursor: CharOffset,
    pub scroll_line: usize,
    pub scroll_column: usize,
    pub modified: bool,
    goal_column: Option<usize>,
    width: u16,
    height: u16,
    pending_size: Option<(u16, u16)>,
    visible: bool,
    stale: bool,
    highlights: Vec<HighlightSpan>,
}

impl TextEditor {
    pub fn new(options: EditorOptions) -> Self {
        let text = Rope::from_str(&options.initial_value);
        let highlights = syntax::highlight(options.syntax_mode, &options.initial_value);
        Self {
            options,
            text,
            cursor: CharOffset(0),
            scroll_line: 0,
            scroll_column: 0,
            modified: false,
            goal_column: None,
            width: 80,
            height: 24,
            pending_size: None,
            visible: false,
            stale: true,
            highlights,
        }
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn needs_refresh(&self) -> bool {
        self.stale
    }

    pub fn highlights(&self) -> &[HighlightSpan] {
        &self.highlights
    }

    pub fn cursor_position(&self) -> Position {
        self.text.char_to_position(self.cursor)
    }

    pub fn line_count(&self) -> usize {
        self.text.len_lines()
    }

    /// Width of the line-number gutter, including the separating space.
    pub fn gutter_width(&self) -> usize {
        if self.options.show_line_numbers {
            self.line_count().to_string().len().max(2) + 1
        } else {
            0
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if c == '>' && self.options.auto_close_tags {
            if let Some(tag) = self.open_tag_before_cursor() {
                self.insert_str(">");
                let closing = format!("</{}>", tag);
                self.text.insert(self.cursor.0, &closing);
                self.after_edit();
                return;
            }
        }
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.text.insert(self.cursor.0, s);
        self.cursor = CharOffset(self.cursor.0 + s.chars().count());
        self.goal_column = None;
        self.after_edit();
    }

    /// Inserts a newline, carrying over the current line's indentation.
    pub fn newline(&mut self) {
        let line = self.cursor_position().line;
        let indent: String = self
            .text
            .line_text(line)
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .collect();
        self.insert_str(&format!("\n{}", indent));
    }

    pub fn indent(&mut self) {
        let column = self.cursor_position().column;
        let width = self.options.tab_width.max(1);
        let spaces = width - column % width;
        self.insert_str(&" ".repeat(spaces));
    }

    pub fn delete_backward(&mut self) -> Option<char> {
        if self.cursor.0 == 0 {
            return None;
        }
        let pos = self.cursor.0 - 1;
        let ch = self.text.char(pos);
        self.text.remove(pos..pos + 1);
        self.cursor = CharOffset(pos);
        self.goal_column = None;
        self.after_edit();
        Some(ch)
    }

    pub fn delete_forward(&mut self) -> Option<char> {
        let pos = self.cursor.0;
        if pos >= self.text.len_chars() {
            return None;
        }
        let ch = self.text.char(pos);
        self.text.remove(pos..pos + 1);
        self.goal_column = None;
        self.after_edit();
        Some(ch)
    }

    pub fn move_forward(&mut self, count: usize) {
        self.cursor = CharOffset((self.cursor.0 + count).min(self.text.len_chars()));
        self.goal_column = None;
        self.ensure_cursor_visible();
    }

    pub fn move_backward(&mut self, count: usize) {
        self.cursor = self.cursor.saturating_sub(count);
        self.goal_column = None;
        self.ensure_cursor_visible();
    }

    pub fn move_lines(&mut self, delta: isize) {
        let pos = self.cursor_position();
        let goal = *self.goal_column.get_or_insert(pos.column);
        let last_line = self.text.len_lines().saturating_sub(1);
        let line = pos.line.saturating_add_signed(delta).min(last_line);
        self.cursor = self.text.position_to_char(Position::new(line, goal));
        self.ensure_cursor_visible();
    }

    pub fn move_to_line_start(&mut self) {
        let line = self.cursor_position().line;
        self.cursor = self.text.line_start_char(line);
        self.goal_column = None;
        self.ensure_cursor_visible();
    }

    pub fn move_to_line_end(&mut self) {
        let line = self.cursor_position().line;
        self.cursor = self
            .text
            .position_to_char(Position::new(line, self.text.line_len_chars(line)));
        self.goal_column = None;
        self.ensure_cursor_visible();
    }

    pub fn move_to_start(&mut self) {
        self.cursor = CharOffset(0);
        self.goal_column = None;
        self.ensure_cursor_visible();
    }

    pub fn move_to_end(&mut self) {
        self.cursor = CharOffset(self.text.len_chars());
        self.goal_column = None;
        self.ensure_cursor_visible();
    }

    pub fn page(&mut self, direction: isize) {
        let lines = (self.height as isize - 2).max(1);
        self.move_lines(direction * lines);
    }

    fn after_edit(&mut self) {
        self.modified = true;
        self.highlights = syntax::highlight(self.options.syntax_mode, &self.text.to_string());
        self.ensure_cursor_visible();
    }

    fn ensure_cursor_visible(&mut self) {
        let pos = self.cursor_position();
        let height = self.height.max(1) as usize;
        if pos.line < self.scroll_line {
            self.scroll_line = pos.line;
        } else if pos.line >= self.scroll_line + height {
            self.scroll_line = pos.line + 1 - height;
        }

        let width = (self.width as usize).saturating_sub(self.gutter_width()).max(1);
        if pos.column < self.scroll_column {
            self.scroll_column = pos.column;
        } else if pos.column >= self.scroll_column + width {
            self.scroll_column = pos.column + 1 - width;
        }
    }

    fn open_tag_before_cursor(&self) -> Option<String> {
        let pos = self.cursor_position();
        let line = self.text.line_text(pos.line);
        let before: String = line.chars().take(pos.column).collect();
        let start = before.rfind('<')?;
        let inside = &before[start + 1..];
        if inside.contains('>') || inside.ends_with('/') {
            return None;
        }
        let name: String = inside
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        if name.is_empty() || VOID_ELEMENTS.contains(&name.to_ascii_lowercase().as_str()) {
            return None;
        }
        Some(name)
    }
}

impl EditorAdapter for TextEditor {
    fn text(&self) -> String {
        self.text.to_string()
    }

    fn set_text(&mut self, text: &str) {
        self.text = Rope::from_str(text);
        self.cursor = CharOffset(self.cursor.0.min(self.text.len_chars()));
        self.goal_column = None;
        self.after_edit();
    }

    fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.stale = true;
        }
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn resize(&mut self, width: u16, height: u16) {
        self.pending_size = Some((width, height));
        self.stale = true;
    }

    fn refresh(&mut self) {
        if let Some((width, height)) = self.pending_size.take() {
            self.width = width;
            self.height = height;
        }
        let last_line = self.text.len_lines().saturating_sub(1);
        self.scroll_line = self.scroll_line.min(last_line);
        self.ensure_cursor_visible();
        self.stale = false;
    }
}
