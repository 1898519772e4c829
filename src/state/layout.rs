use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Editor and preview side by side.
    #[default]
    Vertical,
    /// Editor above preview.
    Horizontal,
}

impl Layout {
    pub fn toggled(self) -> Self {
        match self {
            Layout::Vertical => Layout::Horizontal,
            Layout::Horizontal => Layout::Vertical,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Layout::Vertical => "vertical",
            Layout::Horizontal => "horizontal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }
}

/// Screen regions for one frame: tab row, editor, preview, mode line and
/// minibuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panes {
    pub tab_row: u16,
    pub editor: Rect,
    pub preview: Rect,
    pub modeline_row: u16,
    pub minibuffer_row: u16,
}

impl Panes {
    pub fn compute(layout: Layout, width: u16, height: u16) -> Self {
        let content_height = height.saturating_sub(3);
        let content_y = 1;

        let (editor, preview) = match layout {
            Layout::Vertical => {
                let editor_width = width.saturating_sub(1) / 2;
                let preview_x = editor_width.saturating_add(1).min(width);
                (
                    Rect::new(0, content_y, editor_width, content_height),
                    Rect::new(
                        preview_x,
                        content_y,
                        width.saturating_sub(preview_x),
                        content_height,
                    ),
                )
            }
            Layout::Horizontal => {
                let editor_height = content_height / 2;
                (
                    Rect::new(0, content_y, width, editor_height),
                    Rect::new(
                        0,
                        content_y + editor_height,
                        width,
                        content_height - editor_height,
                    ),
                )
            }
        };

        Self {
            tab_row: 0,
            editor,
            preview,
            modeline_row: height.saturating_sub(2),
            minibuffer_row: height.saturating_sub(1),
        }
    }
}
