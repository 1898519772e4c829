use std::io::{Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use unicode_width::UnicodeWidthChar;

use crate::core::rope_ext::RopeExt;
use crate::core::syntax::kind_at;
use crate::core::{HighlightKind, TextEditor};
use crate::state::tabs::CLOSE_GLYPH;
use crate::state::{Layout, PlaygroundState, Rect};

pub const MIN_WIDTH: u16 = 20;
pub const MIN_HEIGHT: u16 = 5;

/// Colors for one theme.
#[derive(Debug, Clone, Copy)]
struct Palette {
    background: Color,
    foreground: Color,
    gutter: Color,
    tab_active: Color,
    tab_inactive: Color,
    modeline: Color,
    keyword: Color,
    string: Color,
    number: Color,
    comment: Color,
    tag: Color,
    attribute: Color,
    property: Color,
    constant: Color,
}

impl Palette {
    fn for_theme(theme: &str) -> Self {
        match theme {
            "light" | "default" => Self {
                background: Color::Reset,
                foreground: Color::Black,
                gutter: Color::Grey,
                tab_active: Color::White,
                tab_inactive: Color::Grey,
                modeline: Color::Grey,
                keyword: Color::DarkMagenta,
                string: Color::DarkRed,
                number: Color::DarkGreen,
                comment: Color::DarkGrey,
                tag: Color::DarkBlue,
                attribute: Color::DarkYellow,
                property: Color::DarkCyan,
                constant: Color::DarkGreen,
            },
            _ => Self {
                background: Color::Rgb { r: 0x0f, g: 0x11, b: 0x1a },
                foreground: Color::Rgb { r: 0x8f, g: 0x93, b: 0xa2 },
                gutter: Color::Rgb { r: 0x3b, g: 0x3f, b: 0x51 },
                tab_active: Color::Rgb { r: 0x1f, g: 0x22, b: 0x33 },
                tab_inactive: Color::Rgb { r: 0x09, g: 0x0b, b: 0x10 },
                modeline: Color::Rgb { r: 0x1f, g: 0x22, b: 0x33 },
                keyword: Color::Rgb { r: 0xc7, g: 0x92, b: 0xea },
                string: Color::Rgb { r: 0xc3, g: 0xe8, b: 0x8d },
                number: Color::Rgb { r: 0xf7, g: 0x8c, b: 0x6c },
                comment: Color::Rgb { r: 0x46, g: 0x4b, b: 0x5d },
                tag: Color::Rgb { r: 0xf0, g: 0x71, b: 0x78 },
                attribute: Color::Rgb { r: 0xff, g: 0xcb, b: 0x6b },
                property: Color::Rgb { r: 0x82, g: 0xaa, b: 0xff },
                constant: Color::Rgb { r: 0xf7, g: 0x8c, b: 0x6c },
            },
        }
    }

    fn highlight(&self, kind: HighlightKind) -> Color {
        match kind {
            HighlightKind::Keyword => self.keyword,
            HighlightKind::String => self.string,
            HighlightKind::Number => self.number,
            HighlightKind::Comment => self.comment,
            HighlightKind::Tag => self.tag,
            HighlightKind::Attribute => self.attribute,
            HighlightKind::Property => self.property,
            HighlightKind::Constant => self.constant,
        }
    }
}

pub fn render(
    state: &PlaygroundState,
    stdout: &mut Stdout,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    let palette = Palette::for_theme(&state.config.theme);
    let panes = state.panes();

    queue!(stdout, Hide)?;

    render_tabs(state, stdout, &palette, panes.tab_row, width)?;
    if let Some(file) = state.files.active() {
        render_editor(&file.editor, stdout, &palette, panes.editor)?;
    }
    render_separator(state, stdout, &palette, panes.editor, panes.preview)?;
    render_preview(state, stdout, &palette, panes.preview)?;
    render_modeline(state, stdout, &palette, panes.modeline_row, width)?;
    render_minibuffer(state, stdout, panes.minibuffer_row, width)?;

    if state.minibuffer.is_active() {
        let cursor_x = state.minibuffer.cursor_screen_pos() as u16;
        queue!(stdout, MoveTo(cursor_x.min(width - 1), height - 1))?;
    } else if let Some(file) = state.files.active() {
        let editor = &file.editor;
        let pos = editor.cursor_position();
        let area = panes.editor;
        let screen_line = pos.line.saturating_sub(editor.scroll_line);
        let screen_col = pos.column.saturating_sub(editor.scroll_column) + editor.gutter_width();

        let x = (area.x as usize + screen_col).min((area.x + area.width).saturating_sub(1) as usize);
        let y = (area.y as usize + screen_line).min((area.y + area.height).saturating_sub(1) as usize);
        queue!(stdout, MoveTo(x as u16, y as u16))?;
    }

    queue!(stdout, Show)?;
    Ok(())
}

pub fn render_too_small(stdout: &mut Stdout, width: u16, height: u16) -> std::io::Result<()> {
    queue!(stdout, Hide, ResetColor)?;
    for row in 0..height {
        queue!(stdout, MoveTo(0, row), Print(" ".repeat(width as usize)))?;
    }
    let text: String = "Window too small".chars().take(width as usize).collect();
    queue!(stdout, MoveTo(0, 0), Print(text))?;
    stdout.flush()
}

fn render_tabs(
    state: &PlaygroundState,
    stdout: &mut Stdout,
    palette: &Palette,
    row: u16,
    width: u16,
) -> std::io::Result<()> {
    queue!(
        stdout,
        MoveTo(0, row),
        SetBackgroundColor(palette.tab_inactive),
        Print(" ".repeat(width as usize))
    )?;

    for region in state.files.tabs().regions() {
        if region.body.start >= width {
            break;
        }
        let background = if region.active {
            palette.tab_active
        } else {
            palette.tab_inactive
        };
        let room = (width - region.body.start) as usize;
        let label: String = region.label.chars().take(room).collect();

        queue!(
            stdout,
            MoveTo(region.body.start, row),
            SetBackgroundColor(background),
            SetForegroundColor(palette.foreground)
        )?;
        if region.active {
            queue!(stdout, SetAttribute(Attribute::Bold))?;
        }
        queue!(stdout, Print(label), SetAttribute(Attribute::NormalIntensity))?;

        if region.close < width {
            queue!(
                stdout,
                MoveTo(region.close, row),
                SetForegroundColor(palette.comment),
                Print(CLOSE_GLYPH)
            )?;
        }
    }

    queue!(stdout, ResetColor)
}

fn render_editor(
    editor: &TextEditor,
    stdout: &mut Stdout,
    palette: &Palette,
    area: Rect,
) -> std::io::Result<()> {
    let gutter = editor.gutter_width();
    let text_width = (area.width as usize).saturating_sub(gutter);
    let total_lines = editor.line_count();
    let spans = editor.highlights();

    for row in 0..area.height {
        let line_idx = editor.scroll_line + row as usize;
        queue!(
            stdout,
            MoveTo(area.x, area.y + row),
            SetBackgroundColor(palette.background)
        )?;

        if line_idx >= total_lines {
            queue!(
                stdout,
                SetForegroundColor(palette.gutter),
                Print(format!("{:<width$}", "~", width = area.width as usize))
            )?;
            continue;
        }

        if gutter > 0 {
            queue!(
                stdout,
                SetForegroundColor(palette.gutter),
                Print(format!("{:>width$} ", line_idx + 1, width = gutter - 1))
            )?;
        }

        let line_start = editor.text.line_start_char(line_idx).0;
        let mut byte = editor.text.char_to_byte(line_start);
        let mut printed = 0;
        let mut current: Option<Option<HighlightKind>> = None;

        for (col, ch) in editor.text.line_text(line_idx).chars().enumerate() {
            let ch_bytes = ch.len_utf8();
            if col >= editor.scroll_column {
                let ch = if ch == '\t' { ' ' } else { ch };
                let w = ch.width().unwrap_or(0).max(1);
                if printed + w > text_width {
                    break;
                }
                let kind = kind_at(spans, byte);
                if current != Some(kind) {
                    let color = kind.map_or(palette.foreground, |k| palette.highlight(k));
                    queue!(stdout, SetForegroundColor(color))?;
                    current = Some(kind);
                }
                queue!(stdout, Print(ch))?;
                printed += w;
            }
            byte += ch_bytes;
        }

        if printed < text_width {
            queue!(stdout, Print(" ".repeat(text_width - printed)))?;
        }
    }

    queue!(stdout, ResetColor)
}

fn render_separator(
    state: &PlaygroundState,
    stdout: &mut Stdout,
    palette: &Palette,
    editor: Rect,
    preview: Rect,
) -> std::io::Result<()> {
    queue!(stdout, SetForegroundColor(palette.gutter), SetBackgroundColor(palette.background))?;
    match state.layout {
        Layout::Vertical => {
            let x = editor.x + editor.width;
            if x < preview.x {
                for row in 0..editor.height {
                    queue!(stdout, MoveTo(x, editor.y + row), Print('│'))?;
                }
            }
        }
        Layout::Horizontal => {}
    }
    queue!(stdout, ResetColor)
}

fn render_preview(
    state: &PlaygroundState,
    stdout: &mut Stdout,
    palette: &Palette,
    area: Rect,
) -> std::io::Result<()> {
    if area.height == 0 || area.width == 0 {
        return Ok(());
    }

    let width = area.width as usize;
    let status = if state.preview_stale { " (stale)" } else { "" };
    let header = format!(" Preview #{}{} ", state.preview.runs(), status);
    let header: String = format!("{:─<width$}", header, width = width).chars().take(width).collect();
    queue!(
        stdout,
        MoveTo(area.x, area.y),
        SetBackgroundColor(palette.modeline),
        SetForegroundColor(palette.foreground),
        Print(header),
        SetBackgroundColor(palette.background)
    )?;

    let lines = state.preview.text_lines();
    for row in 1..area.height {
        let line = lines.get(row as usize - 1).map(String::as_str).unwrap_or("");
        let shown = fit_cells(line, width);
        queue!(stdout, MoveTo(area.x, area.y + row), Print(shown))?;
    }

    queue!(stdout, ResetColor)
}

fn render_modeline(
    state: &PlaygroundState,
    stdout: &mut Stdout,
    palette: &Palette,
    row: u16,
    width: u16,
) -> std::io::Result<()> {
    queue!(
        stdout,
        MoveTo(0, row),
        SetBackgroundColor(palette.modeline),
        SetForegroundColor(palette.foreground),
        SetAttribute(Attribute::Bold)
    )?;

    let active = state.files.active();
    let name = active.map(|f| f.name.as_str()).unwrap_or("[no file]");
    let modified = active
        .map(|f| if f.editor.modified { "**" } else { "--" })
        .unwrap_or("--");
    let mode = active
        .map(|f| f.editor.options.syntax_mode.name())
        .unwrap_or("text");
    let (line, col) = active
        .map(|f| {
            let pos = f.editor.cursor_position();
            (pos.line + 1, pos.column + 1)
        })
        .unwrap_or((1, 1));
    let exporting = if state.exporting { " [exporting]" } else { "" };

    let left = format!(
        "-{}- {}  ({})  {} files  {}{} ",
        modified,
        name,
        mode,
        state.files.registry().len(),
        state.layout.name(),
        exporting
    );
    let right = format!(" L{}:C{} ", line, col);
    let padding = (width as usize).saturating_sub(left.chars().count() + right.len());

    let mut text = left;
    text.push_str(&"-".repeat(padding));
    text.push_str(&right);
    let text: String = text.chars().take(width as usize).collect();

    queue!(stdout, Print(text), ResetColor, SetAttribute(Attribute::Reset))
}

fn render_minibuffer(
    state: &PlaygroundState,
    stdout: &mut Stdout,
    row: u16,
    width: u16,
) -> std::io::Result<()> {
    queue!(stdout, MoveTo(0, row), ResetColor)?;

    let content = if state.minibuffer.is_active() {
        state.minibuffer.display()
    } else if let Some(ref msg) = state.message {
        msg.clone()
    } else if state.key_resolver.is_pending() {
        state.key_resolver.pending_display().to_string()
    } else {
        String::new()
    };

    queue!(stdout, Print(fit_cells(&content, width as usize)))
}

/// `text` cut to `width` terminal cells and padded with spaces to fill them.
fn fit_cells(text: &str, width: usize) -> String {
    let mut shown = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        shown.push(ch);
        used += w;
    }
    shown.push_str(&" ".repeat(width - used));
    shown
}
