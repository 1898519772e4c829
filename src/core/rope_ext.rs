use ropey::Rope;

use super::position::{CharOffset, Position};

pub trait RopeExt {
    fn char_to_position(&self, char_idx: CharOffset) -> Position;
    fn position_to_char(&self, pos: Position) -> CharOffset;
    fn line_len_chars(&self, line_idx: usize) -> usize;
    fn line_start_char(&self, line_idx: usize) -> CharOffset;
    fn line_text(&self, line_idx: usize) -> String;
}

impl RopeExt for Rope {
    fn char_to_position(&self, char_idx: CharOffset) -> Position {
        let char_idx = char_idx.0.min(self.len_chars());
        let line = self.char_to_line(char_idx);
        Position::new(line, char_idx - self.line_to_char(line))
    }

    fn position_to_char(&self, pos: Position) -> CharOffset {
        let line = pos.line.min(self.len_lines().saturating_sub(1));
        let column = pos.column.min(self.line_len_chars(line));
        CharOffset(self.line_to_char(line) + column)
    }

    fn line_len_chars(&self, line_idx: usize) -> usize {
        if line_idx >= self.len_lines() {
            return 0;
        }
        let line = self.line(line_idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    fn line_start_char(&self, line_idx: usize) -> CharOffset {
        CharOffset(self.line_to_char(line_idx.min(self.len_lines().saturating_sub(1))))
    }

    fn line_text(&self, line_idx: usize) -> String {
        if line_idx >= self.len_lines() {
            return String::new();
        }
        let start = self.line_to_char(line_idx);
        self.slice(start..start + self.line_len_chars(line_idx))
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_to_position() {
        let rope = Rope::from_str("hello\nworld\n");
        assert_eq!(rope.char_to_position(CharOffset(0)), Position::new(0, 0));
        assert_eq!(rope.char_to_position(CharOffset(6)), Position::new(1, 0));
        assert_eq!(rope.char_to_position(CharOffset(11)), Position::new(1, 5));
        assert_eq!(rope.char_to_position(CharOffset(99)), Position::new(2, 0));
    }

    #[test]
    fn test_position_to_char_clamps() {
        let rope = Rope::from_str("hello\nhi");
        assert_eq!(rope.position_to_char(Position::new(1, 1)), CharOffset(7));
        assert_eq!(rope.position_to_char(Position::new(1, 40)), CharOffset(8));
        assert_eq!(rope.position_to_char(Position::new(7, 0)), CharOffset(6));
    }

    #[test]
    fn test_line_text_strips_newline() {
        let rope = Rope::from_str("a\nbc\n");
        assert_eq!(rope.line_text(0), "a");
        assert_eq!(rope.line_text(1), "bc");
        assert_eq!(rope.line_text(2), "");
        assert_eq!(rope.line_text(3), "");
    }
}
