use unicode_width::UnicodeWidthStr;

/// What a submitted prompt is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    NewFile,
    ImportFile,
    SwitchToFile,
    ExtendedCommand,
}

impl PromptKind {
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::NewFile => "New file name: ",
            PromptKind::ImportFile => "Import file: ",
            PromptKind::SwitchToFile => "Switch to file: ",
            PromptKind::ExtendedCommand => "M-x ",
        }
    }
}

/// One-line input area at the bottom of the screen. The cursor is a char
/// index into `content`.
#[derive(Debug, Default)]
pub struct Minibuffer {
    pub prompt: Option<PromptKind>,
    pub content: String,
    pub cursor_pos: usize,
    history: Vec<String>,
    history_index: Option<usize>,
}

impl Minibuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some(kind);
        self.content.clear();
        self.cursor_pos = 0;
        self.history_index = None;
    }

    pub fn is_active(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor_pos);
        self.content.insert(at, c);
        self.cursor_pos += 1;
    }

    pub fn delete_backward(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let at = self.byte_index(self.cursor_pos);
            self.content.remove(at);
        }
    }

    pub fn delete_forward(&mut self) {
        if self.cursor_pos < self.len_chars() {
            let at = self.byte_index(self.cursor_pos);
            self.content.remove(at);
        }
    }

    pub fn move_forward(&mut self) {
        self.cursor_pos = (self.cursor_pos + 1).min(self.len_chars());
    }

    pub fn move_backward(&mut self) {
        self.cursor_pos = self.cursor_pos.saturating_sub(1);
    }

    pub fn move_to_start(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor_pos = self.len_chars();
    }

    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.history_index {
            None => self.history.len() - 1,
            Some(0) => return,
            Some(i) => i - 1,
        };
        self.history_index = Some(index);
        self.set_content(self.history[index].clone());
    }

    pub fn history_next(&mut self) {
        match self.history_index {
            None => {}
            Some(i) if i + 1 >= self.history.len() => {
                self.history_index = None;
                self.set_content(String::new());
            }
            Some(i) => {
                self.history_index = Some(i + 1);
                self.set_content(self.history[i + 1].clone());
            }
        }
    }

    /// Completes the input to the longest prefix shared by the candidates
    /// that start with it. Returns how many candidates matched.
    pub fn complete<'a>(&mut self, candidates: impl IntoIterator<Item = &'a str>) -> usize {
        let matches: Vec<&str> = candidates
            .into_iter()
            .filter(|c| c.starts_with(self.content.as_str()))
            .collect();

        if let Some(first) = matches.first() {
            let mut common = first.to_string();
            for other in &matches[1..] {
                let shared = common
                    .chars()
                    .zip(other.chars())
                    .take_while(|(a, b)| a == b)
                    .count();
                common = common.chars().take(shared).collect();
            }
            if common.chars().count() > self.len_chars() {
                self.set_content(common);
            }
        }
        matches.len()
    }

    /// Ends the prompt and hands back its input.
    pub fn submit(&mut self) -> Option<(PromptKind, String)> {
        let kind = self.prompt.take()?;
        let content = std::mem::take(&mut self.content);
        if !content.is_empty() && self.history.last() != Some(&content) {
            self.history.push(content.clone());
        }
        self.clear();
        Some((kind, content))
    }

    pub fn clear(&mut self) {
        self.prompt = None;
        self.content.clear();
        self.cursor_pos = 0;
        self.history_index = None;
    }

    pub fn display(&self) -> String {
        let label = self.prompt.map(PromptKind::label).unwrap_or("");
        format!("{}{}", label, self.content)
    }

    /// Cursor column in terminal cells, counting the prompt label.
    pub fn cursor_screen_pos(&self) -> usize {
        let label = self.prompt.map(PromptKind::label).unwrap_or("");
        let before = &self.content[..self.byte_index(self.cursor_pos)];
        label.width() + before.width()
    }

    fn set_content(&mut self, content: String) {
        self.content = content;
        self.cursor_pos = self.len_chars();
    }

    fn len_chars(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_pos)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }
}
