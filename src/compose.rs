use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::core::EditorAdapter;
use crate::error::{PlaygroundError, Result};
use crate::state::FileRegistry;

pub const MARKUP_FILE: &str = "index.html";
pub const STYLE_FILE: &str = "style.css";
pub const SCRIPT_FILE: &str = "script.js";

const DOCTYPE: &str = "<!DOCTYPE html>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedDocument(String);

impl ComposedDocument {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ComposedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

struct Markers {
    doctype: Regex,
    html_open: Regex,
    head_open: Regex,
    head_close: Regex,
    body_close: Regex,
    html_close: Regex,
}

fn markers() -> &'static Markers {
    static MARKERS: OnceLock<Markers> = OnceLock::new();
    MARKERS.get_or_init(|| Markers {
        doctype: Regex::new(r"(?i)^\s*<!doctype\b").expect("valid regex"),
        html_open: Regex::new(r"(?i)<html(\s[^>]*)?>").expect("valid regex"),
        head_open: Regex::new(r"(?i)<head(\s[^>]*)?>").expect("valid regex"),
        head_close: Regex::new(r"(?i)</head\s*>").expect("valid regex"),
        body_close: Regex::new(r"(?i)</body\s*>").expect("valid regex"),
        html_close: Regex::new(r"(?i)</html\s*>").expect("valid regex"),
    })
}

/// Splices the style and script files into the markup file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Composer;

impl Composer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose<E: EditorAdapter>(&self, registry: &FileRegistry<E>) -> Result<ComposedDocument> {
        let markup = conventional_text(registry, MARKUP_FILE)?;
        let style = conventional_text(registry, STYLE_FILE)?;
        let script = conventional_text(registry, SCRIPT_FILE)?;
        Ok(self.compose_parts(&markup, &style, &script))
    }

    pub fn compose_parts(&self, markup: &str, style: &str, script: &str) -> ComposedDocument {
        let m = markers();
        let style_block = format!("<style>{}</style>", style);
        let script_block = format!("<script>{}</script>", script);

        let mut doc = inject_style(m, markup, &style_block);

        // Scripts go before the last closing body (or html) tag so they run
        // after the markup has been parsed.
        let script_at = last_match_start(&m.body_close, &doc)
            .or_else(|| last_match_start(&m.html_close, &doc))
            .unwrap_or(doc.len());
        doc.insert_str(script_at, &script_block);

        if !m.doctype.is_match(&doc) {
            doc.insert_str(0, &format!("{}\n", DOCTYPE));
        }

        ComposedDocument(doc)
    }
}

fn conventional_text<E: EditorAdapter>(
    registry: &FileRegistry<E>,
    name: &'static str,
) -> Result<String> {
    registry
        .get(name)
        .map(|file| file.text())
        .map_err(|_| PlaygroundError::MissingConventionalFile(name))
}

fn inject_style(m: &Markers, markup: &str, style_block: &str) -> String {
    let mut doc = markup.to_string();

    if let Some(found) = m.head_close.find(markup) {
        doc.insert_str(found.start(), style_block);
    } else if let Some(found) = m.head_open.find(markup) {
        doc.insert_str(found.end(), style_block);
    } else if let Some(found) = m.html_open.find(markup) {
        doc.insert_str(found.end(), &format!("<head>{}</head>", style_block));
    } else {
        let at = m
            .doctype
            .find(markup)
            .and_then(|d| markup[d.end()..].find('>').map(|i| d.end() + i + 1))
            .unwrap_or(0);
        doc.insert_str(at, style_block);
    }
    doc
}

fn last_match_start(re: &Regex, text: &str) -> Option<usize> {
    re.find_iter(text).last().map(|m| m.start())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::file_kind::{DEFAULT_CSS, DEFAULT_HTML, DEFAULT_JS};
    use crate::core::TextEditorFactory;
    use crate::state::FileManager;

    fn compose(markup: &str) -> String {
        Composer::new()
            .compose_parts(markup, "p{}", "go()")
            .into_string()
    }

    #[test]
    fn test_defaults() {
        let files = FileManager::new(TextEditorFactory::default());
        let doc = Composer::new().compose(files.registry()).unwrap();
        let doc = doc.as_str();

        assert!(doc.contains("background: #f0f0f0"));
        assert!(doc.contains("console.log('Hello from JavaScript!')"));
        assert!(doc.contains(&format!("<style>{}</style></head>", DEFAULT_CSS)));
        assert!(doc.contains(&format!("<script>{}</script></body>", DEFAULT_JS)));
        assert!(doc.contains("<h1>Hello World</h1>"));
        assert_eq!(doc.matches("<!DOCTYPE html>").count(), 1);

        let stripped = doc
            .replace(&format!("<style>{}</style>", DEFAULT_CSS), "")
            .replace(&format!("<script>{}</script>", DEFAULT_JS), "");
        assert_eq!(stripped, DEFAULT_HTML);
    }

    #[test]
    fn test_missing_conventional_file() {
        let mut files = FileManager::new(TextEditorFactory::default());
        files.close_file("style.css").unwrap();
        let result = Composer::new().compose(files.registry());
        assert!(matches!(
            result,
            Err(PlaygroundError::MissingConventionalFile("style.css"))
        ));
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        let doc = compose("<HTML><HEAD></HEAD><BODY>x</BODY></HTML>");
        assert_eq!(
            doc,
            "<!DOCTYPE html>\n<HTML><HEAD><style>p{}</style></HEAD><BODY>x<script>go()</script></BODY></HTML>"
        );
    }

    #[test]
    fn test_head_without_close() {
        let doc = compose("<html><head lang=\"en\"><body></body></html>");
        assert!(doc.contains("<head lang=\"en\"><style>p{}</style>"));
    }

    #[test]
    fn test_no_head_at_all() {
        let doc = compose("<!doctype html>\n<html><body>hi</body></html>");
        assert_eq!(
            doc,
            "<!doctype html>\n<html><head><style>p{}</style></head><body>hi<script>go()</script></body></html>"
        );
    }

    #[test]
    fn test_bare_fragment() {
        let doc = compose("<h1>Hi</h1>");
        assert_eq!(
            doc,
            "<!DOCTYPE html>\n<style>p{}</style><h1>Hi</h1><script>go()</script>"
        );
    }

    #[test]
    fn test_doctype_only_fragment() {
        let doc = compose("<!DOCTYPE html><p>x</p>");
        assert_eq!(doc, "<!DOCTYPE html><style>p{}</style><p>x</p><script>go()</script>");
    }

    #[test]
    fn test_script_before_html_close_without_body() {
        let doc = compose("<html><head></head>text</html>");
        assert!(doc.ends_with("text<script>go()</script></html>"));
    }

    #[test]
    fn test_duplicate_markers() {
        let doc = compose("<head></head><head></head><body></body><body></body>");
        assert!(doc.starts_with("<!DOCTYPE html>\n<head><style>p{}</style></head><head></head>"));
        assert!(doc.ends_with("<body></body><body><script>go()</script></body>"));
    }
}
