use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::compose::ComposedDocument;
use crate::error::Result;

/// The surface the run command renders into: the preview pane, and a file on
/// disk when one is configured.
#[derive(Debug, Default)]
pub struct InlinePreview {
    document: Option<ComposedDocument>,
    lines: Vec<String>,
    output: Option<PathBuf>,
    runs: usize,
}

impl InlinePreview {
    pub fn new(output: Option<PathBuf>) -> Self {
        Self {
            document: None,
            lines: Vec::new(),
            output,
            runs: 0,
        }
    }

    pub fn set_source(&mut self, document: ComposedDocument) -> Result<()> {
        self.runs += 1;
        self.lines = html_to_text(document.as_str());
        let document = self.document.insert(document);
        if let Some(path) = &self.output {
            fs::write(path, document.as_str())?;
            log::debug!("preview written to {}", path.display());
        }
        Ok(())
    }

    pub fn source(&self) -> Option<&str> {
        self.document.as_ref().map(ComposedDocument::as_str)
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_deref()
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    /// The current document as plain text lines, converted once per run.
    pub fn text_lines(&self) -> &[String] {
        &self.lines
    }
}

struct TextPatterns {
    hidden: [Regex; 3],
    block: Regex,
    tag: Regex,
}

fn text_patterns() -> &'static TextPatterns {
    static PATTERNS: OnceLock<TextPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| TextPatterns {
        hidden: [
            Regex::new(r"(?is)<script\b.*?</script\s*>").expect("valid regex"),
            Regex::new(r"(?is)<style\b.*?</style\s*>").expect("valid regex"),
            Regex::new(r"(?is)<head\b.*?</head\s*>|<!--.*?-->|<!doctype[^>]*>").expect("valid regex"),
        ],
        block: Regex::new(
            r"(?i)</?(p|div|h[1-6]|li|ul|ol|br|hr|tr|table|section|article|header|footer|main|nav|body|html|pre|blockquote)\b[^>]*>",
        )
        .expect("valid regex"),
        tag: Regex::new(r"<[^>]*>").expect("valid regex"),
    })
}

/// Rough text rendering of an HTML page: scripts, styles and tags dropped,
/// block elements on their own lines.
pub fn html_to_text(html: &str) -> Vec<String> {
    let p = text_patterns();
    let mut text = html.to_string();
    for hidden in &p.hidden {
        text = hidden.replace_all(&text, "").into_owned();
    }
    let text = p.block.replace_all(&text, "\n");
    let text = p.tag.replace_all(&text, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    let mut lines: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() && lines.last().map_or(true, String::is_empty) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NewWindowSource {
    #[default]
    Composed,
    ActiveFile,
}

pub trait BrowserLauncher {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Opens files with the platform's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&self, path: &Path) -> io::Result<()> {
        open::that(path)
    }
}

/// Writes a page to a fresh file and hands it to a browser.
pub struct WindowPreview {
    launcher: Box<dyn BrowserLauncher>,
    dir: Option<PathBuf>,
}

impl WindowPreview {
    pub fn new(launcher: Box<dyn BrowserLauncher>) -> Self {
        Self {
            launcher,
            dir: None,
        }
    }

    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn open(&self, contents: &str) -> Result<PathBuf> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("playpen-preview-").suffix(".html");
        let mut file = match &self.dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(contents.as_bytes())?;
        file.flush()?;

        // The browser reads the page after we return, so the file is kept.
        let (_, path) = file.keep().map_err(|e| e.error)?;
        log::debug!("opening preview window for {}", path.display());
        if let Err(e) = self.launcher.open(&path) {
            if let Err(cleanup) = fs::remove_file(&path) {
                log::warn!("could not remove {}: {}", path.display(), cleanup);
            }
            return Err(e.into());
        }
        Ok(path)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::compose::Composer;
    use crate::error::PlaygroundError;

    #[derive(Debug, Default, Clone)]
    pub(crate) struct RecordingBrowser {
        pub opened: Arc<Mutex<Vec<PathBuf>>>,
    }

    impl BrowserLauncher for RecordingBrowser {
        fn open(&self, path: &Path) -> io::Result<()> {
            self.opened.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    struct FailingBrowser;

    impl BrowserLauncher for FailingBrowser {
        fn open(&self, _path: &Path) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no browser"))
        }
    }

    #[test]
    fn test_inline_preview_keeps_latest_source() {
        let mut preview = InlinePreview::default();
        assert!(preview.source().is_none());

        let composer = Composer::new();
        preview.set_source(composer.compose_parts("<p>1</p>", "", "")).unwrap();
        preview.set_source(composer.compose_parts("<p>2</p>", "", "")).unwrap();
        assert!(preview.source().unwrap().contains("<p>2</p>"));
        assert_eq!(preview.text_lines(), ["2"]);
        assert_eq!(preview.runs(), 2);
    }

    #[test]
    fn test_html_to_text() {
        let doc = Composer::new().compose_parts(
            "<html><head><title>T</title></head><body><h1>Hello World</h1>\n\n<p>a &amp; b</p><!-- note --></body></html>",
            "h1 { color: red; }",
            "console.log('x');",
        );
        assert_eq!(html_to_text(doc.as_str()), vec!["Hello World", "", "a & b"]);
    }

    #[test]
    fn test_text_lines_empty_before_first_run() {
        assert!(InlinePreview::default().text_lines().is_empty());
    }

    #[test]
    fn test_inline_preview_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.html");
        let mut preview = InlinePreview::new(Some(path.clone()));

        let doc = Composer::new().compose_parts("<p>hi</p>", "p{}", "");
        preview.set_source(doc.clone()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), doc.as_str());
    }

    #[test]
    fn test_window_preview_writes_and_opens() {
        let dir = tempfile::tempdir().unwrap();
        let browser = RecordingBrowser::default();
        let window = WindowPreview::new(Box::new(browser.clone())).in_dir(dir.path());

        let path = window.open("<p>page</p>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>page</p>");
        assert_eq!(*browser.opened.lock().unwrap(), vec![path.clone()]);
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("html"));
    }

    #[test]
    fn test_window_preview_reports_launch_failure() {
        let dir = tempfile::tempdir().unwrap();
        let window = WindowPreview::new(Box::new(FailingBrowser)).in_dir(dir.path());
        assert!(matches!(window.open("x"), Err(PlaygroundError::Io(_))));
        assert!(matches!(window.open("y"), Err(PlaygroundError::Io(_))));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
