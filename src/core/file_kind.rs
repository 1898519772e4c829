use crate::error::{PlaygroundError, Result};

use super::syntax::SyntaxMode;

pub const DEFAULT_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <link rel="stylesheet" href="style.css">
</head>
<body>
    <h1>Hello World</h1>
    <script src="script.js"></script>
</body>
</html>"#;

pub const DEFAULT_CSS: &str = "body {
    background: #f0f0f0;
    display: flex;
    justify-content: center;
    align-items: center;
    min-height: 100vh;
}";

pub const DEFAULT_JS: &str = "console.log('Hello from JavaScript!');

document.querySelector('h1').addEventListener('click', () => {
    alert('Clicked!');
});";

const NEW_HTML_TEMPLATE: &str = "<!DOCTYPE html>\n<html>\n\n</html>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Html,
    Css,
    Js,
    Txt,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindInfo {
    pub extension: &'static str,
    pub syntax_mode: SyntaxMode,
    pub icon: &'static str,
    pub template: &'static str,
    pub auto_close_tags: bool,
}

const KIND_TABLE: [(FileKind, KindInfo); 5] = [
    (
        FileKind::Html,
        KindInfo {
            extension: "html",
            syntax_mode: SyntaxMode::HtmlMixed,
            icon: "<>",
            template: NEW_HTML_TEMPLATE,
            auto_close_tags: true,
        },
    ),
    (
        FileKind::Css,
        KindInfo {
            extension: "css",
            syntax_mode: SyntaxMode::Css,
            icon: "#",
            template: "",
            auto_close_tags: false,
        },
    ),
    (
        FileKind::Js,
        KindInfo {
            extension: "js",
            syntax_mode: SyntaxMode::JavaScript,
            icon: "JS",
            template: "",
            auto_close_tags: false,
        },
    ),
    (
        FileKind::Txt,
        KindInfo {
            extension: "txt",
            syntax_mode: SyntaxMode::PlainText,
            icon: "T",
            template: "",
            auto_close_tags: false,
        },
    ),
    (
        FileKind::Json,
        KindInfo {
            extension: "json",
            syntax_mode: SyntaxMode::Json,
            icon: "{}",
            template: "",
            auto_close_tags: false,
        },
    ),
];

impl FileKind {
    pub const ALL: [FileKind; 5] = [
        FileKind::Html,
        FileKind::Css,
        FileKind::Js,
        FileKind::Txt,
        FileKind::Json,
    ];

    pub fn info(self) -> &'static KindInfo {
        // The table is indexed in declaration order.
        &KIND_TABLE[self as usize].1
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        KIND_TABLE
            .iter()
            .find(|(_, info)| info.extension == ext)
            .map(|(kind, _)| *kind)
    }

    /// Validates a candidate file name and derives its kind from the text
    /// after the last `.`.
    pub fn from_name(name: &str) -> Result<Self> {
        if name.trim().is_empty() || name.contains(['/', '\\']) {
            return Err(PlaygroundError::InvalidName(name.to_string()));
        }

        let ext = name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .ok_or_else(|| PlaygroundError::UnsupportedExtension(name.to_string()))?;

        Self::from_extension(ext)
            .ok_or_else(|| PlaygroundError::UnsupportedExtension(name.to_string()))
    }

    pub fn extension(self) -> &'static str {
        self.info().extension
    }

    pub fn syntax_mode(self) -> SyntaxMode {
        self.info().syntax_mode
    }

    pub fn icon(self) -> &'static str {
        self.info().icon
    }

    pub fn template(self) -> &'static str {
        self.info().template
    }

    pub fn auto_close_tags(self) -> bool {
        self.info().auto_close_tags
    }
}
