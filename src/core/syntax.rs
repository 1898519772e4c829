use tree_sitter::{Language, Node, Parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SyntaxMode {
    HtmlMixed,
    Css,
    JavaScript,
    Json,
    #[default]
    PlainText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightKind {
    Keyword,
    String,
    Number,
    Comment,
    Tag,
    Attribute,
    Property,
    Constant,
}

/// A highlighted byte range of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub kind: HighlightKind,
}

impl SyntaxMode {
    pub fn name(self) -> &'static str {
        match self {
            SyntaxMode::HtmlMixed => "htmlmixed",
            SyntaxMode::Css => "css",
            SyntaxMode::JavaScript => "javascript",
            SyntaxMode::Json => "json",
            SyntaxMode::PlainText => "text",
        }
    }

    fn language(self) -> Option<Language> {
        match self {
            SyntaxMode::HtmlMixed => Some(tree_sitter_html::LANGUAGE.into()),
            SyntaxMode::Css => Some(tree_sitter_css::LANGUAGE.into()),
            SyntaxMode::JavaScript => Some(tree_sitter_javascript::LANGUAGE.into()),
            SyntaxMode::Json => Some(tree_sitter_json::LANGUAGE.into()),
            SyntaxMode::PlainText => None,
        }
    }

    fn classify(self, node: Node<'_>) -> Option<HighlightKind> {
        let kind = node.kind();
        if kind == "comment" {
            return Some(HighlightKind::Comment);
        }

        match self {
            SyntaxMode::HtmlMixed => match kind {
                "tag_name" | "erroneous_end_tag_name" => Some(HighlightKind::Tag),
                "attribute_name" => Some(HighlightKind::Attribute),
                "attribute_value" | "quoted_attribute_value" => Some(HighlightKind::String),
                "doctype" => Some(HighlightKind::Keyword),
                _ => None,
            },
            SyntaxMode::Css => match kind {
                "tag_name" | "class_name" | "id_name" => Some(HighlightKind::Tag),
                "property_name" => Some(HighlightKind::Property),
                "string_value" => Some(HighlightKind::String),
                "integer_value" | "float_value" | "color_value" => Some(HighlightKind::Number),
                "plain_value" => Some(HighlightKind::Constant),
                "at_keyword" | "important" => Some(HighlightKind::Keyword),
                _ => None,
            },
            SyntaxMode::JavaScript => match kind {
                "string" | "template_string" | "regex" => Some(HighlightKind::String),
                "number" => Some(HighlightKind::Number),
                "true" | "false" | "null" | "undefined" | "this" => {
                    Some(HighlightKind::Constant)
                }
                "property_identifier" => Some(HighlightKind::Property),
                _ if !node.is_named() && kind.chars().all(|c| c.is_ascii_lowercase()) => {
                    Some(HighlightKind::Keyword)
                }
                _ => None,
            },
            SyntaxMode::Json => match kind {
                "string" => Some(HighlightKind::String),
                "number" => Some(HighlightKind::Number),
                "true" | "false" | "null" => Some(HighlightKind::Constant),
                _ => None,
            },
            SyntaxMode::PlainText => None,
        }
    }

    fn embedded(self, node: Node<'_>) -> Option<SyntaxMode> {
        if self != SyntaxMode::HtmlMixed || node.kind() != "raw_text" {
            return None;
        }
        match node.parent().map(|p| p.kind()) {
            Some("script_element") => Some(SyntaxMode::JavaScript),
            Some("style_element") => Some(SyntaxMode::Css),
            _ => None,
        }
    }
}

/// Spans never overlap: a classified node is not descended into, so a sorted
/// span list can be searched by start offset.
pub fn highlight(mode: SyntaxMode, source: &str) -> Vec<HighlightSpan> {
    let mut spans = Vec::new();
    highlight_into(mode, source, 0, &mut spans);
    spans.sort_by_key(|s| s.start);
    spans
}

/// Highlight kind covering `byte` in a sorted, non-overlapping span list.
pub fn kind_at(spans: &[HighlightSpan], byte: usize) -> Option<HighlightKind> {
    let idx = spans.partition_point(|s| s.start <= byte);
    let span = spans.get(idx.checked_sub(1)?)?;
    (byte < span.end).then_some(span.kind)
}

fn highlight_into(mode: SyntaxMode, source: &str, offset: usize, spans: &mut Vec<HighlightSpan>) {
    let Some(language) = mode.language() else {
        return;
    };

    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&language) {
        log::error!("failed to load {} grammar: {}", mode.name(), e);
        return;
    }

    let Some(tree) = parser.parse(source, None) else {
        return;
    };

    let mut cursor = tree.walk();
    loop {
        let node = cursor.node();
        let mut descend = true;

        if let Some(kind) = mode.classify(node) {
            spans.push(HighlightSpan {
                start: offset + node.start_byte(),
                end: offset + node.end_byte(),
                kind,
            });
            descend = false;
        } else if let Some(inner) = mode.embedded(node) {
            let text = &source[node.start_byte()..node.end_byte()];
            highlight_into(inner, text, offset + node.start_byte(), spans);
            descend = false;
        }

        if descend && cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_of(mode: SyntaxMode, source: &str) -> Vec<(String, HighlightKind)> {
        highlight(mode, source)
            .into_iter()
            .map(|s| (source[s.start..s.end].to_string(), s.kind))
            .collect()
    }

    #[test]
    fn test_plain_text_has_no_spans() {
        assert!(highlight(SyntaxMode::PlainText, "body { color: red; }").is_empty());
    }

    #[test]
    fn test_javascript_strings_and_keywords() {
        let spans = kinds_of(SyntaxMode::JavaScript, "const a = 'hi';");
        assert!(spans.contains(&("const".to_string(), HighlightKind::Keyword)));
        assert!(spans.contains(&("'hi'".to_string(), HighlightKind::String)));
    }

    #[test]
    fn test_html_tags() {
        let spans = kinds_of(SyntaxMode::HtmlMixed, "<h1 class=\"x\">Hi</h1>");
        assert!(spans.contains(&("h1".to_string(), HighlightKind::Tag)));
        assert!(spans.contains(&("class".to_string(), HighlightKind::Attribute)));
    }

    #[test]
    fn test_html_embedded_script() {
        let source = "<script>let x = 1;</script>";
        let spans = kinds_of(SyntaxMode::HtmlMixed, source);
        assert!(spans.contains(&("let".to_string(), HighlightKind::Keyword)));
        assert!(spans.contains(&("1".to_string(), HighlightKind::Number)));
    }

    #[test]
    fn test_spans_are_in_bounds_and_sorted() {
        let source = "body {\n    background: #f0f0f0;\n}";
        let spans = highlight(SyntaxMode::Css, source);
        assert!(!spans.is_empty());
        assert!(spans.windows(2).all(|w| w[0].start <= w[1].start));
        assert!(spans.iter().all(|s| s.end <= source.len()));
    }

    #[test]
    fn test_spans_do_not_overlap() {
        let source = "<style>p { color: red; }</style><script>const s = `a${1}`;</script><p id=\"x\">t</p>";
        let spans = highlight(SyntaxMode::HtmlMixed, source);
        assert!(spans.windows(2).all(|w| w[0].end <= w[1].start));
    }

    #[test]
    fn test_kind_at() {
        let source = "const a = 'hi';";
        let spans = highlight(SyntaxMode::JavaScript, source);
        assert_eq!(kind_at(&spans, 0), Some(HighlightKind::Keyword));
        assert_eq!(kind_at(&spans, 6), None);
        assert_eq!(kind_at(&spans, 11), Some(HighlightKind::String));
        assert_eq!(kind_at(&spans, source.len()), None);
        assert_eq!(kind_at(&[], 0), None);
    }

    #[test]
    fn test_kind_at_matches_linear_scan_on_large_file() {
        let source: String = (0..4000)
            .map(|i| format!("let v{i} = 'row' + {i}; // note\n"))
            .collect();
        let spans = highlight(SyntaxMode::JavaScript, &source);
        assert!(spans.len() > 10_000);

        for byte in (0..source.len()).step_by(97) {
            let linear = spans
                .iter()
                .find(|s| s.start <= byte && byte < s.end)
                .map(|s| s.kind);
            assert_eq!(kind_at(&spans, byte), linear, "byte {byte}");
        }
    }
}
