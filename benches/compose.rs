//! Composer and highlighter benchmarks on a large project.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use playpen::compose::Composer;
use playpen::core::syntax::{highlight, SyntaxMode};

fn generate_markup(sections: usize) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<title>Bench</title>\n</head>\n<body>\n");
    for i in 0..sections {
        html.push_str(&format!(
            "<section id=\"s{i}\">\n  <h2>Section {i}</h2>\n  <p class=\"lead\">Paragraph {i}</p>\n</section>\n"
        ));
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn generate_style(rules: usize) -> String {
    (0..rules)
        .map(|i| format!("#s{i} {{ color: #{:06x}; margin: {}px; }}\n", i * 997 % 0xffffff, i % 40))
        .collect()
}

fn generate_script(functions: usize) -> String {
    (0..functions)
        .map(|i| format!("function f{i}(x) {{ return x * {i} + 'item'.length; }}\n"))
        .collect()
}

fn bench_compose(c: &mut Criterion) {
    let markup = generate_markup(500);
    let style = generate_style(500);
    let script = generate_script(500);
    let composer = Composer::new();

    c.bench_function("compose_500_sections", |b| {
        b.iter(|| composer.compose_parts(black_box(&markup), black_box(&style), black_box(&script)))
    });

    let fragment = "<h1>Hi</h1>".repeat(2000);
    c.bench_function("compose_fragment_fallback", |b| {
        b.iter(|| composer.compose_parts(black_box(&fragment), black_box(&style), black_box(&script)))
    });
}

fn bench_highlight(c: &mut Criterion) {
    let markup = generate_markup(200);
    let script = generate_script(200);

    c.bench_function("highlight_html_200_sections", |b| {
        b.iter(|| highlight(SyntaxMode::HtmlMixed, black_box(&markup)))
    });
    c.bench_function("highlight_js_200_functions", |b| {
        b.iter(|| highlight(SyntaxMode::JavaScript, black_box(&script)))
    });
}

criterion_group!(benches, bench_compose, bench_highlight);
criterion_main!(benches);
