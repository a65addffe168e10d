use criterion::{black_box, criterion_group, criterion_main, Criterion};
use aurum_core::{HtmlTokenReplacer, ReplacerConfig, TokenMap, TokenReplacer};
use std::io::Cursor;

fn build_tokens(count: usize) -> TokenMap {
    (0..count)
        .map(|i| (format!("{{{{Token{}}}}}", i), format!("value {}", i)))
        .collect()
}

fn build_document(paragraphs: usize, tokens: usize) -> String {
    let mut html = String::from("<!DOCTYPE html><html><head><title>Bench</title></head><body>");
    for i in 0..paragraphs {
        html.push_str(&format!(
            "<p class=\"row\">Paragraph {} says {{{{Token{}}}}} to <b>{{{{Token{}}}}}</b></p>",
            i,
            i % tokens,
            (i + 1) % tokens
        ));
    }
    html.push_str("</body></html>");
    html
}

fn replace_simple_document(c: &mut Criterion) {
    let replacer = HtmlTokenReplacer::new(ReplacerConfig::default());
    let html = build_document(10, 2);
    let tokens = build_tokens(2);

    c.bench_function("replace_simple_document", |b| {
        b.iter(|| {
            let mut input = Cursor::new(html.as_bytes());
            let mut output = Cursor::new(Vec::with_capacity(html.len()));
            replacer
                .replace_tokens(&mut input, &mut output, black_box(&tokens))
                .unwrap();
        })
    });
}

fn replace_large_document(c: &mut Criterion) {
    let replacer = HtmlTokenReplacer::new(ReplacerConfig::default());
    let html = build_document(5_000, 64);
    let tokens = build_tokens(64);

    c.bench_function("replace_large_document", |b| {
        b.iter(|| {
            let mut input = Cursor::new(html.as_bytes());
            let mut output = Cursor::new(Vec::with_capacity(html.len()));
            replacer
                .replace_tokens(&mut input, &mut output, black_box(&tokens))
                .unwrap();
        })
    });
}

criterion_group!(benches, replace_simple_document, replace_large_document);
criterion_main!(benches);
