// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the restamp-core scan loops on a synthetic token
// sequence shaped like a dense text page.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lopdf::StringFormat;

use restamp_core::{StringReplacer, Token, TokenSequence, ops, run_matcher, run_mutator};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// A sequence of `line_count` text-show pairs plus the surrounding text
/// object markers, roughly what a dense body page flattens to.
fn synthetic_page(line_count: usize) -> TokenSequence {
    let mut sequence = TokenSequence::default();
    sequence.push(Token::Operator(ops::BEGIN_TEXT.to_string()));
    for line in 0..line_count {
        let text = format!("body line {line}");
        sequence.push(Token::StringLiteral(
            text.into_bytes(),
            StringFormat::Literal,
        ));
        sequence.push(Token::Operator(ops::SHOW_TEXT.to_string()));
    }
    sequence.push(Token::Operator(ops::END_TEXT.to_string()));
    sequence
}

/// Benchmark a full-sequence scan that never matches, the hot path when
/// filtering large documents for a string that is not there.
fn bench_scan_without_match(c: &mut Criterion) {
    let sequence = synthetic_page(5_000);
    let matcher = StringReplacer::equals("no such line", "unused");

    c.bench_function("scan 5k lines, no match", |b| {
        b.iter(|| {
            let found = run_matcher(black_box(&sequence), &matcher).expect("scan");
            black_box(found);
        });
    });
}

/// Benchmark a rewrite pass that replaces every shown string, the worst
/// case for mutation volume.
fn bench_rewrite_every_line(c: &mut Criterion) {
    let sequence = synthetic_page(5_000);
    let replacer = StringReplacer::starts_with("body", "[redacted]");

    c.bench_function("rewrite 5k lines, all match", |b| {
        b.iter(|| {
            let mut working = black_box(sequence.clone());
            let changed = run_mutator(&mut working, &replacer, false).expect("rewrite");
            black_box(changed);
        });
    });
}

criterion_group!(benches, bench_scan_without_match, bench_rewrite_every_line);
criterion_main!(benches);
