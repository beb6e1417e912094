// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end tests: real PDFs built in memory, driven through the full
// load / scan / rewrite / save path.

use std::cell::Cell;
use std::io::Write;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};

use restamp_core::{
    PdfEditor, ResultPolicy, StringReplacer, Token, TokenMatcher, TokenMutator, TokenPattern,
    load_rules, ops,
};

// -- PDF construction helpers -------------------------------------------------

fn page_operations(texts: &[&str]) -> Vec<Operation> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 12.into()]),
    ];
    for text in texts {
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(text.as_bytes().to_vec(), StringFormat::Literal)],
        ));
    }
    operations.push(Operation::new("ET", vec![]));
    operations
}

/// Build a PDF with one page per slice of shown texts, returned as bytes.
fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    build_pdf_with_operations(pages.iter().map(|texts| page_operations(texts)).collect())
}

fn build_pdf_with_operations(page_ops: Vec<Vec<Operation>>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in page_ops {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save");
    bytes
}

fn shown_texts(editor: &PdfEditor, page_number: u32) -> Vec<String> {
    editor
        .token_sequence(page_number)
        .expect("token sequence")
        .iter()
        .filter_map(Token::decoded_string)
        .collect()
}

/// Counts how many windows it is shown; one text per page means one call
/// per visited page.
struct CountingMatcher {
    needle: &'static str,
    calls: Cell<usize>,
}

impl CountingMatcher {
    fn new(needle: &'static str) -> Self {
        Self {
            needle,
            calls: Cell::new(0),
        }
    }
}

impl TokenPattern for CountingMatcher {
    fn window_len(&self) -> usize {
        2
    }

    fn is_anchor(&self, token: &Token) -> bool {
        token.is_operator(ops::SHOW_TEXT)
    }
}

impl TokenMatcher for CountingMatcher {
    fn matches(&self, window: &[Token]) -> bool {
        self.calls.set(self.calls.get() + 1);
        window[0].decoded_string().as_deref() == Some(self.needle)
    }
}

// -- Rewrite behavior ----------------------------------------------------------

#[test]
fn equality_replace_survives_a_save_reload_cycle() {
    let bytes = build_pdf(&[&["Draft", "Body"]]);
    let mut editor = PdfEditor::from_bytes(&bytes).expect("load");
    let replacer = StringReplacer::equals("Draft", "Final");

    let changed = editor.rewrite_page(1, &replacer).expect("rewrite");
    assert!(changed);
    assert_eq!(shown_texts(&editor, 1), vec!["Final", "Body"]);

    let saved = editor.to_bytes().expect("serialize");
    let reloaded = PdfEditor::from_bytes(&saved).expect("reload");
    assert_eq!(shown_texts(&reloaded, 1), vec!["Final", "Body"]);
}

#[test]
fn every_occurrence_is_replaced_by_default() {
    let bytes = build_pdf(&[&["Draft", "keep", "Draft"]]);
    let mut editor = PdfEditor::from_bytes(&bytes).expect("load");
    let replacer = StringReplacer::equals("Draft", "Final");

    let changed = editor.rewrite_page(1, &replacer).expect("rewrite");

    assert!(changed);
    assert_eq!(shown_texts(&editor, 1), vec!["Final", "keep", "Final"]);
}

#[test]
fn stop_after_first_leaves_later_occurrences() {
    let bytes = build_pdf(&[&["Draft", "Draft"]]);
    let mut editor = PdfEditor::from_bytes(&bytes).expect("load");
    let replacer = StringReplacer::equals("Draft", "Final").stop_after_first(true);

    let changed = editor.rewrite_page(1, &replacer).expect("rewrite");

    assert!(changed);
    assert_eq!(shown_texts(&editor, 1), vec!["Final", "Draft"]);
}

#[test]
fn unmatched_documents_serialize_identically() {
    let bytes = build_pdf(&[&["Body"]]);
    let replacer = StringReplacer::equals("Draft", "Final");

    let mut untouched = PdfEditor::from_bytes(&bytes).expect("load");
    let mut scanned = PdfEditor::from_bytes(&bytes).expect("load");
    let changed = scanned
        .rewrite_document(&replacer, ResultPolicy::ExhaustiveOr)
        .expect("rewrite");

    assert!(!changed);
    assert_eq!(
        untouched.to_bytes().expect("serialize"),
        scanned.to_bytes().expect("serialize")
    );
}

#[test]
fn hexadecimal_strings_keep_their_format() {
    let operations = vec![
        Operation::new("BT", vec![]),
        Operation::new(
            "Tj",
            vec![Object::String(b"Draft".to_vec(), StringFormat::Hexadecimal)],
        ),
        Operation::new("ET", vec![]),
    ];
    let bytes = build_pdf_with_operations(vec![operations]);
    let mut editor = PdfEditor::from_bytes(&bytes).expect("load");
    let replacer = StringReplacer::equals("Draft", "Final");

    assert!(editor.rewrite_page(1, &replacer).expect("rewrite"));

    let saved = editor.to_bytes().expect("serialize");
    let reloaded = PdfEditor::from_bytes(&saved).expect("reload");
    let sequence = reloaded.token_sequence(1).expect("tokens");
    let hex_token = sequence
        .iter()
        .find(|token| token.is_string())
        .expect("string token");
    assert!(matches!(
        hex_token,
        Token::StringLiteral(bytes, StringFormat::Hexadecimal)
            if bytes.as_slice() == b"Final"
    ));
}

// -- Document-level folds --------------------------------------------------------

#[test]
fn or_stops_at_the_first_matching_page() {
    let bytes = build_pdf(&[&["hit"], &["hit"], &["miss"]]);
    let editor = PdfEditor::from_bytes(&bytes).expect("load");
    let matcher = CountingMatcher::new("hit");

    let found = editor
        .scan_document(&matcher, ResultPolicy::Or)
        .expect("scan");

    assert!(found);
    assert_eq!(matcher.calls.get(), 1);
}

#[test]
fn exhaustive_or_visits_every_page() {
    let bytes = build_pdf(&[&["hit"], &["hit"], &["miss"]]);
    let editor = PdfEditor::from_bytes(&bytes).expect("load");
    let matcher = CountingMatcher::new("hit");

    let found = editor
        .scan_document(&matcher, ResultPolicy::ExhaustiveOr)
        .expect("scan");

    assert!(found);
    assert_eq!(matcher.calls.get(), 3);
}

#[test]
fn and_stops_at_the_first_non_matching_page() {
    let bytes = build_pdf(&[&["hit"], &["miss"], &["hit"]]);
    let editor = PdfEditor::from_bytes(&bytes).expect("load");
    let matcher = CountingMatcher::new("hit");

    let found = editor
        .scan_document(&matcher, ResultPolicy::And)
        .expect("scan");

    assert!(!found);
    assert_eq!(matcher.calls.get(), 2);
}

#[test]
fn exhaustive_and_visits_every_page() {
    let bytes = build_pdf(&[&["hit"], &["miss"], &["hit"]]);
    let editor = PdfEditor::from_bytes(&bytes).expect("load");
    let matcher = CountingMatcher::new("hit");

    let found = editor
        .scan_document(&matcher, ResultPolicy::ExhaustiveAnd)
        .expect("scan");

    assert!(!found);
    assert_eq!(matcher.calls.get(), 3);
}

#[test]
fn rewrite_document_reaches_every_page() {
    let bytes = build_pdf(&[&["Draft"], &["Body"], &["Draft"]]);
    let mut editor = PdfEditor::from_bytes(&bytes).expect("load");
    let replacer = StringReplacer::equals("Draft", "Final");

    let changed = editor
        .rewrite_document(&replacer, ResultPolicy::ExhaustiveOr)
        .expect("rewrite");

    assert!(changed);
    assert_eq!(shown_texts(&editor, 1), vec!["Final"]);
    assert_eq!(shown_texts(&editor, 2), vec!["Body"]);
    assert_eq!(shown_texts(&editor, 3), vec!["Final"]);
}

#[test]
fn aggregate_rewrite_applies_every_mutator() {
    let bytes = build_pdf(&[
        &["Draft", "Confidential: budget"],
        &["Confidential: roster"],
    ]);
    let mut editor = PdfEditor::from_bytes(&bytes).expect("load");
    let finalize = StringReplacer::equals("Draft", "Final");
    let withhold = StringReplacer::starts_with("Confidential:", "[withheld]");
    let mutators: [&dyn TokenMutator; 2] = [&finalize, &withhold];

    let changed = editor
        .rewrite_document_all(&mutators, ResultPolicy::ExhaustiveOr)
        .expect("rewrite");

    assert!(changed);
    assert_eq!(shown_texts(&editor, 1), vec!["Final", "[withheld]"]);
    assert_eq!(shown_texts(&editor, 2), vec!["[withheld]"]);
}

// -- Rule files -------------------------------------------------------------------

#[test]
fn rule_file_drives_a_document_rewrite() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(
        file,
        r#"[
            {{"find": "Draft", "replace": "Final"}},
            {{"mode": "regex", "find": "Rev [0-9]+", "replace": "Rev N"}}
        ]"#
    )
    .expect("write rules");

    let bytes = build_pdf(&[&["Draft", "Rev 42"]]);
    let mut editor = PdfEditor::from_bytes(&bytes).expect("load");

    let rules = load_rules(file.path()).expect("load rules");
    let replacers = rules
        .iter()
        .map(|rule| rule.compile())
        .collect::<Result<Vec<_>, _>>()
        .expect("compile rules");
    let mutators: Vec<&dyn TokenMutator> = replacers
        .iter()
        .map(|replacer| replacer as &dyn TokenMutator)
        .collect();

    let changed = editor
        .rewrite_document_all(&mutators, ResultPolicy::ExhaustiveOr)
        .expect("rewrite");

    assert!(changed);
    assert_eq!(shown_texts(&editor, 1), vec!["Final", "Rev N"]);
}

// -- Metadata ----------------------------------------------------------------------

#[test]
fn metadata_survives_disk_and_scrubbing_drops_dates() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("stamped.pdf");

    let bytes = build_pdf(&[&["Body"]]);
    let mut editor = PdfEditor::from_bytes(&bytes).expect("load");
    editor.set_title("Quarterly Report").expect("title");
    editor
        .set_info_entry("CreationDate", "D:20260101090000Z")
        .expect("creation date");
    editor
        .set_info_entry("ModDate", "D:20260301100000Z")
        .expect("mod date");
    editor.save_to_file(&path).expect("save");

    let mut reopened = PdfEditor::open(&path).expect("open");
    assert_eq!(reopened.title().as_deref(), Some("Quarterly Report"));
    assert_eq!(
        reopened.creation_date().as_deref(),
        Some("D:20260101090000Z")
    );

    assert!(reopened.remove_creation_date());
    assert!(reopened.remove_modification_date());

    let scrubbed = reopened.to_bytes().expect("serialize");
    let reloaded = PdfEditor::from_bytes(&scrubbed).expect("reload");
    assert_eq!(reloaded.creation_date(), None);
    assert_eq!(reloaded.modification_date(), None);
    assert_eq!(reloaded.title().as_deref(), Some("Quarterly Report"));
}
