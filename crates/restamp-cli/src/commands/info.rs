// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use std::path::PathBuf;

use restamp_core::{PdfEditor, Result};
use serde::Serialize;

#[derive(Serialize)]
struct InfoReport {
    file: String,
    pages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    producer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    creation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modification_date: Option<String>,
}

pub fn run(input_file: PathBuf, output_format: &str) -> Result<()> {
    let editor = PdfEditor::open(&input_file)?;

    let report = InfoReport {
        file: input_file.display().to_string(),
        pages: editor.page_count(),
        title: editor.title(),
        author: editor.author(),
        subject: editor.subject(),
        keywords: editor.keywords(),
        creator: editor.creator(),
        producer: editor.producer(),
        creation_date: editor.creation_date(),
        modification_date: editor.modification_date(),
    };

    match output_format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_text(&report),
    }

    Ok(())
}

fn print_text(report: &InfoReport) {
    println!("File:  {}", report.file);
    println!("Pages: {}", report.pages);

    let fields = [
        ("Title", &report.title),
        ("Author", &report.author),
        ("Subject", &report.subject),
        ("Keywords", &report.keywords),
        ("Creator", &report.creator),
        ("Producer", &report.producer),
        ("Created", &report.creation_date),
        ("Modified", &report.modification_date),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{label}: {value}");
        }
    }
}
