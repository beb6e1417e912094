// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use std::path::PathBuf;

use restamp_core::{PdfEditor, Result};
use serde::Serialize;

use super::{Mode, replacer_for};

#[derive(Serialize)]
struct ScanReport {
    file: String,
    find: String,
    total_pages: usize,
    pages_matched: Vec<u32>,
}

pub fn run(input_file: PathBuf, find: &str, mode: Mode, output_format: &str) -> Result<()> {
    let editor = PdfEditor::open(&input_file)?;
    let matcher = replacer_for(mode, find, "")?;

    let mut pages_matched = Vec::new();
    for page_number in editor.page_numbers() {
        if editor.scan_page(page_number, &matcher)? {
            pages_matched.push(page_number);
        }
    }

    let report = ScanReport {
        file: input_file.display().to_string(),
        find: find.to_string(),
        total_pages: editor.page_count(),
        pages_matched,
    };

    match output_format {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => {
            if report.pages_matched.is_empty() {
                println!("No pages match ({} scanned)", report.total_pages);
            } else {
                let pages: Vec<String> =
                    report.pages_matched.iter().map(u32::to_string).collect();
                println!(
                    "{} of {} page(s) match: {}",
                    report.pages_matched.len(),
                    report.total_pages,
                    pages.join(", ")
                );
            }
        }
    }

    Ok(())
}
