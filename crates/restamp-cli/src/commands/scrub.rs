// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use std::path::{Path, PathBuf};

use restamp_core::{PdfEditor, Result};

/// Information-dictionary entries that vary between otherwise identical
/// regenerations of a document.
const VOLATILE_ENTRIES: [&str; 3] = ["CreationDate", "ModDate", "Producer"];

pub fn run(input_file: PathBuf, out: &Path) -> Result<()> {
    let mut editor = PdfEditor::open(&input_file)?;

    let mut dropped = Vec::new();
    for key in VOLATILE_ENTRIES {
        if editor.remove_info_entry(key) {
            dropped.push(key);
        }
    }

    editor.save_to_file(out)?;

    if dropped.is_empty() {
        eprintln!("Nothing to scrub; copy written to {}", out.display());
    } else {
        eprintln!(
            "Dropped {}, written to {}",
            dropped.join(", "),
            out.display()
        );
    }

    Ok(())
}
