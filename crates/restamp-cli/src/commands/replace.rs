// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use std::path::{Path, PathBuf};

use restamp_core::{PdfEditor, Result, ResultPolicy};

use super::{Mode, replacer_for};

pub fn run(
    input_file: PathBuf,
    find: &str,
    replace: &str,
    mode: Mode,
    stop_after_first: bool,
    out: &Path,
) -> Result<()> {
    let mut editor = PdfEditor::open(&input_file)?;
    let replacer = replacer_for(mode, find, replace)?.stop_after_first(stop_after_first);

    let changed = editor.rewrite_document(&replacer, ResultPolicy::ExhaustiveOr)?;
    editor.save_to_file(out)?;

    if changed {
        eprintln!("Rewrote matching strings, written to {}", out.display());
    } else {
        eprintln!("No matches; unchanged copy written to {}", out.display());
    }

    Ok(())
}
