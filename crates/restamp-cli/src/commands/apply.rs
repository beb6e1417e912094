// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

use std::path::{Path, PathBuf};

use restamp_core::{
    PdfEditor, ReplacementRule, Result, ResultPolicy, TokenMutator, load_rules,
};

pub fn run(input_file: PathBuf, rules_file: &Path, out: &Path) -> Result<()> {
    let rules = load_rules(rules_file)?;
    let replacers = rules
        .iter()
        .map(ReplacementRule::compile)
        .collect::<Result<Vec<_>>>()?;
    let mutators: Vec<&dyn TokenMutator> = replacers
        .iter()
        .map(|replacer| replacer as &dyn TokenMutator)
        .collect();

    let mut editor = PdfEditor::open(&input_file)?;
    let changed = editor.rewrite_document_all(&mutators, ResultPolicy::ExhaustiveOr)?;
    editor.save_to_file(out)?;

    eprintln!(
        "{} rule(s) applied{}, written to {}",
        rules.len(),
        if changed { "" } else { " (no matches)" },
        out.display()
    );

    Ok(())
}
