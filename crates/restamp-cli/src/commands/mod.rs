// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subcommand implementations and the shared pattern-building helper.

pub mod apply;
pub mod info;
pub mod replace;
pub mod scan;
pub mod scrub;

use clap::ValueEnum;
use restamp_core::{Result, StringReplacer};

/// Comparison mode exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Equals,
    EqualsIgnoreCase,
    Regex,
    StartsWith,
}

/// Build the replacer a command asked for.
pub fn replacer_for(mode: Mode, find: &str, replace: &str) -> Result<StringReplacer> {
    Ok(match mode {
        Mode::Equals => StringReplacer::equals(find, replace),
        Mode::EqualsIgnoreCase => StringReplacer::equals_ignore_case(find, replace),
        Mode::Regex => StringReplacer::regex(find, replace)?,
        Mode::StartsWith => StringReplacer::starts_with(find, replace),
    })
}
