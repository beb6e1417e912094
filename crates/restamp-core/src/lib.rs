// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Restamp core: token-window scanning and rewriting for PDF content streams.
//
// A page's content stream is flattened into a token sequence; patterns
// declare a window length and an anchor operator; the scan loops slide a
// bounded window across the sequence and let patterns match or rewrite the
// windows that end on an anchor. Document-level drivers fold per-page
// outcomes with a result policy.

pub mod editor;
pub mod error;
pub mod ops;
pub mod pattern;
pub mod policy;
pub mod replace;
pub mod token;
pub mod window;

pub use editor::PdfEditor;
pub use error::{RestampError, Result};
pub use pattern::{TokenMatcher, TokenMutator, TokenPattern, run_matcher, run_mutator};
pub use policy::ResultPolicy;
pub use replace::{ReplacementRule, RuleMode, StringReplacer, load_rules};
pub use token::{Token, TokenSequence};
pub use window::TokenWindow;
