// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Result policies: how per-page booleans fold into a document-level result.

/// Fold discipline for combining per-page outcomes across a document pass.
///
/// `And`/`Or` stop visiting pages once the folded result can no longer
/// change. The `Exhaustive` variants visit every page regardless, which
/// matters when the per-page step has side effects (rewrites) that must
/// reach the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultPolicy {
    /// True only if every page reports true; stops at the first false.
    And,
    /// Same result as [`ResultPolicy::And`] but always visits every page.
    ExhaustiveAnd,
    /// True if any page reports true; stops at the first true.
    Or,
    /// Same result as [`ResultPolicy::Or`] but always visits every page.
    ExhaustiveOr,
}

impl ResultPolicy {
    /// Identity element of the fold.
    pub fn initial(self) -> bool {
        matches!(self, ResultPolicy::And | ResultPolicy::ExhaustiveAnd)
    }

    /// Whether the fold should visit the next page, given the result so far.
    /// Checked before each page, including the first.
    pub fn keep_going(self, current: bool) -> bool {
        match self {
            ResultPolicy::And => current,
            ResultPolicy::Or => !current,
            ResultPolicy::ExhaustiveAnd | ResultPolicy::ExhaustiveOr => true,
        }
    }

    /// Fold one page's outcome into the result so far.
    pub fn combine(self, current: bool, update: bool) -> bool {
        match self {
            ResultPolicy::And | ResultPolicy::ExhaustiveAnd => current && update,
            ResultPolicy::Or | ResultPolicy::ExhaustiveOr => current || update,
        }
    }
}
