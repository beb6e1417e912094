// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pattern traits and the single-pass scan loops.

use tracing::{debug, trace};

use crate::error::{RestampError, Result};
use crate::token::{Token, TokenSequence};
use crate::window::TokenWindow;

// -- Traits -----------------------------------------------------------------

/// Shape of a token pattern: how long a candidate window is and which token
/// can end one.
pub trait TokenPattern {
    /// Number of consecutive tokens a candidate window must hold. Must be at
    /// least 1; the scan loops reject zero-length patterns.
    fn window_len(&self) -> usize;

    /// True when `token` can be the last token of a candidate window.
    /// Anchors seen before the window has filled are skipped.
    fn is_anchor(&self, token: &Token) -> bool;
}

/// A read-only pattern: decides whether a candidate window matches.
pub trait TokenMatcher: TokenPattern {
    /// Decide whether a full candidate window matches.
    ///
    /// Called only with exactly `window_len()` consecutive tokens, the last
    /// of which satisfied [`TokenPattern::is_anchor`]. Malformed or
    /// unexpected window contents are a non-match, not an error.
    fn matches(&self, window: &[Token]) -> bool;
}

/// A rewriting pattern: a matcher that edits matched windows in place.
pub trait TokenMutator: TokenMatcher {
    /// Rewrite a matched window. The slice is the same span `matches` just
    /// accepted; edits land directly in the owning sequence.
    fn mutate(&self, window: &mut [Token]) -> Result<()>;

    /// Whether a page rewrite should stop after its first match.
    fn stop_after_first_match(&self) -> bool {
        false
    }
}

// -- Scan loops -------------------------------------------------------------

/// Scan a sequence left to right, returning true on the first window the
/// matcher accepts.
pub fn run_matcher<M>(sequence: &TokenSequence, matcher: &M) -> Result<bool>
where
    M: TokenMatcher + ?Sized,
{
    let capacity = checked_window_len(matcher)?;
    let mut window = TokenWindow::new(capacity);
    let tokens = sequence.as_slice();

    for (index, token) in tokens.iter().enumerate() {
        window.push(index);
        if !(matcher.is_anchor(token) && window.is_full()) {
            continue;
        }
        let Some((start, end)) = window.bounds() else {
            continue;
        };
        if matcher.matches(&tokens[start..=end]) {
            debug!(start, end, "window matched");
            return Ok(true);
        }
    }

    Ok(false)
}

/// Scan a sequence left to right, rewriting every window the mutator
/// accepts (or only the first, when `stop_after_first` is set).
///
/// Returns true when at least one window was rewritten. Errors from
/// `mutate` propagate immediately; rewrites already applied stay applied.
pub fn run_mutator<M>(
    sequence: &mut TokenSequence,
    mutator: &M,
    stop_after_first: bool,
) -> Result<bool>
where
    M: TokenMutator + ?Sized,
{
    let capacity = checked_window_len(mutator)?;
    let mut window = TokenWindow::new(capacity);
    let mut changed = false;

    for index in 0..sequence.len() {
        window.push(index);
        let anchored = mutator.is_anchor(&sequence.as_slice()[index]) && window.is_full();
        if !anchored {
            continue;
        }
        let Some((start, end)) = window.bounds() else {
            continue;
        };
        if !mutator.matches(&sequence.as_slice()[start..=end]) {
            continue;
        }
        mutator.mutate(&mut sequence.as_mut_slice()[start..=end])?;
        changed = true;
        trace!(start, end, "window rewritten");
        if stop_after_first {
            break;
        }
    }

    Ok(changed)
}

fn checked_window_len<P>(pattern: &P) -> Result<usize>
where
    P: TokenPattern + ?Sized,
{
    match pattern.window_len() {
        0 => Err(RestampError::Pattern(
            "window length must be at least 1".to_string(),
        )),
        len => Ok(len),
    }
}
