// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The built-in string-replace pattern family and its rule-file schema.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{RestampError, Result};
use crate::ops;
use crate::pattern::{TokenMatcher, TokenMutator, TokenPattern};
use crate::token::Token;

// -- StringReplacer ---------------------------------------------------------

/// How a shown string is compared against the pattern.
#[derive(Debug)]
enum MatchMode {
    Equals(String),
    EqualsIgnoreCase(String),
    Regex(Regex),
    StartsWith(String),
}

/// Rewrites the string shown by a `Tj` operator when it matches.
///
/// The window shape is `[string, Tj]`. All four comparison modes share the
/// same rewrite: the matched string's payload is overwritten with a fixed
/// replacement, keeping the original serialization format. Windows whose
/// first token is not a string never match.
#[derive(Debug)]
pub struct StringReplacer {
    mode: MatchMode,
    replacement: String,
    stop_after_first_match: bool,
}

impl StringReplacer {
    /// Match strings exactly equal to `find`.
    pub fn equals(find: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::with_mode(MatchMode::Equals(find.into()), replacement)
    }

    /// Match strings equal to `find` ignoring ASCII case.
    pub fn equals_ignore_case(find: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::with_mode(MatchMode::EqualsIgnoreCase(find.into()), replacement)
    }

    /// Match strings the whole of which matches `pattern`.
    ///
    /// The pattern is anchored at both ends, so `Dra.*` matches `Draft` but
    /// not `A Draft`. Compile failures surface as [`RestampError::Pattern`].
    pub fn regex(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let anchored = format!(r"\A(?:{pattern})\z");
        let regex = Regex::new(&anchored).map_err(|err| {
            RestampError::Pattern(format!("invalid regex {pattern:?}: {err}"))
        })?;
        Ok(Self::with_mode(MatchMode::Regex(regex), replacement))
    }

    /// Match strings beginning with `prefix`.
    pub fn starts_with(prefix: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::with_mode(MatchMode::StartsWith(prefix.into()), replacement)
    }

    /// Stop rewriting a page after its first match.
    pub fn stop_after_first(mut self, stop: bool) -> Self {
        self.stop_after_first_match = stop;
        self
    }

    fn with_mode(mode: MatchMode, replacement: impl Into<String>) -> Self {
        Self {
            mode,
            replacement: replacement.into(),
            stop_after_first_match: false,
        }
    }
}

impl TokenPattern for StringReplacer {
    fn window_len(&self) -> usize {
        2
    }

    fn is_anchor(&self, token: &Token) -> bool {
        token.is_operator(ops::SHOW_TEXT)
    }
}

impl TokenMatcher for StringReplacer {
    fn matches(&self, window: &[Token]) -> bool {
        let Some(text) = window.first().and_then(Token::decoded_string) else {
            return false;
        };
        match &self.mode {
            MatchMode::Equals(find) => text == *find,
            MatchMode::EqualsIgnoreCase(find) => text.eq_ignore_ascii_case(find),
            MatchMode::Regex(regex) => regex.is_match(&text),
            MatchMode::StartsWith(prefix) => text.starts_with(prefix.as_str()),
        }
    }
}

impl TokenMutator for StringReplacer {
    fn mutate(&self, window: &mut [Token]) -> Result<()> {
        let replaced = window
            .first_mut()
            .is_some_and(|token| token.replace_string(self.replacement.as_bytes().to_vec()));
        if replaced {
            Ok(())
        } else {
            Err(RestampError::Predicate(
                "matched window does not start with a string".to_string(),
            ))
        }
    }

    fn stop_after_first_match(&self) -> bool {
        self.stop_after_first_match
    }
}

// -- Rule files ---------------------------------------------------------------

/// Comparison mode of a [`ReplacementRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleMode {
    #[default]
    Equals,
    EqualsIgnoreCase,
    Regex,
    StartsWith,
}

/// One find/replace instruction from a rule file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementRule {
    /// How `find` is compared against shown strings.
    #[serde(default)]
    pub mode: RuleMode,
    /// The pattern to look for.
    pub find: String,
    /// The fixed replacement text.
    pub replace: String,
    /// Stop rewriting a page after its first match.
    #[serde(default)]
    pub stop_after_first_match: bool,
}

impl ReplacementRule {
    /// Build the replacer this rule describes.
    pub fn compile(&self) -> Result<StringReplacer> {
        let replacer = match self.mode {
            RuleMode::Equals => {
                StringReplacer::equals(self.find.as_str(), self.replace.as_str())
            }
            RuleMode::EqualsIgnoreCase => {
                StringReplacer::equals_ignore_case(self.find.as_str(), self.replace.as_str())
            }
            RuleMode::Regex => StringReplacer::regex(&self.find, self.replace.as_str())?,
            RuleMode::StartsWith => {
                StringReplacer::starts_with(self.find.as_str(), self.replace.as_str())
            }
        };
        Ok(replacer.stop_after_first(self.stop_after_first_match))
    }
}

/// Load a rule file: a JSON array of [`ReplacementRule`] values.
pub fn load_rules(path: impl AsRef<Path>) -> Result<Vec<ReplacementRule>> {
    let path_ref = path.as_ref();
    let data = fs::read_to_string(path_ref).map_err(|err| RestampError::RuleFile {
        path: path_ref.display().to_string(),
        reason: err.to_string(),
    })?;
    let rules: Vec<ReplacementRule> =
        serde_json::from_str(&data).map_err(|err| RestampError::RuleFile {
            path: path_ref.display().to_string(),
            reason: err.to_string(),
        })?;
    debug!(rules = rules.len(), path = %path_ref.display(), "rule file loaded");
    Ok(rules)
}
