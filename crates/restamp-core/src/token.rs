// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tokens and token sequences: the flattened form of a page's content stream
// that the scanning engine operates on.

use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};
use tracing::warn;

// -- Token ------------------------------------------------------------------

/// One element of a page's content stream, in evaluation order.
///
/// A decoded content stream is a list of operations, each carrying its
/// operands. Flattening emits the operands first (in order), then the
/// operator, so a window that ends on an operator sees that operator's
/// operands immediately before it.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A content-stream operator such as `Tj` or `BT`.
    Operator(String),
    /// A string operand, kept as raw bytes together with its original
    /// serialization format so untouched strings round-trip unchanged.
    StringLiteral(Vec<u8>, StringFormat),
    /// Any other operand: numbers, names, arrays, dictionaries.
    Other(Object),
}

impl Token {
    /// The operator name, if this token is an operator.
    pub fn operator(&self) -> Option<&str> {
        match self {
            Token::Operator(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// True if this token is the named operator.
    pub fn is_operator(&self, name: &str) -> bool {
        self.operator() == Some(name)
    }

    /// True if this token is a string operand.
    pub fn is_string(&self) -> bool {
        matches!(self, Token::StringLiteral(..))
    }

    /// The raw bytes of a string operand.
    pub fn string_bytes(&self) -> Option<&[u8]> {
        match self {
            Token::StringLiteral(bytes, _) => Some(bytes.as_slice()),
            _ => None,
        }
    }

    /// The string operand decoded as text (lossy on non-UTF-8 bytes).
    pub fn decoded_string(&self) -> Option<String> {
        self.string_bytes()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Overwrite a string operand's payload, keeping its serialization
    /// format. Returns false (and changes nothing) if this token is not a
    /// string.
    pub fn replace_string(&mut self, new_bytes: Vec<u8>) -> bool {
        match self {
            Token::StringLiteral(bytes, _) => {
                *bytes = new_bytes;
                true
            }
            _ => false,
        }
    }

    fn from_operand(object: Object) -> Token {
        match object {
            Object::String(bytes, format) => Token::StringLiteral(bytes, format),
            other => Token::Other(other),
        }
    }

    fn into_operand(self) -> Option<Object> {
        match self {
            Token::Operator(_) => None,
            Token::StringLiteral(bytes, format) => Some(Object::String(bytes, format)),
            Token::Other(object) => Some(object),
        }
    }
}

// -- TokenSequence ----------------------------------------------------------

/// The ordered tokens of one page, owned.
///
/// Obtained by flattening a decoded content stream and handed back for
/// re-encoding only when a rewrite actually changed something.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    /// Flatten a decoded content stream into a token sequence.
    ///
    /// Each operation contributes its operands in order followed by its
    /// operator, so token order equals content-stream evaluation order.
    pub fn from_content(content: Content) -> Self {
        let mut tokens = Vec::new();
        for operation in content.operations {
            for operand in operation.operands {
                tokens.push(Token::from_operand(operand));
            }
            tokens.push(Token::Operator(operation.operator));
        }
        Self { tokens }
    }

    /// Rebuild a content stream from the sequence.
    ///
    /// Operands accumulate until their operator arrives. Trailing operands
    /// with no closing operator are dropped, matching the lenient decode on
    /// the way in.
    pub fn to_content(&self) -> Content {
        let mut operations = Vec::new();
        let mut pending: Vec<Object> = Vec::new();
        for token in &self.tokens {
            match token {
                Token::Operator(name) => {
                    operations.push(Operation {
                        operator: name.clone(),
                        operands: std::mem::take(&mut pending),
                    });
                }
                operand => {
                    if let Some(object) = operand.clone().into_operand() {
                        pending.push(object);
                    }
                }
            }
        }
        if !pending.is_empty() {
            warn!(
                dangling = pending.len(),
                "dropping trailing operands with no operator"
            );
        }
        Content { operations }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn as_mut_slice(&mut self) -> &mut [Token] {
        &mut self.tokens
    }

    /// Append a token. Used by callers assembling sequences by hand, for
    /// instance in tests and benchmarks; pages obtained through an editor
    /// arrive already flattened.
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl From<Vec<Token>> for TokenSequence {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}
