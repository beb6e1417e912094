// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Named PDF content-stream operators.
//
// Only the operators the engine and its built-in patterns anchor on are
// listed; anything else passes through as an opaque `Token::Operator`.

/// `BT`: begin a text object.
pub const BEGIN_TEXT: &str = "BT";

/// `ET`: end a text object.
pub const END_TEXT: &str = "ET";

/// `Tj`: show a text string. The operand is a single string.
pub const SHOW_TEXT: &str = "Tj";

/// `TJ`: show text with individual glyph positioning. The operand is an
/// array of strings and numbers.
pub const SHOW_TEXT_ADJUSTED: &str = "TJ";

/// `'`: move to the next line and show a text string.
pub const SHOW_TEXT_LINE: &str = "'";

/// `"`: set word/character spacing, move to the next line, show a string.
pub const SHOW_TEXT_LINE_AND_SPACE: &str = "\"";

/// `Tf`: set the text font and size.
pub const SET_TEXT_FONT: &str = "Tf";

/// `Tm`: set the text matrix.
pub const SET_TEXT_MATRIX: &str = "Tm";

/// `q`: save the graphics state.
pub const SAVE: &str = "q";

/// `Q`: restore the graphics state.
pub const RESTORE: &str = "Q";

/// `gs`: set parameters from a graphics state dictionary.
pub const SET_GRAPHICS_STATE_PARAMS: &str = "gs";

/// `Do`: draw a named XObject.
pub const DRAW_OBJECT: &str = "Do";

/// `BI`: begin an inline image object.
pub const BEGIN_INLINE_IMAGE: &str = "BI";

/// `ID`: begin inline image data.
pub const BEGIN_INLINE_IMAGE_DATA: &str = "ID";
