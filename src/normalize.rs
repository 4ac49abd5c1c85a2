// SPDX-License-Identifier: GPL-3.0-only

//! Turn normalization.
//!
//! AI Studio exports carry turn content in two shapes: a flat `text`
//! field (with an optional `isThought` flag) or a `parts` list of typed
//! segments. Consumers should never branch on that distinction; this
//! module resolves it once, producing a uniform segment sequence that
//! both the Markdown renderer and the interactive view build on.

use crate::parser::Turn;

/// One normalized piece of turn content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The raw text of this segment.
    pub text: String,
    /// Whether this segment is a reasoning ("thought") segment.
    pub is_thought: bool,
}

/// Resolves a turn into its ordered segments.
///
/// Flat form wins: a turn with non-empty `text` yields exactly one
/// segment and its `parts` are ignored, even when populated. This
/// mirrors the export format's precedence rule and is not treated as an
/// error. A turn with neither non-empty `text` nor non-empty `parts`
/// yields no segments.
#[must_use]
pub fn segments(turn: &Turn) -> Vec<Segment> {
    if let Some(text) = turn.text.as_deref().filter(|text| !text.is_empty()) {
        return vec![Segment {
            text: text.to_owned(),
            is_thought: turn.is_thought.unwrap_or(false),
        }];
    }

    turn.parts
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|part| Segment {
            text: part.text.clone(),
            is_thought: part.thought.unwrap_or(false),
        })
        .collect()
}
