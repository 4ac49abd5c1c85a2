// SPDX-License-Identifier: GPL-3.0-only

//! JSON parsing for Google AI Studio chat exports.
//!
//! This module handles deserialization of the JSON format produced by
//! AI Studio's "save to Drive" chat files. The format contains the run
//! configuration, an optional system instruction, and the conversation
//! itself as an ordered list of chunks.
//!
//! # Format Overview
//!
//! An AI Studio chat export contains:
//! - `runSettings`: model name, sampling parameters, safety settings
//! - `systemInstruction`: optional free-text instruction
//! - `chunkedPrompt.chunks`: the ordered conversation turns
//!
//! Each chunk carries its content in one of two shapes: a flat `text`
//! field (older exports), or a `parts` list where each part may be
//! flagged as a "thought" segment. Both shapes are preserved here as-is;
//! resolution into a single representation happens in
//! [`crate::normalize`].
//!
//! # Example
//!
//! ```
//! use aistudio2md::parser::parse_chat;
//!
//! let json = r#"{
//!     "runSettings": { "model": "models/gemini-pro", "temperature": 0.7 },
//!     "chunkedPrompt": {
//!         "chunks": [{ "role": "user", "text": "Hello" }]
//!     }
//! }"#;
//!
//! let chat = parse_chat(json).unwrap();
//! assert_eq!(chat.chunks().len(), 1);
//! ```

use serde::Deserialize;
use snafu::prelude::*;

/// Error type for JSON parsing failures.
#[derive(Debug, Snafu)]
pub enum ParseError {
    /// Failed to parse JSON content.
    #[snafu(display("failed to parse JSON: {source}"))]
    Json {
        /// The underlying JSON parsing error.
        source: serde_json::Error,
    },
}

/// The root structure of an AI Studio chat export.
///
/// Every field is optional in the wire format; a missing `chunkedPrompt`
/// is an empty conversation, never an error.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatExport {
    /// The run configuration used for this session.
    #[serde(default)]
    pub run_settings: Option<RunSettings>,

    /// The system instruction, if one was set.
    #[serde(default)]
    pub system_instruction: Option<SystemInstruction>,

    /// The conversation content.
    #[serde(default)]
    pub chunked_prompt: Option<ChunkedPrompt>,
}

impl ChatExport {
    /// Returns the conversation turns, or an empty slice when the export
    /// has no `chunkedPrompt`.
    #[must_use]
    pub fn chunks(&self) -> &[Turn] {
        self.chunked_prompt
            .as_ref()
            .map_or(&[], |prompt| prompt.chunks.as_slice())
    }

    /// Returns the system instruction text when present and non-empty.
    #[must_use]
    pub fn system_instruction_text(&self) -> Option<&str> {
        self.system_instruction
            .as_ref()
            .and_then(|si| si.text.as_deref())
            .filter(|text| !text.is_empty())
    }
}

/// The run configuration attached to an export.
///
/// Numeric settings are kept as [`serde_json::Number`] so rendering
/// reproduces the source representation (`0.7` stays `0.7`, `40` stays
/// `40`).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSettings {
    /// The model identifier (e.g., "models/gemini-pro").
    #[serde(default)]
    pub model: Option<String>,

    /// Sampling temperature.
    #[serde(default)]
    pub temperature: Option<serde_json::Number>,

    /// Nucleus sampling parameter.
    #[serde(default)]
    pub top_p: Option<serde_json::Number>,

    /// Top-k sampling parameter.
    #[serde(default)]
    pub top_k: Option<serde_json::Number>,

    /// Per-category safety thresholds, if configured.
    #[serde(default)]
    pub safety_settings: Option<Vec<SafetySetting>>,
}

/// One safety threshold entry from `runSettings.safetySettings`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetySetting {
    /// The harm category (e.g., "HARM_CATEGORY_HARASSMENT").
    #[serde(default)]
    pub category: Option<String>,

    /// The blocking threshold (e.g., "BLOCK_MEDIUM_AND_ABOVE").
    #[serde(default)]
    pub threshold: Option<String>,
}

/// The optional system instruction block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SystemInstruction {
    /// The instruction text.
    #[serde(default)]
    pub text: Option<String>,
}

/// Container for the conversation turns.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ChunkedPrompt {
    /// The turns, in conversational order.
    #[serde(default)]
    pub chunks: Vec<Turn>,
}

/// The speaker of a turn.
///
/// The export format defines "user" and "model"; anything else is
/// preserved verbatim in [`Role::Other`] and rendered like a model turn
/// (deterministic passthrough). A chunk without a role defaults to
/// [`Role::Model`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// A user turn.
    User,
    /// A model turn.
    Model,
    /// An unrecognized role, kept verbatim.
    Other(String),
}

impl Role {
    /// Returns `true` for user turns.
    #[must_use]
    pub const fn is_user(&self) -> bool {
        matches!(self, Self::User)
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Model
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "user" => Self::User,
            "model" => Self::Model,
            _ => Self::Other(raw),
        })
    }
}

/// One conversation turn (a "chunk" in the wire format).
///
/// Content is carried either in the flat `text` field or in `parts`.
/// When both are populated, `text` takes precedence and `parts` is
/// ignored; see [`crate::normalize::segments`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    /// Who produced this turn.
    #[serde(default)]
    pub role: Role,

    /// Flat-form content.
    #[serde(default)]
    pub text: Option<String>,

    /// Flat-form thought flag.
    #[serde(default)]
    pub is_thought: Option<bool>,

    /// Parts-form content.
    #[serde(default)]
    pub parts: Option<Vec<Part>>,
}

/// One element of a parts-form turn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Part {
    /// The text content of this part.
    #[serde(default)]
    pub text: String,

    /// Whether this part is a reasoning ("thought") segment.
    #[serde(default)]
    pub thought: Option<bool>,
}

/// Parses a JSON string into a [`ChatExport`] structure.
///
/// This is the main entry point for parsing AI Studio chat exports.
/// Parsing is strict on JSON syntax only: unknown fields are ignored and
/// missing optional fields are treated as absent.
///
/// # Errors
///
/// Returns an error if the input is not well-formed JSON.
///
/// # Example
///
/// ```
/// use aistudio2md::parser::parse_chat;
///
/// let chat = parse_chat("{}").unwrap();
/// assert!(chat.chunks().is_empty());
/// ```
pub fn parse_chat(json_str: &str) -> Result<ChatExport, ParseError> {
    serde_json::from_str(json_str).context(JsonSnafu)
}
