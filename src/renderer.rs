// SPDX-License-Identifier: GPL-3.0-only

//! Markdown rendering for parsed AI Studio chat exports.
//!
//! This module transforms a [`ChatExport`] into a readable Markdown
//! document. The output format mirrors the interactive view: a settings
//! callout up front, the system instruction as a quoted block, then one
//! section per conversation segment with thought segments folded away
//! in `[!abstract]` callouts.
//!
//! # Output Format
//!
//! - A top-level heading using the caller-supplied title
//! - A folded `[!info]` callout with the run configuration table
//! - An optional `## System Instruction` quoted block
//! - `### 👤 User` and `### 🤖 Model` sections per segment, with model
//!   thought segments rendered as folded `Thinking Process` callouts
//!
//! Rendering is deterministic: the same export and title always produce
//! a byte-identical string. Segment text is passed through verbatim, no
//! escaping.
//!
//! # Example
//!
//! ```
//! use aistudio2md::parser::parse_chat;
//! use aistudio2md::renderer::render_chat;
//!
//! let chat = parse_chat(r#"{
//!     "chunkedPrompt": { "chunks": [{ "role": "user", "text": "Hi" }] }
//! }"#).unwrap();
//!
//! let markdown = render_chat(&chat, "Chat");
//! assert!(markdown.starts_with("# Chat\n"));
//! assert!(markdown.contains("### 👤 User"));
//! ```

use crate::callout::{CalloutKind, format_callout};
use crate::normalize::segments;
use crate::parser::{ChatExport, RunSettings, SafetySetting};
use std::fmt::Write;

/// Placeholder for settings absent from the export.
const NOT_AVAILABLE: &str = "N/A";

/// Heading shown above user segments.
const USER_HEADING: &str = "### 👤 User";

/// Heading shown above non-thought model segments.
const MODEL_HEADING: &str = "### 🤖 Model";

/// Renders a parsed chat export as Markdown.
///
/// This is the main entry point for rendering. It walks every turn in
/// conversational order and produces a complete Markdown document. The
/// result is never written to storage here; persisting it is the
/// caller's concern.
#[must_use]
pub fn render_chat(chat: &ChatExport, title: &str) -> String {
    let mut out = String::new();
    writeln!(out, "# {title}\n").unwrap();

    out.push_str(&format_callout(
        CalloutKind::Info,
        "Chat Configuration",
        &settings_table(chat.run_settings.as_ref()),
        true,
    ));
    out.push_str("---\n\n");

    if let Some(instruction) = chat.system_instruction_text() {
        writeln!(out, "## System Instruction\n").unwrap();
        out.push_str(&quote_lines(instruction));
        out.push_str("\n---\n\n");
    }

    for turn in chat.chunks() {
        for segment in segments(turn) {
            if turn.role.is_user() {
                // Thought flags on user turns are not part of the format
                // and have no effect.
                writeln!(out, "{USER_HEADING}\n\n{}\n", segment.text).unwrap();
            } else if segment.is_thought {
                out.push_str(&format_callout(
                    CalloutKind::Abstract,
                    "Thinking Process",
                    &segment.text,
                    true,
                ));
            } else {
                writeln!(out, "{MODEL_HEADING}\n\n{}\n", segment.text).unwrap();
            }
        }
    }

    out
}

/// Builds the settings table used as the configuration callout body.
///
/// All four standard rows are always present, valued [`NOT_AVAILABLE`]
/// when missing; the Safety row appears only when the export carries
/// safety settings.
fn settings_table(settings: Option<&RunSettings>) -> String {
    let model = settings
        .and_then(|s| s.model.as_deref())
        .unwrap_or(NOT_AVAILABLE);
    let temperature = number_cell(settings.and_then(|s| s.temperature.as_ref()));
    let top_p = number_cell(settings.and_then(|s| s.top_p.as_ref()));
    let top_k = number_cell(settings.and_then(|s| s.top_k.as_ref()));

    let mut table = String::new();
    table.push_str("| Setting | Value |\n");
    table.push_str("| --- | --- |\n");
    writeln!(table, "| Model | {model} |").unwrap();
    writeln!(table, "| Temperature | {temperature} |").unwrap();
    writeln!(table, "| Top P | {top_p} |").unwrap();
    writeln!(table, "| Top K | {top_k} |").unwrap();

    if let Some(safety) = settings.and_then(|s| s.safety_settings.as_deref()) {
        writeln!(table, "| Safety | {} |", safety_cell(safety)).unwrap();
    }

    table
}

/// Formats an optional numeric setting for a table cell.
fn number_cell(value: Option<&serde_json::Number>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_owned(), ToString::to_string)
}

/// Formats safety settings as `CATEGORY: THRESHOLD` entries joined with
/// `<br>` so they stay inside a single table row.
fn safety_cell(safety: &[SafetySetting]) -> String {
    safety
        .iter()
        .map(|entry| {
            let category = entry.category.as_deref().unwrap_or(NOT_AVAILABLE);
            let category = category.strip_prefix("HARM_CATEGORY_").unwrap_or(category);
            let threshold = entry.threshold.as_deref().unwrap_or(NOT_AVAILABLE);
            format!("{category}: {threshold}")
        })
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Prefixes every line of `text` with `> `, blank lines included.
fn quote_lines(text: &str) -> String {
    let mut out = String::new();
    for line in text.trim_end_matches('\n').lines() {
        writeln!(out, "> {line}").unwrap();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{
        ChatExport, ChunkedPrompt, Part, Role, SafetySetting, SystemInstruction, Turn, parse_chat,
    };

    fn make_chat(chunks: Vec<Turn>) -> ChatExport {
        ChatExport {
            run_settings: None,
            system_instruction: None,
            chunked_prompt: Some(ChunkedPrompt { chunks }),
        }
    }

    fn flat_turn(role: Role, text: &str) -> Turn {
        Turn {
            role,
            text: Some(text.into()),
            is_thought: None,
            parts: None,
        }
    }

    #[test]
    fn renders_title_heading() {
        let output = render_chat(&ChatExport::default(), "My Session");

        assert!(output.starts_with("# My Session\n\n"));
    }

    #[test]
    fn renders_all_placeholder_rows_without_run_settings() {
        let output = render_chat(&ChatExport::default(), "Chat");

        assert!(output.contains("| Model | N/A |"));
        assert!(output.contains("| Temperature | N/A |"));
        assert!(output.contains("| Top P | N/A |"));
        assert!(output.contains("| Top K | N/A |"));
        assert!(!output.contains("| Safety |"));
    }

    #[test]
    fn renders_configuration_callout_folded() {
        let output = render_chat(&ChatExport::default(), "Chat");

        assert!(output.contains("> [!info]- Chat Configuration\n"));
        assert!(output.contains("> | Setting | Value |\n"));
    }

    #[test]
    fn renders_safety_row_when_present() {
        let chat = ChatExport {
            run_settings: Some(crate::parser::RunSettings {
                safety_settings: Some(vec![
                    SafetySetting {
                        category: Some("HARM_CATEGORY_HARASSMENT".into()),
                        threshold: Some("BLOCK_MEDIUM_AND_ABOVE".into()),
                    },
                    SafetySetting {
                        category: Some("HARM_CATEGORY_HATE_SPEECH".into()),
                        threshold: Some("BLOCK_NONE".into()),
                    },
                ]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let output = render_chat(&chat, "Chat");

        assert!(output.contains(
            "| Safety | HARASSMENT: BLOCK_MEDIUM_AND_ABOVE<br>HATE_SPEECH: BLOCK_NONE |"
        ));
    }

    #[test]
    fn renders_system_instruction_as_quoted_block() {
        let chat = ChatExport {
            system_instruction: Some(SystemInstruction {
                text: Some("Be terse.\nStay factual.".into()),
            }),
            ..Default::default()
        };
        let output = render_chat(&chat, "Chat");

        assert!(output.contains("## System Instruction\n"));
        assert!(output.contains("> Be terse.\n> Stay factual.\n"));
    }

    #[test]
    fn omits_system_instruction_section_when_empty() {
        let chat = ChatExport {
            system_instruction: Some(SystemInstruction {
                text: Some(String::new()),
            }),
            ..Default::default()
        };
        let output = render_chat(&chat, "Chat");

        assert!(!output.contains("System Instruction"));
    }

    #[test]
    fn renders_user_and_model_sections() {
        let chat = make_chat(vec![
            flat_turn(Role::User, "Hi"),
            flat_turn(Role::Model, "Hello!"),
        ]);
        let output = render_chat(&chat, "Chat");

        let user_at = output.find("### 👤 User\n\nHi\n").unwrap();
        let model_at = output.find("### 🤖 Model\n\nHello!\n").unwrap();
        assert!(user_at < model_at);
    }

    #[test]
    fn renders_thought_segment_as_folded_callout() {
        let mut turn = flat_turn(Role::Model, "Let me think...");
        turn.is_thought = Some(true);
        let output = render_chat(&make_chat(vec![turn]), "Chat");

        assert!(output.contains("> [!abstract]- Thinking Process\n> Let me think...\n"));
        assert!(!output.contains("### 🤖 Model"));
    }

    #[test]
    fn parts_turn_renders_each_segment() {
        let turn = Turn {
            role: Role::Model,
            text: None,
            is_thought: None,
            parts: Some(vec![
                Part {
                    text: "reasoning...".into(),
                    thought: Some(true),
                },
                Part {
                    text: "Final answer".into(),
                    thought: Some(false),
                },
            ]),
        };
        let output = render_chat(&make_chat(vec![turn]), "Chat");

        let callout_at = output
            .find("> [!abstract]- Thinking Process\n> reasoning...\n")
            .unwrap();
        let answer_at = output.find("### 🤖 Model\n\nFinal answer\n").unwrap();
        assert!(callout_at < answer_at);
    }

    #[test]
    fn thought_flag_has_no_effect_on_user_turns() {
        let mut turn = flat_turn(Role::User, "Hi");
        turn.is_thought = Some(true);
        let output = render_chat(&make_chat(vec![turn]), "Chat");

        assert!(output.contains("### 👤 User\n\nHi\n"));
        assert!(!output.contains("[!abstract]"));
    }

    #[test]
    fn unknown_role_renders_like_model() {
        let output = render_chat(
            &make_chat(vec![flat_turn(Role::Other("tool".into()), "output")]),
            "Chat",
        );

        assert!(output.contains("### 🤖 Model\n\noutput\n"));
    }

    #[test]
    fn empty_turn_produces_no_section() {
        let output = render_chat(&make_chat(vec![Turn::default()]), "Chat");

        assert!(!output.contains("### "));
    }

    #[test]
    fn rendering_is_deterministic() {
        let chat = parse_chat(
            r#"{
                "runSettings": { "model": "models/gemini-pro", "temperature": 0.7 },
                "systemInstruction": { "text": "Be helpful." },
                "chunkedPrompt": { "chunks": [
                    { "role": "user", "text": "Hi" },
                    { "role": "model", "parts": [
                        { "text": "hmm", "thought": true },
                        { "text": "Hello!" }
                    ] }
                ] }
            }"#,
        )
        .unwrap();

        assert_eq!(render_chat(&chat, "Chat"), render_chat(&chat, "Chat"));
    }

    #[test]
    fn preserves_source_number_formatting() {
        let chat = parse_chat(r#"{ "runSettings": { "temperature": 1.0, "topK": 40 } }"#).unwrap();
        let output = render_chat(&chat, "Chat");

        assert!(output.contains("| Temperature | 1.0 |"));
        assert!(output.contains("| Top K | 40 |"));
    }

    #[test]
    fn separator_follows_configuration_callout() {
        let output = render_chat(&ChatExport::default(), "Chat");

        assert!(output.contains("|\n\n---\n\n"));
    }

    #[test]
    fn segment_text_is_not_escaped() {
        let chat = make_chat(vec![flat_turn(Role::Model, "<tag> & `code`")]);
        let output = render_chat(&chat, "Chat");

        assert!(output.contains("<tag> & `code`"));
    }
}
