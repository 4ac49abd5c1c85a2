// SPDX-License-Identifier: GPL-3.0-only

//! Interactive view construction.
//!
//! The in-app reading view is described here as an immutable node tree.
//! This module only decides *what* the view contains; the embedding host
//! walks the tree, creates concrete widgets, and feeds each
//! [`ViewNode::RichText`] source through its own Markdown renderer.
//! Keeping the tree pure makes the view logic testable without a host.
//!
//! Attachment contract for embedders: attach nodes in tree order and
//! await each rich-text render before starting the next, so bubbles
//! appear in conversational order. If the containing view is torn down
//! mid-render, in-flight renders may simply be abandoned.

use crate::normalize::segments;
use crate::parser::ChatExport;

/// Summary label on collapsed thought blocks.
const THINKING_SUMMARY: &str = "Thinking";

/// Message shown when the export could not be parsed.
const INVALID_MESSAGE: &str = "Invalid or empty chat data.";

/// Grouping containers in the view tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// The metadata header row.
    Meta,
    /// The system instruction block.
    SystemInstruction,
    /// One conversation turn.
    Turn,
    /// One segment bubble within a turn.
    Bubble,
}

/// One node of the view tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    /// Sole node when the export failed to parse.
    Placeholder {
        /// The message to display.
        message: String,
    },

    /// A plain text label (role names, metadata values).
    Label {
        /// The label text.
        text: String,
    },

    /// Markdown content to be rendered by the host.
    RichText {
        /// The raw markdown source.
        source: String,
    },

    /// A collapsible block.
    Disclosure {
        /// The always-visible summary line.
        summary: String,
        /// Whether the block starts expanded.
        open: bool,
        /// The collapsed content.
        children: Vec<ViewNode>,
    },

    /// A copy affordance. The payload is the raw source text, not the
    /// rendered form.
    CopyButton {
        /// The text handed to the clipboard on invocation.
        text: String,
    },

    /// A container grouping related nodes.
    Group {
        /// What this container represents.
        kind: GroupKind,
        /// The contained nodes, in display order.
        children: Vec<ViewNode>,
    },
}

/// Builds the view tree for a chat export.
///
/// `None` stands for an export that failed to parse and yields exactly
/// one [`ViewNode::Placeholder`]. The builder is pure: calling it twice
/// with the same input produces structurally identical trees.
#[must_use]
pub fn build_view(chat: Option<&ChatExport>) -> Vec<ViewNode> {
    let Some(chat) = chat else {
        return vec![ViewNode::Placeholder {
            message: INVALID_MESSAGE.to_owned(),
        }];
    };

    let mut nodes = Vec::new();

    if let Some(settings) = &chat.run_settings {
        let mut labels = Vec::new();
        if let Some(model) = &settings.model {
            labels.push(ViewNode::Label {
                text: model.clone(),
            });
        }
        if let Some(temperature) = &settings.temperature {
            labels.push(ViewNode::Label {
                text: format!("temperature {temperature}"),
            });
        }
        if !labels.is_empty() {
            nodes.push(ViewNode::Group {
                kind: GroupKind::Meta,
                children: labels,
            });
        }
    }

    if let Some(instruction) = chat.system_instruction_text() {
        nodes.push(ViewNode::Group {
            kind: GroupKind::SystemInstruction,
            children: vec![
                ViewNode::Label {
                    text: "System Instruction".to_owned(),
                },
                ViewNode::RichText {
                    source: instruction.to_owned(),
                },
                ViewNode::CopyButton {
                    text: instruction.to_owned(),
                },
            ],
        });
    }

    for turn in chat.chunks() {
        let bubbles: Vec<ViewNode> = segments(turn)
            .into_iter()
            .map(|segment| {
                let mut children = vec![ViewNode::Label {
                    text: role_label(turn).to_owned(),
                }];

                let content = ViewNode::RichText {
                    source: segment.text.clone(),
                };
                // Thought flags never fold user content.
                if segment.is_thought && !turn.role.is_user() {
                    children.push(ViewNode::Disclosure {
                        summary: THINKING_SUMMARY.to_owned(),
                        open: false,
                        children: vec![content],
                    });
                } else {
                    children.push(content);
                }

                if !segment.text.is_empty() {
                    children.push(ViewNode::CopyButton { text: segment.text });
                }

                ViewNode::Group {
                    kind: GroupKind::Bubble,
                    children,
                }
            })
            .collect();

        if !bubbles.is_empty() {
            nodes.push(ViewNode::Group {
                kind: GroupKind::Turn,
                children: bubbles,
            });
        }
    }

    nodes
}

/// The role label shown on a bubble. Unknown roles read as model turns.
fn role_label(turn: &crate::parser::Turn) -> &'static str {
    if turn.role.is_user() { "👤 User" } else { "🤖 Model" }
}
