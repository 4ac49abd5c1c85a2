// SPDX-License-Identifier: GPL-3.0-only

//! Convert Google AI Studio chat exports to Markdown.
//!
//! This crate provides parsing and rendering functionality for
//! transforming AI Studio's JSON chat export format into readable
//! Markdown documents and into an interactive view description.
//!
//! # Overview
//!
//! AI Studio saves chat sessions as JSON files containing run settings,
//! an optional system instruction, and the conversation turns. This
//! crate:
//!
//! 1. Parses the JSON structure into typed Rust representations
//! 2. Normalizes the two turn content shapes into one segment stream
//! 3. Renders the conversation as Markdown with foldable callouts, or
//!    as a node tree an embedding host can attach to its UI
//!
//! # Example
//!
//! ```no_run
//! use aistudio2md::{parser, renderer};
//!
//! let json = std::fs::read_to_string("session.json").unwrap();
//! let chat = parser::parse_chat(&json).unwrap();
//!
//! let markdown = renderer::render_chat(&chat, "session");
//! println!("{markdown}");
//! ```
//!
//! # Modules
//!
//! - [`parser`]: JSON parsing and type definitions for AI Studio exports
//! - [`normalize`]: resolution of flat vs. parts turn content
//! - [`callout`]: foldable quote-block formatting
//! - [`renderer`]: Markdown generation
//! - [`view`]: interactive view tree construction
//! - [`host`]: capability seams for embedders (files, notices, clipboard)

#![deny(missing_docs)]

pub mod callout;
pub mod host;
pub mod normalize;
pub mod parser;
pub mod renderer;
pub mod view;
