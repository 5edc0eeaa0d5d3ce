//! Document model types for portfolio content.
//!
//! This module defines the block tree that bridges the external ArchieML
//! parser and HTML rendering. Every block and inline tag the renderer
//! understands is a variant of a closed enum; anything else deserializes
//! into an explicit `Unhandled` variant so dropped content stays visible.

mod block;
mod document;

pub use block::{Block, Inline};
pub use document::{Document, TextItem};
