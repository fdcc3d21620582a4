//! Markdown rendering with site typography extensions.
//!
//! This module provides markdown rendering using comrak configured the way
//! site templates expect: raw HTML passthrough, autolinks, smart
//! punctuation, `==mark==` highlighting, footnotes and heading permalinks.
//! Indented code blocks are disabled and read as ordinary text.

mod escape;
mod extensions;
mod renderer;

pub use extensions::{Extension, HeadingAnchor};
pub use renderer::{MarkdownRenderer, RendererConfig};
