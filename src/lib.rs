//! Markdown, typography and callout filters for static site templates.

pub mod components;
mod config;
pub mod filters;
mod markdown;
pub mod typography;

pub use components::callout::{CalloutKind, callout};
pub use config::{Config, Filter};
pub use filters::{Typography, amp, inline, note, render, renderer, set, warn};
pub use markdown::{Extension, HeadingAnchor, MarkdownRenderer, RendererConfig};
pub use typography::typogrify;
