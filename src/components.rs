//! Reusable HTML components for template filters
//!
//! This module provides Maud component functions for fixed markup blocks
//! that wrap rendered content, such as note and warning callouts.

pub mod callout;
