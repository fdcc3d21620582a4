//! Command line configuration.

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use std::borrow::Cow;
use std::path::PathBuf;

use crate::filters::{self, Typography};

/// Filter applied to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Filter {
    /// Render a full markdown document
    Document,
    /// Render inline markdown without block wrappers
    Inline,
    /// Typeset HTML or plain text
    Typography,
    /// Wrap ampersands in styling spans
    Amp,
    /// Wrap inline markdown in a note callout
    Note,
    /// Wrap inline markdown in a warning callout
    Warn,
}

/// Command line configuration for Typeset.
#[derive(Debug, Clone, Parser)]
#[command(name = "typeset", version, about, long_about = None)]
pub struct Config {
    /// Input file (reads stdin when omitted)
    pub input: Option<PathBuf>,

    /// Output file (writes stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Filter to apply
    #[arg(short, long, value_enum, default_value_t = Filter::Document)]
    pub filter: Filter,

    /// Skip the typography pass (document and inline filters only)
    #[arg(long)]
    pub no_typography: bool,

    /// Log pipeline steps to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the input path does not exist, or if typography is
    /// disabled for a filter that has no typography pass to skip.
    pub fn validate(&self) -> Result<()> {
        if let Some(input) = &self.input {
            if !input.exists() {
                bail!("Input path does not exist: {}", input.display());
            }
        }

        if self.no_typography && !matches!(self.filter, Filter::Document | Filter::Inline) {
            bail!(
                "--no-typography only applies to the document and inline filters, not {:?}",
                self.filter
            );
        }

        Ok(())
    }

    /// Returns typography setting for document and inline rendering.
    pub fn typography(&self) -> Typography {
        if self.no_typography {
            Typography::Skip
        } else {
            Typography::Apply
        }
    }

    /// Reads input from file or stdin.
    ///
    /// # Errors
    ///
    /// Returns error if the input cannot be read or is not valid UTF8.
    pub fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input: {}", path.display())),
            None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin"),
        }
    }

    /// Applies the configured filter to source text.
    pub fn apply(&self, source: &str) -> String {
        let content = Some(source);
        let output = match self.filter {
            Filter::Document => filters::render(content, self.typography()),
            Filter::Inline => filters::inline(content, self.typography()),
            Filter::Typography => filters::set(content),
            Filter::Amp => filters::amp(content),
            Filter::Note => Some(Cow::Owned(filters::note(content).into_string())),
            Filter::Warn => Some(Cow::Owned(filters::warn(content).into_string())),
        };

        output.map(Cow::into_owned).unwrap_or_default()
    }
}
