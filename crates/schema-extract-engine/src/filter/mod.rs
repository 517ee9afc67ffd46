//! # Statement Block Filter
//!
//! Extracts the statements of one schema from a plain-text database dump.
//!
//! ## Phases
//!
//! 1. **Line Classification** (`classify`): while no block is open, each line is
//!    classified into a `LineClass` (drop, or open a plain/COPY/function block)
//!
//! 2. **Block Accumulation** (`builder`): a `SchemaFilter` holds the open block
//!    and writes it out, replaces it with a skip comment, or discards it when
//!    it closes
//!
//! ## Key Invariants
//!
//! - Output always starts with [`PREAMBLE`]
//! - A block is written whole or not at all, in input order
//! - COPY data is never subject to the exclusion check
//! - A function block closes only on `<delimiter>;` once its body has started

pub mod builder;
pub mod classify;
pub mod kinds;

pub use builder::SchemaFilter;
pub use classify::{LineClass, StatementClassifier};
pub use kinds::{BlockKind, BodyDelimiter};

use crate::options::FilterOptions;
use crate::stats::FilterStats;

/// Extension setup written ahead of the extracted statements.
pub const PREAMBLE: &[&str] = &[
    "-- Enable extensions\n",
    "CREATE SCHEMA IF NOT EXISTS extensions;\n",
    "CREATE EXTENSION IF NOT EXISTS \"uuid-ossp\" WITH SCHEMA extensions;\n",
    "CREATE EXTENSION IF NOT EXISTS \"pgcrypto\" WITH SCHEMA extensions;\n",
    "\n",
];

#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Schema name must not be empty")]
    EmptySchema,
    #[error("Invalid pattern for schema '{schema}': {source}")]
    Pattern {
        schema: String,
        source: regex::Error,
    },
    #[error("Unterminated {kind} block starting at line {line_number}: {first_line}")]
    UnterminatedBlock {
        kind: BlockKind,
        line_number: usize,
        first_line: String,
    },
}

/// Result of a completed filter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredDump {
    /// Output lines, each with its original terminator.
    pub lines: Vec<String>,
    pub stats: FilterStats,
}

impl FilteredDump {
    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}

/// Splits dump text into lines, keeping each line's terminator.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n')
}

pub fn filter_lines<'a, I>(lines: I, options: &FilterOptions) -> Result<FilteredDump, FilterError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut filter = SchemaFilter::new(options)?;
    for line in lines {
        filter.push(line);
    }
    filter.finish()
}

pub fn filter_text(text: &str, options: &FilterOptions) -> Result<FilteredDump, FilterError> {
    filter_lines(split_lines(text), options)
}
