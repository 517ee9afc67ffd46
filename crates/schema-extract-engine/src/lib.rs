pub mod filter;
pub mod io;
pub mod options;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use filter::{
    BlockKind, BodyDelimiter, FilterError, FilteredDump, LineClass, SchemaFilter,
    StatementClassifier, filter_lines, filter_text, split_lines,
};
pub use io::{ExtractError, extract_schema, read_dump, write_dump};
pub use options::{FilterOptions, ParsePolicyError, UnterminatedPolicy};
pub use stats::FilterStats;
