use regex::Regex;

use super::{FilterError, kinds::BodyDelimiter};

/// What a line means to the filter when no block is open.
///
/// This is phase 1 of filtering: each candidate line is classified on its own,
/// without reference to the block that may be accumulating around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Not part of the target schema; skipped.
    Drop,
    /// Opens a statement closed by a trailing `;`.
    OpensPlain,
    /// Opens a `COPY ... FROM stdin;` data section closed by `\.`.
    OpensCopy,
    /// Opens a statement mentioning `FUNCTION`. The body delimiter is recorded
    /// when it appears on the opening line, otherwise detected later.
    OpensFunction { delimiter: Option<BodyDelimiter> },
}

/// Recognises the dump lines that start a statement in the target schema.
#[derive(Debug, Clone)]
pub struct StatementClassifier {
    definition: Regex,
    copy: Regex,
    setval: Regex,
    grant: Regex,
}

impl StatementClassifier {
    pub const FUNCTION_TOKEN: &'static str = "FUNCTION";

    pub fn new(schema: &str) -> Result<Self, FilterError> {
        if schema.trim().is_empty() {
            return Err(FilterError::EmptySchema);
        }
        let qualified = regex::escape(schema);
        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|source| FilterError::Pattern {
                schema: schema.to_string(),
                source,
            })
        };

        Ok(Self {
            definition: compile(format!(
                r#"^(CREATE|ALTER|DROP|COMMENT) .+( |"){qualified}\."#
            ))?,
            copy: compile(format!(r"^COPY {qualified}\."))?,
            setval: compile(format!(r"^SELECT pg_catalog\.setval\('{qualified}\."))?,
            grant: compile(format!(
                r#"^(GRANT|REVOKE) .+ ON\b.*( |"){qualified}\."#
            ))?,
        })
    }

    /// Whether `line` starts a block belonging to the target schema.
    pub fn opens_block(&self, line: &str) -> bool {
        self.definition.is_match(line)
            || self.copy.is_match(line)
            || self.setval.is_match(line)
            || self.grant.is_match(line)
    }

    pub fn classify(&self, line: &str) -> LineClass {
        if !self.opens_block(line) {
            LineClass::Drop
        } else if self.copy.is_match(line) {
            LineClass::OpensCopy
        } else if line.contains(Self::FUNCTION_TOKEN) {
            LineClass::OpensFunction {
                delimiter: BodyDelimiter::find(line),
            }
        } else {
            LineClass::OpensPlain
        }
    }
}
