use std::fmt;

/// Line that ends a `COPY ... FROM stdin;` data section.
pub const COPY_TERMINATOR: &str = "\\.";

/// Character that ends a plain SQL statement.
pub const STATEMENT_TERMINATOR: char = ';';

/// The kind of a statement block, fixed by its opening line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Plain,
    Copy,
    Function,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlockKind::Plain => "statement",
            BlockKind::Copy => "COPY data",
            BlockKind::Function => "function",
        })
    }
}

/// Dollar-quote token that brackets a function body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyDelimiter {
    /// `$$`
    Dollar,
    /// `$_$`
    DollarUnderscore,
}

impl BodyDelimiter {
    pub const DOLLAR: &'static str = "$$";
    pub const DOLLAR_UNDERSCORE: &'static str = "$_$";

    /// Finds the first delimiter mentioned on `line`, preferring `$$`.
    pub fn find(line: &str) -> Option<Self> {
        if line.contains(Self::DOLLAR) {
            Some(BodyDelimiter::Dollar)
        } else if line.contains(Self::DOLLAR_UNDERSCORE) {
            Some(BodyDelimiter::DollarUnderscore)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyDelimiter::Dollar => Self::DOLLAR,
            BodyDelimiter::DollarUnderscore => Self::DOLLAR_UNDERSCORE,
        }
    }

    /// True when `line` ends the function body: the delimiter followed by `;`.
    pub fn closes(&self, line: &str) -> bool {
        line.trim_end()
            .strip_suffix(STATEMENT_TERMINATOR)
            .is_some_and(|rest| rest.ends_with(self.as_str()))
    }
}

impl fmt::Display for BodyDelimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn ends_statement(line: &str) -> bool {
    line.trim_end().ends_with(STATEMENT_TERMINATOR)
}

pub fn ends_copy_data(line: &str) -> bool {
    line.trim() == COPY_TERMINATOR
}
