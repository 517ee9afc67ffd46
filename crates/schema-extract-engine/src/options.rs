use std::fmt;
use std::str::FromStr;

/// What to do with a block that is still open when the input ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnterminatedPolicy {
    /// Abort the run with [`crate::FilterError::UnterminatedBlock`].
    #[default]
    Fail,
    /// Emit the block as if it had closed, logging a warning.
    Flush,
    /// Drop the block, logging a warning.
    Discard,
}

impl UnterminatedPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnterminatedPolicy::Fail => "fail",
            UnterminatedPolicy::Flush => "flush",
            UnterminatedPolicy::Discard => "discard",
        }
    }
}

impl fmt::Display for UnterminatedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown unterminated block policy '{0}' (expected fail, flush or discard)")]
pub struct ParsePolicyError(pub String);

impl FromStr for UnterminatedPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(UnterminatedPolicy::Fail),
            "flush" => Ok(UnterminatedPolicy::Flush),
            "discard" => Ok(UnterminatedPolicy::Discard),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

/// Settings for one filter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOptions {
    /// Schema whose statements are kept, e.g. `public`.
    pub schema: String,
    /// Schema of the table whose foreign-key references cause a block to be skipped.
    pub excluded_schema: String,
    /// Table whose foreign-key references cause a block to be skipped.
    pub excluded_table: String,
    pub on_unterminated: UnterminatedPolicy,
}

impl FilterOptions {
    pub const DEFAULT_SCHEMA: &'static str = "public";
    pub const DEFAULT_EXCLUDED_SCHEMA: &'static str = "auth";
    pub const DEFAULT_EXCLUDED_TABLE: &'static str = "users";

    pub fn for_schema(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            ..Self::default()
        }
    }

    /// Qualified name of the excluded table as it appears in dump text.
    pub fn excluded_target(&self) -> String {
        format!("{}.{}", self.excluded_schema, self.excluded_table)
    }
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            schema: Self::DEFAULT_SCHEMA.to_string(),
            excluded_schema: Self::DEFAULT_EXCLUDED_SCHEMA.to_string(),
            excluded_table: Self::DEFAULT_EXCLUDED_TABLE.to_string(),
            on_unterminated: UnterminatedPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("fail", UnterminatedPolicy::Fail)]
    #[case("flush", UnterminatedPolicy::Flush)]
    #[case("discard", UnterminatedPolicy::Discard)]
    #[case(" Flush ", UnterminatedPolicy::Flush)]
    #[case("DISCARD", UnterminatedPolicy::Discard)]
    fn parses_policy(#[case] input: &str, #[case] expected: UnterminatedPolicy) {
        assert_eq!(input.parse::<UnterminatedPolicy>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = "ignore".parse::<UnterminatedPolicy>().unwrap_err();
        assert_eq!(err, ParsePolicyError("ignore".to_string()));
        assert!(err.to_string().contains("'ignore'"));
    }

    #[test]
    fn policy_display_matches_parse() {
        for policy in [
            UnterminatedPolicy::Fail,
            UnterminatedPolicy::Flush,
            UnterminatedPolicy::Discard,
        ] {
            assert_eq!(policy.to_string().parse::<UnterminatedPolicy>().unwrap(), policy);
        }
    }

    #[test]
    fn defaults_target_public_and_exclude_auth_users() {
        let options = FilterOptions::default();
        assert_eq!(options.schema, "public");
        assert_eq!(options.excluded_target(), "auth.users");
        assert_eq!(options.on_unterminated, UnterminatedPolicy::Fail);
    }

    #[test]
    fn for_schema_keeps_other_defaults() {
        let options = FilterOptions::for_schema("billing");
        assert_eq!(options.schema, "billing");
        assert_eq!(options.excluded_schema, "auth");
        assert_eq!(options.excluded_table, "users");
    }
}
