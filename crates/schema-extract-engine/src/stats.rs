use std::fmt;

/// Counters collected over one filter run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub lines_read: usize,
    /// Lines seen while no block was open that did not open one.
    pub lines_dropped: usize,
    /// Plain and function statements written to the output.
    pub statements_kept: usize,
    pub copy_sections_kept: usize,
    /// Blocks replaced by a skip comment because they reference the excluded table.
    pub blocks_skipped: usize,
    /// Blocks still open at end of input (flushed or discarded).
    pub unterminated_blocks: usize,
}

impl fmt::Display for FilterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "read {} lines, kept {} statements and {} COPY sections, skipped {} blocks, dropped {} lines",
            self.lines_read,
            self.statements_kept,
            self.copy_sections_kept,
            self.blocks_skipped,
            self.lines_dropped,
        )?;
        if self.unterminated_blocks > 0 {
            write!(f, ", {} unterminated", self.unterminated_blocks)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line() {
        let stats = FilterStats {
            lines_read: 12,
            lines_dropped: 4,
            statements_kept: 3,
            copy_sections_kept: 1,
            blocks_skipped: 1,
            unterminated_blocks: 0,
        };
        insta::assert_snapshot!(
            stats.to_string(),
            @"read 12 lines, kept 3 statements and 1 COPY sections, skipped 1 blocks, dropped 4 lines"
        );
    }

    #[test]
    fn summary_mentions_unterminated_blocks() {
        let stats = FilterStats {
            unterminated_blocks: 1,
            ..FilterStats::default()
        };
        assert!(stats.to_string().ends_with(", 1 unterminated"));
    }
}
