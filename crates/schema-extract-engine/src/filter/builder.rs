use regex::Regex;

use crate::options::{FilterOptions, UnterminatedPolicy};
use crate::stats::FilterStats;

use super::{
    FilterError, FilteredDump, PREAMBLE,
    classify::{LineClass, StatementClassifier},
    kinds::{BlockKind, BodyDelimiter, ends_copy_data, ends_statement},
};

/// Lines of the block currently being accumulated.
#[derive(Debug, Clone)]
struct OpenBlock {
    /// 1-based input line number of the opening line.
    start_line: usize,
    lines: Vec<String>,
}

impl OpenBlock {
    fn new(start_line: usize) -> Self {
        Self {
            start_line,
            lines: vec![],
        }
    }

    fn first_line(&self) -> &str {
        self.lines.first().map(|l| l.trim()).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
enum FilterState {
    #[default]
    Idle,
    AccumulatingPlain(OpenBlock),
    AccumulatingCopy(OpenBlock),
    /// `delimiter` is `None` until the body's dollar-quote has been seen.
    AccumulatingFunctionBody {
        block: OpenBlock,
        delimiter: Option<BodyDelimiter>,
    },
}

impl FilterState {
    fn open(class: LineClass, start_line: usize) -> Option<Self> {
        let block = OpenBlock::new(start_line);
        match class {
            LineClass::Drop => None,
            LineClass::OpensPlain => Some(FilterState::AccumulatingPlain(block)),
            LineClass::OpensCopy => Some(FilterState::AccumulatingCopy(block)),
            LineClass::OpensFunction { delimiter } => {
                Some(FilterState::AccumulatingFunctionBody { block, delimiter })
            }
        }
    }

    fn into_block(self) -> Option<(BlockKind, OpenBlock)> {
        match self {
            FilterState::Idle => None,
            FilterState::AccumulatingPlain(block) => Some((BlockKind::Plain, block)),
            FilterState::AccumulatingCopy(block) => Some((BlockKind::Copy, block)),
            FilterState::AccumulatingFunctionBody { block, .. } => {
                Some((BlockKind::Function, block))
            }
        }
    }
}

/// Single-pass statement block filter.
///
/// Lines are fed with [`SchemaFilter::push`] in input order; each line either
/// opens a block, extends the open block, or is dropped. Blocks are written to
/// the output only as a whole once they close.
pub struct SchemaFilter {
    classifier: StatementClassifier,
    exclusion: Regex,
    excluded_target: String,
    on_unterminated: UnterminatedPolicy,
    state: FilterState,
    line_number: usize,
    stats: FilterStats,
    out: Vec<String>,
}

impl SchemaFilter {
    pub fn new(options: &FilterOptions) -> Result<Self, FilterError> {
        let classifier = StatementClassifier::new(&options.schema)?;
        let excluded_target = options.excluded_target();
        let exclusion = Regex::new(&format!(
            r"REFERENCES {}\.{}",
            regex::escape(&options.excluded_schema),
            regex::escape(&options.excluded_table)
        ))
        .map_err(|source| FilterError::Pattern {
            schema: options.excluded_schema.clone(),
            source,
        })?;

        Ok(Self {
            classifier,
            exclusion,
            excluded_target,
            on_unterminated: options.on_unterminated,
            state: FilterState::Idle,
            line_number: 0,
            stats: FilterStats::default(),
            out: PREAMBLE.iter().map(|l| l.to_string()).collect(),
        })
    }

    pub fn push(&mut self, line: &str) {
        self.line_number += 1;
        self.stats.lines_read += 1;

        let state = match std::mem::take(&mut self.state) {
            FilterState::Idle => {
                let class = self.classifier.classify(line);
                match FilterState::open(class, self.line_number) {
                    Some(opened) => {
                        log::debug!("line {}: {:?}", self.line_number, class);
                        opened
                    }
                    None => {
                        self.stats.lines_dropped += 1;
                        return;
                    }
                }
            }
            open => open,
        };

        self.state = self.accumulate(state, line);
    }

    pub fn finish(mut self) -> Result<FilteredDump, FilterError> {
        // EOF: a block that never closed
        if let Some((kind, block)) = std::mem::take(&mut self.state).into_block() {
            match self.on_unterminated {
                UnterminatedPolicy::Fail => {
                    return Err(FilterError::UnterminatedBlock {
                        kind,
                        line_number: block.start_line,
                        first_line: block.first_line().to_string(),
                    });
                }
                UnterminatedPolicy::Flush => {
                    log::warn!(
                        "Flushing unterminated {kind} block starting at line {}: {}",
                        block.start_line,
                        block.first_line()
                    );
                    match kind {
                        BlockKind::Copy => self.keep_copy(block),
                        BlockKind::Plain | BlockKind::Function => self.close_statement(block),
                    }
                }
                UnterminatedPolicy::Discard => {
                    log::warn!(
                        "Discarding unterminated {kind} block starting at line {} ({} lines): {}",
                        block.start_line,
                        block.lines.len(),
                        block.first_line()
                    );
                }
            }
            self.stats.unterminated_blocks += 1;
        }

        Ok(FilteredDump {
            lines: self.out,
            stats: self.stats,
        })
    }

    /// Appends `line` to the open block and closes the block if `line` ends it.
    fn accumulate(&mut self, state: FilterState, line: &str) -> FilterState {
        match state {
            FilterState::Idle => FilterState::Idle,
            FilterState::AccumulatingCopy(mut block) => {
                block.lines.push(line.to_string());
                if ends_copy_data(line) {
                    self.keep_copy(block);
                    FilterState::Idle
                } else {
                    FilterState::AccumulatingCopy(block)
                }
            }
            FilterState::AccumulatingPlain(mut block) => {
                block.lines.push(line.to_string());
                if ends_statement(line) {
                    self.close_statement(block);
                    FilterState::Idle
                } else {
                    FilterState::AccumulatingPlain(block)
                }
            }
            FilterState::AccumulatingFunctionBody {
                mut block,
                delimiter,
            } => {
                block.lines.push(line.to_string());
                let delimiter = delimiter.or_else(|| BodyDelimiter::find(line));
                // Until the body starts this is an ordinary statement.
                let closed = match delimiter {
                    Some(d) => d.closes(line),
                    None => ends_statement(line),
                };
                if closed {
                    self.close_statement(block);
                    FilterState::Idle
                } else {
                    FilterState::AccumulatingFunctionBody { block, delimiter }
                }
            }
        }
    }

    fn keep_copy(&mut self, block: OpenBlock) {
        self.stats.copy_sections_kept += 1;
        self.out.extend(block.lines);
    }

    fn close_statement(&mut self, block: OpenBlock) {
        let content = block.lines.concat();
        if self.exclusion.is_match(&content) {
            log::info!(
                "Skipping constraint referencing {} in block starting with: {}",
                self.excluded_target,
                block.first_line()
            );
            self.stats.blocks_skipped += 1;
            self.out.push(skip_comment(&self.excluded_target));
        } else {
            self.stats.statements_kept += 1;
            self.out.extend(block.lines);
        }
    }
}

fn skip_comment(excluded_target: &str) -> String {
    format!("-- Skipped constraint referencing {excluded_target}\n")
}
