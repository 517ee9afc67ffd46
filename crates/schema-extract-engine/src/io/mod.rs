use crate::filter::{FilterError, filter_text};
use crate::options::FilterOptions;
use crate::stats::FilterStats;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Read a whole dump file into memory
pub fn read_dump(path: &Path) -> Result<String, ExtractError> {
    if !path.exists() {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(ExtractError::Io)
}

/// Write filtered dump content, replacing any existing file
pub fn write_dump(path: &Path, content: &str) -> Result<(), ExtractError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(ExtractError::Io)?;
    }

    fs::write(path, content).map_err(ExtractError::Io)
}

/// Extract the statements of `options.schema` from the dump at `input` into `output`.
///
/// The output file is only written once the whole input has been filtered, so
/// a failed run leaves any previous output untouched.
pub fn extract_schema(
    input: &Path,
    output: &Path,
    options: &FilterOptions,
) -> Result<FilterStats, ExtractError> {
    log::info!(
        "Extracting {} schema from {} to {}...",
        options.schema,
        input.display(),
        output.display()
    );

    let content = read_dump(input)?;
    let dump = filter_text(&content, options)?;
    write_dump(output, &dump.to_text())?;

    log::info!("Extraction complete: {}", dump.stats);
    Ok(dump.stats)
}
