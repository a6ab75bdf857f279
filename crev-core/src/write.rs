use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::contract::WriteError;

/// Write `content` to `path`, replacing whatever is there.
///
/// Flush and sync failures after a successful write are reported as
/// [`WriteError::Close`]; they are only checked once every byte was written.
pub fn save_string_to_file(content: &str, path: &Path) -> Result<(), WriteError> {
    let file = File::create(path).map_err(|source| WriteError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .map_err(|source| WriteError::Write {
            path: path.to_path_buf(),
            source,
        })?;

    let close_err = |source| WriteError::Close {
        path: path.to_path_buf(),
        source,
    };
    let file = writer.into_inner().map_err(|e| close_err(e.into_error()))?;
    file.sync_all().map_err(close_err)?;

    debug!(path = %path.display(), bytes = content.len(), "Saved file");
    Ok(())
}
