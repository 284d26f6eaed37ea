use crate::types::{AggregatorError, NewsItem, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Overwrite the cache document at `path` with `items`.
pub fn write_cache(path: &Path, items: &[NewsItem]) -> Result<()> {
    let mut json = serde_json::to_string_pretty(items)?;
    json.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    // Readers only ever see the old document or the complete new one.
    let tmp_path = temp_path(path);
    fs::write(&tmp_path, json).map_err(|e| io_error(&tmp_path, e))?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error(path, e));
    }

    info!("Wrote {} items to {}", items.len(), path.display());
    Ok(())
}

pub fn read_cache(path: &Path) -> Result<Vec<NewsItem>> {
    debug!("Reading cache document {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_error(path: &Path, source: std::io::Error) -> AggregatorError {
    AggregatorError::Io {
        path: path.to_path_buf(),
        source,
    }
}
