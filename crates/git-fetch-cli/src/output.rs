use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Write `contents` to a sibling temporary file and rename it over `path`,
/// so the destination only ever holds a complete document. The temporary
/// file never outlives a failed write.
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let temp_path = temp_path_for(path);

    let result = write_then_rename(&temp_path, path, contents);
    if result.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }
    result
}

fn write_then_rename(temp_path: &Path, path: &Path, contents: &str) -> Result<()> {
    let mut file = std::fs::File::create(temp_path)
        .with_context(|| format!("failed to create {}", temp_path.display()))?;
    file.write_all(contents.as_bytes())
        .and_then(|()| file.sync_all())
        .with_context(|| format!("failed to write {}", temp_path.display()))?;
    drop(file);

    std::fs::rename(temp_path, path).with_context(|| {
        format!(
            "failed to move {} into place at {}",
            temp_path.display(),
            path.display()
        )
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
