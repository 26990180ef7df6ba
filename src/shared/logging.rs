use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn submit_log_path(state_root: &Path) -> PathBuf {
    state_root.join("logs/submit.log")
}

/// Appends one line to the submission log, creating the log directory on
/// first use. Callers format their own timestamp/outcome fields.
pub fn append_submit_log_line(state_root: &Path, line: &str) -> std::io::Result<()> {
    let path = submit_log_path(state_root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    writeln!(file, "{line}")
}
