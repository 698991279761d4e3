use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$BARIK_HOME`, or `~/.barik`.
pub fn barik_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BARIK_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".barik"))
}

pub fn ensure_barik_home() -> Result<PathBuf> {
    let dir = barik_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
