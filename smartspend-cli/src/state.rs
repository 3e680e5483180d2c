use anyhow::{Context, Result, bail};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

/// Overrides the state directory (default `~/.smartspend`).
pub const HOME_VAR: &str = "SMARTSPEND_HOME";

fn resolve_home(explicit: Option<OsString>, user_home: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = explicit.filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    match user_home.filter(|h| !h.is_empty()) {
        Some(home) => Ok(PathBuf::from(home).join(".smartspend")),
        None => bail!("neither {HOME_VAR} nor HOME is set"),
    }
}

fn smartspend_home() -> Result<PathBuf> {
    resolve_home(std::env::var_os(HOME_VAR), std::env::var_os("HOME"))
}

/// Path of `name` inside the state directory, creating the directory.
pub fn state_file(name: &str) -> Result<PathBuf> {
    let dir = smartspend_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir.join(name))
}
