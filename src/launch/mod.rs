use std::path::{Path, PathBuf};

use crate::error::OpenError;
use crate::utils::process;

/// Executable name looked up on `PATH` and appended to configured directories.
#[cfg(windows)]
pub const QTCREATOR_EXECUTABLE: &str = "qtcreator.exe";

#[cfg(not(windows))]
pub const QTCREATOR_EXECUTABLE: &str = "qtcreator";

/// Turns the `qtCreatorPath` setting into the program to spawn.
///
/// A directory holding the executable resolves to that executable; any other
/// non-empty value is used verbatim.
pub fn resolve_command(configured: &str) -> String {
    let configured = configured.trim();
    if configured.is_empty() {
        return QTCREATOR_EXECUTABLE.to_string();
    }

    let path = Path::new(configured);
    if path.is_dir() {
        let exe = path.join(QTCREATOR_EXECUTABLE);
        if exe.exists() {
            return exe.to_string_lossy().into_owned();
        }
        tracing::warn!(
            dir = %path.display(),
            "configured Qt Creator directory has no {QTCREATOR_EXECUTABLE}, using it verbatim"
        );
    }
    configured.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: String,
    pub target: PathBuf,
}

impl LaunchCommand {
    pub fn new(program: impl Into<String>, target: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            target: target.into(),
        }
    }

    pub fn render(&self) -> String {
        format!(
            "{} {}",
            quote_for_display(&self.program),
            quote_for_display(&self.target.to_string_lossy())
        )
    }

    /// Starts Qt Creator and returns without waiting for it.
    pub fn launch(&self) -> Result<(), OpenError> {
        tracing::debug!(command = %self.render(), "launching Qt Creator");
        process::spawn_detached(&self.program, [self.target.as_os_str()]).map_err(|source| {
            OpenError::LaunchFailure {
                program: self.program.clone(),
                source,
            }
        })
    }
}

fn quote_for_display(input: &str) -> String {
    if input.is_empty() {
        return "\"\"".to_string();
    }
    if input.chars().any(|c| c.is_whitespace() || c == '"') {
        return format!("\"{}\"", input.replace('"', "\\\""));
    }
    input.to_string()
}
