use std::path::{Path, PathBuf};

use crate::config::{LauncherConfig, ResolutionMode};

use super::marker::find_upward;
use super::search::{MAX_MATCHES, marker_dirs, shallowest_within};
use super::{is_within, lexical_absolute, normalize};

/// What the user currently has open.
#[derive(Debug, Clone, Default)]
pub struct EditorContext {
    pub active_file: Option<PathBuf>,
    pub workspace_folders: Vec<PathBuf>,
}

/// Inputs shared by the project-root strategies.
struct Scope<'a> {
    workspace_root: PathBuf,
    active_file: Option<&'a Path>,
}

type Strategy = fn(&Scope<'_>) -> Option<PathBuf>;

/// Tried in order; the first hit wins.
const PROJECT_ROOT_STRATEGIES: &[(&str, Strategy)] = &[
    ("upward walk from active file", nearest_marker_above_active_file),
    ("workspace search", shallowest_marker_in_workspace),
];

/// Picks the path Qt Creator should open.
///
/// Returns `None` only when no workspace folder is open and the active file
/// cannot be used instead.
pub fn resolve_target(config: &LauncherConfig, context: &EditorContext) -> Option<PathBuf> {
    if config.open_with_file {
        if let Some(file) = context.active_file.as_deref() {
            return Some(std::path::absolute(file).unwrap_or_else(|_| file.to_path_buf()));
        }
    }

    // As named by the user; symlinks are only resolved for the marker lookup.
    let workspace_root = lexical_absolute(context.workspace_folders.first()?);

    match config.target_mode {
        ResolutionMode::Workspace => Some(workspace_root),
        ResolutionMode::ProjectRoot => {
            let scope = Scope {
                workspace_root: normalize(&workspace_root),
                active_file: context.active_file.as_deref(),
            };
            let found = PROJECT_ROOT_STRATEGIES.iter().find_map(|(label, strategy)| {
                let hit = strategy(&scope)?;
                tracing::debug!(strategy = *label, dir = %hit.display(), "project root found");
                Some(hit)
            });
            Some(found.unwrap_or(workspace_root))
        }
    }
}

fn nearest_marker_above_active_file(scope: &Scope<'_>) -> Option<PathBuf> {
    let file = scope.active_file.filter(|f| f.exists())?;
    if !is_within(file, &scope.workspace_root) {
        tracing::debug!(file = %file.display(), "active file is outside the workspace");
        return None;
    }
    let start = normalize(file).parent()?.to_path_buf();
    find_upward(&start, &scope.workspace_root)
}

fn shallowest_marker_in_workspace(scope: &Scope<'_>) -> Option<PathBuf> {
    let candidates = marker_dirs(&scope.workspace_root, MAX_MATCHES);
    shallowest_within(&candidates, &scope.workspace_root)
}
