//! Bounded workspace-wide lookup of project marker files.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use super::marker::is_marker_name;
use super::{is_within, normalize};

/// Upper bound on marker files collected from one workspace walk.
pub const MAX_MATCHES: usize = 50;

/// Directory names never descended into.
const EXCLUDED_DIRS: &[&str] = &[".git", "node_modules", "out"];

/// Collects the containing directories of up to `limit` marker files below
/// `root`, shallowest first.
///
/// Walk errors are skipped, so an unreadable subtree simply contributes no
/// matches.
pub fn marker_dirs(root: &Path, limit: usize) -> Vec<PathBuf> {
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir
                && entry.depth() > 0
                && EXCLUDED_DIRS
                    .iter()
                    .any(|name| entry.file_name() == *name))
        })
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut found: Vec<(usize, PathBuf)> = walker
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!(%err, "skipping unreadable entry during marker search");
                None
            }
        })
        .filter(|entry| is_marker_name(&entry.file_name().to_string_lossy()))
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let dir = entry.path().parent()?.to_path_buf();
            Some((entry.depth(), dir))
        })
        .collect();

    // The walk is depth-first, so cap only once shallow hits are in front.
    found.sort_by(|(da, a), (db, b)| da.cmp(db).then_with(|| a.cmp(b)));
    found.into_iter().take(limit).map(|(_, dir)| dir).collect()
}

/// Picks the candidate inside `root` with the fewest path components, ties
/// broken by component-wise path order.
pub fn shallowest_within(candidates: &[PathBuf], root: &Path) -> Option<PathBuf> {
    candidates
        .iter()
        .filter(|dir| is_within(dir, root))
        .map(|dir| normalize(dir))
        .min_by(|a, b| by_depth_then_path(a, b))
}

fn by_depth_then_path(a: &Path, b: &Path) -> Ordering {
    a.components()
        .count()
        .cmp(&b.components().count())
        .then_with(|| a.cmp(b))
}
