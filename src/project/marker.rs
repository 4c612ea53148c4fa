use std::fs;
use std::path::{Path, PathBuf};

use super::normalize;

pub const CMAKE_LISTS: &str = "CMakeLists.txt";
pub const QMAKE_SUFFIX: &str = ".pro";

/// True for file names that mark a build/project root.
pub fn is_marker_name(name: &str) -> bool {
    name == CMAKE_LISTS || name.ends_with(QMAKE_SUFFIX)
}

/// Whether `dir` directly holds a `CMakeLists.txt` or a `*.pro` file.
///
/// Listing failures count as "no marker".
pub fn has_marker(dir: &Path) -> bool {
    if dir.join(CMAKE_LISTS).is_file() {
        return true;
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(dir = %dir.display(), %err, "cannot list directory, assuming no marker");
            return false;
        }
    };

    entries.filter_map(Result::ok).any(|entry| {
        entry.file_name().to_string_lossy().ends_with(QMAKE_SUFFIX) && entry.path().is_file()
    })
}

/// Walks from `start` towards `boundary`, returning the first directory that
/// carries a project marker.
///
/// `boundary` is tested but never left; the walk also stops at the filesystem
/// root.
pub fn find_upward(start: &Path, boundary: &Path) -> Option<PathBuf> {
    let boundary = normalize(boundary);
    let mut current = normalize(start);

    loop {
        tracing::debug!(dir = %current.display(), "checking for project marker");
        if has_marker(&current) {
            return Some(current);
        }
        if current == boundary {
            return None;
        }
        let parent = current.parent()?.to_path_buf();
        if parent == current {
            return None;
        }
        current = parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, b"").expect("write file");
    }

    #[test]
    fn cmake_lists_is_a_marker() {
        let tmp = tempdir().expect("temp dir");
        touch(&tmp.path().join(CMAKE_LISTS));
        assert!(has_marker(tmp.path()));
    }

    #[test]
    fn qmake_project_file_is_a_marker() {
        let tmp = tempdir().expect("temp dir");
        touch(&tmp.path().join("app.pro"));
        assert!(has_marker(tmp.path()));
    }

    #[test]
    fn unrelated_files_and_nested_markers_do_not_count() {
        let tmp = tempdir().expect("temp dir");
        touch(&tmp.path().join("main.cpp"));
        touch(&tmp.path().join("cmakelists.txt.bak"));
        touch(&tmp.path().join("app.pro.user"));
        touch(&tmp.path().join("sub").join(CMAKE_LISTS));
        assert!(!has_marker(tmp.path()));
    }

    #[test]
    fn directory_named_like_a_project_file_is_not_a_marker() {
        let tmp = tempdir().expect("temp dir");
        fs::create_dir_all(tmp.path().join("fake.pro")).expect("mkdir");
        assert!(!has_marker(tmp.path()));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_marker_files_count() {
        let tmp = tempdir().expect("temp dir");
        let real = tmp.path().join("real");
        touch(&real.join(CMAKE_LISTS));
        touch(&real.join("app.pro"));

        let cmake_only = tmp.path().join("cmake");
        fs::create_dir_all(&cmake_only).expect("mkdir");
        std::os::unix::fs::symlink(real.join(CMAKE_LISTS), cmake_only.join(CMAKE_LISTS))
            .expect("symlink");
        let qmake_only = tmp.path().join("qmake");
        fs::create_dir_all(&qmake_only).expect("mkdir");
        std::os::unix::fs::symlink(real.join("app.pro"), qmake_only.join("app.pro"))
            .expect("symlink");

        assert!(has_marker(&cmake_only));
        assert!(has_marker(&qmake_only));
    }

    #[test]
    fn missing_directory_has_no_marker() {
        let tmp = tempdir().expect("temp dir");
        assert!(!has_marker(&tmp.path().join("gone")));
    }

    #[test]
    fn marker_names() {
        assert!(is_marker_name("CMakeLists.txt"));
        assert!(is_marker_name("demo.pro"));
        assert!(!is_marker_name("CMakeLists.txt.in"));
        assert!(!is_marker_name("demo.pri"));
    }

    #[test]
    fn finds_nearest_marker_above_start() {
        let tmp = tempdir().expect("temp dir");
        let w = normalize(tmp.path());
        touch(&w.join("lib").join(CMAKE_LISTS));
        fs::create_dir_all(w.join("lib/sub")).expect("mkdir");

        assert_eq!(find_upward(&w.join("lib/sub"), &w), Some(w.join("lib")));
    }

    #[test]
    fn boundary_itself_is_tested() {
        let tmp = tempdir().expect("temp dir");
        let w = normalize(tmp.path());
        touch(&w.join("top.pro"));
        fs::create_dir_all(w.join("src")).expect("mkdir");

        assert_eq!(find_upward(&w.join("src"), &w), Some(w.clone()));
    }

    #[test]
    fn walk_stops_at_boundary() {
        let tmp = tempdir().expect("temp dir");
        let outer = normalize(tmp.path());
        touch(&outer.join(CMAKE_LISTS));
        let w = outer.join("w");
        fs::create_dir_all(w.join("src")).expect("mkdir");

        assert_eq!(find_upward(&w.join("src"), &w), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn result_stays_between_start_and_boundary(
            depth in 1usize..6,
            marker_level in proptest::option::of(0usize..8),
            outside_marker in any::<bool>(),
        ) {
            let tmp = tempdir().expect("temp dir");
            let outer = normalize(tmp.path());
            if outside_marker {
                touch(&outer.join(CMAKE_LISTS));
            }
            let boundary = outer.join("w");
            let mut chain = vec![boundary.clone()];
            for level in 0..depth {
                let next = chain[level].join(format!("d{level}"));
                chain.push(next);
            }
            let start = chain[depth].clone();
            fs::create_dir_all(&start).expect("mkdir");
            if let Some(level) = marker_level.filter(|l| *l <= depth) {
                touch(&chain[level].join("x.pro"));
            }

            let found = find_upward(&start, &boundary);
            let expected = marker_level
                .filter(|l| *l <= depth)
                .map(|l| chain[l].clone());
            prop_assert_eq!(found.clone(), expected);
            if let Some(dir) = found {
                prop_assert!(dir.starts_with(&boundary));
                prop_assert!(start.starts_with(&dir));
            }
        }
    }
}
