//! Source discovery (§4.6, external collaborator). Resolves
//! `--package-sources-path` roots — including the `/**` → every directory
//! literally named `Sources` expansion — into a deterministic, sorted list
//! of `.swift` file contents. None of this is part of the core's contract;
//! the core only ever sees strings.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Resolve the set of source roots to scan. When `configured` is empty, the
/// default root is `<project_path>/Sources/<target_name>` for a package
/// layout or `<project_path>` directly for an Xcode layout.
pub fn resolve_roots(project_path: &Path, target_name: &str, is_package: bool, configured: &[String]) -> Vec<PathBuf> {
    if !configured.is_empty() {
        return configured.iter().flat_map(|root| expand_root(project_path, root)).collect();
    }

    let default_root = if is_package {
        project_path.join("Sources").join(target_name)
    } else {
        project_path.to_path_buf()
    };
    vec![default_root]
}

fn expand_root(project_path: &Path, root: &str) -> Vec<PathBuf> {
    match root.strip_suffix("/**") {
        Some(prefix) => find_sources_dirs(&join_root(project_path, prefix)),
        None => vec![join_root(project_path, root)],
    }
}

fn join_root(project_path: &Path, root: &str) -> PathBuf {
    let root_path = Path::new(root);
    if root_path.is_absolute() {
        root_path.to_path_buf()
    } else {
        project_path.join(root_path)
    }
}

fn find_sources_dirs(base: &Path) -> Vec<PathBuf> {
    if !base.exists() {
        return Vec::new();
    }
    WalkDir::new(base)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir() && entry.file_name() == "Sources")
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

/// Read every `*.swift` file beneath `roots`, recursively, in a
/// deterministic sorted-path order so repeated invocations over an unchanged
/// tree feed the core pipeline an identical sequence.
pub fn read_sources(roots: &[PathBuf]) -> Result<Vec<String>> {
    let mut paths: Vec<PathBuf> = roots
        .iter()
        .filter(|root| root.exists())
        .flat_map(|root| {
            WalkDir::new(root)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "swift"))
                .map(|entry| entry.path().to_path_buf())
        })
        .collect();
    paths.sort();

    paths.into_iter().map(|path| std::fs::read_to_string(&path).map_err(Into::into)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn default_root_for_package_layout_nests_under_target_name() {
        let roots = resolve_roots(Path::new("/proj"), "MyApp", true, &[]);
        assert_eq!(roots, vec![PathBuf::from("/proj/Sources/MyApp")]);
    }

    #[test]
    fn default_root_for_xcode_layout_is_project_path() {
        let roots = resolve_roots(Path::new("/proj"), "MyApp", false, &[]);
        assert_eq!(roots, vec![PathBuf::from("/proj")]);
    }

    #[test]
    fn reads_swift_files_in_sorted_order() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("b.swift"), "import A").unwrap();
        fs::write(tmp.path().join("a.swift"), "import B").unwrap();
        fs::write(tmp.path().join("ignore.txt"), "not swift").unwrap();

        let sources = read_sources(&[tmp.path().to_path_buf()]).unwrap();
        assert_eq!(sources, vec!["import B".to_string(), "import A".to_string()]);
    }
}
