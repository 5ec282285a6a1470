//! Catalog source handling
//!
//! This module handles parsing and resolving catalog sources given on the
//! command line or in `fedcat.yaml`:
//! - Snapshot file paths: `./catalogs/site-a.json`, `/var/lib/fedcat/b.json`
//! - Directories, scanned recursively for `*.json` snapshots
//! - Glob patterns: `catalogs/*.json`, `sites/**/catalog.json`
//!
//! Every resolved snapshot file becomes one federated catalog. Resolution
//! is deterministic: directory scans and glob matches come back sorted, so
//! the federation order only depends on the configuration.
//!
//! ## Module Organization
//!
//! - `snapshot.rs`: the snapshot-file catalog client

pub mod snapshot;

pub use snapshot::FileCatalog;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::error::{FedcatError, Result};
use crate::federation::RemoteCatalog;

/// A parsed catalog source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// One snapshot file
    File { path: PathBuf },
    /// Every `*.json` snapshot under a directory
    Dir { path: PathBuf },
    /// Snapshots matching a glob pattern under a root directory
    Pattern { root: PathBuf, glob: String },
}

impl CatalogSource {
    /// Parse a catalog source from a string
    ///
    /// A spec containing glob metacharacters is a pattern; otherwise an
    /// existing directory is scanned and anything else is taken as a
    /// snapshot file path. A file that does not exist yet is accepted
    /// here and surfaces as an unreachable catalog at query time.
    pub fn parse(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(FedcatError::SourceParseFailed {
                spec: spec.to_string(),
                reason: "empty source".to_string(),
            });
        }

        let normalized = spec.replace('\\', "/");
        if let Some(meta) = normalized.find(['*', '?', '[']) {
            // the directories before the first metacharacter are walked,
            // the rest is the pattern matched beneath them
            let (root, glob) = match normalized[..meta].rfind('/') {
                Some(slash) => (
                    PathBuf::from(&normalized[..slash.max(1)]),
                    normalized[slash + 1..].to_string(),
                ),
                None => (PathBuf::from("."), normalized.clone()),
            };
            Glob::new(&glob).map_err(|e| FedcatError::SourceParseFailed {
                spec: spec.to_string(),
                reason: e.to_string(),
            })?;
            return Ok(CatalogSource::Pattern { root, glob });
        }

        let path = PathBuf::from(spec);
        if path.is_dir() {
            return Ok(CatalogSource::Dir { path });
        }
        Ok(CatalogSource::File { path })
    }

    /// Resolve the source to the snapshot files it names, sorted
    pub fn resolve(&self) -> Result<Vec<PathBuf>> {
        match self {
            CatalogSource::File { path } => Ok(vec![path.clone()]),
            CatalogSource::Dir { path } => {
                let mut files = collect_files(path, |p| {
                    p.extension().and_then(|e| e.to_str()) == Some("json")
                });
                files.sort();
                if files.is_empty() {
                    return Err(FedcatError::SourceEmpty {
                        spec: path.display().to_string(),
                    });
                }
                Ok(files)
            }
            CatalogSource::Pattern { root, glob } => {
                #[allow(clippy::expect_used)]
                let pattern = Glob::new(glob).expect("validated at parse time");
                let mut files = collect_files(root, |p| {
                    let relative = p.strip_prefix(root).unwrap_or(p);
                    let candidate = relative.to_string_lossy().replace('\\', "/");
                    pattern
                        .matched(&CandidatePath::from(candidate.as_str()))
                        .is_some()
                });
                files.sort();
                if files.is_empty() {
                    return Err(FedcatError::SourceEmpty {
                        spec: format!("{}/{glob}", root.display()),
                    });
                }
                Ok(files)
            }
        }
    }
}

fn collect_files<F>(root: &Path, mut keep: F) -> Vec<PathBuf>
where
    F: FnMut(&Path) -> bool,
{
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| keep(path))
        .collect()
}

/// Resolve source specs into federated snapshot catalogs, in spec order
pub fn open_catalogs(specs: &[String]) -> Result<Vec<RemoteCatalog>> {
    let mut catalogs = Vec::new();
    for spec in specs {
        let source = CatalogSource::parse(spec)?;
        for path in source.resolve()? {
            let endpoint = path.display().to_string();
            catalogs.push(RemoteCatalog::new(endpoint, Box::new(FileCatalog::open(path))));
        }
    }
    Ok(catalogs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, "{\"devices\": []}").unwrap();
    }

    #[test]
    fn test_parse_file_spec() {
        let source = CatalogSource::parse("catalogs/site-a.json").unwrap();
        assert_eq!(
            source,
            CatalogSource::File {
                path: PathBuf::from("catalogs/site-a.json")
            }
        );
    }

    #[test]
    fn test_parse_dir_spec() {
        let temp = TempDir::new().unwrap();
        let source = CatalogSource::parse(&temp.path().display().to_string()).unwrap();
        assert!(matches!(source, CatalogSource::Dir { .. }));
    }

    #[test]
    fn test_parse_pattern_spec() {
        let source = CatalogSource::parse("/var/lib/fedcat/*.json").unwrap();
        assert_eq!(
            source,
            CatalogSource::Pattern {
                root: PathBuf::from("/var/lib/fedcat"),
                glob: "*.json".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_rejects_empty_spec() {
        assert!(CatalogSource::parse("  ").is_err());
    }

    #[test]
    fn test_resolve_dir_finds_sorted_snapshots() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "b.json");
        touch(temp.path(), "a.json");
        touch(temp.path(), "notes.txt");
        touch(temp.path(), "nested/c.json");

        let source = CatalogSource::Dir {
            path: temp.path().to_path_buf(),
        };
        let files = source.resolve().unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().display().to_string())
            .collect();
        assert_eq!(names, ["a.json", "b.json", "nested/c.json"]);
    }

    #[test]
    fn test_resolve_empty_dir_is_an_error() {
        let temp = TempDir::new().unwrap();
        let source = CatalogSource::Dir {
            path: temp.path().to_path_buf(),
        };
        assert!(matches!(
            source.resolve().unwrap_err(),
            FedcatError::SourceEmpty { .. }
        ));
    }

    #[test]
    fn test_resolve_pattern() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "site-a.json");
        touch(temp.path(), "site-b.json");
        touch(temp.path(), "other.yaml");

        let source = CatalogSource::Pattern {
            root: temp.path().to_path_buf(),
            glob: "site-*.json".to_string(),
        };
        let files = source.resolve().unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_open_catalogs_in_spec_order() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "z.json");
        touch(temp.path(), "more/a.json");

        let specs = vec![
            temp.path().join("z.json").display().to_string(),
            temp.path().join("more").display().to_string(),
        ];
        let catalogs = open_catalogs(&specs).unwrap();
        assert_eq!(catalogs.len(), 2);
        assert!(catalogs[0].endpoint.ends_with("z.json"));
        assert!(catalogs[1].endpoint.ends_with("a.json"));
    }
}
