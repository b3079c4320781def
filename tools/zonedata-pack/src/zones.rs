//! Discovery of zone files inside a zoneinfo tree.

use color_eyre::{
    eyre::{bail, WrapErr},
    Result,
};
use log::{debug, warn};
use std::{
    fs,
    path::{Component, Path, PathBuf},
};
use walkdir::WalkDir;
use zonedata::ZoneName;

/// Files that carry the tzdata release, checked in order.
const VERSION_FILES: [&str; 2] = ["version", "tzdata.zi"];

/// A regular file below the zoneinfo root and the zone name derived for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneFile {
    pub path: PathBuf,
    pub name: ZoneName,
}

/// The zone files found under a zoneinfo root.
#[derive(Debug, Default)]
pub struct ZoneTree {
    pub files: Vec<ZoneFile>,
    /// Entries below the root that could not be read, such as dangling
    /// symlinks or directories without read permission.
    pub unreadable: usize,
}

/// Collects every regular file under `root`, sorted by path.
///
/// Files for which no zone name can be derived are skipped with a warning,
/// as are entries that cannot be read. Only an unreadable `root` is an error.
pub fn collect_zone_files(root: &Path) -> Result<ZoneTree> {
    let mut tree = ZoneTree::default();
    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(err).wrap_err_with(|| {
                    format!("directory traversal of {} failed", root.display())
                });
            }
            Err(err) => {
                warn!("skipping unreadable entry: {err}");
                tree.unreadable += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        match zone_name(root, &path) {
            Some(name) => tree.files.push(ZoneFile { path, name }),
            None => warn!("skipping {}: no zone name can be derived", path.display()),
        }
    }
    debug!(
        "found {} files under {} ({} unreadable)",
        tree.files.len(),
        root.display(),
        tree.unreadable
    );
    Ok(tree)
}

/// Derives the zone name for `path`: its components below `root` joined
/// with `/`.
///
/// Returns `None` when `path` is not below `root`, is `root` itself, or has a
/// component that is not valid UTF-8.
pub fn zone_name(root: &Path, path: &Path) -> Option<ZoneName> {
    let relative = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            _ => return None,
        }
    }
    ZoneName::new(&parts.join("/")).ok()
}

/// Finds the tzdata release of a zoneinfo directory.
///
/// A `version` file holds the release on its first line; `tzdata.zi` starts
/// with a `# version <release>` comment.
pub fn detect_version(root: &Path) -> Result<String> {
    for file in VERSION_FILES {
        let path = root.join(file);
        if !path.is_file() {
            continue;
        }
        let contents = fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let first_line = contents.lines().next().unwrap_or_default().trim();
        let version = first_line
            .strip_prefix("# version")
            .unwrap_or(first_line)
            .trim();
        if !version.is_empty() {
            debug!("using tzdata version {version} from {}", path.display());
            return Ok(version.to_owned());
        }
    }
    bail!(
        "no tzdata version found in {}; pass one with --tzdata-version",
        root.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_zone_name() {
        let root = Path::new("/usr/share/zoneinfo");
        let name = zone_name(root, Path::new("/usr/share/zoneinfo/America/Indiana/Knox"));
        assert_eq!(name.unwrap().as_str(), "America/Indiana/Knox");

        let name = zone_name(root, Path::new("/usr/share/zoneinfo/UTC"));
        assert_eq!(name.unwrap().as_str(), "UTC");
    }

    #[test]
    fn no_name_outside_root() {
        let root = Path::new("/usr/share/zoneinfo");
        assert_eq!(zone_name(root, Path::new("/usr/share/zoneinfo")), None);
        assert_eq!(zone_name(root, Path::new("/etc/localtime")), None);
        assert_eq!(
            zone_name(root, Path::new("/usr/share/zoneinfo/../localtime")),
            None
        );
    }

    #[test]
    fn collects_sorted_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Europe")).unwrap();
        fs::write(dir.path().join("Europe/Paris"), b"").unwrap();
        fs::write(dir.path().join("Europe/Berlin"), b"").unwrap();
        fs::write(dir.path().join("UTC"), b"").unwrap();

        let names: Vec<String> = collect_zone_files(dir.path())
            .unwrap()
            .files
            .into_iter()
            .map(|file| file.name.to_string())
            .collect();
        assert_eq!(names, ["Europe/Berlin", "Europe/Paris", "UTC"]);
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_counted_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("UTC"), b"").unwrap();
        std::os::unix::fs::symlink("/nonexistent/target", dir.path().join("localtime")).unwrap();

        let tree = collect_zone_files(dir.path()).unwrap();
        let names: Vec<&str> = tree.files.iter().map(|file| file.name.as_str()).collect();
        assert_eq!(names, ["UTC"]);
        assert_eq!(tree.unreadable, 1);
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_zone_files(&dir.path().join("zoneinfo")).is_err());
    }

    #[test]
    fn version_from_files() {
        let dir = tempfile::tempdir().unwrap();
        assert!(detect_version(dir.path()).is_err());

        fs::write(dir.path().join("tzdata.zi"), "# version 2024b\n# ...\n").unwrap();
        assert_eq!(detect_version(dir.path()).unwrap(), "2024b");

        fs::write(dir.path().join("version"), "2025a\n").unwrap();
        assert_eq!(detect_version(dir.path()).unwrap(), "2025a");
    }
}
