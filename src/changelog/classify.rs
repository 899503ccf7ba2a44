//! Mapping changed-file paths to package names.

/// Root directory that holds packages.
const PACKAGES_ROOT: &str = "packages";

/// Package name for a changed-file path, or `""` when the path is not
/// attributable to any package.
///
/// The second path segment names the package. A second segment listed in
/// `ignore` is a pass-through directory: for paths at least four segments
/// deep the package is the third segment instead. The indirection is one
/// level only, not recursive; a three-segment path under a pass-through
/// directory still yields the pass-through name itself, and aggregation is
/// responsible for discarding it.
pub fn package_from_path<'p>(path: &'p str, ignore: &[String]) -> &'p str {
    let parts: Vec<&str> = path.split('/').collect();

    if parts[0] != PACKAGES_ROOT || parts.len() < 3 {
        return "";
    }

    if parts.len() >= 4 && ignore.iter().any(|dir| dir == parts[1]) {
        return parts[2];
    }

    parts[1]
}
