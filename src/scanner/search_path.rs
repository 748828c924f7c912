use std::path::{Path, PathBuf};
use tracing::debug;

/// Pick the directory to search.
///
/// An explicit `path` wins; otherwise `folder` is joined onto `default_root`;
/// with neither, `default_root` is used as is. Nothing is checked on disk here.
pub fn resolve_search_path(
    default_root: &Path,
    folder: Option<&str>,
    path: Option<&Path>,
) -> PathBuf {
    let resolved = match (path, folder) {
        (Some(explicit), folder) => {
            if let Some(folder) = folder {
                debug!(folder, "ignoring --folder because --path was given");
            }
            explicit.to_path_buf()
        }
        (None, Some(folder)) => default_root.join(folder),
        (None, None) => default_root.to_path_buf(),
    };

    debug!(search_path = %resolved.display(), "resolved search path");
    resolved
}
