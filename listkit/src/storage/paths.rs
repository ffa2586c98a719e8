//! Platform-specific location of the default storage database.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "dev";
const ORGANIZATION: &str = "listkit";
const APPLICATION: &str = "listkit";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the path to the default storage database.
///
/// - Linux: `$XDG_DATA_HOME/listkit/storage.db` or `~/.local/share/listkit/storage.db`
/// - macOS: `~/Library/Application Support/dev.listkit.listkit/storage.db`
/// - Windows: `C:\Users\<User>\AppData\Roaming\listkit\listkit\data\storage.db`
pub fn storage_db() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("storage.db"))
}
