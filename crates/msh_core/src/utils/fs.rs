use std::path::Path;

/// Converts a path to a string.
///
/// Non-unicode characters are replaced by '?' in the returned string.
pub fn path_to_string<P: AsRef<Path>>(path: &P) -> String {
    path.as_ref().to_string_lossy().to_string()
}

/// Returns the last component of a directory path, or the path itself if it
/// has no last component (such as the root directory).
pub fn dir_name<P: AsRef<Path>>(path: &P) -> String {
    match path.as_ref().file_name() {
        Some(name) => name.to_string_lossy().to_string(),
        None => path_to_string(path),
    }
}
