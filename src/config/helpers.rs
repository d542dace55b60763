use std::env;
use std::path::Path;

use once_cell::sync::Lazy;

/// Name of the top-level section when the caller has none to offer: the file
/// name the program was invoked as.
pub static DEFAULT_SECTION_NAME: Lazy<String> = Lazy::new(|| {
    env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "default".to_string())
});

/// Top-level section name for a configuration file: its stem, or the program
/// name when the path has none.
pub(super) fn section_name_for_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| String::clone(&DEFAULT_SECTION_NAME))
}
