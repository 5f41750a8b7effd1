//! Version string resolution.

use std::path::Path;

use tracing::{debug, warn};

/// Read the version from `path`, falling back to `default` when the file is
/// missing, unreadable, or blank.
pub fn resolve_version(path: &Path, default: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(raw) => {
            let version = raw.trim();
            if version.is_empty() {
                warn!(path = %path.display(), default, "version file is empty, using default");
                default.to_string()
            } else {
                debug!(path = %path.display(), version, "read version file");
                version.to_string()
            }
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, default, "could not read version file, using default");
            default.to_string()
        }
    }
}
