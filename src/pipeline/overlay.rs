// ABOUTME: Overlay materialization: merges overlay files into the resource directory.
// ABOUTME: Existing files are overwritten; directories are created as needed.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("overlay path {} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("failed to read overlay tree {}: {source}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to copy {} to {}: {source}", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Copy every file under `overlays` to the same relative path under
/// `resource`. Returns the number of files copied.
pub fn materialize(overlays: &Path, resource: &Path) -> Result<usize, OverlayError> {
    if overlays.is_file() {
        return Err(OverlayError::NotADirectory(overlays.to_path_buf()));
    }

    let mut copied = 0;

    for entry in WalkDir::new(overlays).follow_links(true) {
        let entry = entry.map_err(|source| OverlayError::Walk {
            root: overlays.to_path_buf(),
            source,
        })?;

        let Ok(relative) = entry.path().strip_prefix(overlays) else {
            continue;
        };
        let target = resource.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target).map_err(|source| OverlayError::Copy {
                from: entry.path().to_path_buf(),
                to: target.clone(),
                source,
            })?;
            continue;
        }

        std::fs::copy(entry.path(), &target).map_err(|source| OverlayError::Copy {
            from: entry.path().to_path_buf(),
            to: target.clone(),
            source,
        })?;
        tracing::debug!("Overlay {} -> {}", relative.display(), target.display());
        copied += 1;
    }

    Ok(copied)
}
