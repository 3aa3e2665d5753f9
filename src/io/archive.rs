//! Zip packaging of the rendered collection directory

use crate::io::error::{BuildError, Result};
use std::fs::File;
use std::io;
use std::path::Path;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Compress every file in `directory` into the archive at `archive_path`
///
/// Entries are stored flat under their file names, matching the layout of
/// the collection directory, in sorted order so the archive layout is
/// stable. An existing archive of the same name is overwritten.
///
/// # Errors
///
/// Returns an error if the directory cannot be read, a file cannot be
/// opened, or the archive cannot be written.
pub fn archive_directory(directory: &Path, archive_path: &Path) -> Result<()> {
    let file = File::create(archive_path).map_err(|e| BuildError::FileSystem {
        path: archive_path.to_path_buf(),
        operation: "create archive",
        source: e,
    })?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = Vec::new();
    let listing = std::fs::read_dir(directory).map_err(|e| BuildError::FileSystem {
        path: directory.to_path_buf(),
        operation: "read directory",
        source: e,
    })?;
    for entry in listing {
        let entry = entry.map_err(|e| BuildError::FileSystem {
            path: directory.to_path_buf(),
            operation: "read directory entry",
            source: e,
        })?;
        let path = entry.path();
        if path.is_file() {
            entries.push(path);
        }
    }
    entries.sort();

    for path in entries {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        writer
            .start_file(name, options)
            .map_err(|e| archive_error(archive_path, &e))?;

        let mut source = File::open(&path).map_err(|e| BuildError::FileSystem {
            path: path.clone(),
            operation: "open archive entry",
            source: e,
        })?;
        io::copy(&mut source, &mut writer).map_err(|e| BuildError::FileSystem {
            path: path.clone(),
            operation: "write archive entry",
            source: e,
        })?;
    }

    writer
        .finish()
        .map_err(|e| archive_error(archive_path, &e))?;

    Ok(())
}

/// Remove the raw collection directory after archiving
///
/// # Errors
///
/// Returns an error if the directory cannot be removed.
pub fn remove_directory(directory: &Path) -> Result<()> {
    std::fs::remove_dir_all(directory).map_err(|e| BuildError::FileSystem {
        path: directory.to_path_buf(),
        operation: "remove directory",
        source: e,
    })
}

fn archive_error(archive_path: &Path, error: &impl ToString) -> BuildError {
    BuildError::Archive {
        path: archive_path.to_path_buf(),
        reason: error.to_string(),
    }
}
