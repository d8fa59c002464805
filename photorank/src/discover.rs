use std::{
    io,
    path::{Path, PathBuf},
};

use photorank_common::utils::fsutils;

pub const PHOTO_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Photos found in a directory
#[derive(Debug, Default)]
pub struct Discovered {
    /// Basenames, sorted
    pub photos: Vec<String>,
    /// Photos whose names aren't UTF-8
    pub skipped: Vec<PathBuf>,
}

fn is_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            PHOTO_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// Lists the photos directly inside `dir`, subdirectories are not searched
pub fn discover_photos(dir: impl AsRef<Path>) -> io::Result<Discovered> {
    let files: Vec<PathBuf> = fsutils::all_files([dir])?;
    let mut discovered = Discovered::default();

    for file in files {
        if !file.is_file() || !is_photo(&file) {
            continue;
        }
        match file.file_name().and_then(|name| name.to_str()) {
            Some(name) => discovered.photos.push(name.to_owned()),
            None => {
                log::warn!("Skipping {:?}, its name is not UTF-8", file);
                discovered.skipped.push(file);
            }
        }
    }

    discovered.photos.sort();
    Ok(discovered)
}
