use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

/// Collects all files in the given directories, does not walk them recursively.
pub fn all_files<R>(folders: impl IntoIterator<Item = impl AsRef<Path>>) -> io::Result<R>
where
    R: FromIterator<PathBuf>,
{
    let iters: Result<Vec<_>, _> =
        folders.into_iter().map(|path| fs::read_dir(path)).collect();

    iters?
        .into_iter()
        .flatten()
        .map(|entry| entry.map(|entry| entry.path()))
        .collect()
}

/// Try to read the file, return None if it doesn't exist
pub fn read_optional_file(path: impl AsRef<Path>) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
        Ok(s) => Ok(Some(s)),
    }
}

fn with_file_name_suffix(path: &Path, suffix: &str) -> io::Result<PathBuf> {
    let mut new_file_name: OsString = path
        .file_name()
        .ok_or(io::ErrorKind::InvalidInput)?
        .to_owned();
    new_file_name.push(suffix);
    Ok(path.with_file_name(new_file_name))
}

/// Creates a backup with the extension ".backup", if the file exists. The path must refer
/// to something that has a filename.
pub fn backup_file(path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    let copy_to = with_file_name_suffix(path, ".backup")?;

    match fs::copy(path, copy_to) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
        Ok(_) => Ok(()),
    }
}

/// Writes `contents` next to `path` and renames it into place, so readers see either the
/// old or the new file, never half of one.
pub fn replace_file(path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> io::Result<()> {
    let path = path.as_ref();
    let tmp = with_file_name_suffix(path, ".tmp")?;
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn optional_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let res = read_optional_file(dir.path().join("nope")).unwrap();
        assert_eq!(None, res);
    }

    #[test]
    fn replace_and_backup() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("table.json");

        backup_file(&file).unwrap();
        assert!(!dir.path().join("table.json.backup").exists());

        replace_file(&file, "first").unwrap();
        replace_file(&file, "second").unwrap();
        assert_eq!("second", fs::read_to_string(&file).unwrap());
        assert!(!dir.path().join("table.json.tmp").exists());

        backup_file(&file).unwrap();
        assert_eq!(
            "second",
            fs::read_to_string(dir.path().join("table.json.backup")).unwrap()
        );
    }

    #[test]
    fn lists_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.jpg"), "").unwrap();
        fs::write(dir.path().join("b.jpg"), "").unwrap();
        let mut files: Vec<PathBuf> = all_files([dir.path()]).unwrap();
        files.sort();
        assert_eq!(
            vec![dir.path().join("a.jpg"), dir.path().join("b.jpg")],
            files
        );
    }
}
