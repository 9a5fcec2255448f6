//! Directory tree creation.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::validate;

/// Create every directory in `paths`, including missing parents.
///
/// Directories that already exist are left alone. All paths are validated
/// before the first one is created, so a bad entry anywhere in the list
/// leaves the filesystem untouched. When `verbose` is set, one log event is
/// emitted per path.
///
/// # Errors
///
/// - [`ArtifactError::InvalidArgument`](crate::ArtifactError::InvalidArgument)
///   if any path is empty
/// - [`ArtifactError::Io`](crate::ArtifactError::Io) on permission failures or
///   when a non-directory is in the way; paths before the failing one remain
///   created
pub fn create_directories<I, P>(paths: I, verbose: bool) -> Result<()>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let paths: Vec<P> = paths.into_iter().collect();
    for path in &paths {
        validate::path_arg("create_directories", "paths", path.as_ref())?;
    }

    for path in &paths {
        let path = path.as_ref();
        fs::create_dir_all(path)?;
        if verbose {
            info!(path = %path.display(), "directory created");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ArtifactError;
    use tempfile::TempDir;

    #[test]
    fn test_creates_nested_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("artifacts/data_ingestion/raw");
        let sibling = dir.path().join("artifacts/training");

        create_directories([&nested, &sibling], false).unwrap();

        assert!(nested.is_dir());
        assert!(sibling.is_dir());
    }

    #[test]
    fn test_existing_directories_are_not_an_error() {
        let dir = TempDir::new().unwrap();
        let existing = dir.path().join("logs");
        fs::create_dir(&existing).unwrap();

        create_directories(vec![existing.clone(), existing.clone()], true).unwrap();
        assert!(existing.is_dir());
    }

    #[test]
    fn test_empty_list_is_a_no_op() {
        create_directories(Vec::<&Path>::new(), true).unwrap();
    }

    #[test]
    fn test_invalid_entry_creates_nothing() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first");

        let err = create_directories([first.as_path(), Path::new("")], true).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(!first.exists());
    }

    #[test]
    fn test_file_in_the_way_is_io_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("occupied");
        fs::write(&file, "x").unwrap();

        assert!(matches!(
            create_directories([file.join("child")], false),
            Err(ArtifactError::Io(_))
        ));
    }
}
