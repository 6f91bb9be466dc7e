//! On-disk input cache

use crate::error::InputError;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding one file per puzzle input at `{root}/{year}/day{day:02}.txt`
#[derive(Debug, Clone)]
pub struct InputCache {
    root: PathBuf,
}

impl InputCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the cached input for a puzzle, whether or not it exists
    pub fn cache_path(&self, year: u16, day: u8) -> PathBuf {
        self.root
            .join(year.to_string())
            .join(format!("day{:02}.txt", day))
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.cache_path(year, day).is_file()
    }

    /// Read a cached input
    ///
    /// # Returns
    /// * `Ok(Some(text))` - The input is cached
    /// * `Ok(None)` - Nothing cached for this puzzle
    /// * `Err(InputError::CacheRead)` - The file exists but could not be read
    pub fn get(&self, year: u16, day: u8) -> Result<Option<String>, InputError> {
        let path = self.cache_path(year, day);
        if !path.is_file() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| InputError::CacheRead { path, source })
    }

    /// Store an input, creating the year directory as needed
    pub fn put(&self, year: u16, day: u8, input: &str) -> Result<PathBuf, InputError> {
        let path = self.cache_path(year, day);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| InputError::CacheWrite {
                path: path.clone(),
                source,
            })?;
        }
        fs::write(&path, input).map_err(|source| InputError::CacheWrite {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn path_layout() {
        let cache = InputCache::new("/tmp/aoc");
        assert_eq!(
            cache.cache_path(2020, 7),
            PathBuf::from("/tmp/aoc/2020/day07.txt")
        );
        assert_eq!(
            cache.cache_path(2020, 19),
            PathBuf::from("/tmp/aoc/2020/day19.txt")
        );
    }

    #[test]
    fn put_then_get() {
        let dir = TempDir::new().unwrap();
        let cache = InputCache::new(dir.path().join("nested"));

        assert!(!cache.contains(2020, 3));
        assert_eq!(cache.get(2020, 3).unwrap(), None);

        let path = cache.put(2020, 3, "..##.......\n#...#...#..\n").unwrap();
        assert!(path.ends_with("2020/day03.txt"));
        assert!(cache.contains(2020, 3));
        assert_eq!(
            cache.get(2020, 3).unwrap().as_deref(),
            Some("..##.......\n#...#...#..\n")
        );
        assert!(!cache.contains(2020, 4));
    }

    #[test]
    fn put_into_file_root_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let cache = InputCache::new(file.path());

        assert!(matches!(
            cache.put(2020, 1, "x"),
            Err(InputError::CacheWrite { .. })
        ));
        assert_eq!(cache.get(2020, 1).unwrap(), None);
    }
}
