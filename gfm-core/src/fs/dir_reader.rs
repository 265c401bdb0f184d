//! ``src/fs/dir_reader.rs``
//!
//! # `Directory Reader`: Synchronous Listing of Real and Virtual Directories
//!
//! Produces the ordinal-sorted entry names shown in the grid, either from a
//! real directory or from the captured stdout of a shell command.

use compact_str::CompactString;
use std::{cmp::Ordering, fs, io, path::Path, time::Instant};
use tracing::{info, warn};

/// Single entry shown when a directory cannot be opened.
pub const NO_FILES: &str = "NO FILES";

pub const CURRENT_DIR: &str = ".";
pub const PARENT_DIR: &str = "..";

/// Result of reading a real directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirRead {
    pub entries: Vec<CompactString>,

    /// False when the directory could not be opened and `entries` holds the
    /// [`NO_FILES`] sentinel.
    pub readable: bool,
}

/// Byte-wise comparison, independent of locale.
#[must_use]
pub fn ordinal_cmp(a: &str, b: &str) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

pub fn sort_ordinal(entries: &mut [CompactString]) {
    entries.sort_by(|a: &CompactString, b: &CompactString| ordinal_cmp(a, b));
}

/// Lists `path`, including `.` and `..`, sorted ordinally.
///
/// An unopenable directory is not an error: it yields `["NO FILES"]` with
/// `readable == false` so the caller can reset its cursor.
#[must_use]
pub fn load_real(path: &Path) -> DirRead {
    let start_time = Instant::now();

    match read_names(path) {
        Ok(mut entries) => {
            sort_ordinal(&mut entries);
            info!(
                marker = "DIRECTORY_READ",
                entries = entries.len(),
                "Read {} in {:?}",
                path.display(),
                start_time.elapsed()
            );
            DirRead {
                entries,
                readable: true,
            }
        }

        Err(e) => {
            warn!("Cannot open directory {}: {}", path.display(), e);
            DirRead {
                entries: vec![CompactString::const_new(NO_FILES)],
                readable: false,
            }
        }
    }
}

fn read_names(path: &Path) -> io::Result<Vec<CompactString>> {
    // read_dir never yields the dot entries; the grid always shows them.
    let mut entries: Vec<CompactString> = vec![
        CompactString::const_new(CURRENT_DIR),
        CompactString::const_new(PARENT_DIR),
    ];

    for entry in fs::read_dir(path)? {
        match entry {
            Ok(entry) => {
                entries.push(CompactString::from(entry.file_name().to_string_lossy()));
            }

            Err(e) => {
                // Log the error but continue processing other entries
                warn!("Skipping unreadable entry in {}: {}", path.display(), e);
            }
        }
    }

    Ok(entries)
}

/// Turns captured command output into a virtual listing: `.` and `..` are
/// always added, duplicates are kept, everything is sorted ordinally.
#[must_use]
pub fn virtual_entries<I, S>(lines: I) -> Vec<CompactString>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut entries: Vec<CompactString> = vec![
        CompactString::const_new(CURRENT_DIR),
        CompactString::const_new(PARENT_DIR),
    ];
    entries.extend(lines.into_iter().map(|line| CompactString::from(line.as_ref())));
    sort_ordinal(&mut entries);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn names(entries: &[CompactString]) -> Vec<&str> {
        entries.iter().map(CompactString::as_str).collect()
    }

    #[test]
    fn test_real_directory_sorts_ordinally() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b", "A", "a"] {
            File::create(dir.path().join(name)).unwrap();
        }

        let read = load_real(dir.path());

        assert!(read.readable);
        assert_eq!(names(&read.entries), [".", "..", "A", "a", "b"]);
    }

    #[test]
    fn test_subdirectories_are_listed_by_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        File::create(dir.path().join("Cargo.toml")).unwrap();

        let read = load_real(dir.path());

        assert_eq!(names(&read.entries), [".", "..", "Cargo.toml", "src"]);
    }

    #[test]
    fn test_missing_directory_yields_sentinel() {
        let dir = tempfile::tempdir().unwrap();

        let read = load_real(&dir.path().join("does-not-exist"));

        assert!(!read.readable);
        assert_eq!(names(&read.entries), [NO_FILES]);
    }

    #[test]
    fn test_regular_file_is_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        File::create(&file).unwrap();

        assert!(!load_real(&file).readable);
    }

    #[test]
    fn test_virtual_entries_prepend_dot_entries() {
        let entries = virtual_entries(["x.txt", "y.txt"]);
        assert_eq!(names(&entries), [".", "..", "x.txt", "y.txt"]);
    }

    #[test]
    fn test_virtual_entries_keep_duplicates_and_sort() {
        let entries = virtual_entries(vec!["zeta".to_string(), "Alpha".into(), "zeta".into()]);
        assert_eq!(names(&entries), [".", "..", "Alpha", "zeta", "zeta"]);
    }

    #[test]
    fn test_ordinal_cmp_puts_uppercase_first() {
        assert_eq!(ordinal_cmp("Z", "a"), Ordering::Less);
        assert_eq!(ordinal_cmp("a", "a"), Ordering::Equal);
        assert_eq!(ordinal_cmp("_x", "a"), Ordering::Less);
    }
}
