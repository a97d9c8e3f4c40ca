//! Per-file, line-ordered storage shared by annotations and bookmarks.
//!
//! # Invariants
//!
//! - Each file bucket is sorted ascending by anchor line after every mutation.
//! - Entries anchored on the same line keep insertion order; lookups act on the
//!   first of them.
//! - A bucket emptied by [`LineStore::remove`] is dropped.
//! - Callers only ever receive clones or shared slices, never a mutable handle.
//!
//! The store does not reject a second entry on an already occupied line. The
//! [`Project`](crate::Project) operations remove before they add, so the
//! session itself never produces duplicates.

use crate::{error::Result, CodeLine, Error};
use rustc_hash::FxHashMap;

/// An entry attached to one line of one file.
pub trait Anchored: Clone {
    /// Relative path of the owning file.
    fn file(&self) -> &str;
    /// Code-space anchor line.
    fn line(&self) -> CodeLine;
}

/// Collection of [`Anchored`] entries bucketed by file path.
#[derive(Debug, Clone)]
pub struct LineStore<T> {
    buckets: FxHashMap<String, Vec<T>>,
}

impl<T> Default for LineStore<T> {
    fn default() -> Self {
        Self {
            buckets: FxHashMap::default(),
        }
    }
}

impl<T: Anchored> LineStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry` into its file's bucket at its sorted position.
    ///
    /// Entries already on the same line stay ahead of the new one.
    pub fn add(&mut self, entry: T) {
        let bucket = self.buckets.entry(entry.file().to_string()).or_default();
        let line = entry.line();
        let pos = bucket.partition_point(|e| e.line() <= line);
        bucket.insert(pos, entry);
    }

    /// Remove and return the entry anchored at `line` in `file`.
    ///
    /// On [`Error::NotFound`] nothing is changed.
    pub fn remove(&mut self, file: &str, line: CodeLine) -> Result<T> {
        let bucket = self
            .buckets
            .get_mut(file)
            .ok_or_else(|| Error::not_found(file, line.0))?;
        let index = position(bucket, line).ok_or_else(|| Error::not_found(file, line.0))?;

        let removed = bucket.remove(index);
        if bucket.is_empty() {
            self.buckets.remove(file);
        }
        Ok(removed)
    }

    /// Copy of the entry anchored at `line` in `file`.
    pub fn get(&self, file: &str, line: CodeLine) -> Result<T> {
        let bucket = self.bucket(file);
        position(bucket, line)
            .map(|index| bucket[index].clone())
            .ok_or_else(|| Error::not_found(file, line.0))
    }

    pub fn contains(&self, file: &str, line: CodeLine) -> bool {
        position(self.bucket(file), line).is_some()
    }

    /// Ascending snapshot of one file's entries. Unknown files yield an empty list.
    pub fn get_all(&self, file: &str) -> Vec<T> {
        self.bucket(file).to_vec()
    }

    /// Every entry in the store. Files come in no particular order; entries
    /// within a file are ascending.
    pub fn all(&self) -> Vec<T> {
        self.buckets.values().flatten().cloned().collect()
    }

    /// Read-only view of one file's bucket.
    pub fn bucket(&self, file: &str) -> &[T] {
        self.buckets.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Read-only views of every non-empty bucket, sorted by file path.
    pub fn buckets(&self) -> Vec<(&str, &[T])> {
        let mut buckets: Vec<_> = self
            .buckets
            .iter()
            .map(|(file, entries)| (file.as_str(), entries.as_slice()))
            .collect();
        buckets.sort_unstable_by_key(|(file, _)| *file);
        buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

fn position<T: Anchored>(bucket: &[T], line: CodeLine) -> Option<usize> {
    let index = bucket.partition_point(|e| e.line() < line);
    bucket
        .get(index)
        .filter(|e| e.line() == line)
        .map(|_| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Mark {
        file: String,
        line: u32,
        tag: &'static str,
    }

    impl Anchored for Mark {
        fn file(&self) -> &str {
            &self.file
        }

        fn line(&self) -> CodeLine {
            CodeLine(self.line)
        }
    }

    fn mark(file: &str, line: u32, tag: &'static str) -> Mark {
        Mark {
            file: file.to_string(),
            line,
            tag,
        }
    }

    fn lines(store: &LineStore<Mark>, file: &str) -> Vec<u32> {
        store.get_all(file).iter().map(|m| m.line).collect()
    }

    #[test]
    fn add_keeps_bucket_sorted() {
        let mut store = LineStore::new();
        for line in [5, 1, 3] {
            store.add(mark("a.rs", line, ""));
        }
        assert_eq!(lines(&store, "a.rs"), vec![1, 3, 5]);
    }

    #[test]
    fn buckets_are_per_file() {
        let mut store = LineStore::new();
        store.add(mark("a.rs", 2, ""));
        store.add(mark("b.rs", 1, ""));
        assert_eq!(lines(&store, "a.rs"), vec![2]);
        assert_eq!(lines(&store, "b.rs"), vec![1]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.all().len(), 2);
    }

    #[test]
    fn unknown_file_is_empty_not_an_error() {
        let store: LineStore<Mark> = LineStore::new();
        assert!(store.get_all("missing.rs").is_empty());
        assert!(store.bucket("missing.rs").is_empty());
    }

    #[test]
    fn get_is_exact_match() {
        let mut store = LineStore::new();
        store.add(mark("a.rs", 4, "four"));
        assert_eq!(store.get("a.rs", CodeLine(4)).unwrap().tag, "four");
        assert!(store.get("a.rs", CodeLine(5)).unwrap_err().is_not_found());
        assert!(store.get("b.rs", CodeLine(4)).unwrap_err().is_not_found());
    }

    #[test]
    fn remove_missing_leaves_store_untouched() {
        let mut store = LineStore::new();
        store.add(mark("a.rs", 1, ""));
        store.add(mark("a.rs", 9, ""));
        let before = store.get_all("a.rs");

        let err = store.remove("a.rs", CodeLine(5)).unwrap_err();
        assert!(matches!(err, Error::NotFound { line: 5, .. }));
        assert!(store.remove("other.rs", CodeLine(1)).unwrap_err().is_not_found());

        assert_eq!(store.get_all("a.rs"), before);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn removing_last_entry_drops_bucket() {
        let mut store = LineStore::new();
        store.add(mark("a.rs", 1, ""));
        store.remove("a.rs", CodeLine(1)).unwrap();
        assert!(store.is_empty());
        assert!(store.buckets().is_empty());
    }

    #[test]
    fn duplicate_lines_are_kept_in_insertion_order() {
        let mut store = LineStore::new();
        store.add(mark("a.rs", 3, "first"));
        store.add(mark("a.rs", 1, ""));
        store.add(mark("a.rs", 3, "second"));
        assert_eq!(lines(&store, "a.rs"), vec![1, 3, 3]);

        assert_eq!(store.get("a.rs", CodeLine(3)).unwrap().tag, "first");
        assert_eq!(store.remove("a.rs", CodeLine(3)).unwrap().tag, "first");
        assert_eq!(store.get("a.rs", CodeLine(3)).unwrap().tag, "second");
    }

    #[test]
    fn buckets_are_listed_by_path() {
        let mut store = LineStore::new();
        store.add(mark("z.rs", 0, ""));
        store.add(mark("a.rs", 0, ""));
        let files: Vec<_> = store.buckets().into_iter().map(|(f, _)| f).collect();
        assert_eq!(files, vec!["a.rs", "z.rs"]);
    }

    proptest! {
        #[test]
        fn proptest_buckets_stay_sorted(
            ops in prop::collection::vec((any::<bool>(), 0u32..20), 0..64),
        ) {
            let mut store = LineStore::new();
            for (insert, line) in ops {
                if insert {
                    store.add(mark("f.rs", line, ""));
                } else {
                    let _ = store.remove("f.rs", CodeLine(line));
                }
                let lines = lines(&store, "f.rs");
                prop_assert!(lines.windows(2).all(|w| w[0] <= w[1]));
            }
        }
    }
}
