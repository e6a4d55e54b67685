//! Canonical reading order for the books of a source directory.
//!
//! Book files are named `<ordinal>-<name>.txt`, so the numeric prefix decides the order.
//! Files sharing a prefix (or lacking one) fall back to their file names, which keeps the
//! output independent of the order the file system happens to list entries in.

use crate::source::SourceFile;
use std::cmp::Ordering;

/// Compare two books by ordinal, then by file name.
pub fn compare_books(a: &SourceFile, b: &SourceFile) -> Ordering {
    a.ordinal
        .cmp(&b.ordinal)
        .then_with(|| a.file_name().cmp(&b.file_name()))
}

/// Sort books into reading order.
pub fn sort_books(books: &mut [SourceFile]) {
    books.sort_by(compare_books);
}

#[cfg(test)]
mod test {
    use super::*;

    fn books(names: &[&str]) -> Vec<SourceFile> {
        names.iter().map(|n| SourceFile::new(n, &[])).collect()
    }

    fn names(books: &[SourceFile]) -> Vec<String> {
        books.iter().map(SourceFile::file_name).collect()
    }

    #[test]
    fn sorts_numerically_not_lexically() {
        let mut b = books(&["10-x.txt", "2-y.txt", "1-z.txt"]);
        sort_books(&mut b);
        assert_eq!(names(&b), vec!["1-z.txt", "2-y.txt", "10-x.txt"]);
    }

    #[test]
    fn unprefixed_files_sort_first() {
        let mut b = books(&["2-y.txt", "prologo.txt", "1-z.txt"]);
        sort_books(&mut b);
        assert_eq!(names(&b), vec!["prologo.txt", "1-z.txt", "2-y.txt"]);
    }

    #[test]
    fn ties_are_broken_by_file_name() {
        let mut forwards = books(&["3-b.txt", "3-a.txt", "c.txt", "a.txt"]);
        let mut backwards = books(&["a.txt", "c.txt", "3-a.txt", "3-b.txt"]);
        sort_books(&mut forwards);
        sort_books(&mut backwards);
        assert_eq!(names(&forwards), vec!["a.txt", "c.txt", "3-a.txt", "3-b.txt"]);
        assert_eq!(names(&forwards), names(&backwards));
    }
}
