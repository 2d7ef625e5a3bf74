/*
 * Trivial to understand utility functions that need not clutter other namespaces.
 */
use std::fs::{read_dir, File};
use std::io;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Lists out the full filepaths to all regular files in the target directory, sorted by name.
pub fn list_files<P>(dir: P) -> io::Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
{
    let mut files = Vec::new();
    for entry in read_dir(dir.as_ref())? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Reads a file into its lines.
pub fn read_lines<P>(path: P) -> io::Result<Vec<String>>
where
    P: AsRef<Path>,
{
    let reader = BufReader::new(File::open(path)?);
    reader.lines().collect()
}

/// Turns a title into a lower-case file name stem.
pub fn slug(title: &str) -> String {
    title.trim().to_lowercase().replace(' ', "_")
}
