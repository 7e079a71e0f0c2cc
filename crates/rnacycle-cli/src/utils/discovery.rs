use crate::error::{CliError, Result};
use crate::io::cycles::CYCLE_TABLE_SUFFIX;
use std::path::{Path, PathBuf};
use tracing::debug;

fn is_interaction_table(path: &Path) -> bool {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let is_output = path
        .file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(CYCLE_TABLE_SUFFIX));
    is_csv && !is_output
}

/// Expands the `-i` arguments into a sorted, duplicate-free list of interaction tables.
///
/// Files are taken as given. Directories contribute their `*.csv` entries (not recursively),
/// skipping cycle tables written by a previous run.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in std::fs::read_dir(path)? {
                let entry_path = entry?.path();
                if entry_path.is_file() && is_interaction_table(&entry_path) {
                    found.push(entry_path);
                }
            }
        } else if path.is_file() {
            found.push(path.clone());
        } else {
            return Err(CliError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Input path does not exist: {}", path.display()),
            )));
        }
    }
    found.sort();
    found.dedup();
    debug!(count = found.len(), "Collected interaction tables.");
    Ok(found)
}

/// Structure identifier for a table: its file stem.
pub fn structure_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn directories_contribute_csv_files_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.csv", "a.CSV", "a.cycles.csv", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let found = collect_inputs(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(
            found,
            vec![dir.path().join("a.CSV"), dir.path().join("b.csv")]
        );
    }

    #[test]
    fn explicit_files_are_kept_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("x.txt");
        fs::write(&file, "").unwrap();

        let found = collect_inputs(&[file.clone(), file.clone()]).unwrap();
        assert_eq!(found, vec![file]);
    }

    #[test]
    fn missing_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = collect_inputs(&[dir.path().join("missing.csv")]);
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn structure_id_is_the_file_stem() {
        assert_eq!(structure_id(Path::new("data/1ehz.csv")), "1ehz");
    }
}
