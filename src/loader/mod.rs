//! Loading books from directories of CSV files.

pub mod csv;

use std::{fs, path::Path};

use tracing::debug;

use crate::errors::Result;
use crate::ledger::Book;

pub use self::csv::{CsvLoader, Dialect};

const CSV_EXTENSION: &str = "csv";

/// Loads every `*.csv` file directly inside `dir`, in file-name order, and
/// builds a book from them.
pub fn load_dir(dir: &Path) -> Result<Book> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|ext| ext.to_str()) == Some(CSV_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();

    let mut loader = CsvLoader::new();
    for path in &paths {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(file = %name, "loading csv");
        loader.load_csv(fs::File::open(path)?, &name)?;
    }
    loader.into_book()
}
