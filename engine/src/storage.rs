//! Tabular persistence for [`Dataset`]
//!
//! Layout: a header row `Object, <attr_1>, <attr_2>, ...` followed by one
//! row per object with `0`/`1` cells in header order. Reading is lenient:
//! short rows are padded with 0, extra trailing cells are ignored, blank rows
//! are skipped and surrounding whitespace is trimmed. Cells other than `0`/`1`
//! read as 0 and repeated header names keep only their first column, both
//! with a warning.

use std::cell::RefCell;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use tracing::{debug, info, warn};

use crate::dataset::{Dataset, Record};
use crate::error::{EngineError, Result};

/// Label of the first header cell
pub const OBJECT_COLUMN: &str = "Object";

/// Where a dataset lives between rounds.
pub trait DatasetStore {
    /// Reconstruct the dataset from storage
    fn load(&self) -> Result<Dataset>;

    /// Write the dataset back, replacing what was stored
    fn persist(&self, dataset: &Dataset) -> Result<()>;
}

/// Parse a dataset table from any reader.
pub fn read_table<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    // (cell index, attribute) for every header column that is read
    let mut columns: Option<Vec<(usize, String)>> = None;
    let mut dataset = Dataset::new();
    let mut padded_rows = 0usize;

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 1);

        if columns.is_none() {
            // First non-blank row is the header; its first cell is the object label.
            let header = header_columns(&record);
            dataset = Dataset::with_attributes(header.iter().map(|(_, name)| name.as_str()));
            columns = Some(header);
            continue;
        }
        let Some(columns) = columns.as_ref() else {
            continue;
        };

        let name = record.get(0).unwrap_or_default();
        let mut values = Record::new();
        for (i, attribute) in columns {
            let value = match record.get(*i) {
                Some(cell) => parse_cell(cell, row, attribute),
                None => false,
            };
            values.set(attribute.clone(), value);
        }
        if record.len() < columns.last().map_or(1, |(i, _)| i + 1) {
            padded_rows += 1;
        }
        dataset.insert(name, values);
    }

    if padded_rows > 0 {
        warn!(rows = padded_rows, "Padded short dataset rows with 0");
    }

    Ok(dataset)
}

/// Attribute columns of a header row. Blank and repeated names are skipped.
fn header_columns(header: &StringRecord) -> Vec<(usize, String)> {
    let mut columns: Vec<(usize, String)> = Vec::with_capacity(header.len());
    for (i, name) in header.iter().enumerate().skip(1) {
        if name.is_empty() {
            warn!(column = i + 1, "Skipping unnamed dataset column");
        } else if columns.iter().any(|(_, seen)| seen == name) {
            warn!(column = i + 1, attribute = name, "Skipping repeated dataset column");
        } else {
            columns.push((i, name.to_string()));
        }
    }
    columns
}

/// Write a dataset table to any writer.
pub fn write_table<W: Write>(writer: W, dataset: &Dataset) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    let mut header = Vec::with_capacity(dataset.attributes().len() + 1);
    header.push(OBJECT_COLUMN);
    header.extend(dataset.attributes().iter().map(String::as_str));
    writer.write_record(&header)?;

    for (name, record) in dataset.objects() {
        let mut row = Vec::with_capacity(header.len());
        row.push(name);
        row.extend(
            dataset
                .attributes()
                .iter()
                .map(|attribute| if record.value(attribute) { "1" } else { "0" }),
        );
        writer.write_record(&row)?;
    }

    writer
        .flush()
        .map_err(|e| EngineError::io("flushing dataset table", e))
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.is_empty())
}

/// `1` is yes; `0`, empty and anything unreadable are no.
fn parse_cell(cell: &str, row: usize, attribute: &str) -> bool {
    match cell {
        "1" => true,
        "0" | "" => false,
        other => {
            warn!(row, attribute, value = other, "Unreadable dataset cell, reading it as 0");
            false
        }
    }
}

/// Dataset stored as a comma-separated file on disk.
///
/// A missing file loads as an empty dataset; it is created on first persist.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetStore for CsvStore {
    fn load(&self) -> Result<Dataset> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %self.path.display(), "Dataset file not found, starting empty");
                return Ok(Dataset::new());
            }
            Err(e) => {
                return Err(EngineError::io(
                    format!("opening {}", self.path.display()),
                    e,
                ))
            }
        };

        let dataset = read_table(file)?;
        info!(
            path = %self.path.display(),
            objects = dataset.len(),
            attributes = dataset.attributes().len(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    fn persist(&self, dataset: &Dataset) -> Result<()> {
        let file = File::create(&self.path)
            .map_err(|e| EngineError::io(format!("creating {}", self.path.display()), e))?;
        write_table(file, dataset)?;
        info!(
            path = %self.path.display(),
            objects = dataset.len(),
            attributes = dataset.attributes().len(),
            "Persisted dataset"
        );
        Ok(())
    }
}

/// Dataset table kept in memory, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RefCell<String>,
}

impl MemoryStore {
    /// Create a store holding the given table text
    pub fn new(table: impl Into<String>) -> Self {
        MemoryStore {
            table: RefCell::new(table.into()),
        }
    }

    /// Current table text
    pub fn contents(&self) -> String {
        self.table.borrow().clone()
    }
}

impl DatasetStore for MemoryStore {
    fn load(&self) -> Result<Dataset> {
        read_table(self.table.borrow().as_bytes())
    }

    fn persist(&self, dataset: &Dataset) -> Result<()> {
        let mut buffer = Vec::new();
        write_table(&mut buffer, dataset)?;
        let text = String::from_utf8(buffer).map_err(|e| {
            EngineError::io(
                "encoding dataset table",
                io::Error::new(io::ErrorKind::InvalidData, e),
            )
        })?;
        debug!(bytes = text.len(), "Persisted dataset to memory");
        *self.table.borrow_mut() = text;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    const ANIMALS: &str = "Object,Meows,Barks,Swims\nCat,1,0,0\nDog,0,1,1\nFish,0,0,1\n";

    fn rows(table: &str) -> BTreeSet<String> {
        table.lines().skip(1).map(str::to_string).collect()
    }

    #[test]
    fn test_load_basic_table() {
        let data = read_table(ANIMALS.as_bytes()).unwrap();
        assert_eq!(data.attributes(), &["Meows", "Barks", "Swims"]);
        assert_eq!(data.len(), 3);
        assert!(data.get("Dog").unwrap().value("Swims"));
        assert!(!data.get("Cat").unwrap().value("Swims"));
    }

    #[test]
    fn test_empty_storage_yields_empty_dataset() {
        let data = read_table("".as_bytes()).unwrap();
        assert!(data.is_empty());
        assert!(data.attributes().is_empty());
    }

    #[test]
    fn test_short_rows_are_zero_padded() {
        let data = read_table("Object,Meows,Barks,Swims\nCat,1\nFish\n".as_bytes()).unwrap();
        let cat = data.get("Cat").unwrap();
        assert!(cat.value("Meows"));
        assert!(cat.defines("Swims"));
        assert!(!cat.value("Swims"));
        assert_eq!(data.get("Fish").unwrap().len(), 3);
    }

    #[test]
    fn test_blank_rows_skipped_and_cells_trimmed() {
        let table = "Object, Meows, Barks\n\nCat, 1, 0\n , \nDog, 0, 1\n";
        let data = read_table(table.as_bytes()).unwrap();
        assert_eq!(data.attributes(), &["Meows", "Barks"]);
        let names: Vec<&str> = data.object_names().collect();
        assert_eq!(names, vec!["Cat", "Dog"]);
    }

    #[test]
    fn test_unreadable_cell_reads_as_zero() {
        let data = read_table("Object,Meows,Barks\nCat,yes,1\nDog,0,2\n".as_bytes()).unwrap();
        let cat = data.get("Cat").unwrap();
        assert!(cat.defines("Meows"));
        assert!(!cat.value("Meows"));
        assert!(cat.value("Barks"));
        assert!(!data.get("Dog").unwrap().value("Barks"));
    }

    #[test]
    fn test_repeated_header_keeps_first_column() {
        let store = MemoryStore::new("Object,Meows,Meows,Barks,\nCat,1,0,0,1\nDog,0,1,1\n");
        let data = store.load().unwrap();
        assert_eq!(data.attributes(), &["Meows", "Barks"]);
        assert!(data.get("Cat").unwrap().value("Meows"));
        assert!(data.get("Dog").unwrap().value("Barks"));

        store.persist(&data).unwrap();
        assert_eq!(store.contents(), "Object,Meows,Barks\nCat,1,0\nDog,0,1\n");
    }

    #[test]
    fn test_persist_after_load_reproduces_rows() {
        let store = MemoryStore::new(ANIMALS);
        let data = store.load().unwrap();
        store.persist(&data).unwrap();

        let written = store.contents();
        assert_eq!(written.lines().next(), Some("Object,Meows,Barks,Swims"));
        assert_eq!(rows(&written), rows(ANIMALS));
    }

    #[test]
    fn test_persist_writes_missing_values_as_zero() {
        let mut data = Dataset::with_attributes(["Meows"]);
        data.insert("Cat", Record::new().with("Meows", true));
        data.add_attribute("Purrs");

        let mut out = Vec::new();
        write_table(&mut out, &data).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Object,Meows,Purrs\nCat,1,0\n");
    }

    #[test]
    fn test_csv_store_missing_file_then_create() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path().join("data.csv"));
        assert!(store.load().unwrap().is_empty());

        let mut data = Dataset::with_attributes(["Swims"]);
        data.insert("Fish", Record::new().with("Swims", true));
        store.persist(&data).unwrap();

        assert_eq!(store.load().unwrap(), data);
    }
}
