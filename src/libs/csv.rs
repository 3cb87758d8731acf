//! Flat-file expense store.
//!
//! The fallback backend used whenever no database is configured. Expenses
//! live in a single UTF-8 text file of comma-separated rows under a fixed
//! header:
//!
//! ```text
//! ID,Date,Description,Amount
//! 1,2024-12-02,Argentina car tickets,837
//! 2,2024-12-19,Lunch,20
//! ```
//!
//! There is no quoting mechanism — descriptions must not contain commas,
//! which the ledger service enforces before anything reaches this file.
//! The row set stays small, so every mutation rewrites the whole file; the
//! rewrite goes through a temp-file rename so the previous contents survive
//! a crash mid-write.

use crate::libs::data_storage::DataStorage;
use crate::libs::view;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// File name of the text store inside the application data directory.
pub const CSV_FILE_NAME: &str = "expenses.csv";

/// Header row written when the file is first created.
pub const HEADER: &str = "ID,Date,Description,Amount";

const FIELD_COUNT: usize = 4;

/// Failures of the text store.
///
/// `Missing` is the "file does not exist yet" case callers treat as an empty
/// store. `Corrupt` reports a hand-edited or truncated row instead of
/// guessing around it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("expense file does not exist")]
    Missing,
    #[error("malformed expense file: line {line}: {reason}")]
    Corrupt { line: usize, reason: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A raw file row with the 1-based line it came from.
#[derive(Debug, Clone)]
struct Row {
    line: usize,
    fields: Vec<String>,
}

impl Row {
    fn corrupt(&self, reason: String) -> StoreError {
        StoreError::Corrupt { line: self.line, reason }
    }

    fn id(&self) -> Result<i64, StoreError> {
        self.fields[0]
            .parse()
            .map_err(|_| self.corrupt(format!("invalid id '{}'", self.fields[0])))
    }

    fn date(&self) -> Result<NaiveDate, StoreError> {
        NaiveDate::parse_from_str(&self.fields[1], "%Y-%m-%d")
            .map_err(|_| self.corrupt(format!("invalid date '{}'", self.fields[1])))
    }

    fn amount(&self) -> Result<Decimal, StoreError> {
        Decimal::from_str(self.fields[3].trim())
            .map_err(|_| self.corrupt(format!("invalid amount '{}'", self.fields[3])))
    }
}

/// The text backend, bound to one file path.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    /// Opens the store at its default location in the data directory.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: DataStorage::new().get_path(CSV_FILE_NAME)?,
        })
    }

    /// Opens the store at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_rows(&self) -> Result<Vec<Row>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Err(StoreError::Missing),
            Err(err) => return Err(err.into()),
        };

        let mut rows = Vec::new();
        for (index, raw) in content.split('\n').enumerate() {
            // tolerate trailing blank lines
            if raw.trim().is_empty() {
                continue;
            }
            let fields: Vec<String> = raw.split(',').map(str::to_string).collect();
            if fields.len() != FIELD_COUNT {
                return Err(StoreError::Corrupt {
                    line: index + 1,
                    reason: format!("expected {} fields, found {}", FIELD_COUNT, fields.len()),
                });
            }
            rows.push(Row { line: index + 1, fields });
        }
        Ok(rows)
    }

    /// All raw rows in file order, header first.
    pub fn rows(&self) -> Result<Vec<Vec<String>>, StoreError> {
        Ok(self.read_rows()?.into_iter().map(|row| row.fields).collect())
    }

    /// Appends an expense, assigning the next id (max existing + 1).
    ///
    /// Creates the file with its header row and id 1 when it does not exist
    /// yet. Returns the assigned id.
    pub fn append(&self, date: NaiveDate, description: &str, amount: Decimal) -> Result<i64, StoreError> {
        let rows = match self.read_rows() {
            Ok(rows) if !rows.is_empty() => rows,
            Ok(_) | Err(StoreError::Missing) => {
                let content = format!("{}\n{}", HEADER, Self::line(1, date, description, amount));
                fs::write(&self.path, content)?;
                return Ok(1);
            }
            Err(err) => return Err(err),
        };

        let mut max_id = 0;
        for row in rows.iter().skip(1) {
            max_id = max_id.max(row.id()?);
        }
        let id = max_id + 1;

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(Self::line(id, date, description, amount).as_bytes())?;
        Ok(id)
    }

    fn line(id: i64, date: NaiveDate, description: &str, amount: Decimal) -> String {
        format!("{},{},{},{}\n", id, date.format("%Y-%m-%d"), description, amount)
    }

    /// Column-aligned display lines, data rows sorted by date ascending with
    /// the header always first.
    pub fn list_formatted(&self) -> Result<Vec<String>, StoreError> {
        let rows = self.read_rows()?;
        let Some((header, data)) = rows.split_first() else {
            return Ok(Vec::new());
        };

        let mut keyed = data
            .iter()
            .map(|row| Ok((row.date()?, row)))
            .collect::<Result<Vec<(NaiveDate, &Row)>, StoreError>>()?;
        keyed.sort_by_key(|(date, _)| *date);

        let mut display = Vec::with_capacity(rows.len());
        display.push(header.fields.clone());
        display.extend(keyed.into_iter().map(|(_, row)| row.fields.clone()));
        Ok(view::align_rows(&display))
    }

    /// Sums the amount column, optionally restricted to one calendar month
    /// (year-independent). A missing file is an empty store, not an error.
    pub fn summarize(&self, month: Option<u32>) -> Result<Decimal, StoreError> {
        let rows = match self.read_rows() {
            Ok(rows) => rows,
            Err(StoreError::Missing) => return Ok(Decimal::ZERO),
            Err(err) => return Err(err),
        };

        let mut total = Decimal::ZERO;
        for row in rows.iter().skip(1) {
            if let Some(month) = month {
                if row.date()?.month() != month {
                    continue;
                }
            }
            total += row.amount()?;
        }
        Ok(total)
    }

    /// Removes the row whose id matches, rewriting the file with the
    /// remaining rows in their original order. Returns false (and leaves the
    /// file untouched) when no row matched.
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let rows = self.read_rows()?;
        let needle = id.to_string();
        let kept: Vec<&Row> = rows.iter().filter(|row| row.fields[0] != needle).collect();
        if kept.len() == rows.len() {
            return Ok(false);
        }

        let mut content = kept.iter().map(|row| row.fields.join(",")).collect::<Vec<_>>().join("\n");
        content.push('\n');
        self.replace(&content)?;
        Ok(true)
    }

    // Whole-file rewrite through a sibling temp file, so an interrupted
    // write leaves the previous file in place.
    fn replace(&self, content: &str) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("csv.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
